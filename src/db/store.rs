// src/db/store.rs
//! The data-store operations the rest of the app depends on.

use crate::db::connection::Database;
use crate::db::{bin, complaints, customers};
use crate::domain::complaint::{Complaint, ComplaintStatus, NewComplaint};
use crate::domain::customer::{Customer, CustomerPatch, DeletedCustomer, NewCustomer};
use crate::errors::ServerError;

pub trait DataStore {
    fn list_customers(&self) -> Result<Vec<Customer>, ServerError>;
    fn get_customer(&self, id: i64) -> Result<Option<Customer>, ServerError>;
    fn create_customer(&self, new: NewCustomer, now: i64) -> Result<Customer, ServerError>;
    /// All fields of `patch` land in one atomic write.
    fn update_customer(&self, id: i64, patch: &CustomerPatch) -> Result<Customer, ServerError>;
    fn archive_and_delete_customer(&self, id: i64, now: i64)
        -> Result<DeletedCustomer, ServerError>;
    fn list_deleted_customers(&self) -> Result<Vec<DeletedCustomer>, ServerError>;

    fn create_complaint(&self, new: NewComplaint, now: i64) -> Result<Complaint, ServerError>;
    fn list_complaints(&self) -> Result<Vec<Complaint>, ServerError>;
    fn update_complaint_status(
        &self,
        id: i64,
        status: ComplaintStatus,
    ) -> Result<Complaint, ServerError>;
    fn delete_complaint(&self, id: i64) -> Result<(), ServerError>;
}

impl DataStore for Database {
    fn list_customers(&self) -> Result<Vec<Customer>, ServerError> {
        self.with_conn(|conn| customers::list_customers(conn))
    }

    fn get_customer(&self, id: i64) -> Result<Option<Customer>, ServerError> {
        self.with_conn(|conn| customers::get_customer(conn, id))
    }

    fn create_customer(&self, new: NewCustomer, now: i64) -> Result<Customer, ServerError> {
        let new = new.validated()?;
        self.with_conn(|conn| customers::insert_customer(conn, &new, now))
    }

    fn update_customer(&self, id: i64, patch: &CustomerPatch) -> Result<Customer, ServerError> {
        self.with_conn(|conn| customers::update_customer(conn, id, patch))
    }

    fn archive_and_delete_customer(
        &self,
        id: i64,
        now: i64,
    ) -> Result<DeletedCustomer, ServerError> {
        self.with_conn(|conn| bin::archive_and_delete_customer(conn, id, now))
    }

    fn list_deleted_customers(&self) -> Result<Vec<DeletedCustomer>, ServerError> {
        self.with_conn(|conn| bin::list_deleted_customers(conn))
    }

    fn create_complaint(&self, new: NewComplaint, now: i64) -> Result<Complaint, ServerError> {
        self.with_conn(|conn| complaints::create_complaint(conn, new, now))
    }

    fn list_complaints(&self) -> Result<Vec<Complaint>, ServerError> {
        self.with_conn(|conn| complaints::list_complaints(conn))
    }

    fn update_complaint_status(
        &self,
        id: i64,
        status: ComplaintStatus,
    ) -> Result<Complaint, ServerError> {
        self.with_conn(|conn| complaints::update_complaint_status(conn, id, status))
    }

    fn delete_complaint(&self, id: i64) -> Result<(), ServerError> {
        self.with_conn(|conn| complaints::delete_complaint(conn, id))
    }
}
