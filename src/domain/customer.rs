// src/domain/customer.rs

use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUpStatus {
    #[default]
    Pending,
    Completed,
}

impl FollowUpStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FollowUpStatus::Pending => "pending",
            FollowUpStatus::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ServerError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(FollowUpStatus::Pending),
            "completed" => Ok(FollowUpStatus::Completed),
            other => Err(ServerError::Validation(format!(
                "unknown follow-up status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub area: Option<String>,
    /// Renewal period in months, as entered. See `dates::service_months`.
    pub service: Option<String>,
    pub brand: Option<String>,
    /// Start of the current service period (`YYYY-MM-DD`), as entered.
    pub service_date: Option<String>,
    pub follow_up_status: FollowUpStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a customer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub area: Option<String>,
    pub service: Option<String>,
    pub brand: Option<String>,
    pub service_date: Option<String>,
}

impl NewCustomer {
    /// Trims everything, turns blank optional fields into `None`
    /// and rejects a blank name or phone.
    pub fn validated(self) -> Result<Self, ServerError> {
        Ok(Self {
            name: required("name", &self.name)?,
            phone: required("phone", &self.phone)?,
            email: optional(self.email),
            address: optional(self.address),
            area: optional(self.area),
            service: optional(self.service),
            brand: optional(self.brand),
            service_date: optional(self.service_date),
        })
    }
}

/// A partial update. `None` leaves a column untouched; for optional columns
/// `Some("")` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub area: Option<String>,
    pub service: Option<String>,
    pub brand: Option<String>,
    pub service_date: Option<String>,
    pub follow_up_status: Option<FollowUpStatus>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        *self == CustomerPatch::default()
    }

    pub fn validate(&self) -> Result<(), ServerError> {
        if let Some(name) = &self.name {
            required("name", name)?;
        }
        if let Some(phone) = &self.phone {
            required("phone", phone)?;
        }
        Ok(())
    }
}

/// The reduced snapshot kept in the bin after a customer is deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCustomer {
    pub id: i64,
    pub original_id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub area: Option<String>,
    pub service: Option<String>,
    pub brand: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: DateTime<Utc>,
}

fn required(field: &str, value: &str) -> Result<String, ServerError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ServerError::Validation(format!("{field} is required")));
    }
    Ok(v.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Timestamps are stored as unix seconds.
pub fn from_unix(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
