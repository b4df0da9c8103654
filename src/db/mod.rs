pub mod auth;
pub mod bin;
pub mod complaints;
pub mod connection;
pub mod customers;
pub mod store;

pub use connection::Database;
pub use store::DataStore;
