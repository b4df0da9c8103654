pub mod clock;
pub mod complaint;
pub mod customer;
pub mod dates;
pub mod expiry;
pub mod follow_up;
pub mod search;
