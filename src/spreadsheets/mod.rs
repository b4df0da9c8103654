pub mod follow_ups_xlsx;

pub use follow_ups_xlsx::export_follow_ups_xlsx;
