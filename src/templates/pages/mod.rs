pub mod bin;
pub mod check_email;
pub mod complaints;
pub mod customer_form;
pub mod customers;
pub mod dashboard;
pub mod follow_ups;
pub mod login;

pub use bin::bin_page;
pub use check_email::{check_email_content, check_email_page};
pub use complaints::{complaints_page, new_complaint_page};
pub use customer_form::{customer_form_page, CustomerFormVm};
pub use customers::{customer_detail_page, customers_page, month_customers_page};
pub use dashboard::{dashboard_page, DashboardVm};
pub use follow_ups::follow_ups_page;
pub use login::login_page;
