pub mod errors;
pub mod html;
pub mod json;
pub mod xlsx;

pub use errors::{html_error_response, json_error_response};
pub use html::{css_response, html_response, html_status_response, redirect, redirect_with_cookie};
pub use json::{json_response, json_status_response};
pub use xlsx::xlsx_response;
