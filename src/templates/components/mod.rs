use maud::{html, Markup};

pub mod email_cta;
pub mod error;
pub mod status;

pub use email_cta::email_cta_form;
pub use error::error_page;
pub use status::{complaint_status_form, follow_up_status_form};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Big number with a caption, linking to the list it counts.
pub fn stat(label: &str, value: usize, href: &str) -> Markup {
    html! {
        a class="stat" href=(href) {
            span class="stat-value" { (value) }
            span class="stat-label" { (label) }
        }
    }
}
