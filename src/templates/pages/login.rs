use crate::templates::{components::email_cta_form, desktop_layout};
use maud::{html, Markup};

pub fn login_page() -> Markup {
    desktop_layout(
        "Sign in",
        None,
        html! {
            main class="container narrow" {
                h1 { "Staff sign in" }
                p class="lead" {
                    "Customer records, renewals and complaints are for shop staff only. "
                    "Enter your work email to get a one-time sign-in link."
                }

                (email_cta_form())
            }
        },
    )
}
