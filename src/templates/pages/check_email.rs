use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Partial swapped in place of the login form by htmx.
///
/// The same message is shown whether or not the address is an operator.
/// `echo_link` (link, minutes until it expires) is only set when links are
/// echoed for local use.
pub fn check_email_content(email: &str, echo_link: Option<(&str, i64)>) -> Markup {
    html! {
        div class="text-center py-8 px-4 fade-in" {
            h3 class="text-lg leading-6 font-medium text-gray-900" { "Check your email" }

            div class="mt-2" {
                p class="text-sm text-gray-500" {
                    "If "
                    strong class="text-gray-900" { (email) }
                    " is a staff address, a sign-in link is on its way."
                }
            }

            @if let Some((link, minutes)) = echo_link {
                p class="mt-4 text-sm" {
                    "Local sign-in link: "
                    a href=(link) id="magic-link" { (link) }
                }
                p class="text-xs text-gray-500" { "Expires in " (minutes) " minutes." }
            }

            div class="mt-6" {
                a href="/login" class="text-sm font-medium text-blue-600 hover:text-blue-500" {
                    "Try with a different email"
                }
            }
        }
    }
}

/// Full page version for plain form posts without htmx.
pub fn check_email_page(email: &str, echo_link: Option<(&str, i64)>) -> Markup {
    desktop_layout(
        "Check your email",
        None,
        html! {
            main class="container narrow" {
                (check_email_content(email, echo_link))
            }
        },
    )
}
