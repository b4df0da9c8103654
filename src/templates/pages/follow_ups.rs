use crate::domain::customer::Customer;
use crate::domain::expiry::{ExpiryAssessment, ExpiryBucket};
use crate::templates::components::follow_up_status_form;
use crate::templates::{desktop_layout, fmt_day};
use maud::{html, Markup};

fn days_cell(a: &ExpiryAssessment) -> String {
    if a.days_until_expiry < 0 {
        format!("{} days delayed", -a.days_until_expiry)
    } else {
        format!("{} days left", a.days_until_expiry)
    }
}

/// Upcoming or overdue list. Rows keep store order (newest customers first).
pub fn follow_ups_page(
    operator: &str,
    bucket: ExpiryBucket,
    rows: &[(&Customer, ExpiryAssessment)],
) -> Markup {
    let title = match bucket {
        ExpiryBucket::Overdue => "Service delay",
        _ => "Service soon",
    };
    let export = format!("/follow-ups/export?bucket={}", bucket.label());

    desktop_layout(
        title,
        Some(operator),
        html! {
            main class="container" {
                div class="page-head" {
                    h1 { (title) }
                    a href=(export) class="button" { "Download .xlsx" }
                }

                @if rows.is_empty() {
                    p class="empty" { "Nothing to follow up." }
                } @else {
                    table class="data" {
                        thead {
                            tr {
                                th { "#" }
                                th { "Name" }
                                th { "Phone" }
                                th { "Area" }
                                th { "Service" }
                                th { "Expiry date" }
                                th { "Days" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            @for (i, (c, a)) in rows.iter().enumerate() {
                                tr class=(bucket.label()) {
                                    td { (i + 1) }
                                    td { a href=(format!("/customers/{}", c.id)) { (c.name) } }
                                    td { (c.phone) }
                                    td { (c.area.as_deref().unwrap_or("")) }
                                    td {
                                        @if let Some(s) = &c.service { (s) "M" }
                                    }
                                    td { (fmt_day(a.expiry_date)) }
                                    td { (days_cell(a)) }
                                    td { (follow_up_status_form(c)) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
