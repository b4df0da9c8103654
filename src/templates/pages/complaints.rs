use crate::domain::complaint::Complaint;
use crate::templates::components::complaint_status_form;
use crate::templates::{desktop_layout, fmt_timestamp};
use chrono::FixedOffset;
use maud::{html, Markup};

const SUBJECT_PREVIEW: usize = 15;

fn preview(subject: &str) -> String {
    if subject.chars().count() > SUBJECT_PREVIEW {
        let head: String = subject.chars().take(SUBJECT_PREVIEW).collect();
        format!("{head}....")
    } else {
        subject.to_string()
    }
}

pub fn complaints_page(
    operator: &str,
    complaints: &[&Complaint],
    q: &str,
    offset: FixedOffset,
) -> Markup {
    desktop_layout(
        "Complaints",
        Some(operator),
        html! {
            main class="container" {
                div class="page-head" {
                    h1 { "Customer complaints" }
                    a href="/complaints/new" class="button primary" { "New complaint" }
                }
                form method="get" action="/complaints" class="search" {
                    input type="search" name="q" value=(q) placeholder="Search by customer name or subject...";
                    button type="submit" { "Search" }
                }

                @if complaints.is_empty() {
                    p class="empty" { "No complaints found." }
                } @else {
                    table class="data" {
                        thead {
                            tr {
                                th { "Customer" }
                                th { "Subject" }
                                th { "Logged" }
                                th { "Status" }
                                th {}
                            }
                        }
                        tbody {
                            @for c in complaints {
                                tr {
                                    td { (c.customer_name) }
                                    td {
                                        details {
                                            summary { (preview(&c.subject)) }
                                            p { strong { (c.subject) } }
                                            p { (c.body) }
                                        }
                                    }
                                    td { (fmt_timestamp(c.created_at, offset)) }
                                    td { (complaint_status_form(c)) }
                                    td {
                                        form method="post" action=(format!("/complaints/{}/delete", c.id))
                                            onsubmit="return confirm('Delete this complaint?')"
                                        {
                                            button type="submit" class="danger" { "Delete" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Customer names feed the datalist so the operator picks a known customer.
pub fn new_complaint_page(operator: &str, customer_names: &[String], error: Option<&str>) -> Markup {
    desktop_layout(
        "New complaint",
        Some(operator),
        html! {
            main class="container narrow" {
                h1 { "New complaint" }
                @if let Some(msg) = error {
                    p class="error" role="alert" { (msg) }
                }
                form method="post" action="/complaints" class="stacked" {
                    label {
                        "Customer name"
                        input type="text" name="customerName" list="customer-names" autocomplete="off" required;
                    }
                    datalist id="customer-names" {
                        @for name in customer_names {
                            option value=(name) {}
                        }
                    }
                    label { "Subject" input type="text" name="subject" required; }
                    label { "Details" textarea name="body" rows="5" required {} }
                    button type="submit" class="primary" { "Submit complaint" }
                }
            }
        },
    )
}
