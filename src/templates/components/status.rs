use crate::domain::complaint::{Complaint, ComplaintStatus};
use crate::domain::customer::{Customer, FollowUpStatus};
use maud::{html, Markup};

/// Pending / Completed picker. Choosing Completed records a renewal.
pub fn follow_up_status_form(customer: &Customer) -> Markup {
    let action = format!("/customers/{}/status", customer.id);
    html! {
        form method="post" action=(action) class="inline status-form" {
            select name="followUpStatus" onchange="this.form.submit()" {
                @for status in [FollowUpStatus::Pending, FollowUpStatus::Completed] {
                    option value=(status.as_str()) selected[customer.follow_up_status == status] {
                        (status_label(status.as_str()))
                    }
                }
            }
            noscript { button type="submit" { "Save" } }
        }
    }
}

pub fn complaint_status_form(complaint: &Complaint) -> Markup {
    let action = format!("/complaints/{}/status", complaint.id);
    html! {
        form method="post" action=(action) class="inline status-form" {
            select name="status" onchange="this.form.submit()" {
                @for status in [ComplaintStatus::Pending, ComplaintStatus::Resolved] {
                    option value=(status.as_str()) selected[complaint.status == status] {
                        (status_label(status.as_str()))
                    }
                }
            }
            noscript { button type="submit" { "Save" } }
        }
    }
}

fn status_label(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
