use crate::domain::expiry::FollowUpSummary;
use crate::templates::components::{card, stat};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct DashboardVm {
    pub operator: String,
    pub total_customers: usize,
    pub new_this_month: usize,
    pub summary: FollowUpSummary,
    pub pending_complaints: usize,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        "Dashboard",
        Some(vm.operator.as_str()),
        html! {
            main class="container" {
                h1 { "Dashboard" }
                p { "Signed in as " strong { (vm.operator) } }

                div class="stats" {
                    (stat("Customers", vm.total_customers, "/customers"))
                    (stat("New this month", vm.new_this_month, "/customers/month"))
                    (stat("Service soon", vm.summary.upcoming, "/follow-ups/upcoming"))
                    (stat("Service delayed", vm.summary.overdue, "/follow-ups/overdue"))
                    (stat("Open complaints", vm.pending_complaints, "/complaints"))
                }

                (card("Follow-ups", html! {
                    table class="summary" {
                        tbody {
                            tr { th { "Not due" } td { (vm.summary.not_due) } }
                            tr { th { "Upcoming" } td { (vm.summary.upcoming) } }
                            tr { th { "Overdue" } td { (vm.summary.overdue) } }
                            tr { th { "Completed" } td { (vm.summary.completed) } }
                            tr class="total" { th { "Total" } td { (vm.summary.total()) } }
                        }
                    }
                }))

                (card("Quick actions", html! {
                    ul {
                        li { a href="/customers/new" { "Add a customer" } }
                        li { a href="/complaints/new" { "Log a complaint" } }
                        li { a href="/follow-ups/export?bucket=upcoming" { "Download upcoming list" } }
                        li { a href="/follow-ups/export?bucket=overdue" { "Download overdue list" } }
                    }
                }))
            }
        },
    )
}
