use crate::domain::customer::Customer;
use crate::domain::expiry::{ExpiryAssessment, ExpiryBucket};
use crate::templates::components::{card, follow_up_status_form};
use crate::templates::{desktop_layout, fmt_day, fmt_timestamp};
use chrono::FixedOffset;
use maud::{html, Markup};

fn search_form(action: &str, q: &str) -> Markup {
    html! {
        form method="get" action=(action) class="search" {
            input type="search" name="q" value=(q) placeholder="Search name, phone, area or service";
            button type="submit" { "Search" }
        }
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn customer_table(customers: &[&Customer], offset: FixedOffset) -> Markup {
    html! {
        @if customers.is_empty() {
            p class="empty" { "No customers found." }
        } @else {
            table class="data" {
                thead {
                    tr {
                        th { "Name" }
                        th { "Phone" }
                        th { "Area" }
                        th { "Service" }
                        th { "Brand" }
                        th { "Service date" }
                        th { "Added" }
                    }
                }
                tbody {
                    @for c in customers {
                        tr {
                            td { a href=(format!("/customers/{}", c.id)) { (c.name) } }
                            td { (c.phone) }
                            td { (opt(&c.area)) }
                            td { (opt(&c.service)) }
                            td { (opt(&c.brand)) }
                            td { (opt(&c.service_date)) }
                            td { (fmt_timestamp(c.created_at, offset)) }
                        }
                    }
                }
            }
        }
    }
}

pub fn customers_page(
    operator: &str,
    customers: &[&Customer],
    q: &str,
    offset: FixedOffset,
) -> Markup {
    desktop_layout(
        "Customers",
        Some(operator),
        html! {
            main class="container" {
                h1 { "Customers" }
                (search_form("/customers", q))
                p class="muted" { (customers.len()) " shown" }
                (customer_table(customers, offset))
            }
        },
    )
}

pub fn month_customers_page(
    operator: &str,
    year: i32,
    month: u32,
    customers: &[&Customer],
    offset: FixedOffset,
) -> Markup {
    desktop_layout(
        "This month",
        Some(operator),
        html! {
            main class="container" {
                h1 { "Customers added " (format!("{month:02}/{year}")) }
                form method="get" action="/customers/month" class="inline" {
                    input type="number" name="month" min="1" max="12" value=(month);
                    input type="number" name="year" value=(year);
                    button type="submit" { "Show" }
                }
                (customer_table(customers, offset))
            }
        },
    )
}

pub fn customer_detail_page(
    operator: &str,
    customer: &Customer,
    assessment: &ExpiryAssessment,
    offset: FixedOffset,
) -> Markup {
    let days = assessment.days_until_expiry;
    desktop_layout(
        &customer.name,
        Some(operator),
        html! {
            main class="container" {
                h1 { (customer.name) }

                (card("Contact", html! {
                    dl {
                        dt { "Phone" } dd { (customer.phone) }
                        dt { "Email" } dd { (opt(&customer.email)) }
                        dt { "Address" } dd { (opt(&customer.address)) }
                        dt { "Area" } dd { (opt(&customer.area)) }
                    }
                }))

                (card("Service", html! {
                    dl {
                        dt { "Plan" } dd { (opt(&customer.service)) }
                        dt { "Brand" } dd { (opt(&customer.brand)) }
                        dt { "Service date" } dd { (opt(&customer.service_date)) }
                        dt { "Expires" } dd { (fmt_day(assessment.expiry_date)) }
                        dt { "Follow-up" } dd {
                            @match assessment.bucket {
                                ExpiryBucket::Completed => "Completed",
                                ExpiryBucket::Overdue => { (days.abs()) " days delayed" },
                                ExpiryBucket::Upcoming => { (days) " days left" },
                                ExpiryBucket::NotDue => "Not due",
                            }
                        }
                        dt { "Status" } dd { (follow_up_status_form(customer)) }
                        dt { "Added" } dd { (fmt_timestamp(customer.created_at, offset)) }
                    }
                }))

                div class="actions" {
                    a href=(format!("/customers/{}/edit", customer.id)) class="button" { "Edit" }
                    form method="post" action=(format!("/customers/{}/delete", customer.id))
                        class="inline"
                        onsubmit="return confirm('Move this customer to the bin?')"
                    {
                        button type="submit" class="danger" { "Delete" }
                    }
                }
            }
        },
    )
}
