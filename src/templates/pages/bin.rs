use crate::domain::customer::DeletedCustomer;
use crate::templates::{desktop_layout, fmt_timestamp};
use chrono::FixedOffset;
use maud::{html, Markup};

pub fn bin_page(operator: &str, deleted: &[DeletedCustomer], offset: FixedOffset) -> Markup {
    desktop_layout(
        "Bin",
        Some(operator),
        html! {
            main class="container" {
                h1 { "Bin" }
                p class="muted" { "Customers removed from the active list." }
                @if deleted.is_empty() {
                    p class="empty" { "The bin is empty." }
                } @else {
                    table class="data" {
                        thead {
                            tr {
                                th { "Name" }
                                th { "Phone" }
                                th { "Area" }
                                th { "Service" }
                                th { "Brand" }
                                th { "Added" }
                                th { "Deleted" }
                            }
                        }
                        tbody {
                            @for d in deleted {
                                tr {
                                    td { (d.name) }
                                    td { (d.phone) }
                                    td { (d.area.as_deref().unwrap_or("")) }
                                    td { (d.service.as_deref().unwrap_or("")) }
                                    td { (d.brand.as_deref().unwrap_or("")) }
                                    td { (fmt_timestamp(d.created_at, offset)) }
                                    td { (fmt_timestamp(d.deleted_at, offset)) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
