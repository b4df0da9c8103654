use crate::domain::customer::Customer;
use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Values to pre-fill. Empty for a new customer.
#[derive(Debug, Default)]
pub struct CustomerFormVm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub area: String,
    pub service: String,
    pub brand: String,
    pub service_date: String,
}

impl From<&Customer> for CustomerFormVm {
    fn from(c: &Customer) -> Self {
        let s = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: c.name.clone(),
            phone: c.phone.clone(),
            email: s(&c.email),
            address: s(&c.address),
            area: s(&c.area),
            service: s(&c.service),
            brand: s(&c.brand),
            service_date: s(&c.service_date),
        }
    }
}

/// New or edit form. `customer_id` picks the edit action.
pub fn customer_form_page(
    operator: &str,
    customer_id: Option<i64>,
    vm: &CustomerFormVm,
    error: Option<&str>,
) -> Markup {
    let (title, action) = match customer_id {
        Some(id) => ("Edit customer", format!("/customers/{id}")),
        None => ("Add customer", "/customers".to_string()),
    };

    desktop_layout(
        title,
        Some(operator),
        html! {
            main class="container narrow" {
                h1 { (title) }
                @if let Some(msg) = error {
                    p class="error" role="alert" { (msg) }
                }
                form method="post" action=(action) class="stacked" {
                    label { "Name" input type="text" name="name" value=(vm.name) required; }
                    label { "Phone" input type="tel" name="phone" value=(vm.phone) required; }
                    label { "Email" input type="email" name="email" value=(vm.email); }
                    label { "Address" textarea name="address" { (vm.address) } }
                    label { "Area" input type="text" name="area" value=(vm.area); }
                    label { "Service (months)" input type="text" name="service" inputmode="numeric" value=(vm.service) placeholder="3"; }
                    label { "Brand" input type="text" name="brand" value=(vm.brand); }
                    label { "Service date" input type="date" name="serviceDate" value=(vm.service_date); }
                    button type="submit" class="primary" { "Save" }
                }
            }
        },
    )
}
