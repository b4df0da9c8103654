use maud::{html, Markup, DOCTYPE};

const NAV: [(&str, &str); 8] = [
    ("/dashboard", "Dashboard"),
    ("/customers", "Customers"),
    ("/customers/new", "Add Customer"),
    ("/customers/month", "This Month"),
    ("/follow-ups/upcoming", "Service Soon"),
    ("/follow-ups/overdue", "Service Delay"),
    ("/complaints", "Complaints"),
    ("/bin", "Bin"),
];

/// Page shell. `operator` is the signed-in email; the nav is only shown when present.
pub fn desktop_layout(title: &str, operator: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Renewal Desk" }
                link rel="stylesheet" href="/static/main.css";
                script src="https://unpkg.com/htmx.org@1.9.12" defer {};
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    h3 { a href="/" { "Renewal Desk" } }
                    @if let Some(email) = operator {
                        nav {
                            ul {
                                @for (href, label) in NAV {
                                    li { a href=(href) { (label) } }
                                }
                            }
                        }
                        form action="/logout" method="post" class="inline" {
                            span class="text-sm" { (email) " " }
                            button type="submit" class="link" { "Log out" }
                        }
                    } @else {
                        a href="/login" class="text-base font-medium" { "Login" }
                    }
                }
                (content)
            }
        }
    }
}
