// src/handlers/auth.rs
//! Sign-in by magic link, sessions and sign-out.
use crate::auth::magic::{MagicLinkConfig, MagicLinkService};
use crate::auth::sessions::{
    cleared_session_cookie, create_session, end_session, load_operator, session_cookie,
    token_from_headers, Operator,
};
use crate::errors::{ResultResp, ServerError};
use crate::forms::{self, Params};
use crate::responses::{html_response, redirect, redirect_with_cookie};
use crate::router::AppState;
use crate::templates::pages::{check_email_content, check_email_page, login_page};
use astra::Request;
use http::HeaderMap;
use tracing::{info, warn};

pub fn login(state: &AppState, headers: &HeaderMap) -> ResultResp {
    // Already signed in: skip the form.
    if current_operator(state, headers)?.is_some() {
        return redirect("/dashboard");
    }
    html_response(login_page())
}

pub fn request_link(req: Request, state: &AppState) -> ResultResp {
    let htmx = req.headers().contains_key("HX-Request");
    let params = forms::parse_form(&forms::read_body(req.into_body())?);
    let email = forms::required(&params, "email")?;

    let service = MagicLinkService::new(MagicLinkConfig::from_app(&state.config));
    let now = state.clock.unix_now();
    let issued = state
        .db
        .with_conn(|conn| service.request_link(conn, &email, now))?;

    let echo = issued
        .as_ref()
        .filter(|_| state.config.echo_magic_links)
        .map(|i| (i.link.as_str(), (i.expires_at - now).max(0) / 60));

    if htmx {
        html_response(check_email_content(&email, echo))
    } else {
        html_response(check_email_page(&email, echo))
    }
}

pub fn redeem(state: &AppState, query: &Params) -> ResultResp {
    let token = query.get("token").map(String::as_str).unwrap_or_default();
    let service = MagicLinkService::new(MagicLinkConfig::from_app(&state.config));
    let now = state.clock.unix_now();
    let ttl = state.config.session_ttl_secs;

    let (operator_id, email, session) = state.db.with_conn(|conn| {
        let redeemed = service.redeem(conn, token, now)?;
        let session = create_session(conn, redeemed.operator_id, now, ttl)?;
        Ok((redeemed.operator_id, redeemed.email, session))
    })
    .inspect_err(|e| warn!(error = %e, "magic link rejected"))?;

    info!(operator_id, %email, "operator signed in");
    redirect_with_cookie("/dashboard", &session_cookie(&session, ttl))
}

pub fn logout(state: &AppState, headers: &HeaderMap) -> ResultResp {
    if let Some(token) = token_from_headers(headers) {
        let now = state.clock.unix_now();
        state.db.with_conn(|conn| end_session(conn, &token, now))?;
        info!("operator signed out");
    }
    redirect_with_cookie("/login", &cleared_session_cookie())
}

/// The operator behind the request's session, if it is live.
pub fn current_operator(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<Operator>, ServerError> {
    let Some(token) = token_from_headers(headers) else {
        return Ok(None);
    };
    let now = state.clock.unix_now();
    state.db.with_conn(|conn| load_operator(conn, &token, now))
}
