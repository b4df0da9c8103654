use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::domain::clock::SystemClock;
use crate::router::{handle, AppState};
use astra::Server;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod forms;
mod handlers;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let db = Database::new(config.database_path.clone());
    if let Err(e) = init_db(&db) {
        error!(error = %e, path = %config.database_path, "database initialization failed");
        std::process::exit(1);
    }

    let addr = config.bind_addr;
    let workers = config.max_workers;
    let state = AppState {
        db,
        clock: Arc::new(SystemClock::new(config.utc_offset)),
        config,
    };

    info!(%addr, workers, "starting server");
    let server = Server::bind(&addr).max_workers(workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => responses::html_error_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down");
}
