//! Local stand-in for the film service: `POST /ping` and `GET /films`.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use shared::protocol::{FILMS_ROUTE, PING_ROUTE};
use tracing::info;

mod api;
mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.bind_addr))?;

    let films = settings.films.len();
    let app = build_router(Arc::new(AppState {
        films: settings.films,
    }));

    info!(%addr, films, "film stub listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(PING_ROUTE, post(api::ping))
        .route(FILMS_ROUTE, get(api::list_films))
        .with_state(state)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
