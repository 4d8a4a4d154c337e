//! Handlers mimicking the remote film service closely enough for the client.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use shared::{
    domain::Film,
    error::{FailureEntry, StructuredFailure},
    protocol::EMAIL_HEADER,
};
use tracing::info;

use crate::app_state::AppState;

pub(crate) async fn ping() -> &'static str {
    "pong"
}

pub(crate) async fn list_films(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Film>>, (StatusCode, Json<StructuredFailure>)> {
    let email = headers.get(EMAIL_HEADER).map(|v| v.to_str().unwrap_or_default());

    if let Err(entry) = validate_email(email) {
        info!(email = email.unwrap_or_default(), "films: rejected email header");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(StructuredFailure {
                errors: vec![entry],
            }),
        ));
    }

    Ok(Json(state.films.clone()))
}

pub(crate) fn validate_email(email: Option<&str>) -> Result<(), FailureEntry> {
    let invalid = || {
        let mut entry = FailureEntry::new("headers", EMAIL_HEADER).with_msg("Invalid value");
        entry.value = email.map(|v| serde_json::Value::String(v.to_string()));
        entry
    };

    let email = email.map(str::trim).ok_or_else(invalid)?;
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@');
    if local.is_empty() || !domain_ok {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
