use shared::{
    domain::{Film, Identity},
    error::ClassifiedError,
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{classifier::interpret, session::SessionState, transport::Transport};

pub const TRANSPORT_FAULT_MESSAGE: &str = "failed to reach the film service";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    ShowingAuth,
    Loading,
    ShowingFilms {
        identity: Identity,
        films: Vec<Film>,
    },
    ShowingError {
        message: String,
    },
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowingAuth => "showing_auth",
            Self::Loading => "loading",
            Self::ShowingFilms { .. } => "showing_films",
            Self::ShowingError { .. } => "showing_error",
        }
    }

    /// Films and errors end a flow cycle; a new cycle starts from [`AppFlow::start`].
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ShowingFilms { .. } | Self::ShowingError { .. })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("identity can only be submitted while the auth form is shown (current state: {state})")]
    NotAwaitingAuth { state: &'static str },
}

/// Drives auth form -> film loading -> films or error.
///
/// Every transition takes `&mut self`, so two loading cycles can never
/// overlap.
pub struct AppFlow<T> {
    transport: T,
    session: SessionState,
    state: FlowState,
    last_auth_error: Option<ClassifiedError>,
}

impl<T: Transport> AppFlow<T> {
    pub fn new(transport: T, session: SessionState) -> Self {
        Self {
            transport,
            session,
            state: FlowState::ShowingAuth,
            last_auth_error: None,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Why the auth form was shown again, if the service rejected the identity.
    pub fn last_auth_error(&self) -> Option<&ClassifiedError> {
        self.last_auth_error.as_ref()
    }

    pub async fn start(&mut self) -> &FlowState {
        match self.session.identity().await {
            Some(identity) => self.load(identity).await,
            None => {
                info!("flow: no identity, showing auth form");
                self.state = FlowState::ShowingAuth;
            }
        }
        &self.state
    }

    pub async fn submit(&mut self, identity: Identity) -> Result<&FlowState, FlowError> {
        if self.state != FlowState::ShowingAuth {
            return Err(FlowError::NotAwaitingAuth {
                state: self.state.name(),
            });
        }

        self.session.set_identity(identity.clone()).await;
        self.load(identity).await;
        Ok(&self.state)
    }

    async fn load(&mut self, identity: Identity) {
        self.state = FlowState::Loading;
        self.last_auth_error = None;

        let raw = match self.transport.fetch_items(Some(&identity)).await {
            Ok(raw) => raw,
            Err(error) => {
                error!(%error, "flow: film request did not complete");
                self.state = FlowState::ShowingError {
                    message: TRANSPORT_FAULT_MESSAGE.to_string(),
                };
                return;
            }
        };

        let status = raw.status;
        self.state = match interpret(raw) {
            Ok(films) => {
                info!(count = films.len(), "flow: films loaded");
                FlowState::ShowingFilms { identity, films }
            }
            Err(err @ ClassifiedError::AuthRequired { .. }) => {
                warn!(status, error = %err, "flow: identity rejected, showing auth form");
                self.last_auth_error = Some(err);
                FlowState::ShowingAuth
            }
            Err(err) => {
                warn!(status, error = %err, "flow: film request failed");
                FlowState::ShowingError {
                    message: err.message().to_string(),
                }
            }
        };
    }
}

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod tests;
