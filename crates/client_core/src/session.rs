use std::sync::Arc;

use shared::domain::Identity;
use tokio::sync::RwLock;

/// Process-lifetime holder of the current identity.
///
/// Starts anonymous and only ever moves to authenticated through
/// [`SessionState::set_identity`]; there is no way back to anonymous.
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    identity: Arc<RwLock<Option<Identity>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_identity(&self, identity: Identity) {
        *self.identity.write().await = Some(identity);
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.identity.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.identity.read().await.is_some()
    }
}
