//! Collaborators injected into the view reducer.

use eventdesk_core::auth::{AuthContext, Session};
use eventdesk_core::gateway::RemoteGateway;
use std::sync::Arc;

/// Environment dependencies for the view reducer
#[derive(Clone)]
pub struct ViewEnvironment {
    /// Remote API
    pub gateway: Arc<dyn RemoteGateway>,
    /// Source of the current session
    pub auth: Arc<dyn AuthContext>,
}

impl ViewEnvironment {
    /// Creates a new `ViewEnvironment`
    #[must_use]
    pub fn new(gateway: Arc<dyn RemoteGateway>, auth: Arc<dyn AuthContext>) -> Self {
        Self { gateway, auth }
    }

    /// Session as of now
    #[must_use]
    pub fn session(&self) -> Session {
        self.auth.session()
    }
}

impl std::fmt::Debug for ViewEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewEnvironment")
            .field("authenticated", &self.auth.session().is_authenticated())
            .finish_non_exhaustive()
    }
}
