//! Authentication context consumed by the view controller.
//!
//! The controller never stores credentials. It asks an [`AuthContext`] for the current
//! [`Session`] at the moment an operation needs it, so signing out mid-flight is
//! observed by the next operation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

use crate::model::UserId;

/// Credentials of the current viewer. Both fields are absent for anonymous viewers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for authenticated operations
    pub token: Option<String>,
    /// Id of the signed-in user
    pub user_id: Option<UserId>,
}

impl Session {
    /// Anonymous session
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            token: None,
            user_id: None,
        }
    }

    /// Signed-in session
    #[must_use]
    pub fn signed_in(token: impl Into<String>, user_id: impl Into<UserId>) -> Self {
        Self {
            token: Some(token.into()),
            user_id: Some(user_id.into()),
        }
    }

    /// True when a bearer token is available
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Source of the current [`Session`].
pub trait AuthContext: Send + Sync {
    /// Current session, read at call time
    fn session(&self) -> Session;
}

/// A mutable [`AuthContext`] backed by a `watch` channel.
///
/// Sign-in and sign-out are visible to every holder immediately; observers can also
/// await changes through [`SessionCell::watch`].
#[derive(Debug, Clone)]
pub struct SessionCell {
    sender: Arc<watch::Sender<Session>>,
}

impl SessionCell {
    /// Create a cell holding `session`
    #[must_use]
    pub fn new(session: Session) -> Self {
        let (sender, _) = watch::channel(session);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Replace the session with a signed-in one
    pub fn sign_in(&self, token: impl Into<String>, user_id: impl Into<UserId>) {
        self.sender.send_replace(Session::signed_in(token, user_id));
    }

    /// Drop all credentials
    pub fn sign_out(&self) {
        self.sender.send_replace(Session::anonymous());
    }

    /// Subscribe to session changes
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.sender.subscribe()
    }
}

impl Default for SessionCell {
    fn default() -> Self {
        Self::new(Session::anonymous())
    }
}

impl AuthContext for SessionCell {
    fn session(&self) -> Session {
        self.sender.borrow().clone()
    }
}

impl AuthContext for Session {
    fn session(&self) -> Session {
        self.clone()
    }
}
