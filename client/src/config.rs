//! Configuration management for the EventDesk client.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::actions::CollectionKind;
use crate::error::ConfigError;
use crate::state::DisplayMode;
use eventdesk_core::auth::Session;
use serde::{Deserialize, Serialize};
use std::env;

/// Endpoint used when `EVENTDESK_ENDPOINT` is unset
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/graphql";

/// Which collections the controller loads on mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewKind {
    /// Events page
    #[default]
    Events,
    /// Bookings page
    Bookings,
    /// Both collections in one controller
    Both,
}

impl ViewKind {
    /// Collections loaded on mount
    #[must_use]
    pub const fn collections(self) -> &'static [CollectionKind] {
        match self {
            Self::Events => &[CollectionKind::Events],
            Self::Bookings => &[CollectionKind::Bookings],
            Self::Both => &[CollectionKind::Events, CollectionKind::Bookings],
        }
    }

    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "events" => Ok(Self::Events),
            "bookings" => Ok(Self::Bookings),
            "both" => Ok(Self::Both),
            _ => Err(ConfigError::InvalidView(raw.to_string())),
        }
    }
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Initial session (anonymous unless both token and user id are set)
    pub session: Session,
    /// Collections to load on mount
    pub view: ViewKind,
    /// Initial display mode
    pub display_mode: DisplayMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            session: Session::anonymous(),
            view: ViewKind::default(),
            display_mode: DisplayMode::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `EVENTDESK_ENDPOINT` | `http://localhost:8000/graphql` |
    /// | `EVENTDESK_TOKEN` | unset |
    /// | `EVENTDESK_USER_ID` | unset |
    /// | `EVENTDESK_VIEW` | `events` |
    /// | `EVENTDESK_DISPLAY` | `list` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable holds an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup("EVENTDESK_ENDPOINT")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }

        let token = lookup("EVENTDESK_TOKEN").filter(|value| !value.is_empty());
        let user_id = lookup("EVENTDESK_USER_ID").filter(|value| !value.is_empty());
        let session = match (token, user_id) {
            (Some(token), Some(user_id)) => Session::signed_in(token, user_id),
            (None, None) => Session::anonymous(),
            _ => return Err(ConfigError::PartialSession),
        };

        let view = lookup("EVENTDESK_VIEW")
            .map(|raw| ViewKind::parse(&raw))
            .transpose()?
            .unwrap_or_default();

        let display_mode = lookup("EVENTDESK_DISPLAY")
            .map(|raw| DisplayMode::from_token(&raw))
            .unwrap_or_default();

        Ok(Self {
            endpoint,
            session,
            view,
            display_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("EVENTDESK_ENDPOINT", "https://api.example.com/graphql"),
            ("EVENTDESK_TOKEN", "tok"),
            ("EVENTDESK_USER_ID", "u1"),
            ("EVENTDESK_VIEW", "Both"),
            ("EVENTDESK_DISPLAY", "chart"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "https://api.example.com/graphql");
        assert_eq!(config.session, Session::signed_in("tok", "u1"));
        assert_eq!(config.view, ViewKind::Both);
        assert_eq!(config.display_mode, DisplayMode::Chart);
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let result = ClientConfig::from_lookup(lookup(&[("EVENTDESK_ENDPOINT", "ftp://x")]));
        assert_eq!(result, Err(ConfigError::InvalidEndpoint("ftp://x".into())));
    }

    #[test]
    fn rejects_token_without_user() {
        let result = ClientConfig::from_lookup(lookup(&[("EVENTDESK_TOKEN", "tok")]));
        assert_eq!(result, Err(ConfigError::PartialSession));
    }

    #[test]
    fn rejects_unknown_view() {
        let result = ClientConfig::from_lookup(lookup(&[("EVENTDESK_VIEW", "calendar")]));
        assert!(matches!(result, Err(ConfigError::InvalidView(_))));
    }
}
