//! Session state types

use hospitix_core::Role;
use serde::Serialize;

/// The two states of the authentication state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "role", rename_all = "lowercase")]
pub enum SessionState {
    Anonymous,
    Authenticated(Role),
}

impl SessionState {
    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(role) => Some(*role),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Anonymous => write!(f, "anonymous"),
            SessionState::Authenticated(role) => write!(f, "authenticated({})", role),
        }
    }
}
