//! Registration profile data

use hospitix_core::{Identity, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields collected by the signup forms that end up on the identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationProfile {
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl RegistrationProfile {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    /// Whether the fields an identity cannot exist without are present
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty()
    }

    /// `name`, else "first last", else the username, else the email
    pub fn display_name(&self) -> String {
        if let Some(name) = non_blank(&self.name) {
            return name.to_string();
        }

        let full = [non_blank(&self.first_name), non_blank(&self.last_name)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }

        non_blank(&self.username)
            .map(str::to_string)
            .unwrap_or_else(|| self.email.trim().to_string())
    }

    /// Build a fresh identity carrying exactly `role`
    pub fn into_identity(self, role: Role) -> Identity {
        Identity {
            id: Uuid::new_v4().to_string(),
            name: self.display_name(),
            email: self.email.trim().to_string(),
            role,
            phone: non_blank(&self.phone).map(str::to_string),
            username: non_blank(&self.username).map(str::to_string),
        }
    }
}
