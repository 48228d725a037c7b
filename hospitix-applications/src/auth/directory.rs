//! Fixed directory of demo identities used by login

use hospitix_core::{Identity, Role};
use tracing::debug;

/// Passphrase shared by every demo identity
pub const DEMO_SECRET: &str = "demo123";

/// Which identifier namespace produced a directory hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Email,
    Username,
    Phone,
}

/// Lookup table of the identities login can resolve
#[derive(Debug, Clone)]
pub struct DemoDirectory {
    entries: Vec<Identity>,
}

impl Default for DemoDirectory {
    fn default() -> Self {
        Self::new(vec![
            Identity::new("1", "patient@demo.com", Role::Patient, "Ram Kumar")
                .with_username("patient")
                .with_phone("1234567890"),
            Identity::new("2", "doctor@demo.com", Role::Doctor, "Dr. Sharma")
                .with_username("doctor")
                .with_phone("0987654321"),
            Identity::new("3", "assistant@demo.com", Role::Assistant, "Smarth kumar")
                .with_username("assistant")
                .with_phone("1122334455"),
            Identity::new("4", "pathology@demo.com", Role::Pathology, "Lab Tech")
                .with_username("pathology")
                .with_phone("5544332211"),
        ])
    }
}

impl DemoDirectory {
    pub fn new(entries: Vec<Identity>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Identity] {
        &self.entries
    }

    /// Resolve an identifier. The first entry in directory order that
    /// matches by email, username or phone wins.
    pub fn lookup(&self, identifier: &str) -> Option<(&Identity, IdentifierKind)> {
        let found = self.entries.iter().find_map(|entry| {
            if entry.email == identifier {
                Some((entry, IdentifierKind::Email))
            } else if entry.username.as_deref() == Some(identifier) {
                Some((entry, IdentifierKind::Username))
            } else if entry.phone.as_deref() == Some(identifier) {
                Some((entry, IdentifierKind::Phone))
            } else {
                None
            }
        });

        match &found {
            Some((entry, kind)) => debug!("Identifier matched {} by {:?}", entry.id, kind),
            None => debug!("Identifier matched no directory entry"),
        }

        found
    }

    /// Look up `identifier` and check `secret` against the shared passphrase
    pub fn authenticate(&self, identifier: &str, secret: &str) -> Option<&Identity> {
        let (identity, _) = self.lookup(identifier)?;
        (secret == DEMO_SECRET).then_some(identity)
    }
}
