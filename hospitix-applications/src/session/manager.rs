//! Session Store - owner of the single authenticated identity
//!
//! Every mutation writes storage before memory. A failed write leaves the
//! in-memory session untouched, so the two never disagree about who is
//! logged in.

use super::{SessionState, SessionStorage};
use crate::auth::{DemoDirectory, RegistrationProfile};
use crate::ApplicationResult;
use hospitix_core::{Identity, Role};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Storage key of the persisted identity record
pub const SESSION_KEY: &str = "user";

/// Holds the current identity, if any, and its persisted representation
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    directory: DemoDirectory,
    current: RwLock<Option<Identity>>,
    auth_delay: Duration,
    restored: AtomicBool,
    in_flight: AtomicUsize,
}

/// Marks a login or registration as in progress until dropped
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn begin(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SessionStore {
    /// Create an empty, not yet restored session over `storage`
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            directory: DemoDirectory::default(),
            current: RwLock::new(None),
            auth_delay: Duration::ZERO,
            restored: AtomicBool::new(false),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Artificial latency applied before login and registration resolve
    pub fn with_auth_delay(mut self, delay: Duration) -> Self {
        self.auth_delay = delay;
        self
    }

    pub fn with_directory(mut self, directory: DemoDirectory) -> Self {
        self.directory = directory;
        self
    }

    /// True until [`restore`](Self::restore) has run, and while a login or
    /// registration is waiting out its delay
    pub fn is_loading(&self) -> bool {
        !self.restored.load(Ordering::SeqCst) || self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn current(&self) -> Option<Identity> {
        self.current.read().await.clone()
    }

    pub async fn state(&self) -> SessionState {
        match self.current.read().await.as_ref() {
            Some(identity) => SessionState::Authenticated(identity.role),
            None => SessionState::Anonymous,
        }
    }

    /// Load the persisted identity. Missing, unreadable or malformed records
    /// all leave the session anonymous.
    pub async fn restore(&self) -> SessionState {
        let restored = match self.storage.get(SESSION_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    warn!("Ignoring malformed persisted session: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read persisted session: {}", e);
                None
            }
        };

        let state = match &restored {
            Some(identity) => {
                info!("Restored session for {} ({})", identity.id, identity.role);
                SessionState::Authenticated(identity.role)
            }
            None => SessionState::Anonymous,
        };

        *self.current.write().await = restored;
        self.restored.store(true, Ordering::SeqCst);
        state
    }

    /// Authenticate against the demo directory. `Ok(false)` means the
    /// credentials were rejected and the session is unchanged.
    pub async fn login(&self, identifier: &str, secret: &str) -> ApplicationResult<bool> {
        let _busy = InFlight::begin(&self.in_flight);
        self.simulate_latency().await;

        let identity = match self.directory.authenticate(identifier, secret) {
            Some(identity) => identity.clone(),
            None => {
                warn!("Login rejected");
                return Ok(false);
            }
        };

        self.establish(identity).await?;
        Ok(true)
    }

    /// Create a new identity with exactly `role` and sign it in. Returns
    /// `Ok(false)` when the profile lacks the fields an identity requires.
    pub async fn register(
        &self,
        profile: RegistrationProfile,
        role: Role,
    ) -> ApplicationResult<bool> {
        let _busy = InFlight::begin(&self.in_flight);
        self.simulate_latency().await;

        if !profile.is_complete() {
            warn!("Registration rejected: incomplete profile");
            return Ok(false);
        }

        let identity = profile.into_identity(role);
        info!("Registered new {} identity {}", identity.role, identity.id);
        self.establish(identity).await?;
        Ok(true)
    }

    /// Run a login on its own task so it completes even when the caller
    /// stops waiting, e.g. a client disconnecting during the delay
    pub async fn login_detached(
        self: &Arc<Self>,
        identifier: String,
        secret: String,
    ) -> ApplicationResult<bool> {
        let store = Arc::clone(self);
        tokio::spawn(async move { store.login(&identifier, &secret).await }).await?
    }

    /// [`register`](Self::register) on its own task
    pub async fn register_detached(
        self: &Arc<Self>,
        profile: RegistrationProfile,
        role: Role,
    ) -> ApplicationResult<bool> {
        let store = Arc::clone(self);
        tokio::spawn(async move { store.register(profile, role).await }).await?
    }

    /// Remove the persisted record, then clear the session
    pub async fn logout(&self) -> ApplicationResult<()> {
        let mut current = self.current.write().await;
        self.storage.remove(SESSION_KEY).await?;

        if let Some(identity) = current.take() {
            info!("Logged out {}", identity.id);
        }
        Ok(())
    }

    async fn establish(&self, identity: Identity) -> ApplicationResult<()> {
        let record = serde_json::to_string(&identity)?;

        let mut current = self.current.write().await;
        self.storage.set(SESSION_KEY, &record).await?;

        info!("Session established for {} ({})", identity.id, identity.role);
        *current = Some(identity);
        Ok(())
    }

    async fn simulate_latency(&self) {
        if !self.auth_delay.is_zero() {
            debug!("Simulating {:?} of auth latency", self.auth_delay);
            tokio::time::sleep(self.auth_delay).await;
        }
    }
}
