//! Cross-subdomain identity bridge for the bot showcase site.
//!
//! A dedicated identity host performs the Discord OAuth2 login and stores the
//! resulting profile in an encrypted cookie scoped to the shared cookie
//! domain. Other subdomains cannot read that cookie themselves; they embed a
//! hidden iframe pointing at the identity host's `/check` endpoint, which
//! posts the privacy-scrubbed user object back to the parent window, with
//! the target origin clamped to an allow-listed domain set.
//!
//! # Example
//!
//! ```no_run
//! use showcase_identity::{identity_routes, IdentityConfig, IdentityService, IdentityState};
//! use std::sync::Arc;
//!
//! let config = IdentityConfig::default();
//! let service = Arc::new(IdentityService::new(config).unwrap());
//! let router: axum::Router = identity_routes().with_state(IdentityState::new(service));
//! ```

pub mod config;
pub mod error;
pub mod origin;
pub mod provider;
pub mod routes;
pub mod session;
pub mod user;
pub mod views;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use std::ops::Deref;
use std::sync::Arc;

// Re-export commonly used types
pub use config::{Domains, IdentityConfig, SessionConfig};
pub use error::IdentityError;
pub use origin::{clamp_domain, is_allowed_origin};
pub use provider::DiscordProvider;
pub use routes::identity_routes;
pub use session::{now_unix, RemoteUser, Session};
pub use user::PublicUser;

/// The identity host's process-wide immutable state: configuration, the
/// OAuth client and the cookie encryption key. Holds no per-session data;
/// every session round-trips through the client-held cookie.
pub struct IdentityService {
    pub config: IdentityConfig,
    pub provider: DiscordProvider,
    key: Key,
}

impl IdentityService {
    pub fn new(config: IdentityConfig) -> Result<Self, IdentityError> {
        if config.session.key.len() < 32 {
            return Err(IdentityError::Config(
                "session key must be at least 32 bytes".to_string(),
            ));
        }
        let key = Key::derive_from(config.session.key.as_bytes());
        let provider = DiscordProvider::new(&config)?;

        Ok(Self {
            config,
            provider,
            key,
        })
    }

    /// Cookie encryption key for `PrivateCookieJar`
    pub fn cookie_key(&self) -> Key {
        self.key.clone()
    }
}

/// State wrapper for IdentityService that implements FromRef for Key
/// This allows PrivateCookieJar to extract the cookie key from state
#[derive(Clone)]
pub struct IdentityState {
    inner: Arc<IdentityService>,
}

impl IdentityState {
    pub fn new(service: Arc<IdentityService>) -> Self {
        Self { inner: service }
    }

    /// Get the inner Arc<IdentityService>
    pub fn into_inner(self) -> Arc<IdentityService> {
        self.inner
    }
}

impl Deref for IdentityState {
    type Target = IdentityService;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl AsRef<IdentityService> for IdentityState {
    fn as_ref(&self) -> &IdentityService {
        &self.inner
    }
}

impl From<Arc<IdentityService>> for IdentityState {
    fn from(service: Arc<IdentityService>) -> Self {
        Self::new(service)
    }
}

/// Implement FromRef to allow PrivateCookieJar to extract Key from IdentityState
impl FromRef<IdentityState> for Key {
    fn from_ref(state: &IdentityState) -> Self {
        state.cookie_key()
    }
}
