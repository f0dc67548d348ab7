use axum::extract::FromRef;
use axum_extra::extract::cookie::{Key, PrivateCookieJar};
use showcase_identity::{now_unix, PublicUser, Session};
use std::sync::Arc;

use crate::config::Config;
use crate::projects::ProjectRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<ProjectRegistry>,
    key: Key,
}

impl AppState {
    pub fn new(config: Arc<Config>, registry: Arc<ProjectRegistry>, key: Key) -> Self {
        Self {
            config,
            registry,
            key,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.identity.session.cookie_name
    }

    /// The request's logged-in user as the page-facing public identity,
    /// if the session cookie holds an unexpired profile.
    pub fn current_user(&self, jar: &PrivateCookieJar) -> Option<PublicUser> {
        let session = Session::load(jar, self.cookie_name());
        session
            .logged_in_user(now_unix())
            .map(|user| PublicUser::from_remote(user, &self.config.identity.admins))
    }
}

/// Implement FromRef to allow PrivateCookieJar to extract Key from AppState
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}
