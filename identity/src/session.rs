use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

/// Discord `users/@me` profile cached in the session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteUser {
    /// Provider-side user id (never exposed to pages directly)
    pub id: String,

    /// Username
    pub username: String,

    /// Discriminator; absent on newer Discord accounts
    #[serde(default)]
    pub discriminator: Option<String>,

    /// Avatar hash
    #[serde(default)]
    pub avatar: String,

    /// Unix timestamp after which this cached profile no longer counts as
    /// logged in. Stamped at callback time, never part of the provider body.
    #[serde(default)]
    pub logged_in_until: u64,
}

/// Client-held session, round-tripped as one encrypted cookie.
///
/// The whole struct is JSON inside a `PrivateCookieJar` cookie; nothing is
/// stored server-side. Mutations only take effect once the caller writes the
/// session back into the response jar with [`Session::save`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub user: Option<RemoteUser>,

    /// CSRF nonce bound to one OAuth login attempt
    #[serde(default)]
    state_token: Option<String>,

    /// Domain the user should land back on after login; stored raw and only
    /// validated when it is consumed.
    #[serde(default)]
    redirect_domain: Option<String>,
}

impl Session {
    /// Read the session out of the request jar. A missing, corrupt or
    /// undecryptable cookie yields an empty (logged-out) session, never an
    /// error.
    pub fn load(jar: &PrivateCookieJar, cookie_name: &str) -> Self {
        jar.get(cookie_name)
            .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
            .unwrap_or_default()
    }

    /// The cached profile, if it has not expired yet. `now` must be strictly
    /// before the stamped expiry for the session to count as logged in.
    pub fn logged_in_user(&self, now: u64) -> Option<&RemoteUser> {
        self.user.as_ref().filter(|user| now < user.logged_in_until)
    }

    /// The session's CSRF state token, generating and storing a fresh one if
    /// none is pending. Repeated calls on the same session return the same
    /// token.
    pub fn state_token(&mut self) -> String {
        match &self.state_token {
            Some(token) => token.clone(),
            None => {
                let token = uuid::Uuid::new_v4().to_string();
                self.state_token = Some(token.clone());
                token
            }
        }
    }

    pub fn set_identity(&mut self, user: RemoteUser) {
        self.user = Some(user);
    }

    pub fn clear_identity(&mut self) {
        self.user = None;
    }

    pub fn set_redirect_domain(&mut self, domain: impl Into<String>) {
        self.redirect_domain = Some(domain.into());
    }

    pub fn redirect_domain(&self) -> Option<&str> {
        self.redirect_domain.as_deref()
    }

    /// Write the session back as the response cookie. Dropping the returned
    /// jar discards the mutation for this request.
    pub fn save(&self, jar: PrivateCookieJar, config: &SessionConfig) -> PrivateCookieJar {
        let payload = serde_json::to_string(self).unwrap_or_default();
        let mut cookie = Cookie::new(config.cookie_name.clone(), payload);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        if !config.cookie_domain.is_empty() {
            cookie.set_domain(config.cookie_domain.clone());
        }
        if config.secure {
            cookie.set_secure(true);
        }
        cookie.set_max_age(time::Duration::seconds(config.lifetime_seconds as i64));
        jar.add(cookie)
    }
}

/// Current unix timestamp in seconds
pub fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_until(logged_in_until: u64) -> RemoteUser {
        RemoteUser {
            id: "42".to_string(),
            username: "Ann".to_string(),
            discriminator: Some("0001".to_string()),
            avatar: "abcd".to_string(),
            logged_in_until,
        }
    }

    #[test]
    fn expiry_is_strict() {
        let mut session = Session::default();
        session.set_identity(user_until(1000));

        assert!(session.logged_in_user(999).is_some());
        // now == expiry counts as logged out
        assert!(session.logged_in_user(1000).is_none());
        assert!(session.logged_in_user(1001).is_none());
    }

    #[test]
    fn missing_user_is_logged_out() {
        let session = Session::default();
        assert!(session.logged_in_user(0).is_none());
    }

    #[test]
    fn state_token_is_idempotent() {
        let mut session = Session::default();
        let first = session.state_token();
        let second = session.state_token();
        assert_eq!(first, second);
    }

    #[test]
    fn fresh_sessions_get_fresh_tokens() {
        let a = Session::default().state_token();
        let b = Session::default().state_token();
        assert_ne!(a, b);
    }

    #[test]
    fn clear_identity_logs_out() {
        let mut session = Session::default();
        session.set_identity(user_until(u64::MAX));
        assert!(session.logged_in_user(0).is_some());
        session.clear_identity();
        assert!(session.logged_in_user(0).is_none());
    }

    #[test]
    fn corrupt_payload_round_trips_to_default() {
        // Session::load goes through the jar; the parse path is the same.
        let parsed: Session = serde_json::from_str("{\"user\":42}").unwrap_or_default();
        assert!(parsed.user.is_none());
        assert!(parsed.redirect_domain().is_none());
    }

    #[test]
    fn session_json_survives_round_trip() {
        let mut session = Session::default();
        session.set_identity(user_until(12345));
        session.set_redirect_domain("mybot.bots.example.com");
        let token = session.state_token();

        let json = serde_json::to_string(&session).unwrap();
        let mut back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user, session.user);
        assert_eq!(back.redirect_domain(), Some("mybot.bots.example.com"));
        assert_eq!(back.state_token(), token);
    }
}
