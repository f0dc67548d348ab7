use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl,
    Scope, TokenResponse, TokenUrl,
};

use crate::config::IdentityConfig;
use crate::error::IdentityError;
use crate::session::RemoteUser;

const DISCORD_AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_PROFILE_URL: &str = "https://discord.com/api/users/@me";

/// Discord OAuth2 authorization-code client.
///
/// Single attempt, no retry, transport-default timeouts; a failure at either
/// network step is terminal for the request that triggered it.
pub struct DiscordProvider {
    client_id: String,
    client_secret: String,
    redirect_url: String,
}

impl DiscordProvider {
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        if config.client_id.is_empty() {
            return Err(IdentityError::Config(
                "Discord client_id not configured".to_string(),
            ));
        }
        if config.client_secret.is_empty() {
            return Err(IdentityError::Config(
                "Discord client_secret not configured".to_string(),
            ));
        }

        Ok(Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_url: config.redirect_url(),
        })
    }

    fn oauth_client(&self) -> Result<BasicClient, IdentityError> {
        Ok(BasicClient::new(
            ClientId::new(self.client_id.clone()),
            Some(ClientSecret::new(self.client_secret.clone())),
            AuthUrl::new(DISCORD_AUTHORIZE_URL.to_string())
                .map_err(|e| IdentityError::Config(e.to_string()))?,
            Some(
                TokenUrl::new(DISCORD_TOKEN_URL.to_string())
                    .map_err(|e| IdentityError::Config(e.to_string()))?,
            ),
        )
        .set_redirect_uri(
            RedirectUrl::new(self.redirect_url.clone())
                .map_err(|e| IdentityError::Config(e.to_string()))?,
        ))
    }

    /// Provider authorization URL carrying the session's CSRF state token
    pub fn authorize_url(&self, state: &str) -> Result<String, IdentityError> {
        let state = state.to_string();
        let (auth_url, _) = self
            .oauth_client()?
            .authorize_url(|| CsrfToken::new(state))
            .add_scope(Scope::new("identify".to_string()))
            .url();
        Ok(auth_url.to_string())
    }

    /// Exchange the callback `code` for an access token
    pub async fn exchange_code(&self, code: &str) -> Result<String, IdentityError> {
        let token = self
            .oauth_client()?
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(oauth2::reqwest::async_http_client)
            .await
            .map_err(|e| IdentityError::TokenExchange(e.to_string()))?;

        Ok(token.access_token().secret().clone())
    }

    /// Fetch the logged-in user's profile with the access token
    pub async fn fetch_user(&self, access_token: &str) -> Result<RemoteUser, IdentityError> {
        let response = reqwest::Client::new()
            .get(DISCORD_PROFILE_URL)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(IdentityError::Profile(response.status().to_string()));
        }

        Ok(response.json::<RemoteUser>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentityConfig;

    fn config() -> IdentityConfig {
        IdentityConfig {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            ..IdentityConfig::default()
        }
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let mut cfg = config();
        cfg.client_id.clear();
        assert!(DiscordProvider::new(&cfg).is_err());

        let mut cfg = config();
        cfg.client_secret.clear();
        assert!(DiscordProvider::new(&cfg).is_err());
    }

    #[test]
    fn authorize_url_carries_state_and_redirect() {
        let provider = DiscordProvider::new(&config()).unwrap();
        let url = provider.authorize_url("my-state-token").unwrap();
        assert!(url.starts_with(DISCORD_AUTHORIZE_URL));
        assert!(url.contains("state=my-state-token"));
        assert!(url.contains("scope=identify"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("id.example.com"));
    }
}
