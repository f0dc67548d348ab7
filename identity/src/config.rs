use serde::{Deserialize, Serialize};

/// Identity host configuration
///
/// Read once at startup and immutable afterwards; every value here is shared
/// verbatim between the identity handlers and the page-rendering side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// URL scheme used when building absolute addresses ("http" or "https")
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Participating domain names
    #[serde(default)]
    pub domains: Domains,

    /// Discord OAuth2 application credentials
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,

    /// Discord user ids granted the admin flag on their public identity.
    /// Not persisted in sessions; re-checked on every derivation.
    #[serde(default)]
    pub admins: Vec<String>,

    /// Session cookie configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// The domains participating in the cross-subdomain login bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domains {
    /// Root informational site
    pub root: String,

    /// Dedicated identity host (OAuth login + cross-domain checks)
    pub identity: String,

    /// Admin page host
    pub admin: String,

    /// Shared suffix of the per-project subdomains, leading dot included:
    /// a project `code` is served at `{code}{project_suffix}`.
    pub project_suffix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session cookie name
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Cookie domain; must be a superdomain covering every participating
    /// subdomain so the identity host sees the same cookie everywhere.
    #[serde(default)]
    pub cookie_domain: String,

    /// Cookie encryption key material, at least 32 bytes
    #[serde(default)]
    pub key: String,

    /// How long a login lasts, in seconds (default: 2 hours)
    #[serde(default = "default_lifetime")]
    pub lifetime_seconds: u64,

    /// Secure cookie (HTTPS only)
    #[serde(default)]
    pub secure: bool,
}

fn default_protocol() -> String {
    "https".to_string()
}

fn default_cookie_name() -> String {
    "showcase_session".to_string()
}

fn default_lifetime() -> u64 {
    7200 // 2 hours
}

impl IdentityConfig {
    /// OAuth redirect URL registered with the provider
    pub fn redirect_url(&self) -> String {
        format!("{}://{}/auth/callback", self.protocol, self.domains.identity)
    }

    /// Absolute origin string for a (previously clamped) domain
    pub fn origin(&self, domain: &str) -> String {
        format!("{}://{}", self.protocol, domain)
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            protocol: default_protocol(),
            domains: Domains::default(),
            client_id: String::new(),
            client_secret: String::new(),
            admins: vec![],
            session: SessionConfig::default(),
        }
    }
}

impl Default for Domains {
    fn default() -> Self {
        Self {
            root: "example.com".to_string(),
            identity: "id.example.com".to_string(),
            admin: "admin.example.com".to_string(),
            project_suffix: ".bots.example.com".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_domain: String::new(),
            key: String::new(),
            lifetime_seconds: default_lifetime(),
            secure: false,
        }
    }
}
