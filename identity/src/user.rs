use serde::{Deserialize, Serialize};

use crate::session::RemoteUser;

const AVATAR_URL: &str = "https://cdn.discordapp.com/avatars";

/// Privacy-scrubbed view of a logged-in user, exposed to pages.
///
/// Derived from the cached [`RemoteUser`] on every read and never stored:
/// the `id` is a one-way hash, so downstream subdomains never learn the raw
/// provider id, and `admin` is re-checked against configuration each time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub avatar: String,
    pub admin: bool,
}

impl PublicUser {
    pub fn from_remote(user: &RemoteUser, admins: &[String]) -> Self {
        let username = match user.discriminator.as_deref() {
            Some(d) if !d.is_empty() && d != "0" => format!("{}#{}", user.username, d),
            _ => user.username.clone(),
        };
        Self {
            id: format!("{:x}", md5::compute(user.id.as_bytes())),
            username,
            avatar: format!("{}/{}/{}.png?size=256", AVATAR_URL, user.id, user.avatar),
            admin: admins.iter().any(|admin| admin == &user.id),
        }
    }
}
