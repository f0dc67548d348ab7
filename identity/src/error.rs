use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("State does not match.")]
    StateMismatch,

    #[error("Missing authorization code.")]
    MissingCode,

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Profile request failed: {0}")]
    Profile(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IdentityError {
    pub fn status(&self) -> StatusCode {
        match self {
            IdentityError::StateMismatch | IdentityError::MissingCode => StatusCode::BAD_REQUEST,
            IdentityError::TokenExchange(_)
            | IdentityError::Profile(_)
            | IdentityError::Network(_)
            | IdentityError::Json(_)
            | IdentityError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Upstream failures surface the raw error text in the body. This site is a
/// low-sensitivity tool; a stricter deployment would log the detail and
/// return an opaque message instead.
impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
