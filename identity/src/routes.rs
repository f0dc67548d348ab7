use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;

use crate::error::IdentityError;
use crate::origin::clamp_domain;
use crate::session::{now_unix, Session};
use crate::user::PublicUser;
use crate::views;
use crate::IdentityState;

#[derive(Deserialize)]
struct LoginQuery {
    redirect: Option<String>,
}

#[derive(Deserialize)]
struct CheckQuery {
    parent: Option<String>,
}

#[derive(Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
}

/// Routes served on the dedicated identity host
pub fn identity_routes() -> Router<IdentityState> {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login))
        .route("/check", get(check))
        .route("/auth/callback", get(callback))
}

/// Anything hitting the identity host directly goes back to the root site.
async fn index(State(identity): State<IdentityState>) -> Redirect {
    Redirect::temporary(&identity.config.origin(&identity.config.domains.root))
}

/// Start (or short-circuit) a login attempt.
///
/// The `redirect` value is stored raw; it is only validated when it is
/// consumed by the callback, where it gets clamped to the allow-listed set.
async fn login(
    State(identity): State<IdentityState>,
    jar: PrivateCookieJar,
    Query(query): Query<LoginQuery>,
) -> Result<(PrivateCookieJar, Redirect), IdentityError> {
    let mut session = Session::load(&jar, &identity.config.session.cookie_name);
    let redirect = query.redirect.unwrap_or_default();
    session.set_redirect_domain(redirect.clone());

    if session.logged_in_user(now_unix()).is_some() {
        let target = if redirect.is_empty() {
            identity.config.domains.root.clone()
        } else {
            redirect
        };
        let jar = session.save(jar, &identity.config.session);
        return Ok((jar, Redirect::temporary(&identity.config.origin(&target))));
    }

    let state_token = session.state_token();
    let auth_url = identity.provider.authorize_url(&state_token)?;
    tracing::debug!("Redirecting to provider for login, return domain '{}'", redirect);
    let jar = session.save(jar, &identity.config.session);
    Ok((jar, Redirect::temporary(&auth_url)))
}

/// Cross-domain login check, loaded in a hidden iframe by other subdomains.
///
/// Logged in: emit a frame posting the public user to the parent window at
/// the clamped origin. Logged out: an empty body; callers treat the absence
/// of a message as the logged-out signal. Never mutates the session.
async fn check(
    State(identity): State<IdentityState>,
    jar: PrivateCookieJar,
    Query(query): Query<CheckQuery>,
) -> Result<Html<String>, IdentityError> {
    let session = Session::load(&jar, &identity.config.session.cookie_name);
    let user = match session.logged_in_user(now_unix()) {
        Some(user) => user,
        None => return Ok(Html(String::new())),
    };

    let public = PublicUser::from_remote(user, &identity.config.admins);
    let payload = serde_json::to_string(&public)?;

    let parent = query.parent.unwrap_or_default();
    let parent = clamp_domain(&parent, &identity.config.domains);

    Ok(Html(views::check_frame_html(
        &payload,
        &identity.config.origin(parent),
        &identity.config.domains.project_suffix,
    )))
}

/// OAuth provider redirect target: verify the CSRF state, trade the code for
/// a token, fetch the profile, stamp its expiry into the session and hand the
/// public user back to the window that opened the login popup.
async fn callback(
    State(identity): State<IdentityState>,
    jar: PrivateCookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<(PrivateCookieJar, Html<String>), IdentityError> {
    let mut session = Session::load(&jar, &identity.config.session.cookie_name);
    if session.logged_in_user(now_unix()).is_some() {
        // Callback replay with a live session; nothing to do.
        return Ok((jar, Html(String::new())));
    }

    let pending = session.state_token();
    if query.state.as_deref() != Some(pending.as_str()) {
        return Err(IdentityError::StateMismatch);
    }
    let code = query.code.ok_or(IdentityError::MissingCode)?;

    let access_token = identity.provider.exchange_code(&code).await?;
    let mut user = identity.provider.fetch_user(&access_token).await?;
    user.logged_in_until = now_unix() + identity.config.session.lifetime_seconds;

    let public = PublicUser::from_remote(&user, &identity.config.admins);
    let payload = serde_json::to_string(&public)?;
    tracing::info!("User '{}' logged in", public.username);
    session.set_identity(user);

    let redirect = session.redirect_domain().unwrap_or_default();
    let redirect = clamp_domain(redirect, &identity.config.domains).to_string();

    let jar = session.save(jar, &identity.config.session);
    Ok((
        jar,
        Html(views::login_frame_html(
            &payload,
            &identity.config.origin(&redirect),
        )),
    ))
}
