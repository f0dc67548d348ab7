//! Host-based routing.
//!
//! One process serves four kinds of hosts: the root site, the identity host,
//! the admin page and the per-project subdomains. Each gets its own router;
//! a top-level fallback inspects the request's Host header and hands the
//! request to the matching one, with everything that is not a known exact
//! host treated as a candidate project subdomain.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use axum_extra::extract::Host;
use showcase_identity::{Domains, Session};
use tower::ServiceExt;

use crate::state::AppState;

#[derive(Clone)]
pub struct HostRouters {
    pub domains: Domains,
    pub root: Router,
    pub identity: Router,
    pub admin: Router,
    pub project: Router,
}

/// Top-level application: every request is dispatched by host
pub fn app(routers: HostRouters) -> Router {
    Router::new().fallback(dispatch).with_state(routers)
}

async fn dispatch(
    State(routers): State<HostRouters>,
    Host(host): Host,
    request: Request,
) -> Response {
    let host = host.split(':').next().unwrap_or_default();
    let router = if host == routers.domains.root {
        routers.root.clone()
    } else if host == routers.domains.identity {
        routers.identity.clone()
    } else if host == routers.domains.admin {
        routers.admin.clone()
    } else {
        routers.project.clone()
    };

    match router.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

/// The project-subdomain label for a host. Projects are served at
/// `{code}{project_suffix}`, so the code is whatever precedes the configured
/// suffix; anything else yields an empty code (and a lookup miss).
pub fn project_code_from_host<'a>(host: &'a str, domains: &Domains) -> &'a str {
    match host.strip_suffix(domains.project_suffix.as_str()) {
        Some(code) if !code.is_empty() && !code.contains('.') => code,
        _ => "",
    }
}

/// Session routes shared by every non-identity host: `/login` bounces to the
/// identity host with the current host as the return target, `/logout` clears
/// the cached identity from the session cookie.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_redirect))
        .route("/logout", get(logout))
}

async fn login_redirect(State(state): State<AppState>, Host(host): Host) -> Redirect {
    let host = host.split(':').next().unwrap_or_default();
    Redirect::temporary(&format!(
        "{}://{}/login?redirect={}",
        state.config.identity.protocol, state.config.identity.domains.identity, host
    ))
}

async fn logout(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> (PrivateCookieJar, StatusCode) {
    let mut session = Session::load(&jar, state.cookie_name());
    session.clear_identity();
    let jar = session.save(jar, &state.config.identity.session);
    (jar, StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_code_inverts_the_subdomain_scheme() {
        let domains = Domains::default();
        assert_eq!(
            project_code_from_host("mybot.bots.example.com", &domains),
            "mybot"
        );
        // the bare suffix, nested labels and foreign hosts carry no code
        assert_eq!(project_code_from_host(".bots.example.com", &domains), "");
        assert_eq!(
            project_code_from_host("a.b.bots.example.com", &domains),
            ""
        );
        assert_eq!(project_code_from_host("other.example.com", &domains), "");
        assert_eq!(project_code_from_host("", &domains), "");
    }
}
