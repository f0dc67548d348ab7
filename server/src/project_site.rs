//! Per-project subdomains: `{code}{project_suffix}` redirects into the root
//! site's detail page and forwards `/invite`, `/notion` and `/github` to the
//! project's external resources; logo and banner images are served from the
//! embedded per-project assets.

use axum::{
    body::Body,
    extract::State,
    http::{Response, StatusCode},
    response::{IntoResponse, Redirect},
    routing::get,
    Router,
};
use axum_extra::extract::Host;
use std::sync::Arc;

use crate::embedded;
use crate::hosts::project_code_from_host;
use crate::projects::ProjectItem;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/invite", get(invite_link))
        .route("/notion", get(notion_link))
        .route("/github", get(github_link))
        .route("/assets/logo.png", get(logo_image))
        .route("/assets/banner.png", get(banner_image))
        .route("/assets/{*path}", get(embedded::serve_asset))
}

async fn lookup(state: &AppState, host: &str) -> Option<Arc<ProjectItem>> {
    let host = host.split(':').next().unwrap_or_default();
    let code = project_code_from_host(host, &state.config.identity.domains);
    state.registry.snapshot().await.get(code)
}

async fn index(
    State(state): State<AppState>,
    Host(host): Host,
) -> Result<Redirect, StatusCode> {
    let project = lookup(&state, &host).await.ok_or(StatusCode::NOT_FOUND)?;
    Ok(Redirect::temporary(&format!(
        "{}://{}/bots/{}",
        state.config.identity.protocol, state.config.identity.domains.root, project.code
    )))
}

async fn invite_link(
    State(state): State<AppState>,
    Host(host): Host,
) -> Result<Redirect, StatusCode> {
    let project = lookup(&state, &host).await.ok_or(StatusCode::NOT_FOUND)?;
    Ok(Redirect::temporary(&project.invite))
}

async fn notion_link(
    State(state): State<AppState>,
    Host(host): Host,
) -> Result<Redirect, StatusCode> {
    let project = lookup(&state, &host).await.ok_or(StatusCode::NOT_FOUND)?;
    Ok(Redirect::temporary(&project.notion))
}

async fn github_link(
    State(state): State<AppState>,
    Host(host): Host,
) -> Result<Redirect, StatusCode> {
    let project = lookup(&state, &host).await.ok_or(StatusCode::NOT_FOUND)?;
    Ok(Redirect::temporary(&project.github))
}

async fn logo_image(State(state): State<AppState>, Host(host): Host) -> Response<Body> {
    project_image(&state, &host, "logo").await
}

async fn banner_image(State(state): State<AppState>, Host(host): Host) -> Response<Body> {
    project_image(&state, &host, "banner").await
}

async fn project_image(state: &AppState, host: &str, name: &str) -> Response<Body> {
    match lookup(state, host).await {
        Some(project) => embedded::project_image_response(&project.code, name),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
