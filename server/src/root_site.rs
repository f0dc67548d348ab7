//! Root-domain site: project grid, per-project detail pages, about page and
//! community-wide link redirects.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::embedded;
use crate::state::AppState;
use crate::views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/bots/{bot}", get(project_detail))
        .route("/about", get(about))
        .route("/discord", get(discord_link))
        .route("/notion", get(notion_link))
        .route("/github", get(github_link))
        .route("/assets/{*path}", get(embedded::serve_asset))
}

async fn index(State(state): State<AppState>, jar: PrivateCookieJar) -> Html<String> {
    let user = state.current_user(&jar);
    let snapshot = state.registry.snapshot().await;
    let body = views::index_body(&state.config, snapshot.all());
    Html(views::page_html(
        &state.config,
        &state.config.site.title,
        user.as_ref(),
        snapshot.all(),
        &body,
    ))
}

async fn project_detail(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(bot): Path<String>,
) -> Result<Html<String>, StatusCode> {
    let snapshot = state.registry.snapshot().await;
    let project = snapshot.get(&bot).ok_or(StatusCode::NOT_FOUND)?;

    let user = state.current_user(&jar);
    let title = format!("{} {}", state.config.site.title, project.name);
    let body = views::project_body(&state.config, &project);
    Ok(Html(views::page_html(
        &state.config,
        &title,
        user.as_ref(),
        snapshot.all(),
        &body,
    )))
}

async fn about(State(state): State<AppState>, jar: PrivateCookieJar) -> Html<String> {
    let user = state.current_user(&jar);
    let snapshot = state.registry.snapshot().await;
    Html(views::page_html(
        &state.config,
        "About",
        user.as_ref(),
        snapshot.all(),
        &views::about_body(),
    ))
}

async fn discord_link(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.config.site.discord_link)
}

async fn notion_link(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.config.site.notion_link)
}

async fn github_link(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.config.site.github_link)
}
