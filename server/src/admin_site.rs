//! Admin subdomain. The page itself only reports the signed-in identity;
//! administrative tooling lives behind the same session as the rest of the
//! site.

use axum::{extract::State, response::Html, routing::get, Router};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::embedded;
use crate::state::AppState;
use crate::views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/assets/{*path}", get(embedded::serve_asset))
}

async fn index(State(state): State<AppState>, jar: PrivateCookieJar) -> Html<String> {
    let user = state.current_user(&jar);
    let projects = state.registry.snapshot().await;
    Html(views::page_html(
        &state.config,
        "Admin",
        user.as_ref(),
        projects.all(),
        &views::admin_body(user.as_ref()),
    ))
}
