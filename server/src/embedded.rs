//! Embedded static files, allowing deployment as a single executable.

use axum::{
    body::Body,
    extract::Path,
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use rust_embed::Embed;

/// Embedded static files from the `server/assets` directory
#[derive(Embed)]
#[folder = "assets"]
pub struct StaticAssets;

/// Serve an embedded static file under `/assets/`
pub async fn serve_asset(Path(path): Path<String>) -> impl IntoResponse {
    serve_embedded_file(&path)
}

fn serve_embedded_file(path: &str) -> Response<Body> {
    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .body(Body::from(content.data.into_owned()))
                .unwrap()
        }
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not Found"))
            .unwrap(),
    }
}

/// Per-project image (`projects/{code}/logo.png` or `.../banner.png`).
/// The images ship inside the binary, so a known project without one is a
/// packaging defect and answers 500.
pub fn project_image_response(code: &str, name: &str) -> Response<Body> {
    match StaticAssets::get(&format!("projects/{}/{}.png", code, name)) {
        Some(content) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "image/png")
            .body(Body::from(content.data.into_owned()))
            .unwrap(),
        None => Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Body::empty())
            .unwrap(),
    }
}
