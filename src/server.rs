//! HTTP boundary.
//!
//! Routes (single-process development server, synchronous listings per
//! request):
//!
//! - `GET /` — index page listing gallery folders
//! - `GET /gallery/<folder>` — per-folder gallery page
//! - `GET /thumbs/<path>` — thumbnail files, served from the thumb root
//! - `GET /<path>` — original files, served from the image root (fallback)
//!
//! Pages are generated with [maud](https://maud.lambda.xyz/); file serving
//! goes through `tower-http`'s `ServeDir`. The only error surfaced to a
//! caller is not-found; listing failures log and return a 500.

use crate::config::{GalleryConfig, LayoutMode};
use crate::gallery::{self, FolderView, GalleryError};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use maud::{DOCTYPE, Markup, html};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    config: Arc<GalleryConfig>,
}

/// Build the gallery router.
pub fn router(config: Arc<GalleryConfig>) -> Router {
    let thumbs = ServeDir::new(config.thumb_root.clone());
    let originals = ServeDir::new(config.image_root.clone());

    Router::new()
        .route("/", get(index))
        .route("/gallery/:folder", get(show_gallery))
        .nest_service("/thumbs", thumbs)
        .fallback_service(originals)
        .with_state(AppState { config })
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: Arc<GalleryConfig>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("serving gallery on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to install ctrl-c handler: {e}");
    }
}

async fn index(State(state): State<AppState>) -> Result<Markup, AppError> {
    let folders = gallery::list_folders(&state.config)?;
    Ok(index_page(&folders))
}

async fn show_gallery(
    State(state): State<AppState>,
    Path(folder): Path<String>,
) -> Result<Markup, AppError> {
    let view = gallery::folder_view(&state.config, &folder)?;
    Ok(gallery_page(&state.config, &view))
}

fn index_page(folders: &[String]) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head { title { "PicQuick Gallery Index" } }
            body {
                h1 { "Image Galleries" }
                ul {
                    @for folder in folders {
                        li { a href=(format!("/gallery/{folder}")) { (folder) } }
                    }
                }
            }
        }
    }
}

fn gallery_page(config: &GalleryConfig, view: &FolderView) -> Markup {
    let thumb_base = match config.layout {
        LayoutMode::Mirrored => format!("/thumbs/{}", view.folder),
        LayoutMode::Flat => "/thumbs".to_string(),
    };
    // A stale thumbnail with no surviving original links to itself.
    let links: Vec<(String, String, &str)> = view
        .entries
        .iter()
        .map(|entry| {
            let thumb_href = format!("{thumb_base}/{}", entry.thumbnail);
            let source_href = match &entry.source {
                Some(name) => format!("/{}/{name}", view.folder),
                None => thumb_href.clone(),
            };
            (thumb_href, source_href, entry.thumbnail.as_str())
        })
        .collect();

    html! {
        (DOCTYPE)
        html {
            head { title { "PicQuick Gallery - " (view.folder) } }
            body {
                h1 { "Gallery: " (view.folder) }
                a href="/" { "Back to the index" }
                div {
                    @for (thumb_href, source_href, name) in &links {
                        a href=(source_href) {
                            img src=(thumb_href)
                                alt=(name)
                                style=(format!("height: {}px;", config.target_dimension));
                        }
                    }
                }
            }
        }
    }
}

struct AppError(GalleryError);

impl From<GalleryError> for AppError {
    fn from(err: GalleryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            GalleryError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("not found: {what}")).into_response()
            }
            GalleryError::Io(e) => {
                error!("gallery listing failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
