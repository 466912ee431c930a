//! HTTP layer exposing the skimming pipeline and static UI.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{extract::DefaultBodyLimit, routing::post, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Settings,
    nlp::classifier::{self, SectionClassifier},
};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub classifier: Arc<dyn SectionClassifier>,
}

/// Build the application router around a loaded classifier.
pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new("src/ui/static");
    // Leave headroom above the file ceiling for the other multipart fields.
    let body_limit = state.settings.max_upload_bytes + 16 * 1024;
    Router::new()
        .route("/predict", post(routes::predict))
        .fallback_service(static_dir)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let classifier = classifier::load_model(&settings).await?;
    let state = AppState {
        settings,
        classifier,
    };
    let router = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving abstract-skimmer API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
