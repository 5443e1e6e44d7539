mod artifact;
mod config;
mod errors;
mod interaction;
mod models;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::artifact::{ArtifactGenerator, DocumentMeta};
use crate::config::Config;
use crate::interaction::labels::LabelPolicy;
use crate::routes::build_router;
use crate::session::{ArtifactSink, DirectorySink, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (malformed values abort startup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("slider_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Slider API v{}", env!("CARGO_PKG_VERSION"));

    // Label fade threshold is shared by the live previews and the exported documents
    let labels = LabelPolicy::new(config.label_hide_threshold);
    let generator = Arc::new(ArtifactGenerator::new(
        DocumentMeta {
            lang: config.artifact_lang.clone(),
            title: config.artifact_title.clone(),
        },
        labels,
    ));
    info!(
        "Artifact generator ready (lang: {}, label threshold: {}%)",
        config.artifact_lang, config.label_hide_threshold
    );

    let sink = config.export_dir.clone().map(|dir| {
        info!("Server-side export enabled under {}", dir.display());
        Arc::new(DirectorySink::new(dir)) as Arc<dyn ArtifactSink>
    });

    // Build app state
    let state = AppState {
        sessions: SessionStore::new(labels),
        generator,
        sink,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the authoring UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
