use std::sync::Arc;

use crate::artifact::ArtifactGenerator;
use crate::config::Config;
use crate::session::{ArtifactSink, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Deployment-wide document settings (language, title, label threshold).
    pub generator: Arc<ArtifactGenerator>,
    /// Server-side persistence for exports. `None` when `EXPORT_DIR` is unset.
    pub sink: Option<Arc<dyn ArtifactSink>>,
    pub config: Config,
}
