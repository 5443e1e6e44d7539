// Authoring sessions
// The host side of the slider: image ingestion, config, the live preview instance,
// and export to a persistence collaborator. Nothing here is persisted across restarts.

pub mod export;
pub mod handlers;
pub mod ingest;
pub mod store;

pub use export::{ArtifactSink, DirectorySink};
pub use store::SessionStore;
