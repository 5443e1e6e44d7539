// Standalone Artifact Generator
// Emits one dependency-free HTML document (markup + inline style + inline script)
// that reproduces the live slider. All geometry comes from `interaction`.

pub mod escape;
pub mod generator;
pub mod markup;
pub mod script;
pub mod styles;

pub use generator::{ArtifactGenerator, DocumentMeta};
