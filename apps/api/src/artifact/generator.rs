//! Standalone Artifact Generator: one self-contained HTML document per export.
//!
//! Output is a pure function of `(before, after, config)` plus the fixed document
//! metadata: no timestamps, random ids or environment lookups. The generator has no
//! failure path; callers must only invoke it once both handles exist.

use crate::artifact::escape::escape_html;
use crate::artifact::markup::render_body;
use crate::artifact::script::render_script;
use crate::artifact::styles::render_styles;
use crate::interaction::labels::LabelPolicy;
use crate::models::slider::{ImageHandle, SliderConfig};

pub const DEFAULT_DOCUMENT_LANG: &str = "fr";
pub const DEFAULT_DOCUMENT_TITLE: &str = "Avant/Après Comparison";

/// Document-level metadata that is fixed per deployment, not per export.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMeta {
    pub lang: String,
    pub title: String,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self {
            lang: DEFAULT_DOCUMENT_LANG.to_string(),
            title: DEFAULT_DOCUMENT_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArtifactGenerator {
    meta: DocumentMeta,
    labels: LabelPolicy,
}

impl ArtifactGenerator {
    pub fn new(meta: DocumentMeta, labels: LabelPolicy) -> Self {
        Self { meta, labels }
    }

    pub fn generate(
        &self,
        before: &ImageHandle,
        after: &ImageHandle,
        config: &SliderConfig,
    ) -> String {
        let styles = render_styles(config);
        let body = render_body(before, after, config, &self.labels);
        let script = render_script(config, &self.labels);

        let mut doc = String::with_capacity(styles.len() + body.len() + script.len() + 512);
        doc.push_str("<!DOCTYPE html>\n");
        doc.push_str(&format!("<html lang=\"{}\">\n", escape_html(&self.meta.lang)));
        doc.push_str("<head>\n");
        doc.push_str("    <meta charset=\"UTF-8\">\n");
        doc.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        doc.push_str(&format!(
            "    <title>{}</title>\n",
            escape_html(&self.meta.title)
        ));
        doc.push_str(&styles);
        doc.push_str("</head>\n<body>\n\n");
        doc.push_str(&body);
        doc.push('\n');
        doc.push_str(&script);
        doc.push_str("\n</body>\n</html>\n");
        doc
    }
}
