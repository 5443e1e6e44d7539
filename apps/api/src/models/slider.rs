use serde::{Deserialize, Serialize};

use crate::interaction::geometry::{clamp_percentage, Orientation};

/// Default slider color (Tailwind blue-500), matching the authoring UI's initial state.
pub const DEFAULT_SLIDER_COLOR: &str = "#3b82f6";
pub const DEFAULT_INITIAL_POSITION: f64 = 50.0;

/// Opaque reference to image bytes, usually a `data:` URI produced by ingestion.
///
/// The core never decodes or validates the content; two handles are equal iff their
/// strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn byte_len(&self) -> usize {
        self.0.len()
    }

    /// Best-effort media type for `data:<type>;...` handles. Informational only.
    pub fn media_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let end = rest.find(|c: char| c == ';' || c == ',')?;
        let media_type = &rest[..end];
        (!media_type.is_empty()).then_some(media_type)
    }
}

/// Which of the two session images an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSlot {
    Before,
    After,
}

impl ImageSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSlot::Before => "before",
            ImageSlot::After => "after",
        }
    }
}

impl std::fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slider configuration. Immutable per render: changing it means re-initializing
/// the preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub orientation: Orientation,
    /// Empty = not rendered.
    pub before_label: String,
    /// Empty = not rendered.
    pub after_label: String,
    /// Any CSS color string. Passed through verbatim, never validated.
    pub slider_color: String,
    /// Percentage along the active axis at first render. Not trusted to be in range.
    pub initial_position: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            before_label: String::new(),
            after_label: String::new(),
            slider_color: DEFAULT_SLIDER_COLOR.to_string(),
            initial_position: DEFAULT_INITIAL_POSITION,
        }
    }
}

impl SliderConfig {
    /// `initial_position` clamped into [0, 100]. Use this wherever the value is consumed.
    pub fn clamped_initial_position(&self) -> f64 {
        clamp_percentage(self.initial_position)
    }

    pub fn label(&self, slot: ImageSlot) -> Option<&str> {
        let text = match slot {
            ImageSlot::Before => self.before_label.as_str(),
            ImageSlot::After => self.after_label.as_str(),
        };
        (!text.is_empty()).then_some(text)
    }
}
