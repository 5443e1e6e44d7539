//! Label placement and the before-label fade rule.

use serde::Serialize;

use crate::interaction::geometry::{Edge, Orientation};
use crate::models::slider::ImageSlot;

/// Default position (percent) under which the before label fades out.
///
/// Overridable via `LABEL_HIDE_THRESHOLD`.
pub const DEFAULT_LABEL_HIDE_THRESHOLD: f64 = 10.0;

/// Distance of a label from the two container edges it is anchored to, in CSS pixels.
pub const LABEL_INSET_PX: u32 = 10;

/// Fade duration for label visibility changes, in seconds.
pub const LABEL_FADE_SECONDS: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelPolicy {
    pub hide_below: f64,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            hide_below: DEFAULT_LABEL_HIDE_THRESHOLD,
        }
    }
}

impl LabelPolicy {
    pub fn new(hide_below: f64) -> Self {
        Self { hide_below }
    }

    /// Only the before label is subject to fading; the after label is always shown.
    pub fn is_visible(&self, slot: ImageSlot, position: f64) -> bool {
        match slot {
            ImageSlot::Before => position >= self.hide_below,
            ImageSlot::After => true,
        }
    }
}

/// Corner a label is pinned to: one edge on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelAnchor {
    pub vertical: Edge,
    pub horizontal: Edge,
}

impl LabelAnchor {
    /// e.g. `top: 10px; left: 10px;`
    pub fn to_css(&self) -> String {
        format!(
            "{}: {LABEL_INSET_PX}px; {}: {LABEL_INSET_PX}px;",
            self.vertical.css_property(),
            self.horizontal.css_property()
        )
    }
}

/// Before sits top-left in both orientations. After sits bottom-left when vertical and
/// top-right when horizontal, i.e. always on the far side of the split from the before
/// label.
pub fn label_anchor(slot: ImageSlot, orientation: Orientation) -> LabelAnchor {
    match (slot, orientation) {
        (ImageSlot::Before, _) => LabelAnchor {
            vertical: Edge::Top,
            horizontal: Edge::Left,
        },
        (ImageSlot::After, Orientation::Vertical) => LabelAnchor {
            vertical: Edge::Bottom,
            horizontal: Edge::Left,
        },
        (ImageSlot::After, Orientation::Horizontal) => LabelAnchor {
            vertical: Edge::Top,
            horizontal: Edge::Right,
        },
    }
}
