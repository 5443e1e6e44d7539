//! Slider geometry: pointer → split percentage, split percentage → clip inset and
//! handle placement.
//!
//! Every function here is pure and total. The live preview calls them directly; the
//! artifact generator embeds their script equivalents (see `*_script_*` helpers) so the
//! two renditions cannot drift apart.

use serde::{Deserialize, Serialize};

/// Thickness of the divider bar, in CSS pixels.
pub const HANDLE_THICKNESS_PX: u32 = 4;

// Primitive types

/// Axis along which the split line and handle travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Split moves along x; the before image is visible from the left edge.
    #[default]
    Horizontal,
    /// Split moves along y; the before image is visible from the top edge.
    Vertical,
}

/// A pointer location, in the same coordinate space as the container [`Bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[cfg(test)]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Container rectangle: origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[cfg(test)]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Edges in CSS shorthand order (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const CSS_ORDER: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn css_property(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
        }
    }
}

impl Orientation {
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Vertical)
    }

    /// Edge from which the visible part of the overlay is measured.
    pub fn leading_edge(self) -> Edge {
        match self {
            Orientation::Horizontal => Edge::Left,
            Orientation::Vertical => Edge::Top,
        }
    }

    /// Edge that gets inset by `100 - position`.
    pub fn trailing_edge(self) -> Edge {
        match self {
            Orientation::Horizontal => Edge::Right,
            Orientation::Vertical => Edge::Bottom,
        }
    }

    fn axis_coordinate(self, point: Point) -> f64 {
        match self {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    fn axis_origin(self, bounds: &Bounds) -> f64 {
        match self {
            Orientation::Horizontal => bounds.x,
            Orientation::Vertical => bounds.y,
        }
    }

    fn axis_length(self, bounds: &Bounds) -> f64 {
        match self {
            Orientation::Horizontal => bounds.width,
            Orientation::Vertical => bounds.height,
        }
    }

    /// Resize cursor shown over the container.
    pub fn cursor(self) -> &'static str {
        match self {
            Orientation::Horizontal => "ew-resize",
            Orientation::Vertical => "ns-resize",
        }
    }

    /// CSS translate function used to center the handle on the split line.
    pub fn centering_function(self) -> &'static str {
        match self {
            Orientation::Horizontal => "translateX",
            Orientation::Vertical => "translateY",
        }
    }

    /// Script names for `(pointer coordinate, rect origin, rect extent)` on this axis,
    /// as exposed by DOM `clientX/clientY` and `DOMRect`.
    pub fn script_axis(self) -> ScriptAxis {
        match self {
            Orientation::Horizontal => ScriptAxis {
                pointer: "x",
                origin: "left",
                length: "width",
            },
            Orientation::Vertical => ScriptAxis {
                pointer: "y",
                origin: "top",
                length: "height",
            },
        }
    }
}

/// Property names the generated script reads for the active axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptAxis {
    pub pointer: &'static str,
    pub origin: &'static str,
    pub length: &'static str,
}

// Pointer → position

/// Clamps a percentage into [0, 100]. NaN maps to 0.
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Maps a pointer location to a split percentage along the active axis.
///
/// The pointer offset is clamped to `[0, axis_length]` before normalizing, so points
/// outside the container land on 0 or 100. A zero-length axis yields 0.
pub fn position_from_pointer(point: Point, bounds: &Bounds, orientation: Orientation) -> f64 {
    let length = orientation.axis_length(bounds);
    // Also rejects NaN and negative extents.
    if !(length > 0.0) {
        return 0.0;
    }
    let offset = orientation.axis_coordinate(point) - orientation.axis_origin(bounds);
    if offset.is_nan() {
        return 0.0;
    }
    let offset = offset.clamp(0.0, length);
    clamp_percentage(offset / length * 100.0)
}

// Position → clip region

/// Inset (in percent) applied to the overlay image. Only the trailing edge is ever
/// non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipInset {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ClipInset {
    pub fn edge(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    /// CSS `clip-path` value, e.g. `inset(0 25% 0 0)`.
    pub fn to_css(&self, orientation: Orientation) -> String {
        let trailing = orientation.trailing_edge();
        let parts: Vec<String> = Edge::CSS_ORDER
            .iter()
            .map(|&edge| {
                if edge == trailing {
                    format!("{}%", self.edge(edge))
                } else {
                    "0".to_string()
                }
            })
            .collect();
        format!("inset({})", parts.join(" "))
    }
}

/// Clip region that leaves `position` percent of the overlay visible from the leading
/// edge and hides the rest.
pub fn clip_region(position: f64, orientation: Orientation) -> ClipInset {
    let hidden = 100.0 - clamp_percentage(position);
    let trailing = orientation.trailing_edge();
    let inset_for = |edge: Edge| if edge == trailing { hidden } else { 0.0 };
    ClipInset {
        top: inset_for(Edge::Top),
        right: inset_for(Edge::Right),
        bottom: inset_for(Edge::Bottom),
        left: inset_for(Edge::Left),
    }
}

/// Script template literal producing the same string as [`ClipInset::to_css`] for the
/// percentage held in `variable`.
pub fn clip_script_expression(orientation: Orientation, variable: &str) -> String {
    let trailing = orientation.trailing_edge();
    let parts: Vec<String> = Edge::CSS_ORDER
        .iter()
        .map(|&edge| {
            if edge == trailing {
                format!("${{100 - {variable}}}%")
            } else {
                "0".to_string()
            }
        })
        .collect();
    format!("`inset({})`", parts.join(" "))
}

// Position → handle placement

/// Placement of the divider bar.
///
/// The bar spans the full cross axis and sits at `axis_offset` percent along the active
/// axis, measured from the leading edge. It is shifted back by half its own thickness
/// (`centering_percent` of itself) so its centerline lies on the split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandleTransform {
    /// CSS property carrying the offset (`left` or `top`).
    pub offset_property: &'static str,
    pub axis_offset: f64,
    pub cross_axis_extent: f64,
    pub thickness_px: u32,
    pub centering_percent: f64,
    /// CSS `transform` value, e.g. `translateX(-50%)`.
    pub centering: String,
}

impl HandleTransform {
    /// Inline style for the handle element.
    pub fn to_css(&self) -> String {
        format!("{}: {}%;", self.offset_property, self.axis_offset)
    }
}

pub fn handle_transform(position: f64, orientation: Orientation) -> HandleTransform {
    let centering_percent = -50.0;
    HandleTransform {
        offset_property: orientation.leading_edge().css_property(),
        axis_offset: clamp_percentage(position),
        cross_axis_extent: 100.0,
        thickness_px: HANDLE_THICKNESS_PX,
        centering_percent,
        centering: format!(
            "{}({}%)",
            orientation.centering_function(),
            centering_percent
        ),
    }
}
