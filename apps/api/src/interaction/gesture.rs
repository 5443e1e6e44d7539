//! Drag gesture state machine: the live slider instance.
//!
//! States: `Idle` and `Dragging`. A pointer-down inside the container starts a drag and
//! immediately recomputes the position; moves are honoured anywhere while dragging;
//! pointer-up, touch-end or touch-cancel anywhere ends it. Window-level listeners are
//! modelled by [`GlobalListeners`], which only exists inside `Dragging`.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::interaction::geometry::{
    clamp_percentage, clip_region, handle_transform, position_from_pointer, Bounds, ClipInset,
    HandleTransform, Orientation, Point,
};
use crate::interaction::labels::{label_anchor, LabelAnchor, LabelPolicy};
use crate::models::slider::{ImageSlot, SliderConfig};

/// Container-scoped events that start a drag.
pub const DRAG_START_EVENTS: [&str; 2] = ["mousedown", "touchstart"];
/// Window-scoped events that move the split while dragging.
pub const DRAG_MOVE_EVENTS: [&str; 2] = ["mousemove", "touchmove"];
/// Window-scoped events that end the drag.
pub const DRAG_END_EVENTS: [&str; 3] = ["mouseup", "touchend", "touchcancel"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// Pointer input fed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        point: Point,
        #[serde(default)]
        source: PointerSource,
    },
    Move {
        point: Point,
        #[serde(default)]
        source: PointerSource,
    },
    Up {
        #[serde(default)]
        source: PointerSource,
    },
    /// Touch cancelled by the platform; treated exactly like a release.
    Cancel,
}

impl PointerEvent {
    /// True for events whose effect depends on the container geometry.
    pub fn needs_bounds(&self) -> bool {
        matches!(self, PointerEvent::Down { .. } | PointerEvent::Move { .. })
    }
}

/// Scoped registration of the window-level move/end listeners.
///
/// Constructed only on entry to `Dragging` and dropped on every exit from it, so the
/// listeners can never outlive the gesture.
#[derive(Debug, PartialEq, Eq)]
pub struct GlobalListeners {
    move_events: &'static [&'static str],
    end_events: &'static [&'static str],
}

impl GlobalListeners {
    fn attach() -> Self {
        trace!(
            move_events = ?DRAG_MOVE_EVENTS,
            end_events = ?DRAG_END_EVENTS,
            "Attaching global drag listeners"
        );
        Self {
            move_events: &DRAG_MOVE_EVENTS,
            end_events: &DRAG_END_EVENTS,
        }
    }

    pub fn events(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.move_events.iter().chain(self.end_events.iter()).copied()
    }
}

impl Drop for GlobalListeners {
    fn drop(&mut self) {
        trace!(events = ?self.events().collect::<Vec<_>>(), "Releasing global drag listeners");
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(GlobalListeners),
}

impl GestureState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging(_))
    }
}

/// Snapshot of everything a renderer needs to draw the slider at its current position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderView {
    pub orientation: Orientation,
    pub position: f64,
    pub dragging: bool,
    pub clip: ClipInset,
    pub clip_css: String,
    pub handle: HandleTransform,
    pub before_label_visible: bool,
    pub before_label_anchor: LabelAnchor,
    pub after_label_anchor: LabelAnchor,
}

/// One live slider: the single mutable `SliderPosition` plus its gesture state.
#[derive(Debug)]
pub struct SliderController {
    orientation: Orientation,
    position: f64,
    gesture: GestureState,
    labels: LabelPolicy,
}

impl SliderController {
    pub fn new(config: &SliderConfig, labels: LabelPolicy) -> Self {
        Self {
            orientation: config.orientation,
            position: config.clamped_initial_position(),
            gesture: GestureState::Idle,
            labels,
        }
    }

    /// Resets position and gesture from a new config. Any active drag is dropped along
    /// with its listeners.
    pub fn reinitialize(&mut self, config: &SliderConfig) {
        if self.gesture.is_dragging() {
            debug!("Re-initializing slider mid-drag; ending gesture");
        }
        self.gesture = GestureState::Idle;
        self.orientation = config.orientation;
        self.position = config.clamped_initial_position();
    }

    #[cfg(test)]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[cfg(test)]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    #[cfg(test)]
    pub fn listeners(&self) -> Option<&GlobalListeners> {
        match &self.gesture {
            GestureState::Dragging(listeners) => Some(listeners),
            GestureState::Idle => None,
        }
    }

    /// Applies one pointer event. Returns `true` if the position changed.
    ///
    /// `bounds` is the container rectangle at event time; it is ignored for `Up` and
    /// `Cancel`.
    pub fn handle(&mut self, event: PointerEvent, bounds: &Bounds) -> bool {
        match (self.gesture.is_dragging(), event) {
            (false, PointerEvent::Down { point, source }) => {
                if !bounds.contains(point) {
                    trace!(?point, "Pointer down outside container ignored");
                    return false;
                }
                self.gesture = GestureState::Dragging(GlobalListeners::attach());
                debug!(?source, "Drag started");
                self.apply(point, bounds)
            }
            // Re-entrant down while already dragging is a no-op.
            (true, PointerEvent::Down { .. }) => false,
            (true, PointerEvent::Move { point, .. }) => self.apply(point, bounds),
            (true, PointerEvent::Up { .. } | PointerEvent::Cancel) => {
                self.gesture = GestureState::Idle;
                debug!(position = self.position, "Drag ended");
                false
            }
            (false, _) => false,
        }
    }

    fn apply(&mut self, point: Point, bounds: &Bounds) -> bool {
        let next = position_from_pointer(point, bounds, self.orientation);
        let changed = next != self.position;
        self.position = next;
        changed
    }

    pub fn view(&self) -> SliderView {
        let position = clamp_percentage(self.position);
        let clip = clip_region(position, self.orientation);
        SliderView {
            orientation: self.orientation,
            position,
            dragging: self.is_dragging(),
            clip_css: clip.to_css(self.orientation),
            clip,
            handle: handle_transform(position, self.orientation),
            before_label_visible: self.labels.is_visible(ImageSlot::Before, position),
            before_label_anchor: label_anchor(ImageSlot::Before, self.orientation),
            after_label_anchor: label_anchor(ImageSlot::After, self.orientation),
        }
    }
}
