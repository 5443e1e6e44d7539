//! Embedded behavior script: the browser-side twin of `SliderController`.
//!
//! The template carries only the control flow. Axis selection, the clip-path
//! expression, the handle property, listener sets and the label threshold are all
//! substituted from `interaction`, and the script is specialized to one orientation at
//! generation time.

use crate::artifact::markup::{BEFORE_LABEL_ID, CONTAINER_ID, HANDLE_ID, OVERLAY_ID};
use crate::interaction::geometry::clip_script_expression;
use crate::interaction::gesture::{DRAG_END_EVENTS, DRAG_MOVE_EVENTS, DRAG_START_EVENTS};
use crate::interaction::labels::LabelPolicy;
use crate::models::slider::SliderConfig;

const SCRIPT_TEMPLATE: &str = r#"<script>
    const container = document.getElementById('{container_id}');
    const overlayImage = document.getElementById('{overlay_id}');
    const handle = document.getElementById('{handle_id}');
    const beforeLabel = document.getElementById('{before_label_id}');
    const startEvents = {start_events};
    const moveEvents = {move_events};
    const endEvents = {end_events};
    const labelThreshold = {label_threshold};
    let isDragging = false;

    function clampPercentage(value) {
        if (Number.isNaN(value)) return 0;
        return Math.max(0, Math.min(100, value));
    }

    function positionFromPointer(point, rect) {
        const length = rect.{axis_length};
        if (!(length > 0)) return 0;
        const offset = point.{axis_pointer} - rect.{axis_origin};
        if (Number.isNaN(offset)) return 0;
        return clampPercentage((Math.max(0, Math.min(offset, length)) / length) * 100);
    }

    function updateSlider(value) {
        const percentage = clampPercentage(value);
        overlayImage.style.clipPath = {clip_expression};
        handle.style.{handle_property} = percentage + '%';
        if (beforeLabel) {
            beforeLabel.classList.toggle('label-hidden', percentage < labelThreshold);
        }
    }

    function pointerFrom(e) {
        if (e.touches && e.touches.length > 0) {
            return { x: e.touches[0].clientX, y: e.touches[0].clientY };
        }
        return { x: e.clientX, y: e.clientY };
    }

    function handleMove(e) {
        if (!isDragging) return;
        updateSlider(positionFromPointer(pointerFrom(e), container.getBoundingClientRect()));
        if (e.cancelable) e.preventDefault();
    }

    function stopDrag() {
        if (!isDragging) return;
        isDragging = false;
        moveEvents.forEach(function (name) { window.removeEventListener(name, handleMove); });
        endEvents.forEach(function (name) { window.removeEventListener(name, stopDrag); });
    }

    function startDrag(e) {
        if (isDragging) return;
        isDragging = true;
        moveEvents.forEach(function (name) { window.addEventListener(name, handleMove, { passive: false }); });
        endEvents.forEach(function (name) { window.addEventListener(name, stopDrag); });
        handleMove(e);
    }

    updateSlider({initial_position});

    startEvents.forEach(function (name) { container.addEventListener(name, startDrag, { passive: false }); });
</script>
"#;

fn js_string_array(items: &[&str]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("'{item}'")).collect();
    format!("[{}]", quoted.join(", "))
}

pub fn render_script(config: &SliderConfig, labels: &LabelPolicy) -> String {
    let orientation = config.orientation;
    let axis = orientation.script_axis();

    SCRIPT_TEMPLATE
        .replace("{container_id}", CONTAINER_ID)
        .replace("{overlay_id}", OVERLAY_ID)
        .replace("{handle_id}", HANDLE_ID)
        .replace("{before_label_id}", BEFORE_LABEL_ID)
        .replace("{start_events}", &js_string_array(&DRAG_START_EVENTS))
        .replace("{move_events}", &js_string_array(&DRAG_MOVE_EVENTS))
        .replace("{end_events}", &js_string_array(&DRAG_END_EVENTS))
        .replace("{label_threshold}", &labels.hide_below.to_string())
        .replace("{axis_length}", axis.length)
        .replace("{axis_pointer}", axis.pointer)
        .replace("{axis_origin}", axis.origin)
        .replace("{clip_expression}", &clip_script_expression(orientation, "percentage"))
        .replace(
            "{handle_property}",
            orientation.leading_edge().css_property(),
        )
        .replace(
            "{initial_position}",
            &config.clamped_initial_position().to_string(),
        )
}
