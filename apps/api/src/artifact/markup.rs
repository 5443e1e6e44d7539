//! Document body: base image, clipped overlay, handle and optional labels.
//!
//! The after image is the layout-determining element; the before image is the overlay.
//! Initial clip and handle offset are rendered inline so the document is correct even
//! before its script runs.

use crate::artifact::escape::push_escaped;
use crate::interaction::geometry::{clip_region, handle_transform, Orientation};
use crate::interaction::labels::LabelPolicy;
use crate::models::slider::{ImageHandle, ImageSlot, SliderConfig};

/// Element ids shared between markup and script.
pub const CONTAINER_ID: &str = "container";
pub const OVERLAY_ID: &str = "overlay-image";
pub const HANDLE_ID: &str = "handle";
pub const BEFORE_LABEL_ID: &str = "label-before";

const CHEVRON_ATTRS: &str = r#"width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round""#;

fn handle_icon(orientation: Orientation) -> String {
    match orientation {
        Orientation::Vertical => format!(
            r#"<svg {CHEVRON_ATTRS}><path d="m18 15-6 6-6-6"/><path d="m6 9 6-6 6 6"/></svg>"#
        ),
        Orientation::Horizontal => format!(
            r#"<svg {CHEVRON_ATTRS}><path d="m9 18 6-6-6-6"/></svg><svg style="transform: rotate(180deg); margin-left: -8px;" {CHEVRON_ATTRS}><path d="m9 18 6-6-6-6"/></svg>"#
        ),
    }
}

fn push_label(out: &mut String, slot: ImageSlot, text: &str, hidden: bool) {
    out.push_str("    <div class=\"label label-");
    out.push_str(slot.as_str());
    if hidden {
        out.push_str(" label-hidden");
    }
    out.push('"');
    if slot == ImageSlot::Before {
        out.push_str(" id=\"");
        out.push_str(BEFORE_LABEL_ID);
        out.push('"');
    }
    out.push('>');
    push_escaped(out, text);
    out.push_str("</div>\n");
}

pub fn render_body(
    before: &ImageHandle,
    after: &ImageHandle,
    config: &SliderConfig,
    labels: &LabelPolicy,
) -> String {
    let orientation = config.orientation;
    let position = config.clamped_initial_position();
    let clip_css = clip_region(position, orientation).to_css(orientation);
    let handle_css = handle_transform(position, orientation).to_css();

    let mut out = String::with_capacity(before.byte_len() + after.byte_len() + 2048);

    out.push_str("<div class=\"container\" id=\"");
    out.push_str(CONTAINER_ID);
    out.push_str("\">\n");

    out.push_str("    <img src=\"");
    push_escaped(&mut out, after.as_str());
    out.push_str("\" class=\"img-base\" alt=\"After\" draggable=\"false\" />\n");

    out.push_str("    <img src=\"");
    push_escaped(&mut out, before.as_str());
    out.push_str("\" id=\"");
    out.push_str(OVERLAY_ID);
    out.push_str("\" class=\"img-overlay\" alt=\"Before\" draggable=\"false\" style=\"clip-path: ");
    out.push_str(&clip_css);
    out.push_str(";\" />\n");

    out.push_str("    <div class=\"handle\" id=\"");
    out.push_str(HANDLE_ID);
    out.push_str("\" style=\"");
    out.push_str(&handle_css);
    out.push_str("\">\n        <div class=\"handle-icon\">");
    out.push_str(&handle_icon(orientation));
    out.push_str("</div>\n    </div>\n");

    if let Some(text) = config.label(ImageSlot::Before) {
        let hidden = !labels.is_visible(ImageSlot::Before, position);
        push_label(&mut out, ImageSlot::Before, text, hidden);
    }
    if let Some(text) = config.label(ImageSlot::After) {
        push_label(&mut out, ImageSlot::After, text, false);
    }

    out.push_str("</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handles() -> (ImageHandle, ImageHandle) {
        (
            ImageHandle::new("data:image/png;base64,QkVGT1JF"),
            ImageHandle::new("data:image/png;base64,QUZURVI="),
        )
    }

    #[test]
    fn test_after_is_base_and_before_is_overlay() {
        let (before, after) = handles();
        let body = render_body(&before, &after, &SliderConfig::default(), &LabelPolicy::default());
        let base = body.find("QUZURVI=").unwrap();
        let overlay = body.find("QkVGT1JF").unwrap();
        assert!(base < overlay);
        assert!(body.contains(r#"src="data:image/png;base64,QUZURVI=" class="img-base""#));
        assert!(body.contains(r#"src="data:image/png;base64,QkVGT1JF" id="overlay-image" class="img-overlay""#));
    }

    #[test]
    fn test_initial_inline_state_uses_clamped_position() {
        let (before, after) = handles();
        let config = SliderConfig {
            initial_position: 150.0,
            ..Default::default()
        };
        let body = render_body(&before, &after, &config, &LabelPolicy::default());
        assert!(body.contains("clip-path: inset(0 0% 0 0);"));
        assert!(body.contains("style=\"left: 100%;\""));
    }

    #[test]
    fn test_labels_escaped_and_optional() {
        let (before, after) = handles();
        let config = SliderConfig {
            before_label: "<Avant>".to_string(),
            ..Default::default()
        };
        let body = render_body(&before, &after, &config, &LabelPolicy::default());
        assert!(body.contains(">&lt;Avant&gt;</div>"));
        assert!(!body.contains("label label-after"));
    }

    #[test]
    fn test_before_label_starts_hidden_under_threshold() {
        let (before, after) = handles();
        let config = SliderConfig {
            before_label: "Avant".to_string(),
            initial_position: 5.0,
            ..Default::default()
        };
        let body = render_body(&before, &after, &config, &LabelPolicy::default());
        assert!(body.contains(r#"class="label label-before label-hidden" id="label-before""#));
    }

    #[test]
    fn test_icons_follow_orientation() {
        assert_eq!(handle_icon(Orientation::Horizontal).matches("<svg").count(), 2);
        assert_eq!(handle_icon(Orientation::Vertical).matches("<svg").count(), 1);
    }
}
