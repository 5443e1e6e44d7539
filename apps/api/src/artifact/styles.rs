//! Inline stylesheet for the standalone artifact.
//!
//! Orientation-dependent rules (cursor, handle geometry, badge size, label anchors) are
//! filled in from `interaction` so they match the live preview.

use crate::interaction::geometry::{Orientation, HANDLE_THICKNESS_PX};
use crate::interaction::labels::{label_anchor, LABEL_FADE_SECONDS};
use crate::models::slider::{ImageSlot, SliderConfig};

/// Handle badge size `(width, height)` in pixels; the long side runs along the bar.
pub fn badge_size(orientation: Orientation) -> (u32, u32) {
    match orientation {
        Orientation::Horizontal => (24, 40),
        Orientation::Vertical => (40, 24),
    }
}

const STYLE_TEMPLATE: &str = r#"    <style>
        * { box-sizing: border-box; margin: 0; padding: 0; }

        body {
            width: 100%;
            min-height: 100vh;
            margin: 0;
            display: flex;
            justify-content: center;
            align-items: flex-start;
            background: transparent;
            overflow: hidden;
        }

        .container {
            position: relative;
            display: inline-block;
            max-width: 100%;
            line-height: 0;
            cursor: {cursor};
            user-select: none;
            -webkit-user-select: none;
            touch-action: none;
        }

        .img-base {
            display: block;
            max-width: 100%;
            height: auto;
            max-height: 100vh;
            object-fit: contain;
        }

        .img-overlay {
            position: absolute;
            top: 0;
            left: 0;
            width: 100%;
            height: 100%;
            object-fit: cover;
        }

        .handle {
            position: absolute;
            z-index: 3;
            {handle_cross_edge}: 0;
            {handle_cross_extent}: 100%;
            {handle_thickness_extent}: {handle_thickness}px;
            transform: {handle_centering};
            background-color: {slider_color};
            box-shadow: 0 0 10px rgba(0,0,0,0.5);
            display: flex;
            align-items: center;
            justify-content: center;
            pointer-events: none;
        }

        .handle-icon {
            width: {badge_width}px;
            height: {badge_height}px;
            background: {slider_color};
            border-radius: 12px;
            display: flex;
            flex-direction: {badge_direction};
            align-items: center;
            justify-content: center;
            color: white;
        }

        .label {
            position: absolute;
            background: rgba(0, 0, 0, 0.6);
            color: white;
            padding: 4px 8px;
            border-radius: 4px;
            font-family: sans-serif;
            font-size: 12px;
            line-height: normal;
            pointer-events: none;
            z-index: 4;
            opacity: 0.8;
            transition: opacity {fade}s;
        }

        @media (hover: hover) {
            .label { opacity: 0; }
            .container:hover .label { opacity: 1; }
        }

        .label-before { {before_anchor} }
        .label-after { {after_anchor} }
        .container .label.label-hidden { opacity: 0; }
    </style>
"#;

pub fn render_styles(config: &SliderConfig) -> String {
    let orientation = config.orientation;
    let (badge_width, badge_height) = badge_size(orientation);
    // The bar spans the cross axis; its thickness runs along the active axis.
    let (handle_cross_edge, handle_cross_extent, handle_thickness_extent) = match orientation {
        Orientation::Horizontal => ("top", "height", "width"),
        Orientation::Vertical => ("left", "width", "height"),
    };

    STYLE_TEMPLATE
        .replace("{cursor}", orientation.cursor())
        .replace("{handle_cross_edge}", handle_cross_edge)
        .replace("{handle_cross_extent}", handle_cross_extent)
        .replace("{handle_thickness_extent}", handle_thickness_extent)
        .replace("{handle_thickness}", &HANDLE_THICKNESS_PX.to_string())
        .replace(
            "{handle_centering}",
            &format!("{}(-50%)", orientation.centering_function()),
        )
        .replace("{badge_width}", &badge_width.to_string())
        .replace("{badge_height}", &badge_height.to_string())
        .replace(
            "{badge_direction}",
            if orientation.is_vertical() { "column" } else { "row" },
        )
        .replace("{fade}", &LABEL_FADE_SECONDS.to_string())
        .replace(
            "{before_anchor}",
            &label_anchor(ImageSlot::Before, orientation).to_css(),
        )
        .replace(
            "{after_anchor}",
            &label_anchor(ImageSlot::After, orientation).to_css(),
        )
        // Last: the color is caller-controlled text and must not be re-scanned for
        // placeholders.
        .replace("{slider_color}", &config.slider_color)
}
