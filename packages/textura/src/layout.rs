//! Bounding-box, alignment, and baseline math for wrapped text.

use crate::style::{Align, TextStyle};

/// Baseline position as a fraction of the font size: canvas-style text APIs
/// sit the alphabetic baseline about 90% into the nominal em box.
pub(crate) const ASCENT_RATIO: f32 = 0.9;

/// A wrapped layout: the lines to draw and the pixel bounding box they
/// occupy at the scale the reflow ran with.
///
/// Replaced atomically by each reflow, never patched per-field.
#[derive(Clone, Debug, Default)]
pub struct TextLayout {
    pub lines: Vec<String>,
    /// Bounding box in logical pixels; multiply by the render scale for
    /// device pixels.
    pub size: [f32; 2],
}

/// Bounding box for `line_count` wrapped lines at the given wrap width.
///
/// Wrapped text occupies the full wrap width no matter how narrow the lines
/// came out, and a stroke outline grows the box by its width on all four
/// sides. With no lines at all there is nothing to stroke and the box
/// degenerates to the vertical padding sliver.
pub(crate) fn bounding_size(style: &TextStyle, line_count: usize, max_width: f32) -> [f32; 2] {
    if line_count == 0 {
        return [0.0, 2.0 * style.vertical_padding];
    }
    let mut size = [
        max_width,
        style.line_height * line_count as f32 + 2.0 * style.vertical_padding,
    ];
    if style.stroke_width > 0.0 {
        size[0] += 2.0 * style.stroke_width;
        size[1] += 2.0 * style.stroke_width;
    }
    size
}

/// Horizontal pen origin for a line of `line_width` inside `bounding_width`.
pub(crate) fn aligned_x(align: Align, bounding_width: f32, line_width: f32) -> f32 {
    match align {
        Align::Left => 0.0,
        Align::Center => bounding_width / 2.0 - line_width / 2.0,
        Align::Right => bounding_width - line_width,
    }
}

/// Baseline for line `index`. Stroked text shifts down by the stroke width
/// so the outline's outward growth cannot clip the first line's cap height.
pub(crate) fn baseline_y(style: &TextStyle, index: usize) -> f32 {
    let mut y = style.line_height * index as f32
        + ASCENT_RATIO * style.font_size
        + style.vertical_padding;
    if style.stroke_width > 0.0 {
        y += style.stroke_width;
    }
    y
}
