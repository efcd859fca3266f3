//! Text content and style inputs, plus the vertical metrics derived from them.

use peniko::Color;
use peniko::color::palette;

/// Horizontal placement of each wrapped line within the bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A complete text + style record.
///
/// Updates replace the whole record; there is no per-field mutation path.
/// Fields are trusted as-is (no validation), matching the contract that the
/// owning scene node guarantees validity.
#[derive(Clone, Debug)]
pub struct TextState {
    pub text: String,
    /// Font name, resolved by exact match in a [`FontLibrary`](crate::FontLibrary).
    pub font: String,
    pub color: Color,
    /// Wrap limit in scene units (converted to pixels at layout time).
    pub max_line_width: f32,
    pub font_size: f32,
    pub align: Align,
    /// Outline half-width in pixels. Zero disables stroking.
    pub stroke_width: f32,
    pub stroke_color: Color,
    /// Fill each line with a hue-wheel gradient instead of `color`.
    pub rainbow: bool,
}

/// Style currently in effect, with `line_height` and `vertical_padding`
/// derived from the font size.
///
/// The derived fields are computed here and nowhere else; they can never be
/// set independently of `font_size`.
#[derive(Clone, Debug)]
pub(crate) struct TextStyle {
    pub font: String,
    pub color: Color,
    pub max_line_width: f32,
    pub font_size: f32,
    pub line_height: f32,
    pub vertical_padding: f32,
    pub align: Align,
    pub stroke_width: f32,
    pub stroke_color: Color,
    pub rainbow: bool,
}

impl TextStyle {
    pub fn from_state(state: &TextState) -> Self {
        Self {
            font: state.font.clone(),
            color: state.color,
            max_line_width: state.max_line_width,
            font_size: state.font_size,
            line_height: state.font_size + state.font_size / 7.0,
            vertical_padding: state.font_size / 7.0,
            align: state.align,
            stroke_width: state.stroke_width,
            stroke_color: state.stroke_color,
            rainbow: state.rainbow,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: String::new(),
            color: palette::css::TRANSPARENT,
            max_line_width: 0.0,
            font_size: 0.0,
            line_height: 0.0,
            vertical_padding: 0.0,
            align: Align::Left,
            stroke_width: 0.0,
            stroke_color: palette::css::TRANSPARENT,
            rainbow: false,
        }
    }
}
