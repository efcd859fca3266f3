//! The measurement seam between layout and font data.

use std::sync::Arc;

use crate::fonts::{FontLibrary, LoadedFont};

/// Measures rendered line widths for an active font and size.
///
/// The active font must be set immediately before any batch of measurements
/// whose result should reflect it; results are undefined if a measurement is
/// made under a stale configuration.
pub trait TextMeasurer {
    fn set_font(&mut self, font: &str, font_size: f32);

    /// Width of `line` in pixels at the active font and size.
    fn measure(&mut self, line: &str) -> f32;
}

/// [`TextMeasurer`] over a [`FontLibrary`], summing per-character advances.
///
/// An unregistered font measures as zero rather than erroring; rendering
/// degrades to an empty raster of the right shape. Characters the charmap
/// cannot resolve fall back to the font's .notdef glyph and its advance,
/// matching how they are placed when rasterized.
pub struct FontMeasurer {
    library: Arc<FontLibrary>,
    font: Option<Arc<LoadedFont>>,
    font_size: f32,
}

impl FontMeasurer {
    pub fn new(library: Arc<FontLibrary>) -> Self {
        Self {
            library,
            font: None,
            font_size: 0.0,
        }
    }
}

impl TextMeasurer for FontMeasurer {
    fn set_font(&mut self, font: &str, font_size: f32) {
        self.font = self.library.get(font);
        self.font_size = font_size;
        if self.font.is_none() && !font.is_empty() {
            log::debug!("font '{font}' is not registered; lines will measure as zero width");
        }
    }

    fn measure(&mut self, line: &str) -> f32 {
        match &self.font {
            Some(font) => font.measure(self.font_size, line),
            None => 0.0,
        }
    }
}
