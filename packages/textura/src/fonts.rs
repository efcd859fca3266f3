//! Named font registry, backed by skrifa for character mapping and advances.

use std::collections::HashMap;
use std::sync::Arc;

use peniko::{Blob, Font};
use skrifa::instance::{LocationRef, Size};
use skrifa::{FontRef, GlyphId, MetadataProvider};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("font data registered as '{0}' is not a parsable font")]
    InvalidData(String),
}

/// A registered font: the raw blob handed to glyph runs plus skrifa-backed
/// character-to-glyph mapping and advance lookups.
///
/// Measurement and glyph placement both read the same advance table, so a
/// measured line width always agrees with the run that gets drawn.
pub struct LoadedFont {
    font: Font,
}

impl LoadedFont {
    fn new(name: &str, data: Vec<u8>) -> Result<Self, FontError> {
        let font = Font::new(Blob::new(Arc::new(data)), 0);
        let loaded = Self { font };
        if loaded.font_ref().is_none() {
            return Err(FontError::InvalidData(name.to_string()));
        }
        Ok(loaded)
    }

    pub(crate) fn font(&self) -> &Font {
        &self.font
    }

    fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(self.font.data.as_ref(), self.font.index).ok()
    }

    /// Total advance width of `text` at `font_size` pixels. Unresolved
    /// characters contribute the .notdef glyph's advance, the same glyph
    /// they are drawn with.
    pub fn measure(&self, font_size: f32, text: &str) -> f32 {
        let Some(font_ref) = self.font_ref() else {
            return 0.0;
        };
        let charmap = font_ref.charmap();
        let metrics = font_ref.glyph_metrics(Size::new(font_size), LocationRef::default());
        text.chars()
            .map(|ch| {
                let gid = charmap.map(ch).unwrap_or(GlyphId::new(0));
                metrics.advance_width(gid).unwrap_or(0.0)
            })
            .sum()
    }

    /// Glyph ids and advances for `text`, in order, at `font_size` pixels.
    /// Characters the charmap cannot resolve fall back to glyph 0.
    pub(crate) fn glyphs(&self, font_size: f32, text: &str) -> Vec<(u32, f32)> {
        let Some(font_ref) = self.font_ref() else {
            return Vec::new();
        };
        let charmap = font_ref.charmap();
        let metrics = font_ref.glyph_metrics(Size::new(font_size), LocationRef::default());
        text.chars()
            .map(|ch| {
                let gid = charmap.map(ch).unwrap_or(GlyphId::new(0));
                (gid.to_u32(), metrics.advance_width(gid).unwrap_or(0.0))
            })
            .collect()
    }
}

/// Fonts available to skins, looked up by exact name.
///
/// Populated at startup, then shared immutably (`Arc<FontLibrary>`) between
/// skins and their measurers.
#[derive(Default)]
pub struct FontLibrary {
    fonts: HashMap<String, Arc<LoadedFont>>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `data` under `name`, validating that it parses as a font.
    /// Font collections contribute their first face. Re-registering a name
    /// replaces the previous entry.
    pub fn register(&mut self, name: &str, data: Vec<u8>) -> Result<(), FontError> {
        let font = LoadedFont::new(name, data)?;
        self.fonts.insert(name.to_string(), Arc::new(font));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<LoadedFont>> {
        self.fonts.get(name).cloned()
    }
}
