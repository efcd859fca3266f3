//! Styled text rendered to textures.
//!
//! This crate implements the text-to-texture subsystem of a 2D scene
//! renderer. A [`TextSkin`] takes a text string plus style attributes (font,
//! size, color, alignment, stroke, wrap width, rainbow fill), wraps the text
//! to fit, rasterizes it on the CPU at a requested display scale, and keeps
//! a texture owned by a [`RenderBackend`] in sync with the result.
//!
//! Work is avoided rather than repeated: a two-flag dirty protocol re-wraps
//! only when text, style, or scale change, and re-uploads only when the
//! raster output actually changed. See [`TextSkin::get_texture`].
//!
//! Fonts come from a shared [`FontLibrary`]. Measurement and wrapping are
//! pluggable through [`TextMeasurer`] and [`LineWrapper`] for hosts that
//! bring their own text stack. A wgpu [`RenderBackend`] implementation
//! lives in the `textura-wgpu` crate.

mod device;
mod fonts;
mod layout;
mod measure;
mod raster;
mod skin;
mod style;
mod wrap;

pub use device::{RenderBackend, TextureId, TextureResult};
pub use fonts::{FontError, FontLibrary, LoadedFont};
pub use measure::{FontMeasurer, TextMeasurer};
pub use skin::TextSkin;
pub use style::{Align, TextState};
pub use wrap::{LineWrapper, WordWrapper};

/// Color value type used by [`TextState`].
pub use peniko::Color;
