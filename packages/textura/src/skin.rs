//! The text skin itself: dirty tracking, layout and raster orchestration,
//! and the texture cache protocol.

use std::sync::Arc;

use bitflags::bitflags;
use vello_cpu::Pixmap;

use crate::device::{RenderBackend, TextureId, TextureResult};
use crate::fonts::FontLibrary;
use crate::layout::{self, TextLayout};
use crate::measure::{FontMeasurer, TextMeasurer};
use crate::raster;
use crate::style::{TextState, TextStyle};
use crate::wrap::{LineWrapper, WordWrapper};

bitflags! {
    /// What has gone stale since the last render.
    ///
    /// `LAYOUT` is set by every update and whenever a requested render scale
    /// differs from the last rendered one; reflow clears it. `TEXTURE` is
    /// set by every update and cleared only once an upload succeeds, so a
    /// zero-area render leaves it set and the next request renders again.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Dirty: u8 {
        const LAYOUT = 1 << 0;
        const TEXTURE = 1 << 1;
    }
}

/// Renders styled, word-wrapped text to a texture on demand, re-doing the
/// layout, raster, and upload stages only when their inputs changed.
///
/// Designed for exclusive ownership by one scene node, driven from one
/// render pass at a time. The backend is borrowed per call, not held.
pub struct TextSkin {
    text: String,
    style: TextStyle,
    fonts: Arc<FontLibrary>,
    measurer: Box<dyn TextMeasurer>,
    wrapper: Box<dyn LineWrapper>,
    layout: TextLayout,
    /// Scale of the last raster; starts at 0, the never-rendered state.
    rendered_scale: f32,
    rotation_center: [f32; 2],
    texture: Option<TextureId>,
    dirty: Dirty,
    altered: bool,
    disposed: bool,
}

impl TextSkin {
    /// A skin measuring and wrapping through `fonts`.
    pub fn new(fonts: Arc<FontLibrary>) -> Self {
        let measurer = Box::new(FontMeasurer::new(Arc::clone(&fonts)));
        Self::with_collaborators(fonts, measurer, Box::new(WordWrapper::new()))
    }

    /// A skin with caller-supplied measurement and wrapping collaborators,
    /// for hosts that bring their own text stack.
    pub fn with_collaborators(
        fonts: Arc<FontLibrary>,
        measurer: Box<dyn TextMeasurer>,
        wrapper: Box<dyn LineWrapper>,
    ) -> Self {
        Self {
            text: String::new(),
            style: TextStyle::default(),
            fonts,
            measurer,
            wrapper,
            layout: TextLayout::default(),
            rendered_scale: 0.0,
            rotation_center: [0.0, 0.0],
            texture: None,
            dirty: Dirty::all(),
            altered: false,
            disposed: false,
        }
    }

    /// Replaces text and style wholesale and marks everything stale.
    /// Fields are trusted as-is; the owner guarantees their validity.
    pub fn set_text_and_style(&mut self, state: TextState) {
        debug_assert!(!self.disposed);
        self.style = TextStyle::from_state(&state);
        self.text = state.text;
        self.measurer
            .set_font(&self.style.font, self.style.font_size);
        self.dirty = Dirty::all();
        self.altered = true;
        log::trace!(
            "skin updated: {} chars of '{}' at {}px",
            self.text.len(),
            self.style.font,
            self.style.font_size
        );
    }

    /// The texture for this skin at `scale` (percent per axis, as the owner
    /// stores it). Texture mapping only supports uniform scale, so the
    /// larger axis magnitude wins; `None` means 100%.
    ///
    /// Re-renders only if the content is stale or the scale changed; a
    /// scale change also forces a reflow, because the wrap width in pixels
    /// depends on the scale.
    pub fn get_texture(
        &mut self,
        backend: &mut dyn RenderBackend,
        scale: Option<[f32; 2]>,
    ) -> TextureResult {
        debug_assert!(!self.disposed);
        let scale_max = scale.map_or(100.0, |s| s[0].abs().max(s[1].abs()));
        let requested = scale_max / 100.0;

        if self.dirty.contains(Dirty::TEXTURE) || self.rendered_scale != requested {
            if self.rendered_scale != requested {
                self.dirty.insert(Dirty::LAYOUT);
            }

            let Some(pixmap) = self.render(backend, requested) else {
                log::trace!("zero-area raster at scale {requested}; no texture to hand out");
                return TextureResult::NoContent;
            };
            self.dirty.remove(Dirty::TEXTURE);

            let (width, height) = (u32::from(pixmap.width()), u32::from(pixmap.height()));
            let id = match self.texture {
                Some(id) => id,
                None => {
                    let id = backend.create_texture(width, height);
                    self.texture = Some(id);
                    id
                }
            };
            backend.upload_texture(id, width, height, bytemuck::cast_slice(pixmap.data()));
            log::debug!("uploaded {width}x{height} text raster at scale {requested}");
        }

        match self.texture {
            Some(id) => TextureResult::Ready(id),
            None => TextureResult::NoContent,
        }
    }

    /// Bounding box in logical pixels, reflowing first if the layout is
    /// stale. Layout work only; never rasterizes or uploads.
    pub fn size(&mut self, backend: &dyn RenderBackend) -> [f32; 2] {
        debug_assert!(!self.disposed);
        if self.dirty.contains(Dirty::LAYOUT) {
            self.reflow(backend, self.rendered_scale);
        }
        self.layout.size
    }

    /// Measured width of the widest current line, reflowing first if stale.
    /// Narrower than the wrap limit whenever wrapping left slack.
    pub fn width(&mut self, backend: &dyn RenderBackend) -> f32 {
        debug_assert!(!self.disposed);
        if self.dirty.contains(Dirty::LAYOUT) {
            self.reflow(backend, self.rendered_scale);
        }
        self.measurer
            .set_font(&self.style.font, self.style.font_size);
        self.layout
            .lines
            .iter()
            .map(|line| self.measurer.measure(line))
            .fold(0.0, f32::max)
    }

    /// Bounding height in logical pixels.
    pub fn height(&mut self, backend: &dyn RenderBackend) -> f32 {
        self.size(backend)[1]
    }

    /// Anchor the owner rotates this skin around, in raster-local logical
    /// pixels. Updated by each render.
    pub fn rotation_center(&self) -> [f32; 2] {
        debug_assert!(!self.disposed);
        self.rotation_center
    }

    /// Fixed 1000% upper bound the owner clamps size-setting against.
    pub fn max_scale(&self) -> f32 {
        debug_assert!(!self.disposed);
        10.0
    }

    /// Reports (and clears) the pending visual-change notification. The
    /// owner polls this to invalidate cached composition.
    pub fn take_altered(&mut self) -> bool {
        debug_assert!(!self.disposed);
        std::mem::take(&mut self.altered)
    }

    /// Releases the texture and drops layout state. The skin must not be
    /// used afterwards.
    pub fn dispose(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(id) = self.texture.take() {
            backend.destroy_texture(id);
        }
        self.layout = TextLayout::default();
        self.disposed = true;
    }

    /// Rewraps the text and recomputes the bounding box for `scale`.
    fn reflow(&mut self, backend: &dyn RenderBackend, scale: f32) {
        // Max width is authored in scene units; wrapping operates in raw
        // pixels at the actual render resolution.
        let scale = if scale == 0.0 { 1.0 } else { scale };
        let mut max_width = self.style.max_line_width;
        max_width *= backend.surface_size()[0] as f32 / backend.native_size()[0];
        max_width /= scale;

        let lines = self.wrapper.wrap(
            self.measurer.as_mut(),
            max_width,
            &self.text,
            &self.style.font,
            self.style.font_size,
        );
        let size = layout::bounding_size(&self.style, lines.len(), max_width);
        self.layout = TextLayout { lines, size };
        self.dirty.remove(Dirty::LAYOUT);
        log::trace!(
            "reflowed into {} lines, box {:?}",
            self.layout.lines.len(),
            size
        );
    }

    /// Rasterizes at `scale`, reflowing first if needed. Returns `None` for
    /// a zero-area buffer. Either way `scale` is recorded as rendered and
    /// the rotation center is refreshed.
    fn render(&mut self, backend: &dyn RenderBackend, scale: f32) -> Option<Pixmap> {
        if self.dirty.contains(Dirty::LAYOUT) {
            self.reflow(backend, scale);
        }
        let (width, height) = raster::buffer_dimensions(self.layout.size, scale);
        self.rotation_center = raster::rotation_center(self.layout.size[0], self.style.font_size);
        self.rendered_scale = scale;
        if width == 0 || height == 0 {
            return None;
        }
        let font = self.fonts.get(&self.style.font);
        Some(raster::rasterize(
            &self.layout,
            &self.style,
            font.as_deref(),
            self.measurer.as_mut(),
            scale,
            width,
            height,
        ))
    }
}
