//! Test suite for the full text skin pipeline
//!
//! Drives TextSkin through its public surface with a fixed-advance measurer
//! and a recording backend, validating texture reuse across repeated
//! requests, re-render triggers (content updates, scale changes), stroke
//! and resolution effects on the bounding box, the empty-content path, and
//! disposal.

use std::sync::Arc;

use textura::{
    Align, FontLibrary, RenderBackend, TextMeasurer, TextSkin, TextState, TextureId, TextureResult,
    WordWrapper,
};

#[cfg(test)]
mod skin_pipeline_tests {
    use super::*;
    use peniko::color::palette;

    /// Measurer charging a flat advance per character, so expected line
    /// widths are exact multiples.
    struct FixedAdvance(f32);

    impl TextMeasurer for FixedAdvance {
        fn set_font(&mut self, _font: &str, _font_size: f32) {}
        fn measure(&mut self, line: &str) -> f32 {
            line.chars().count() as f32 * self.0
        }
    }

    /// Backend that records allocation, upload, and destruction traffic
    /// instead of talking to a GPU.
    struct RecordingBackend {
        surface: [u32; 2],
        next_id: u64,
        created: usize,
        uploads: Vec<(u32, u32)>,
        destroyed: Vec<TextureId>,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self::with_surface([480, 360])
        }

        fn with_surface(surface: [u32; 2]) -> Self {
            Self {
                surface,
                next_id: 0,
                created: 0,
                uploads: Vec::new(),
                destroyed: Vec::new(),
            }
        }
    }

    impl RenderBackend for RecordingBackend {
        fn native_size(&self) -> [f32; 2] {
            [480.0, 360.0]
        }
        fn surface_size(&self) -> [u32; 2] {
            self.surface
        }
        fn create_texture(&mut self, _width: u32, _height: u32) -> TextureId {
            self.next_id += 1;
            self.created += 1;
            TextureId::from_raw(self.next_id)
        }
        fn upload_texture(&mut self, _id: TextureId, width: u32, height: u32, pixels: &[u8]) {
            assert_eq!(
                pixels.len(),
                (width * height * 4) as usize,
                "Upload should carry exactly width * height RGBA pixels"
            );
            self.uploads.push((width, height));
        }
        fn destroy_texture(&mut self, id: TextureId) {
            self.destroyed.push(id);
        }
    }

    /// Skin wired with a 15px-per-character measurer; no real fonts needed.
    fn test_skin() -> TextSkin {
        TextSkin::with_collaborators(
            Arc::new(FontLibrary::new()),
            Box::new(FixedAdvance(15.0)),
            Box::new(WordWrapper::new()),
        )
    }

    fn test_state(text: &str) -> TextState {
        TextState {
            text: text.to_string(),
            font: "Sans".to_string(),
            color: palette::css::BLACK,
            max_line_width: 100.0,
            font_size: 20.0,
            align: Align::Center,
            stroke_width: 0.0,
            stroke_color: palette::css::BLACK,
            rainbow: false,
        }
    }

    #[test]
    fn test_texture_reuse_at_stable_scale() {
        let mut skin = test_skin();
        let mut backend = RecordingBackend::new();
        skin.set_text_and_style(test_state("HELLO WORLD"));

        // First request renders and uploads
        let first = skin.get_texture(&mut backend, None);
        let id = first.id().expect("First request should produce a texture");
        assert_eq!(backend.created, 1, "First request should allocate once");
        assert_eq!(backend.uploads.len(), 1, "First request should upload once");

        // Nothing changed, so the second request is a pure cache hit
        let second = skin.get_texture(&mut backend, None);
        assert_eq!(second, TextureResult::Ready(id), "Cache hit should hand back the same texture");
        assert_eq!(backend.created, 1, "Cache hit should not allocate");
        assert_eq!(backend.uploads.len(), 1, "Cache hit should not upload");
    }

    #[test]
    fn test_update_rerenders_at_the_same_scale() {
        let mut skin = test_skin();
        let mut backend = RecordingBackend::new();
        skin.set_text_and_style(test_state("HELLO WORLD"));
        let first = skin.get_texture(&mut backend, None);

        // A content update at an unchanged scale re-renders into the same
        // texture rather than allocating a second one
        skin.set_text_and_style(test_state("BYE WORLD"));
        let second = skin.get_texture(&mut backend, None);
        assert_eq!(second.id(), first.id(), "Updates should reuse the texture id");
        assert_eq!(backend.created, 1, "Updates should not allocate a new texture");
        assert_eq!(backend.uploads.len(), 2, "Each update should upload fresh pixels");
    }

    #[test]
    fn test_scale_change_reflows_and_rerenders() {
        let mut skin = test_skin();
        let mut backend = RecordingBackend::new();
        skin.set_text_and_style(test_state("HELLO WORLD"));

        // At 100% the wrap width is 100px, so the two 75px words split
        skin.get_texture(&mut backend, Some([100.0, 100.0]));
        assert_eq!(skin.size(&backend)[0], 100.0);
        assert_eq!(backend.uploads.last(), Some(&(100, 52)));

        // Halving the scale doubles the wrap width; the text now fits one
        // line and the buffer shrinks with the scale
        skin.get_texture(&mut backend, Some([50.0, 50.0]));
        assert_eq!(skin.size(&backend)[0], 200.0);
        assert_eq!(backend.uploads.last(), Some(&(100, 15)));
        assert_eq!(backend.created, 1, "Scale changes should reuse the texture id");
        assert_eq!(backend.uploads.len(), 2);
    }

    #[test]
    fn test_stroke_inflates_the_reported_size() {
        let mut backend = RecordingBackend::new();

        let mut plain = test_skin();
        plain.set_text_and_style(test_state("HELLO WORLD"));
        let plain_size = plain.size(&backend);

        let mut stroked = test_skin();
        let mut state = test_state("HELLO WORLD");
        state.stroke_width = 3.0;
        stroked.set_text_and_style(state);
        let stroked_size = stroked.size(&backend);

        assert!((stroked_size[0] - plain_size[0] - 6.0).abs() < 1e-3);
        assert!((stroked_size[1] - plain_size[1] - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_text_creates_no_texture() {
        let mut skin = test_skin();
        let mut backend = RecordingBackend::new();
        skin.set_text_and_style(test_state(""));

        let result = skin.get_texture(&mut backend, None);
        assert_eq!(result, TextureResult::NoContent, "Empty text should yield no texture");
        assert_eq!(backend.created, 0, "No GPU resource should exist for empty text");
        assert!(backend.uploads.is_empty());

        // The skin recovers as soon as content arrives
        skin.set_text_and_style(test_state("hi"));
        let result = skin.get_texture(&mut backend, None);
        assert!(result.id().is_some(), "Content after empty text should render");
        assert_eq!(backend.created, 1);
    }

    #[test]
    fn test_hello_world_end_to_end() {
        let mut skin = test_skin();
        let mut backend = RecordingBackend::new();
        skin.set_text_and_style(test_state("HELLO WORLD"));
        assert!(skin.take_altered(), "Update should flag a visual change");

        let result = skin.get_texture(&mut backend, None);
        assert!(matches!(result, TextureResult::Ready(_)));

        // Both words measure 75px against a 100px wrap limit, so the text
        // wraps to two lines and the box spans the full wrap width
        assert_eq!(skin.width(&backend), 75.0);
        let size = skin.size(&backend);
        assert_eq!(size[0], 100.0);
        assert!((size[1] - 51.428571).abs() < 1e-3);
        assert!((skin.height(&backend) - size[1]).abs() < 1e-6);

        assert_eq!(backend.uploads, vec![(100, 52)]);

        let center = skin.rotation_center();
        assert_eq!(center[0], 50.0);
        assert!((center[1] - 18.0).abs() < 1e-4);

        assert!(!skin.take_altered(), "The change flag should clear once taken");
    }

    #[test]
    fn test_wrap_width_follows_surface_resolution() {
        let mut skin = test_skin();
        // Surface at twice the native width doubles the wrap width in pixels
        let mut backend = RecordingBackend::with_surface([960, 360]);
        skin.set_text_and_style(test_state("HELLO WORLD"));

        skin.get_texture(&mut backend, None);
        assert_eq!(skin.size(&backend)[0], 200.0, "Wrap width should scale with resolution");
        assert_eq!(backend.uploads, vec![(200, 29)]);
    }

    #[test]
    fn test_dispose_releases_the_texture() {
        let mut skin = test_skin();
        let mut backend = RecordingBackend::new();
        skin.set_text_and_style(test_state("hi"));
        let id = skin
            .get_texture(&mut backend, None)
            .id()
            .expect("Render should produce a texture");

        skin.dispose(&mut backend);
        assert_eq!(backend.destroyed, vec![id], "Dispose should destroy the cached texture");
    }
}
