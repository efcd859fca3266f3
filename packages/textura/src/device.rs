//! The seam between skins and the host renderer's graphics device.

/// Opaque handle to a backend-owned texture.
///
/// Identity is stable for the texture's whole life: contents (and backing
/// storage, if the backend reallocates on resize) change behind the handle,
/// the handle itself never does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(u64);

impl TextureId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn to_raw(self) -> u64 {
        self.0
    }
}

/// Outcome of a texture request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureResult {
    /// An up-to-date texture is available under this handle.
    Ready(TextureId),
    /// The raster had zero area; no GPU resource was created or touched.
    /// The owner falls back to its default/empty texture.
    NoContent,
}

impl TextureResult {
    pub fn id(self) -> Option<TextureId> {
        match self {
            TextureResult::Ready(id) => Some(id),
            TextureResult::NoContent => None,
        }
    }
}

/// Host renderer services consumed by a skin: the dimensions that drive
/// scene-unit conversion, and the texture lifecycle primitives.
///
/// Uploaded pixels are tightly packed premultiplied RGBA8 (sRGB encoded).
/// Backends sample skin textures edge-clamped, without mipmaps.
pub trait RenderBackend {
    /// Logical scene resolution, in scene units.
    fn native_size(&self) -> [f32; 2];

    /// Device pixel dimensions of the output surface.
    fn surface_size(&self) -> [u32; 2];

    /// Create an empty texture. A skin calls this at most once, on its first
    /// raster with non-zero area.
    fn create_texture(&mut self, width: u32, height: u32) -> TextureId;

    /// Replace the full contents of `id` with `pixels` (`width * height * 4`
    /// bytes). Dimensions may differ from the ones the texture was created
    /// with; backing storage follows them, the handle does not.
    fn upload_texture(&mut self, id: TextureId, width: u32, height: u32, pixels: &[u8]);

    /// Release the texture. The handle is invalid afterwards.
    fn destroy_texture(&mut self, id: TextureId);
}
