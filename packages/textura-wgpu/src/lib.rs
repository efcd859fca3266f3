//! wgpu implementation of textura's [`RenderBackend`].

use std::collections::HashMap;

use textura::{RenderBackend, TextureId};

struct TextureEntry {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

/// [`RenderBackend`] over a wgpu device/queue pair.
///
/// Skin rasters arrive as tightly packed premultiplied sRGB RGBA8. Textures
/// are `Rgba8UnormSrgb` with `TEXTURE_BINDING | COPY_DST` and no mips; the
/// shared sampler is edge-clamped and linear. Composition binds
/// `texture_view` plus `sampler` and should use premultiplied-alpha
/// blending.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    sampler: wgpu::Sampler,
    native_size: [f32; 2],
    surface_size: [u32; 2],
    textures: HashMap<TextureId, TextureEntry>,
    next_id: u64,
}

impl WgpuBackend {
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        native_size: [f32; 2],
        surface_size: [u32; 2],
    ) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("textura skin sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        Self {
            device,
            queue,
            sampler,
            native_size,
            surface_size,
            textures: HashMap::new(),
            next_id: 0,
        }
    }

    /// Update the device pixel dimensions after a surface resize. Skins
    /// pick the change up on their next reflow.
    pub fn set_surface_size(&mut self, surface_size: [u32; 2]) {
        self.surface_size = surface_size;
    }

    pub fn set_native_size(&mut self, native_size: [f32; 2]) {
        self.native_size = native_size;
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    /// View for binding `id` during composition.
    pub fn texture_view(&self, id: TextureId) -> Option<&wgpu::TextureView> {
        self.textures.get(&id).map(|entry| &entry.view)
    }

    fn alloc(device: &wgpu::Device, width: u32, height: u32) -> TextureEntry {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("textura skin texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        TextureEntry { texture, view }
    }
}

impl RenderBackend for WgpuBackend {
    fn native_size(&self) -> [f32; 2] {
        self.native_size
    }

    fn surface_size(&self) -> [u32; 2] {
        self.surface_size
    }

    fn create_texture(&mut self, width: u32, height: u32) -> TextureId {
        self.next_id += 1;
        let id = TextureId::from_raw(self.next_id);
        self.textures
            .insert(id, Self::alloc(&self.device, width, height));
        log::debug!("created {width}x{height} skin texture");
        id
    }

    fn upload_texture(&mut self, id: TextureId, width: u32, height: u32, pixels: &[u8]) {
        let Some(entry) = self.textures.get_mut(&id) else {
            log::warn!("upload to unknown texture id {id:?}");
            return;
        };
        // A dimension change reallocates storage; the handle stays put.
        if entry.texture.width() != width || entry.texture.height() != height {
            *entry = Self::alloc(&self.device, width, height);
        }
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &entry.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    fn destroy_texture(&mut self, id: TextureId) {
        if let Some(entry) = self.textures.remove(&id) {
            entry.texture.destroy();
        }
    }
}
