use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;
use wgpu::{AddressMode, FilterMode, TextureFormat};

use crate::resources::image::Image;

/// Shared handle to a texture asset.
///
/// Materials and uniform slots hold clones of the same `Arc`, so a texture
/// bound to several slots is uploaded once.
pub type TextureRef = Arc<Texture>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureSampler {
    pub address_mode_u: AddressMode,
    pub address_mode_v: AddressMode,
    pub mag_filter: FilterMode,
    pub min_filter: FilterMode,
}

impl Default for TextureSampler {
    fn default() -> Self {
        Self {
            address_mode_u: AddressMode::Repeat,
            address_mode_v: AddressMode::Repeat,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
        }
    }
}

// ============================================================================
// Texture Asset
// ============================================================================

#[derive(Debug)]
pub struct Texture {
    pub uuid: Uuid,
    pub name: String,

    pub image: Image,
    pub sampler: TextureSampler,

    /// Upload version. The renderer re-uploads whenever this differs from
    /// the version it last saw.
    version: AtomicU64,
}

impl Texture {
    #[must_use]
    pub fn new(name: &str, image: Image) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            image,
            sampler: TextureSampler::default(),
            version: AtomicU64::new(0),
        }
    }

    /// Creates a 2D texture, allocating the backing [`Image`].
    #[must_use]
    pub fn new_2d(name: &str, width: u32, height: u32, data: Option<Vec<u8>>, format: TextureFormat) -> Self {
        Self::new(name, Image::new(width, height, format, data))
    }

    /// 1x1 texture of a single color.
    #[must_use]
    pub fn create_solid_color(name: &str, color: [u8; 4]) -> Self {
        Self::new_2d(name, 1, 1, Some(color.to_vec()), TextureFormat::Rgba8UnormSrgb)
    }

    /// Black and white checkerboard, handy for telling faces apart.
    #[must_use]
    pub fn create_checkerboard(name: &str, width: u32, height: u32, check_size: u32) -> Self {
        let check_size = check_size.max(1);
        let mut data = Vec::with_capacity((width * height * 4) as usize);

        for y in 0..height {
            for x in 0..width {
                let is_light = (x / check_size + y / check_size) % 2 == 0;
                let value = if is_light { 255 } else { 0 };
                data.extend_from_slice(&[value, value, value, 255]);
            }
        }

        Self::new_2d(name, width, height, Some(data), TextureFormat::Rgba8Unorm)
    }

    /// Flags the texture for re-upload on the next frame.
    pub fn needs_update(&self) {
        self.version.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Relaxed)
    }

    /// Convenience for wrapping a freshly built texture in a [`TextureRef`].
    #[must_use]
    pub fn into_ref(self) -> TextureRef {
        Arc::new(self)
    }
}
