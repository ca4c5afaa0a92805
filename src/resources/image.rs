use std::fmt;

/// CPU-side pixel data backing a [`Texture`](crate::resources::Texture).
///
/// Decoding from files is left to the caller; an `Image` only records the
/// dimensions, format and raw bytes that will eventually be uploaded.
#[derive(Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,
    pub data: Option<Vec<u8>>,
}

impl Image {
    #[must_use]
    pub fn new(width: u32, height: u32, format: wgpu::TextureFormat, data: Option<Vec<u8>>) -> Self {
        Self {
            width,
            height,
            format,
            data,
        }
    }

    /// Byte length of the pixel payload, 0 when the image has no CPU data.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }
}

// Pixel data is skipped; it can be megabytes.
impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("bytes", &self.byte_len())
            .finish()
    }
}
