// SPDX-License-Identifier: MIT OR Apache-2.0
//! Deduplicating store for in-memory images.

use crate::handle::{Handle, HandleError, HandleTable};

/// Handle to a cached image
pub type ImageHandle = Handle<Image>;

/// Fields that identify an image; all six must match for a cache hit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey {
    /// Image name, used as the filename of bound textures
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Depth in pixels, 1 for flat images
    pub depth: u32,
    /// Components per pixel
    pub channels: u32,
    /// Whether pixels are floats rather than bytes
    pub is_float: bool,
}

impl ImageKey {
    /// Number of components the pixel buffer must hold
    pub fn component_count(&self) -> Result<usize, ImageError> {
        [self.height, self.depth, self.channels]
            .into_iter()
            .try_fold(self.width as usize, |acc, dim| acc.checked_mul(dim as usize))
            .ok_or(ImageError::Overflow {
                width: self.width,
                height: self.height,
                depth: self.depth,
                channels: self.channels,
            })
    }
}

/// Borrowed pixels handed in by the caller
#[derive(Debug, Clone, Copy)]
pub enum PixelData<'a> {
    /// 8-bit components
    Byte(&'a [u8]),
    /// Float components
    Float(&'a [f32]),
}

impl PixelData<'_> {
    /// Number of components
    pub fn len(&self) -> usize {
        match self {
            Self::Byte(data) => data.len(),
            Self::Float(data) => data.len(),
        }
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the pixels are floats
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }
}

/// Pixels owned by the cache
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    /// 8-bit components
    Byte(Vec<u8>),
    /// Float components
    Float(Vec<f32>),
}

impl PixelBuffer {
    fn copy_of(data: PixelData<'_>) -> Self {
        match data {
            PixelData::Byte(data) => Self::Byte(data.to_vec()),
            PixelData::Float(data) => Self::Float(data.to_vec()),
        }
    }

    fn overwrite(&mut self, data: PixelData<'_>) {
        match (self, data) {
            (Self::Byte(dst), PixelData::Byte(src)) => dst.copy_from_slice(src),
            (Self::Float(dst), PixelData::Float(src)) => dst.copy_from_slice(src),
            (dst, src) => *dst = Self::copy_of(src),
        }
    }
}

/// A cached image
#[derive(Debug, Clone)]
pub struct Image {
    /// Identity
    pub key: ImageKey,
    /// Owned pixels
    pub pixels: PixelBuffer,
}

/// Error when registering pixels
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImageError {
    /// Buffer length does not match the dimensions
    #[error("image `{name}` needs {expected} components, got {actual}")]
    SizeMismatch {
        /// Image name
        name: String,
        /// width * height * depth * channels
        expected: usize,
        /// Buffer length
        actual: usize,
    },

    /// Dimensions overflow the address space
    #[error("image dimensions {width}x{height}x{depth}x{channels} overflow")]
    Overflow {
        /// Width
        width: u32,
        /// Height
        height: u32,
        /// Depth
        depth: u32,
        /// Channels
        channels: u32,
    },

    /// Bad image handle
    #[error(transparent)]
    Handle(#[from] HandleError),
}

/// Append-only image store, deduplicated on [`ImageKey`]
#[derive(Debug)]
pub struct ImageCache {
    images: HandleTable<Image>,
}

impl ImageCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            images: HandleTable::new("image"),
        }
    }

    /// Store pixels under `name` and the given dimensions.
    ///
    /// An image with the same key is overwritten in place and keeps its
    /// handle; anything else appends a new entry.
    pub fn get_or_create(
        &mut self,
        name: &str,
        data: PixelData<'_>,
        width: u32,
        height: u32,
        depth: u32,
        channels: u32,
    ) -> Result<ImageHandle, ImageError> {
        let key = ImageKey {
            name: name.to_string(),
            width,
            height,
            depth,
            channels,
            is_float: data.is_float(),
        };
        let expected = key.component_count()?;
        if data.len() != expected {
            return Err(ImageError::SizeMismatch {
                name: key.name,
                expected,
                actual: data.len(),
            });
        }

        if let Some(handle) = self.find(&key) {
            self.images.get_mut(handle)?.pixels.overwrite(data);
            tracing::trace!(image = %handle, name, "Updated image in place");
            return Ok(handle);
        }

        let handle = self.images.push(Image {
            key,
            pixels: PixelBuffer::copy_of(data),
        })?;
        tracing::trace!(image = %handle, name, "Created image");
        Ok(handle)
    }

    /// Find the image stored under `key`
    pub fn find(&self, key: &ImageKey) -> Option<ImageHandle> {
        self.images
            .iter()
            .find(|(_, image)| image.key == *key)
            .map(|(handle, _)| handle)
    }

    /// Get an image
    pub fn get(&self, handle: ImageHandle) -> Result<&Image, ImageError> {
        Ok(self.images.get(handle)?)
    }

    /// Number of cached images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Drop every image
    pub fn clear(&mut self) {
        self.images.clear();
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_updates_in_place() {
        let mut cache = ImageCache::new();
        let first = cache
            .get_or_create("tex", PixelData::Byte(&[1, 2, 3, 4]), 2, 2, 1, 1)
            .unwrap();
        let second = cache
            .get_or_create("tex", PixelData::Byte(&[9, 9, 9, 9]), 2, 2, 1, 1)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(first).unwrap().pixels, PixelBuffer::Byte(vec![9; 4]));
    }

    #[test]
    fn test_changed_key_creates_entry() {
        let mut cache = ImageCache::new();
        cache.get_or_create("tex", PixelData::Byte(&[0; 4]), 2, 2, 1, 1).unwrap();
        cache.get_or_create("tex", PixelData::Byte(&[0; 4]), 4, 1, 1, 1).unwrap();
        cache.get_or_create("tex", PixelData::Byte(&[0; 4]), 1, 1, 1, 4).unwrap();
        cache.get_or_create("tex", PixelData::Float(&[0.0; 4]), 2, 2, 1, 1).unwrap();
        cache.get_or_create("other", PixelData::Byte(&[0; 4]), 2, 2, 1, 1).unwrap();

        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let mut cache = ImageCache::new();
        let err = cache.get_or_create("tex", PixelData::Float(&[0.0; 3]), 2, 2, 1, 1);

        assert_eq!(
            err,
            Err(ImageError::SizeMismatch { name: "tex".into(), expected: 4, actual: 3 })
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn test_overflowing_dimensions() {
        let mut cache = ImageCache::new();
        let err = cache.get_or_create(
            "huge",
            PixelData::Byte(&[]),
            u32::MAX,
            u32::MAX,
            u32::MAX,
            u32::MAX,
        );
        assert!(matches!(err, Err(ImageError::Overflow { .. })));
    }
}
