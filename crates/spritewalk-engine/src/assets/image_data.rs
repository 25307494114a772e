use std::path::Path;

use super::AssetError;

/// Decoded RGBA8 image (straight alpha, sRGB).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Row-major pixels, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl ImageData {
    /// Reads and decodes an image file. The format is guessed from the contents.
    pub fn from_path(path: &Path) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path, &bytes)
    }

    /// Decodes an in-memory image. `path` is only used for error reporting.
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self, AssetError> {
        let decoded = image::load_from_memory(bytes).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let rgba = decoded.into_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::Empty {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// A single-color image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            rgba: rgba.repeat(pixels),
        }
    }

    /// Bytes per row as uploaded to the GPU.
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
