use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use crate::error::Result;

/// A decoded raster loaded for measuring.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub pixels: RgbaImage,
    /// File the image was decoded from, if any.
    pub path: Option<PathBuf>,
}

impl SourceImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels, path: None }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn rgba_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

/// Decode any format the `image` crate understands into an RGBA8 raster.
pub fn load_image(path: &Path) -> Result<SourceImage> {
    let img = image::open(path)?;
    let pixels = img.to_rgba8();
    tracing::info!(
        "Loaded {} ({}x{})",
        path.display(),
        pixels.width(),
        pixels.height()
    );
    Ok(SourceImage {
        pixels,
        path: Some(path.to_path_buf()),
    })
}
