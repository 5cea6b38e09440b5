//! Magnified click refinement.
//!
//! A raw click on the displayed image is imprecise. The refiner cuts a fixed
//! `crop_size` square around the click, scales it up by an integer factor with
//! nearest-neighbour sampling, and maps a second click inside that magnified view
//! back onto a single source pixel.

use image::{ImageBuffer, RgbaImage};

use crate::config::MeasureConfig;
use crate::consts::{
    DEFAULT_CROP_SIZE, DEFAULT_MAGNIFICATION, MAX_CROP_SIZE, MAX_MAGNIFICATION, MIN_CROP_SIZE,
};
use crate::error::{CaliperError, Result};
use crate::geometry::{PixelRect, Point};
use crate::source::SourceImage;

/// Builds magnified views around raw clicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Refiner {
    crop_size: u32,
    magnification: u32,
}

impl Default for Refiner {
    fn default() -> Self {
        Self {
            crop_size: DEFAULT_CROP_SIZE,
            magnification: DEFAULT_MAGNIFICATION,
        }
    }
}

impl Refiner {
    /// Bounds keep `crop_size * magnification` (the view side) small enough to allocate.
    pub fn new(crop_size: u32, magnification: u32) -> Result<Self> {
        check_parameters(crop_size, magnification)?;
        Ok(Self {
            crop_size,
            magnification,
        })
    }

    pub fn from_config(config: &MeasureConfig) -> Result<Self> {
        Self::new(config.crop_size, config.magnification)
    }

    pub fn crop_size(&self) -> u32 {
        self.crop_size
    }

    pub fn magnification(&self) -> u32 {
        self.magnification
    }

    /// Side length of the magnified view in view pixels.
    pub fn view_size(&self) -> u32 {
        self.crop_size * self.magnification
    }

    /// Select the crop window around `raw` inside a `width`x`height` image.
    ///
    /// The window is always exactly `crop_size` on each side. Near an edge it is
    /// shifted inward rather than shrunk.
    pub fn crop_window(&self, raw: Point, width: u32, height: u32) -> Result<PixelRect> {
        if width < self.crop_size || height < self.crop_size {
            return Err(CaliperError::InvalidRegion {
                width,
                height,
                crop_size: self.crop_size,
            });
        }

        Ok(PixelRect {
            x: window_origin(raw.x, width, self.crop_size),
            y: window_origin(raw.y, height, self.crop_size),
            width: self.crop_size,
            height: self.crop_size,
        })
    }

    /// Cut and magnify the region around `raw`.
    pub fn refine(&self, raw: Point, image: &SourceImage) -> Result<MagnifiedView> {
        let window = self.crop_window(raw, image.width(), image.height())?;
        let m = self.magnification;
        let side = self.view_size();

        let pixels: RgbaImage = ImageBuffer::from_fn(side, side, |vx, vy| {
            image.pixel(window.x + vx / m, window.y + vy / m)
        });

        let raw_pixel = (
            pixel_index(raw.x, image.width()),
            pixel_index(raw.y, image.height()),
        );

        tracing::debug!(
            "Magnifier at ({:.1}, {:.1}) -> window {}x{} @ ({}, {})",
            raw.x,
            raw.y,
            window.width,
            window.height,
            window.x,
            window.y
        );

        Ok(MagnifiedView {
            raw,
            raw_pixel,
            window,
            magnification: m,
            bounds: (image.width(), image.height()),
            pixels,
        })
    }
}

/// A transient magnified crop awaiting exactly one resolving click.
///
/// [`MagnifiedView::resolve`] consumes the view, so the pixel data is released
/// as soon as the click has been mapped back.
#[derive(Clone, Debug)]
pub struct MagnifiedView {
    raw: Point,
    raw_pixel: (u32, u32),
    window: PixelRect,
    magnification: u32,
    bounds: (u32, u32),
    pixels: RgbaImage,
}

impl MagnifiedView {
    pub fn raw_point(&self) -> Point {
        self.raw
    }

    /// Crop window in source coordinates.
    pub fn window(&self) -> PixelRect {
        self.window
    }

    pub fn magnification(&self) -> u32 {
        self.magnification
    }

    /// Side length of the magnified image in view pixels.
    pub fn size(&self) -> u32 {
        self.pixels.width()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn rgba_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// View coordinates of the centre of the magnified pixel under the raw click.
    pub fn marker_position(&self) -> Point {
        let m = self.magnification as f64;
        let half = m / 2.0;
        Point::new(
            (self.raw_pixel.0 - self.window.x) as f64 * m + half,
            (self.raw_pixel.1 - self.window.y) as f64 * m + half,
        )
    }

    /// Map a click in view coordinates back to a source pixel.
    ///
    /// Equivalent to `center + floor(click / M) - S/2` where `center` is the
    /// window centre. Clicks outside the view are clamped onto the image.
    pub fn resolve(self, click: Point) -> Point {
        let m = self.magnification as f64;
        let x = self.window.x as f64 + (click.x / m).floor();
        let y = self.window.y as f64 + (click.y / m).floor();
        let (w, h) = self.bounds;
        Point::new(
            x.clamp(0.0, (w - 1) as f64),
            y.clamp(0.0, (h - 1) as f64),
        )
    }
}

pub(crate) fn check_parameters(crop_size: u32, magnification: u32) -> Result<()> {
    if !(MIN_CROP_SIZE..=MAX_CROP_SIZE).contains(&crop_size) {
        return Err(CaliperError::InvalidConfig(format!(
            "crop_size must be in {MIN_CROP_SIZE}..={MAX_CROP_SIZE}, got {crop_size}"
        )));
    }
    if !(1..=MAX_MAGNIFICATION).contains(&magnification) {
        return Err(CaliperError::InvalidConfig(format!(
            "magnification must be in 1..={MAX_MAGNIFICATION}, got {magnification}"
        )));
    }
    Ok(())
}

/// The region where a click's crop window stays centred on the click.
///
/// Returns `None` when the image is too small to hold a single crop.
pub fn safe_zone(width: u32, height: u32, crop_size: u32) -> Option<PixelRect> {
    if width < crop_size || height < crop_size {
        return None;
    }
    let half = crop_size / 2;
    Some(PixelRect {
        x: half,
        y: half,
        width: width - 2 * half,
        height: height - 2 * half,
    })
}

/// Integer pixel containing coordinate `v`, clamped onto `[0, extent)`.
fn pixel_index(v: f64, extent: u32) -> u32 {
    let max = extent.saturating_sub(1) as f64;
    v.floor().clamp(0.0, max) as u32
}

fn window_origin(v: f64, extent: u32, crop: u32) -> u32 {
    let centre = pixel_index(v, extent) as i64;
    let start = centre - (crop / 2) as i64;
    start.clamp(0, (extent - crop) as i64) as u32
}
