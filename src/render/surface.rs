use std::sync::atomic::{AtomicU64, Ordering};

use image::{imageops, RgbaImage};
use tiny_skia::{IntSize, Pixmap};

use super::RenderError;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Decoded source image; each instance gets a fresh generation so caches can tell
/// replaced images apart.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
    generation: u64,
}

impl SourceImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScaledImageKey {
    generation: u64,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
struct ScaledImageEntry {
    key: ScaledImageKey,
    pixmap: Pixmap,
}

/// Holds the source image resampled to the current display size.
#[derive(Debug, Clone, Default)]
pub struct ScaledImageCache {
    entry: Option<ScaledImageEntry>,
}

impl ScaledImageCache {
    pub fn scaled(
        &mut self,
        source: &SourceImage,
        width: u32,
        height: u32,
    ) -> Result<&Pixmap, RenderError> {
        let key = ScaledImageKey {
            generation: source.generation(),
            width,
            height,
        };
        let stale = self.entry.as_ref().map_or(true, |entry| entry.key != key);
        if stale {
            let resized = if source.width() == width && source.height() == height {
                source.pixels().clone()
            } else {
                imageops::resize(
                    source.pixels(),
                    width,
                    height,
                    imageops::FilterType::Triangle,
                )
            };
            let pixmap = rgba_image_to_pixmap(&resized)?;
            tracing::debug!(width, height, "scaled source image cached");
            self.entry = Some(ScaledImageEntry { key, pixmap });
        }

        self.entry
            .as_ref()
            .map(|entry| &entry.pixmap)
            .ok_or(RenderError::SurfaceAllocation { width, height })
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((u16::from(channel) * u16::from(alpha) + 127) / 255) as u8
}

/// Straight-alpha image into a premultiplied pixmap.
pub fn rgba_image_to_pixmap(image: &RgbaImage) -> Result<Pixmap, RenderError> {
    let (width, height) = image.dimensions();
    let size =
        IntSize::from_wh(width, height).ok_or(RenderError::SurfaceAllocation { width, height })?;
    let data = image
        .pixels()
        .flat_map(|pixel| {
            let [r, g, b, a] = pixel.0;
            [premultiply(r, a), premultiply(g, a), premultiply(b, a), a]
        })
        .collect::<Vec<_>>();
    Pixmap::from_vec(data, size).ok_or(RenderError::SurfaceAllocation { width, height })
}

/// Premultiplied pixmap into a straight-alpha image suitable for encoding.
pub fn pixmap_to_rgba_image(pixmap: &Pixmap) -> Result<RgbaImage, RenderError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect::<Vec<_>>();
    RgbaImage::from_raw(width, height, data).ok_or(RenderError::SurfaceAllocation { width, height })
}
