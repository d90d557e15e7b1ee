mod fontdb_backend;

use tiny_skia::Path;

use crate::caption::Caption;
use crate::geometry::Bounds;

pub use fontdb_backend::FontDbBackend;

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Width per character, as a multiple of the font size, when glyphs cannot be measured.
pub const FALLBACK_CHAR_WIDTH_FACTOR: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec<'a> {
    pub family: &'a str,
    pub size: f32,
}

impl<'a> FontSpec<'a> {
    pub const fn new(family: &'a str, size: f32) -> Self {
        Self { family, size }
    }

    pub fn of(caption: &'a Caption) -> Self {
        Self::new(&caption.font_family, caption.font_size)
    }
}

/// Text shaping capability supplied by the host.
///
/// Lines are laid out with their box top at `top`; implementations decide where the
/// baseline falls within that box.
pub trait GlyphBackend {
    /// Whether font resources are loaded; rendering is deferred until this holds.
    fn is_ready(&self) -> bool {
        true
    }

    fn line_width(&self, line: &str, font: &FontSpec<'_>) -> Option<f32>;

    fn line_outline(&self, line: &str, font: &FontSpec<'_>, x: f32, top: f32) -> Option<Path>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f32,
    pub height: f32,
}

impl Footprint {
    pub fn at(self, caption: &Caption) -> Bounds {
        Bounds::new(
            caption.position.x,
            caption.position.y,
            self.width,
            self.height,
        )
    }
}

/// Glyph-measured caption box: widest line by `size * 1.2` per line.
pub fn measure_caption(caption: &Caption, backend: &dyn GlyphBackend) -> Option<Footprint> {
    let font = FontSpec::of(caption);
    let mut width = 0.0_f32;
    for line in caption.lines() {
        width = width.max(backend.line_width(line, &font)?);
    }
    Some(Footprint {
        width,
        height: caption.font_size * LINE_HEIGHT_FACTOR * caption.line_count() as f32,
    })
}

/// Crude size used only when no measurement is available.
pub fn estimate_footprint(caption: &Caption) -> Footprint {
    let chars = caption.text.chars().count() as f32;
    Footprint {
        width: chars * caption.font_size * FALLBACK_CHAR_WIDTH_FACTOR,
        height: caption.font_size * caption.line_count() as f32,
    }
}

/// Measured box when the backend can shape the caption, else the estimate.
pub fn caption_footprint(caption: &Caption, backend: Option<&dyn GlyphBackend>) -> Footprint {
    backend
        .and_then(|backend| measure_caption(caption, backend))
        .unwrap_or_else(|| {
            tracing::debug!(id = %caption.id, "text measurement unavailable; using estimate");
            estimate_footprint(caption)
        })
}

pub fn caption_bounds(caption: &Caption, backend: Option<&dyn GlyphBackend>) -> Bounds {
    caption_footprint(caption, backend).at(caption)
}
