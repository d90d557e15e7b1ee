use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path as FsPath;

use fontdb::{Database, Family, Query, Stretch, Style, Weight, ID};
use tiny_skia::{Path, PathBuilder};
use ttf_parser::{Face, OutlineBuilder};

use super::{FontSpec, GlyphBackend};

/// Advance used for characters the face has no glyph for, as a fraction of the em.
const MISSING_GLYPH_ADVANCE: f32 = 0.5;

/// Glyph backend over a `fontdb` database, outlining with `ttf-parser`.
///
/// Family lookups are bold; unknown families fall back to sans-serif and then to any
/// loaded face.
pub struct FontDbBackend {
    database: Database,
    resolved: RefCell<HashMap<String, Option<ID>>>,
}

impl std::fmt::Debug for FontDbBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontDbBackend")
            .field("faces", &self.database.len())
            .finish()
    }
}

impl FontDbBackend {
    pub fn from_database(database: Database) -> Self {
        Self {
            database,
            resolved: RefCell::new(HashMap::new()),
        }
    }

    /// System fonts plus every font found under `font_dirs`.
    pub fn with_system_fonts<P: AsRef<FsPath>>(font_dirs: &[P]) -> Self {
        let mut database = Database::new();
        database.load_system_fonts();
        for dir in font_dirs {
            database.load_fonts_dir(dir);
        }
        tracing::debug!(faces = database.len(), "font database loaded");
        if database.is_empty() {
            tracing::warn!("no fonts found; captions will not be drawn");
        }
        Self::from_database(database)
    }

    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.database.load_font_data(data);
        self.resolved.borrow_mut().clear();
    }

    pub fn face_count(&self) -> usize {
        self.database.len()
    }

    fn resolve(&self, family: &str) -> Option<ID> {
        if let Some(cached) = self.resolved.borrow().get(family) {
            return *cached;
        }

        let query = Query {
            families: &[Family::Name(family), Family::SansSerif],
            weight: Weight::BOLD,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self
            .database
            .query(&query)
            .or_else(|| self.database.faces().next().map(|face| face.id));
        if id.is_none() {
            tracing::warn!(family, "no font face available");
        }
        self.resolved.borrow_mut().insert(family.to_string(), id);
        id
    }

    fn with_face<T>(&self, family: &str, f: impl FnOnce(&Face<'_>) -> Option<T>) -> Option<T> {
        let id = self.resolve(family)?;
        self.database
            .with_face_data(id, |data, index| {
                let face = Face::parse(data, index).ok()?;
                f(&face)
            })
            .flatten()
    }
}

fn line_advance(face: &Face<'_>, line: &str, scale: f32, size: f32) -> f32 {
    line.chars()
        .map(|ch| {
            face.glyph_index(ch)
                .and_then(|glyph| face.glyph_hor_advance(glyph))
                .map(|advance| f32::from(advance) * scale)
                .unwrap_or(size * MISSING_GLYPH_ADVANCE)
        })
        .sum()
}

impl GlyphBackend for FontDbBackend {
    fn line_width(&self, line: &str, font: &FontSpec<'_>) -> Option<f32> {
        self.with_face(font.family, |face| {
            let scale = font.size / f32::from(face.units_per_em());
            Some(line_advance(face, line, scale, font.size))
        })
    }

    fn line_outline(&self, line: &str, font: &FontSpec<'_>, x: f32, top: f32) -> Option<Path> {
        self.with_face(font.family, |face| {
            let scale = font.size / f32::from(face.units_per_em());
            let baseline = top + f32::from(face.ascender()) * scale;
            let mut builder = PathBuilder::new();
            let mut pen_x = x;
            for ch in line.chars() {
                let Some(glyph) = face.glyph_index(ch) else {
                    pen_x += font.size * MISSING_GLYPH_ADVANCE;
                    continue;
                };
                let mut outline = GlyphOutline {
                    builder: &mut builder,
                    scale,
                    origin_x: pen_x,
                    baseline,
                };
                face.outline_glyph(glyph, &mut outline);
                pen_x += face
                    .glyph_hor_advance(glyph)
                    .map(|advance| f32::from(advance) * scale)
                    .unwrap_or(font.size * MISSING_GLYPH_ADVANCE);
            }
            builder.finish()
        })
    }
}

/// Maps font units (y up) onto surface pixels (y down).
struct GlyphOutline<'a> {
    builder: &'a mut PathBuilder,
    scale: f32,
    origin_x: f32,
    baseline: f32,
}

impl GlyphOutline<'_> {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.baseline - y * self.scale)
    }
}

impl OutlineBuilder for GlyphOutline<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
