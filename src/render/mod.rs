mod scheduler;
mod shadow;
mod surface;

use thiserror::Error;
use tiny_skia::{
    Color as SkiaColor, FillRule, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke,
    StrokeDash, Transform,
};

use crate::caption::{Caption, CaptionId};
use crate::geometry::{Bounds, Color, RgbaColor};
use crate::layout::ImageLayout;
use crate::text::{caption_footprint, FontSpec, GlyphBackend, LINE_HEIGHT_FACTOR};

pub use scheduler::RenderScheduler;
pub use shadow::ShadowSpec;
pub use surface::{pixmap_to_rgba_image, rgba_image_to_pixmap, ScaledImageCache, SourceImage};

/// Background color that means "no plate"; a white plate is never painted.
pub const NO_BACKGROUND_SENTINEL: Color = Color::WHITE;

const PLATE_PADDING_X: f32 = 4.0;
const PLATE_PADDING_TOP: f32 = 2.0;
const PLATE_PADDING_BOTTOM: f32 = 2.0;

const OUTLINE_WIDTH_FACTOR: f32 = 0.1;
const OUTLINE_OPACITY: f32 = 0.8;
const SECOND_PASS_DROP: f32 = 2.0;
const SHADOW_OFFSET: f32 = 2.0;
const SHADOW_BLUR: f32 = 4.0;

const SELECTION_COLOR: RgbaColor = RgbaColor::new(0x21, 0x96, 0xf3, 0xff);
const SELECTION_LINE_WIDTH: f32 = 2.0;
const SELECTION_DASH: [f32; 2] = [6.0, 4.0];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },
    #[error("surface is {actual_width}x{actual_height}, expected {width}x{height}")]
    SurfaceSizeMismatch {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

/// Everything one frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub image: Option<&'a SourceImage>,
    pub layout: ImageLayout,
    pub captions: &'a [Caption],
    pub selected: Option<CaptionId>,
}

pub(crate) fn solid_paint(color: RgbaColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.red, color.green, color.blue, color.alpha);
    paint.anti_alias = true;
    paint
}

fn skia_rect(bounds: Bounds) -> Option<Rect> {
    Rect::from_xywh(bounds.x, bounds.y, bounds.width, bounds.height)
}

/// Draws scenes onto a raster surface, one full pass per frame.
#[derive(Debug, Default)]
pub struct Renderer {
    image_cache: ScaledImageCache,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders into a freshly allocated viewport-sized surface.
    pub fn render(
        &mut self,
        scene: &Scene<'_>,
        glyphs: &dyn GlyphBackend,
    ) -> Result<Pixmap, RenderError> {
        let (width, height) = (scene.viewport_width, scene.viewport_height);
        let mut surface =
            Pixmap::new(width, height).ok_or(RenderError::SurfaceAllocation { width, height })?;
        self.render_into(&mut surface, scene, glyphs)?;
        Ok(surface)
    }

    /// Clears `surface` and redraws the whole scene onto it.
    pub fn render_into(
        &mut self,
        surface: &mut Pixmap,
        scene: &Scene<'_>,
        glyphs: &dyn GlyphBackend,
    ) -> Result<(), RenderError> {
        if surface.width() != scene.viewport_width || surface.height() != scene.viewport_height {
            return Err(RenderError::SurfaceSizeMismatch {
                width: scene.viewport_width,
                height: scene.viewport_height,
                actual_width: surface.width(),
                actual_height: surface.height(),
            });
        }

        surface.fill(SkiaColor::TRANSPARENT);
        self.draw_image(surface, scene)?;
        for caption in scene.captions {
            draw_caption(
                surface,
                &scene.layout,
                caption,
                scene.selected == Some(caption.id),
                glyphs,
            )?;
        }
        Ok(())
    }

    fn draw_image(&mut self, surface: &mut Pixmap, scene: &Scene<'_>) -> Result<(), RenderError> {
        let Some(source) = scene.image else {
            return Ok(());
        };
        if source.width() == 0 || source.height() == 0 || !scene.layout.is_renderable() {
            return Ok(());
        }

        let width = scene.layout.display_width.round().max(1.0) as u32;
        let height = scene.layout.display_height.round().max(1.0) as u32;
        let scaled = self.image_cache.scaled(source, width, height)?;
        surface.draw_pixmap(
            scene.layout.offset_x.round() as i32,
            scene.layout.offset_y.round() as i32,
            scaled.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    pub fn clear_cache(&mut self) {
        self.image_cache.clear();
    }
}

fn line_outlines(
    caption: &Caption,
    origin_x: f32,
    origin_y: f32,
    glyphs: &dyn GlyphBackend,
) -> Vec<Path> {
    let font = FontSpec::of(caption);
    let advance = caption.font_size * LINE_HEIGHT_FACTOR;
    caption
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            glyphs.line_outline(line, &font, origin_x, origin_y + index as f32 * advance)
        })
        .collect()
}

fn draw_glyph_run(
    surface: &mut Pixmap,
    paths: &[Path],
    fill: &Paint<'_>,
    outline: &Paint<'_>,
    stroke: &Stroke,
    transform: Transform,
) {
    for path in paths {
        surface.stroke_path(path, outline, stroke, transform, None);
        surface.fill_path(path, fill, FillRule::Winding, transform, None);
    }
}

fn draw_caption(
    surface: &mut Pixmap,
    layout: &ImageLayout,
    caption: &Caption,
    is_selected: bool,
    glyphs: &dyn GlyphBackend,
) -> Result<(), RenderError> {
    let origin = layout.to_viewport(caption.position);
    let footprint = caption_footprint(caption, Some(glyphs));
    let bounds = Bounds::new(origin.x, origin.y, footprint.width, footprint.height);
    let padded = bounds.expand(
        PLATE_PADDING_X,
        PLATE_PADDING_TOP,
        PLATE_PADDING_X,
        PLATE_PADDING_BOTTOM,
    );

    if caption.background_color_enabled && caption.background_color != NO_BACKGROUND_SENTINEL {
        if let Some(rect) = skia_rect(padded) {
            let paint = solid_paint(
                caption
                    .background_color
                    .with_opacity(caption.background_color_opacity),
            );
            surface.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    let paths = line_outlines(caption, origin.x, origin.y, glyphs);
    let fill = solid_paint(caption.font_color.with_opacity(caption.font_color_opacity));
    let outline_color = Color::BLACK.with_opacity(OUTLINE_OPACITY * caption.font_color_opacity);
    let outline = solid_paint(outline_color);
    let stroke = Stroke {
        width: caption.font_size * OUTLINE_WIDTH_FACTOR,
        ..Stroke::default()
    };
    draw_glyph_run(surface, &paths, &fill, &outline, &stroke, Transform::identity());

    if caption.font_color_opacity > 0.0 {
        let dropped = Transform::from_translate(0.0, SECOND_PASS_DROP);
        let shadow = ShadowSpec {
            offset_x: SHADOW_OFFSET,
            offset_y: SHADOW_OFFSET,
            blur: SHADOW_BLUR,
            color: outline_color,
        };
        shadow::draw_soft_shadow(surface, &paths, &stroke, dropped, &shadow)?;
        draw_glyph_run(surface, &paths, &fill, &outline, &stroke, dropped);
    }

    if is_selected {
        draw_selection_outline(surface, padded);
    }
    Ok(())
}

/// Dashed highlight; the dash lives on this call's stroke only.
fn draw_selection_outline(surface: &mut Pixmap, bounds: Bounds) {
    let Some(rect) = skia_rect(bounds) else {
        return;
    };
    let path = PathBuilder::from_rect(rect);
    let stroke = Stroke {
        width: SELECTION_LINE_WIDTH,
        dash: StrokeDash::new(SELECTION_DASH.to_vec(), 0.0),
        ..Stroke::default()
    };
    surface.stroke_path(
        &path,
        &solid_paint(SELECTION_COLOR),
        &stroke,
        Transform::identity(),
        None,
    );
}
