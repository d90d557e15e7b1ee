use image::{imageops, RgbaImage};
use tiny_skia::{FillRule, IntSize, Path, Pixmap, PixmapPaint, Rect, Stroke, Transform};

use super::{solid_paint, RenderError};
use crate::geometry::RgbaColor;

/// Offset and blur applied to a drop shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSpec {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub color: RgbaColor,
}

impl ShadowSpec {
    /// Gaussian sigma equivalent of the blur radius.
    pub fn sigma(&self) -> f32 {
        (self.blur / 2.0).max(0.0)
    }
}

fn union_bounds(paths: &[Path]) -> Option<Rect> {
    let mut iter = paths.iter().map(Path::bounds);
    let first = iter.next()?;
    iter.try_fold(first, |acc, rect| {
        Rect::from_ltrb(
            acc.left().min(rect.left()),
            acc.top().min(rect.top()),
            acc.right().max(rect.right()),
            acc.bottom().max(rect.bottom()),
        )
    })
}

/// Rasterises `paths` in the shadow color on a scratch layer, blurs it and composites the
/// result under `transform` plus the shadow offset.
pub(super) fn draw_soft_shadow(
    surface: &mut Pixmap,
    paths: &[Path],
    stroke: &Stroke,
    transform: Transform,
    shadow: &ShadowSpec,
) -> Result<(), RenderError> {
    if shadow.color.alpha == 0 {
        return Ok(());
    }
    let Some(bounds) = union_bounds(paths) else {
        return Ok(());
    };

    let sigma = shadow.sigma();
    let margin = stroke.width / 2.0 + (sigma * 3.0).ceil() + 1.0;
    let shift_x = transform.tx + shadow.offset_x;
    let shift_y = transform.ty + shadow.offset_y;

    let left = ((bounds.left() + shift_x - margin).floor()).max(0.0);
    let top = ((bounds.top() + shift_y - margin).floor()).max(0.0);
    let right = ((bounds.right() + shift_x + margin).ceil()).min(surface.width() as f32);
    let bottom = ((bounds.bottom() + shift_y + margin).ceil()).min(surface.height() as f32);
    if right <= left || bottom <= top {
        return Ok(());
    }

    let width = (right - left) as u32;
    let height = (bottom - top) as u32;
    let mut layer =
        Pixmap::new(width, height).ok_or(RenderError::SurfaceAllocation { width, height })?;
    let layer_transform = Transform::from_translate(shift_x - left, shift_y - top);
    let paint = solid_paint(shadow.color);
    for path in paths {
        layer.stroke_path(path, &paint, stroke, layer_transform, None);
        layer.fill_path(path, &paint, FillRule::Winding, layer_transform, None);
    }

    let blurred = if sigma > 0.0 {
        blur_premultiplied(&layer, sigma)?
    } else {
        layer
    };
    surface.draw_pixmap(
        left as i32,
        top as i32,
        blurred.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
    Ok(())
}

/// Blurs the raw premultiplied channels; color is clamped back under alpha afterwards.
fn blur_premultiplied(layer: &Pixmap, sigma: f32) -> Result<Pixmap, RenderError> {
    let (width, height) = (layer.width(), layer.height());
    let raw = RgbaImage::from_raw(width, height, layer.data().to_vec())
        .ok_or(RenderError::SurfaceAllocation { width, height })?;
    let mut blurred = imageops::blur(&raw, sigma);
    for pixel in blurred.pixels_mut() {
        let alpha = pixel.0[3];
        for channel in &mut pixel.0[..3] {
            *channel = (*channel).min(alpha);
        }
    }
    let size = IntSize::from_wh(width, height)
        .ok_or(RenderError::SurfaceAllocation { width, height })?;
    Pixmap::from_vec(blurred.into_raw(), size)
        .ok_or(RenderError::SurfaceAllocation { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::PathBuilder;

    fn square(x: f32, y: f32, size: f32) -> Path {
        PathBuilder::from_rect(Rect::from_xywh(x, y, size, size).expect("valid rect"))
    }

    fn shadow(blur: f32) -> ShadowSpec {
        ShadowSpec {
            offset_x: 2.0,
            offset_y: 2.0,
            blur,
            color: RgbaColor::new(0, 0, 0, 204),
        }
    }

    #[test]
    fn shadow_sigma_is_half_the_blur() {
        assert_eq!(shadow(4.0).sigma(), 2.0);
        assert_eq!(shadow(-1.0).sigma(), 0.0);
    }

    #[test]
    fn draw_soft_shadow_lands_at_offset_and_spreads() {
        let mut surface = Pixmap::new(40, 40).expect("surface");
        let stroke = Stroke::default();
        draw_soft_shadow(
            &mut surface,
            &[square(10.0, 10.0, 10.0)],
            &stroke,
            Transform::identity(),
            &shadow(4.0),
        )
        .expect("shadow drawn");

        let alpha_at = |x: u32, y: u32| surface.pixel(x, y).expect("in bounds").alpha();
        assert!(alpha_at(17, 17) > 150, "shadow core is dense");
        assert!(alpha_at(23, 17) > 0, "blur spreads past the shape edge");
        assert_eq!(alpha_at(1, 1), 0, "far pixels stay clear");
    }

    #[test]
    fn draw_soft_shadow_clips_to_surface() {
        let mut surface = Pixmap::new(10, 10).expect("surface");
        draw_soft_shadow(
            &mut surface,
            &[square(-50.0, -50.0, 5.0)],
            &Stroke::default(),
            Transform::identity(),
            &shadow(4.0),
        )
        .expect("off-surface shadow is a no-op");
        assert!(surface.pixels().iter().all(|pixel| pixel.alpha() == 0));
    }
}
