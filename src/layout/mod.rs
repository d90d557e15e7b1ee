use crate::geometry::Point;

/// Placement of the source image inside the viewport.
///
/// Derived from image and viewport sizes only; recompute it with [`fit_image`]
/// whenever either changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageLayout {
    pub offset_x: f32,
    pub offset_y: f32,
    pub display_width: f32,
    pub display_height: f32,
}

impl ImageLayout {
    /// A layout with no visible area cannot be rendered into.
    pub fn is_renderable(&self) -> bool {
        self.display_width >= 1.0 && self.display_height >= 1.0
    }

    /// Viewport point to image-space point.
    pub fn to_image_space(&self, viewport_point: Point) -> Point {
        Point::new(
            viewport_point.x - self.offset_x,
            viewport_point.y - self.offset_y,
        )
    }

    /// Image-space point to viewport point.
    pub fn to_viewport(&self, image_point: Point) -> Point {
        Point::new(image_point.x + self.offset_x, image_point.y + self.offset_y)
    }

    /// Whether an image-space point lies on the displayed image, edges included.
    pub fn contains(&self, image_point: Point) -> bool {
        image_point.x >= 0.0
            && image_point.x <= self.display_width
            && image_point.y >= 0.0
            && image_point.y <= self.display_height
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Uniformly scales the image to the largest size that fits the viewport and centers it
/// on the slack axis.
pub fn fit_image(
    natural_width: f32,
    natural_height: f32,
    viewport_width: f32,
    viewport_height: f32,
) -> ImageLayout {
    let natural_width = sanitize(natural_width);
    let natural_height = sanitize(natural_height);
    let viewport_width = sanitize(viewport_width);
    let viewport_height = sanitize(viewport_height);

    if natural_width <= 0.0 || natural_height <= 0.0 || viewport_width <= 0.0 || viewport_height <= 0.0
    {
        return ImageLayout {
            offset_x: viewport_width / 2.0,
            offset_y: viewport_height / 2.0,
            display_width: 0.0,
            display_height: 0.0,
        };
    }

    let image_aspect = natural_width / natural_height;
    let viewport_aspect = viewport_width / viewport_height;

    if image_aspect > viewport_aspect {
        let display_height = viewport_width / image_aspect;
        ImageLayout {
            offset_x: 0.0,
            offset_y: ((viewport_height - display_height) / 2.0).max(0.0),
            display_width: viewport_width,
            display_height,
        }
    } else {
        let display_width = viewport_height * image_aspect;
        ImageLayout {
            offset_x: ((viewport_width - display_width) / 2.0).max(0.0),
            offset_y: 0.0,
            display_width,
            display_height: viewport_height,
        }
    }
}
