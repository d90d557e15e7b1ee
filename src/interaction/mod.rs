use crate::caption::{Caption, CaptionId, CaptionStore};
use crate::geometry::Point;
use crate::layout::ImageLayout;
use crate::text::{caption_bounds, GlyphBackend};

/// An in-progress drag: which caption, and where inside it the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub target: CaptionId,
    pub grab_offset_x: f32,
    pub grab_offset_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDown {
    /// Pointer landed outside the displayed image; selection cleared.
    OutsideImage,
    /// Pointer landed on the image but on no caption; selection cleared.
    Missed,
    /// A caption was selected and a drag session opened on it.
    Grabbed(CaptionId),
    /// A drag session is already open; nothing changed.
    Busy,
}

/// Captions front-to-back: the last stored caption is tested first.
pub fn captions_in_hit_test_order(captions: &[Caption]) -> impl Iterator<Item = &Caption> {
    captions.iter().rev()
}

/// Topmost caption whose unpadded measured box contains the image-space point.
pub fn hit_test(
    captions: &[Caption],
    image_point: Point,
    glyphs: Option<&dyn GlyphBackend>,
) -> Option<CaptionId> {
    captions_in_hit_test_order(captions)
        .find(|caption| caption_bounds(caption, glyphs).contains(image_point))
        .map(|caption| caption.id)
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn pointer_down(
        &mut self,
        store: &mut CaptionStore,
        layout: &ImageLayout,
        viewport_point: Point,
        glyphs: Option<&dyn GlyphBackend>,
    ) -> PointerDown {
        if self.session.is_some() {
            return PointerDown::Busy;
        }

        let image_point = layout.to_image_space(viewport_point);
        if !layout.contains(image_point) {
            store.clear_selection();
            return PointerDown::OutsideImage;
        }

        let Some(id) = hit_test(store.captions(), image_point, glyphs) else {
            store.clear_selection();
            return PointerDown::Missed;
        };
        let Some(origin) = store.get(id).map(|caption| caption.position) else {
            return PointerDown::Missed;
        };

        store.select(id);
        let session = DragSession {
            target: id,
            grab_offset_x: image_point.x - origin.x,
            grab_offset_y: image_point.y - origin.y,
        };
        tracing::debug!(
            %id,
            grab_x = session.grab_offset_x,
            grab_y = session.grab_offset_y,
            "drag started"
        );
        self.session = Some(session);
        PointerDown::Grabbed(id)
    }

    /// Moves the dragged caption so the grab point follows the pointer. No bounds are applied.
    pub fn pointer_move(
        &mut self,
        store: &mut CaptionStore,
        layout: &ImageLayout,
        viewport_point: Point,
    ) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        let image_point = layout.to_image_space(viewport_point);
        let position = Point::new(
            image_point.x - session.grab_offset_x,
            image_point.y - session.grab_offset_y,
        );
        if store.set_position(session.target, position) {
            return true;
        }
        if store.get(session.target).is_none() {
            tracing::debug!(id = %session.target, "drag target vanished; ending drag");
            self.session = None;
        }
        false
    }

    pub fn pointer_up(&mut self) -> Option<DragSession> {
        let ended = self.session.take();
        if let Some(session) = &ended {
            tracing::debug!(id = %session.target, "drag ended");
        }
        ended
    }

    /// Leaving the surface ends the drag exactly like a release.
    pub fn pointer_leave(&mut self) -> Option<DragSession> {
        self.pointer_up()
    }

    /// Lost pointer capture ends the drag exactly like a release.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.pointer_up()
    }
}
