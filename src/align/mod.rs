use crate::caption::CaptionStore;
use crate::geometry::Point;
use crate::layout::ImageLayout;
use crate::text::{caption_footprint, GlyphBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignAxis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignMode {
    Start,
    Center,
    End,
}

impl AlignMode {
    /// Coordinate placing an `extent`-long box within `span`.
    pub fn resolve(self, span: f32, extent: f32) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Center => (span - extent) / 2.0,
            Self::End => span - extent,
        }
    }
}

/// Snaps the selected caption to an edge or the center of the displayed image on one axis.
///
/// Returns false when nothing is selected. The other axis is left untouched.
pub fn align_selected(
    store: &mut CaptionStore,
    layout: &ImageLayout,
    glyphs: Option<&dyn GlyphBackend>,
    axis: AlignAxis,
    mode: AlignMode,
) -> bool {
    let Some(caption) = store.selected() else {
        return false;
    };
    let footprint = caption_footprint(caption, glyphs);
    let current = caption.position;
    let position = match axis {
        AlignAxis::X => Point::new(
            mode.resolve(layout.display_width, footprint.width),
            current.y,
        ),
        AlignAxis::Y => Point::new(
            current.x,
            mode.resolve(layout.display_height, footprint.height),
        ),
    };
    tracing::debug!(?axis, ?mode, x = position.x, y = position.y, "caption aligned");
    store.set_selected_position(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fit_image;
    use crate::text::testing::BlockGlyphBackend;

    fn selected_store(text: &str) -> CaptionStore {
        let mut store = CaptionStore::new();
        store.add().expect("caption added");
        store.set_text(text);
        store
    }

    fn layout() -> ImageLayout {
        fit_image(1600.0, 800.0, 800.0, 600.0)
    }

    #[test]
    fn align_selected_centers_on_displayed_width_with_measured_box() {
        let mut store = selected_store("ABCD");
        let glyphs = BlockGlyphBackend::default();
        assert!(align_selected(
            &mut store,
            &layout(),
            Some(&glyphs),
            AlignAxis::X,
            AlignMode::Center
        ));
        // 800 wide image, 48 wide text.
        let position = store.selected().expect("selected").position;
        assert_eq!(position, Point::new(376.0, 50.0));
    }

    #[test]
    fn align_selected_end_on_y_uses_displayed_height() {
        let mut store = selected_store("A\nB");
        let glyphs = BlockGlyphBackend::default();
        align_selected(
            &mut store,
            &layout(),
            Some(&glyphs),
            AlignAxis::Y,
            AlignMode::End,
        );
        // 400 tall image, 24 * 1.2 * 2 tall text.
        let position = store.selected().expect("selected").position;
        assert_eq!(position.x, 50.0);
        assert!((position.y - (400.0 - 57.6)).abs() < 1e-3);
    }

    #[test]
    fn align_selected_start_moves_to_origin_on_requested_axis_only() {
        let mut store = selected_store("ABCD");
        align_selected(&mut store, &layout(), None, AlignAxis::X, AlignMode::Start);
        assert_eq!(
            store.selected().expect("selected").position,
            Point::new(0.0, 50.0)
        );
    }

    #[test]
    fn align_selected_falls_back_to_estimate_without_measurement() {
        let mut store = selected_store("Hello");
        align_selected(&mut store, &layout(), None, AlignAxis::X, AlignMode::End);
        // Estimate: 5 * 24 * 0.2 = 24 wide.
        let position = store.selected().expect("selected").position;
        assert!((position.x - 776.0).abs() < 1e-3);
    }

    #[test]
    fn align_selected_center_is_idempotent() {
        let mut store = selected_store("Centered");
        let glyphs = BlockGlyphBackend::default();
        align_selected(&mut store, &layout(), Some(&glyphs), AlignAxis::X, AlignMode::Center);
        let once = store.selected().expect("selected").position;
        align_selected(&mut store, &layout(), Some(&glyphs), AlignAxis::X, AlignMode::Center);
        assert_eq!(store.selected().expect("selected").position, once);
    }

    #[test]
    fn align_selected_without_selection_is_noop() {
        let mut store = selected_store("ABCD");
        store.clear_selection();
        let before = store.captions()[0].position;
        assert!(!align_selected(
            &mut store,
            &layout(),
            None,
            AlignAxis::Y,
            AlignMode::Center
        ));
        assert_eq!(store.captions()[0].position, before);
    }
}
