//! Editing session: one image, its captions, and the pointer and render state around them.

mod actions;

use std::path::{Path, PathBuf};

use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::align::{align_selected, AlignAxis, AlignMode};
use crate::caption::{CaptionId, CaptionStore};
use crate::config::AppConfig;
use crate::document;
use crate::geometry::Point;
use crate::interaction::{DragController, DragSession, PointerDown};
use crate::layout::{fit_image, ImageLayout};
use crate::notification::{Notifier, SystemNotifier};
use crate::render::{RenderError, RenderScheduler, Renderer, Scene, SourceImage};
use crate::storage::{self, CaptionStorage};
use crate::text::{FontDbBackend, GlyphBackend};

pub use actions::{EditorAction, EditorActionError, EditorEvent};

pub struct CaptionEditor {
    store: CaptionStore,
    image: Option<SourceImage>,
    viewport: (u32, u32),
    layout: ImageLayout,
    drag: DragController,
    scheduler: RenderScheduler,
    renderer: Renderer,
    surface: Option<Pixmap>,
    glyphs: Box<dyn GlyphBackend>,
    notifier: Box<dyn Notifier>,
    fonts: Vec<String>,
    document_prefix: String,
    scene_revision: u64,
}

impl std::fmt::Debug for CaptionEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionEditor")
            .field("captions", &self.store.len())
            .field("selected", &self.store.selected_id())
            .field("has_image", &self.image.is_some())
            .field("viewport", &self.viewport)
            .field("layout", &self.layout)
            .field("dragging", &self.drag.is_dragging())
            .finish_non_exhaustive()
    }
}

impl CaptionEditor {
    pub fn new(glyphs: Box<dyn GlyphBackend>, notifier: Box<dyn Notifier>) -> Self {
        let config = AppConfig::default();
        Self {
            store: CaptionStore::new(),
            image: None,
            viewport: (0, 0),
            layout: ImageLayout::default(),
            drag: DragController::new(),
            scheduler: RenderScheduler::new(),
            renderer: Renderer::new(),
            surface: None,
            glyphs,
            notifier,
            fonts: config.fonts,
            document_prefix: config.document_prefix,
            scene_revision: 0,
        }
    }

    /// System fonts plus `font_dirs`, desktop notifications.
    pub fn from_config(config: &AppConfig) -> Self {
        let glyphs = FontDbBackend::with_system_fonts(&config.font_dirs);
        let mut editor = Self::new(Box::new(glyphs), Box::new(SystemNotifier));
        editor.fonts = config.fonts.clone();
        editor.document_prefix = config.document_prefix.clone();
        editor
    }

    pub fn store(&self) -> &CaptionStore {
        &self.store
    }

    /// Form edits go straight to the store; the next render picks them up.
    pub fn store_mut(&mut self) -> &mut CaptionStore {
        &mut self.store
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub const fn layout(&self) -> ImageLayout {
        self.layout
    }

    pub const fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Font families offered to the host's font picker.
    pub fn available_fonts(&self) -> &[String] {
        &self.fonts
    }

    pub fn document_prefix(&self) -> &str {
        &self.document_prefix
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    pub fn load_image(&mut self, pixels: RgbaImage) {
        let image = SourceImage::new(pixels);
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            generation = image.generation(),
            "image loaded into editor"
        );
        self.image = Some(image);
        self.drag.cancel();
        self.relayout();
    }

    /// File-picker input; failures are reported.
    pub fn open_image_file(&mut self, path: impl AsRef<Path>) -> Result<(), EditorActionError> {
        match storage::load_image_file(path) {
            Ok(pixels) => {
                self.load_image(pixels);
                Ok(())
            }
            Err(source) => Err(self.report(EditorActionError::Storage {
                operation: "open image",
                source,
            })),
        }
    }

    /// Drag-and-drop input; anything that is not an image is ignored silently.
    pub fn drop_file(&mut self, path: impl AsRef<Path>) -> bool {
        match storage::accept_dropped_file(path) {
            Some(pixels) => {
                self.load_image(pixels);
                true
            }
            None => false,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if self.viewport == (width, height) {
            return;
        }
        self.viewport = (width, height);
        self.relayout();
    }

    fn relayout(&mut self) {
        let (natural_width, natural_height) = self
            .image
            .as_ref()
            .map_or((0, 0), |image| (image.width(), image.height()));
        self.layout = fit_image(
            natural_width as f32,
            natural_height as f32,
            self.viewport.0 as f32,
            self.viewport.1 as f32,
        );
        self.scene_revision = self.scene_revision.wrapping_add(1);
    }

    pub fn add_caption(&mut self) -> Result<CaptionId, EditorActionError> {
        match self.store.add() {
            Ok(id) => Ok(id),
            Err(source) => Err(self.report(EditorActionError::Store {
                operation: "add caption",
                source,
            })),
        }
    }

    pub fn delete_selected(&mut self) -> bool {
        if self
            .drag
            .session()
            .is_some_and(|session| Some(session.target) == self.store.selected_id())
        {
            self.drag.cancel();
        }
        self.store.delete_selected().is_some()
    }

    /// List selection: selects and loads the caption's style into the form.
    pub fn select_caption(&mut self, id: CaptionId) -> bool {
        if !self.store.select(id) {
            return false;
        }
        self.store.load_template_from_selection()
    }

    pub fn pointer_down(&mut self, viewport_point: Point) -> PointerDown {
        self.drag.pointer_down(
            &mut self.store,
            &self.layout,
            viewport_point,
            Some(&*self.glyphs),
        )
    }

    pub fn pointer_move(&mut self, viewport_point: Point) -> bool {
        self.drag
            .pointer_move(&mut self.store, &self.layout, viewport_point)
    }

    pub fn pointer_up(&mut self) -> Option<DragSession> {
        self.drag.pointer_up()
    }

    pub fn pointer_leave(&mut self) -> Option<DragSession> {
        self.drag.pointer_leave()
    }

    pub fn pointer_cancel(&mut self) -> Option<DragSession> {
        self.drag.cancel()
    }

    pub fn align(&mut self, axis: AlignAxis, mode: AlignMode) -> bool {
        align_selected(
            &mut self.store,
            &self.layout,
            Some(&*self.glyphs),
            axis,
            mode,
        )
    }

    /// Combined revision of every input a frame depends on.
    pub fn revision(&self) -> u64 {
        self.store.revision().wrapping_add(self.scene_revision)
    }

    /// Redraws the surface when anything changed since the last frame and fonts are ready.
    ///
    /// Returns whether a frame was drawn.
    pub fn render_if_due(&mut self) -> Result<bool, RenderError> {
        self.scheduler.invalidate(self.revision());
        let Some(image) = self.image.as_ref() else {
            return Ok(false);
        };
        let (width, height) = self.viewport;
        if width == 0 || height == 0 {
            return Ok(false);
        }
        let Some(revision) = self.scheduler.poll(self.glyphs.is_ready()) else {
            return Ok(false);
        };

        let stale = self
            .surface
            .as_ref()
            .map_or(true, |surface| surface.width() != width || surface.height() != height);
        if stale {
            let fresh =
                Pixmap::new(width, height).ok_or(RenderError::SurfaceAllocation { width, height })?;
            self.surface = Some(fresh);
        }
        let Some(surface) = self.surface.as_mut() else {
            return Ok(false);
        };

        let scene = Scene {
            viewport_width: width,
            viewport_height: height,
            image: Some(image),
            layout: self.layout,
            captions: self.store.captions(),
            selected: self.store.selected_id(),
        };
        self.renderer.render_into(surface, &scene, &*self.glyphs)?;
        tracing::trace!(revision, "frame rendered");
        Ok(true)
    }

    /// Last drawn frame, if any. It may lag behind the session while fonts load.
    pub fn surface(&self) -> Option<&Pixmap> {
        self.surface.as_ref()
    }

    /// Last drawn frame, only if it reflects the current revision.
    pub fn current_frame(&self) -> Option<&Pixmap> {
        if self.scheduler.last_rendered() != Some(self.revision()) {
            return None;
        }
        self.surface.as_ref()
    }

    pub fn execute<S: CaptionStorage + ?Sized>(
        &mut self,
        action: EditorAction,
        storage: &S,
    ) -> Result<EditorEvent, EditorActionError> {
        match actions::execute_editor_action(self, action, storage) {
            Ok(event) => {
                let (summary, path) = match &event {
                    EditorEvent::ImageExported { path } => ("Image exported", path),
                    EditorEvent::DocumentExported { path } => ("Captions exported", path),
                };
                self.notifier
                    .notify(summary, &path.display().to_string());
                Ok(event)
            }
            Err(err) => Err(self.report(err)),
        }
    }

    pub fn export_image<S: CaptionStorage + ?Sized>(
        &mut self,
        storage: &S,
    ) -> Result<PathBuf, EditorActionError> {
        match self.execute(EditorAction::ExportImage, storage)? {
            EditorEvent::ImageExported { path } | EditorEvent::DocumentExported { path } => {
                Ok(path)
            }
        }
    }

    pub fn export_document<S: CaptionStorage + ?Sized>(
        &mut self,
        storage: &S,
    ) -> Result<PathBuf, EditorActionError> {
        match self.execute(EditorAction::ExportDocument, storage)? {
            EditorEvent::ImageExported { path } | EditorEvent::DocumentExported { path } => {
                Ok(path)
            }
        }
    }

    /// Replaces every caption with the document's. A rejected document leaves the session as it was.
    pub fn import_document_str(&mut self, raw: &str) -> Result<usize, EditorActionError> {
        match document::import_document(&mut self.store, raw) {
            Ok(count) => {
                self.drag.cancel();
                Ok(count)
            }
            Err(source) => Err(self.report(EditorActionError::Document {
                operation: "import captions",
                source,
            })),
        }
    }

    pub fn import_document_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<usize, EditorActionError> {
        match storage::read_document(path) {
            Ok(raw) => self.import_document_str(&raw),
            Err(source) => Err(self.report(EditorActionError::Storage {
                operation: "import captions",
                source,
            })),
        }
    }

    /// Back to an empty session: no image, no captions, default form.
    pub fn reset(&mut self) {
        self.drag.cancel();
        self.store.reset();
        self.image = None;
        self.surface = None;
        self.renderer.clear_cache();
        self.relayout();
        tracing::debug!("editor reset");
    }

    fn report(&self, err: EditorActionError) -> EditorActionError {
        tracing::warn!(operation = err.operation(), %err, "editor action failed");
        self.notifier
            .notify(&format!("Could not {}", err.operation()), &err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::testing::RecordingNotifier;
    use crate::storage::{StorageError, StorageResult};
    use crate::text::testing::BlockGlyphBackend;
    use crate::text::FontSpec;
    use image::Rgba;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct SharedGlyphs(Rc<BlockGlyphBackend>);

    impl GlyphBackend for SharedGlyphs {
        fn is_ready(&self) -> bool {
            self.0.is_ready()
        }

        fn line_width(&self, line: &str, font: &FontSpec<'_>) -> Option<f32> {
            self.0.line_width(line, font)
        }

        fn line_outline(
            &self,
            line: &str,
            font: &FontSpec<'_>,
            x: f32,
            top: f32,
        ) -> Option<tiny_skia::Path> {
            self.0.line_outline(line, font, x, top)
        }
    }

    struct SharedNotifier(Rc<RecordingNotifier>);

    impl Notifier for SharedNotifier {
        fn notify(&self, summary: &str, body: &str) {
            self.0.notify(summary, body);
        }
    }

    #[derive(Default)]
    struct MockStorage {
        images: RefCell<Vec<RgbaImage>>,
        documents: RefCell<Vec<(String, String)>>,
    }

    impl CaptionStorage for MockStorage {
        fn save_png(&self, image: &RgbaImage) -> StorageResult<PathBuf> {
            self.images.borrow_mut().push(image.clone());
            Ok(PathBuf::from("/tmp/text-overlay-image.png"))
        }

        fn save_document(&self, file_name: &str, contents: &str) -> StorageResult<PathBuf> {
            self.documents
                .borrow_mut()
                .push((file_name.to_string(), contents.to_string()));
            Ok(PathBuf::from("/tmp").join(file_name))
        }
    }

    struct FailingStorage;

    impl CaptionStorage for FailingStorage {
        fn save_png(&self, _image: &RgbaImage) -> StorageResult<PathBuf> {
            Err(StorageError::MissingHomeDirectory)
        }

        fn save_document(&self, _file_name: &str, _contents: &str) -> StorageResult<PathBuf> {
            Err(StorageError::MissingHomeDirectory)
        }
    }

    struct Harness {
        editor: CaptionEditor,
        glyphs: Rc<BlockGlyphBackend>,
        notifier: Rc<RecordingNotifier>,
    }

    fn harness() -> Harness {
        let glyphs = Rc::new(BlockGlyphBackend::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let editor = CaptionEditor::new(
            Box::new(SharedGlyphs(Rc::clone(&glyphs))),
            Box::new(SharedNotifier(Rc::clone(&notifier))),
        );
        Harness {
            editor,
            glyphs,
            notifier,
        }
    }

    fn editor_with_image() -> Harness {
        let mut harness = harness();
        harness.editor.set_viewport(200, 100);
        harness
            .editor
            .load_image(RgbaImage::from_pixel(200, 100, Rgba([10, 20, 30, 255])));
        harness
    }

    #[test]
    fn editor_load_image_fits_layout_to_viewport() {
        let mut harness = harness();
        harness.editor.set_viewport(800, 600);
        harness
            .editor
            .load_image(RgbaImage::from_pixel(1600, 800, Rgba([0, 0, 0, 255])));

        let layout = harness.editor.layout();
        assert_eq!(layout.offset_x, 0.0);
        assert_eq!(layout.offset_y, 150.0);
        assert_eq!(layout.display_width, 800.0);
        assert_eq!(layout.display_height, 400.0);
    }

    #[test]
    fn editor_render_if_due_draws_once_per_revision() {
        let mut harness = editor_with_image();
        assert!(harness.editor.render_if_due().expect("render"));
        assert!(!harness.editor.render_if_due().expect("render"));

        harness.editor.add_caption().expect("caption added");
        assert!(harness.editor.render_if_due().expect("render"));
        let surface = harness.editor.surface().expect("surface");
        assert_eq!((surface.width(), surface.height()), (200, 100));
    }

    #[test]
    fn editor_render_waits_for_fonts_then_draws() {
        let mut harness = editor_with_image();
        harness.glyphs.not_ready.set(true);
        assert!(!harness.editor.render_if_due().expect("render"));
        assert!(harness.editor.surface().is_none());

        harness.glyphs.not_ready.set(false);
        assert!(harness.editor.render_if_due().expect("render"));
        assert!(harness.editor.surface().is_some());
    }

    #[test]
    fn editor_render_without_image_draws_nothing() {
        let mut harness = harness();
        harness.editor.set_viewport(200, 100);
        harness.editor.add_caption().expect("caption added");
        assert!(!harness.editor.render_if_due().expect("render"));
        assert!(harness.editor.surface().is_none());
    }

    #[test]
    fn editor_drag_moves_caption_by_pointer_delta() {
        let mut harness = editor_with_image();
        let id = harness.editor.add_caption().expect("caption added");
        harness.editor.store_mut().clear_selection();

        assert_eq!(
            harness.editor.pointer_down(Point::new(60.0, 60.0)),
            PointerDown::Grabbed(id)
        );
        assert_eq!(harness.editor.store().selected_id(), Some(id));
        assert!(harness.editor.pointer_move(Point::new(80.0, 70.0)));
        let ended = harness.editor.pointer_up().expect("drag session");
        assert_eq!(ended.target, id);

        let caption = harness.editor.store().get(id).expect("caption");
        assert_eq!(caption.position, Point::new(70.0, 60.0));
        assert!(!harness.editor.pointer_move(Point::new(150.0, 90.0)));
    }

    #[test]
    fn editor_delete_selected_ends_drag_on_it() {
        let mut harness = editor_with_image();
        let id = harness.editor.add_caption().expect("caption added");
        assert_eq!(
            harness.editor.pointer_down(Point::new(60.0, 60.0)),
            PointerDown::Grabbed(id)
        );
        assert!(harness.editor.delete_selected());
        assert!(harness.editor.drag_session().is_none());
        assert!(harness.editor.store().is_empty());
    }

    #[test]
    fn editor_select_caption_loads_style_into_form() {
        let mut harness = editor_with_image();
        let first = harness.editor.add_caption().expect("caption added");
        harness.editor.store_mut().set_text("first");
        harness.editor.add_caption().expect("caption added");
        harness.editor.store_mut().set_text("second");

        assert!(harness.editor.select_caption(first));
        assert_eq!(harness.editor.store().template().text, "first");
        assert!(!harness.editor.select_caption(CaptionId::new(999)));
        assert_eq!(harness.editor.store().selected_id(), Some(first));
    }

    #[test]
    fn editor_align_centers_selected_caption_horizontally() {
        let mut harness = editor_with_image();
        let id = harness.editor.add_caption().expect("caption added");
        assert!(harness.editor.align(AlignAxis::X, AlignMode::Center));

        // "New text" at 24px: 8 blocks of 12px.
        let caption = harness.editor.store().get(id).expect("caption");
        assert_eq!(caption.position, Point::new(52.0, 50.0));
    }

    #[test]
    fn editor_export_image_saves_current_frame() {
        let mut harness = editor_with_image();
        harness.editor.add_caption().expect("caption added");
        let storage = MockStorage::default();

        let path = harness.editor.export_image(&storage).expect("export");
        assert_eq!(path, PathBuf::from("/tmp/text-overlay-image.png"));
        let images = storage.images.borrow();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].dimensions(), (200, 100));
        assert_eq!(images[0].get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
        assert_eq!(harness.notifier.messages.borrow()[0].0, "Image exported");
    }

    #[test]
    fn editor_export_image_without_image_is_reported() {
        let mut harness = harness();
        harness.editor.set_viewport(200, 100);
        let storage = MockStorage::default();

        let err = harness.editor.export_image(&storage).unwrap_err();
        assert!(matches!(err, EditorActionError::NoImage { .. }));
        assert!(storage.images.borrow().is_empty());
        assert_eq!(
            harness.notifier.messages.borrow()[0].0,
            "Could not export image"
        );
    }

    #[test]
    fn editor_export_image_before_fonts_ready_is_reported() {
        let mut harness = editor_with_image();
        harness.glyphs.not_ready.set(true);
        let err = harness
            .editor
            .export_image(&MockStorage::default())
            .unwrap_err();
        assert!(matches!(err, EditorActionError::SurfaceNotReady { .. }));
    }

    #[test]
    fn editor_export_image_refuses_frame_older_than_session() {
        let mut harness = editor_with_image();
        assert!(harness.editor.render_if_due().expect("render"));
        assert!(harness.editor.current_frame().is_some());

        harness.glyphs.not_ready.set(true);
        harness.editor.add_caption().expect("caption added");
        harness.editor.store_mut().set_text("XXXX");
        assert!(!harness.editor.render_if_due().expect("render"));
        assert!(harness.editor.surface().is_some());
        assert!(harness.editor.current_frame().is_none());

        let storage = MockStorage::default();
        let err = harness.editor.export_image(&storage).unwrap_err();
        assert!(matches!(err, EditorActionError::SurfaceNotReady { .. }));
        assert!(storage.images.borrow().is_empty());

        harness.glyphs.not_ready.set(false);
        harness.editor.export_image(&storage).expect("export once fonts load");
        let images = storage.images.borrow();
        let bare = RgbaImage::from_pixel(200, 100, Rgba([10, 20, 30, 255]));
        assert!(images[0].pixels().zip(bare.pixels()).any(|(a, b)| a != b));
    }

    #[test]
    fn editor_add_caption_after_max_id_import_is_reported() {
        let mut harness = editor_with_image();
        let id = harness.editor.add_caption().expect("caption added");
        let mut document = crate::document::CaptionDocument::from_store(harness.editor.store());
        document.text_elements[0].id = CaptionId::new(u64::MAX);
        let raw = serde_json::to_string(&document).expect("serialize");
        harness.editor.import_document_str(&raw).expect("import");
        assert!(harness.editor.store().get(id).is_none());

        let err = harness.editor.add_caption().unwrap_err();
        assert!(matches!(
            err,
            EditorActionError::Store {
                operation: "add caption",
                ..
            }
        ));
        assert_eq!(harness.editor.store().len(), 1);
        assert_eq!(
            harness.notifier.messages.borrow()[0].0,
            "Could not add caption"
        );
    }

    #[test]
    fn editor_export_storage_failure_is_reported() {
        let mut harness = editor_with_image();
        let err = harness.editor.export_image(&FailingStorage).unwrap_err();
        assert!(matches!(
            err,
            EditorActionError::Storage {
                operation: "export image",
                ..
            }
        ));
        assert_eq!(harness.notifier.messages.borrow().len(), 1);
    }

    #[test]
    fn editor_export_document_uses_prefix_and_timestamp() {
        let mut harness = editor_with_image();
        harness.editor.add_caption().expect("caption added");
        let storage = MockStorage::default();

        let path = harness.editor.export_document(&storage).expect("export");
        let documents = storage.documents.borrow();
        let (file_name, contents) = &documents[0];
        assert!(file_name.starts_with("boxart_"));
        assert!(file_name.ends_with(".json"));
        assert_eq!(file_name.len(), "boxart_YYYYMMDD_HHMMSS.json".len());
        assert!(contents.contains("\"textElements\""));
        assert_eq!(path, PathBuf::from("/tmp").join(file_name));
    }

    #[test]
    fn editor_document_export_then_import_restores_captions() {
        let mut source = editor_with_image();
        source.editor.add_caption().expect("caption added");
        source.editor.store_mut().set_text("hello\nworld");
        source.editor.add_caption().expect("caption added");
        let storage = MockStorage::default();
        source.editor.export_document(&storage).expect("export");
        let contents = storage.documents.borrow()[0].1.clone();

        let mut target = editor_with_image();
        assert_eq!(
            target.editor.import_document_str(&contents).expect("import"),
            2
        );
        assert_eq!(
            target.editor.store().captions(),
            source.editor.store().captions()
        );
        assert_eq!(target.editor.store().selected_id(), None);
    }

    #[test]
    fn editor_rejected_import_is_reported_and_changes_nothing() {
        let mut harness = editor_with_image();
        harness.editor.add_caption().expect("caption added");
        let before = harness.editor.store().captions().to_vec();
        let revision = harness.editor.revision();

        let err = harness.editor.import_document_str("not json").unwrap_err();
        assert!(matches!(err, EditorActionError::Document { .. }));
        assert_eq!(harness.editor.store().captions(), before.as_slice());
        assert_eq!(harness.editor.revision(), revision);
        assert_eq!(
            harness.notifier.messages.borrow()[0].0,
            "Could not import captions"
        );
    }

    #[test]
    fn editor_drop_file_ignores_non_images_silently() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "plain text").expect("write");

        let mut harness = harness();
        assert!(!harness.editor.drop_file(&path));
        assert!(harness.editor.image().is_none());
        assert!(harness.notifier.messages.borrow().is_empty());

        assert!(harness.editor.open_image_file(&path).is_err());
        assert_eq!(harness.notifier.messages.borrow().len(), 1);
    }

    #[test]
    fn editor_drop_file_loads_png() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("photo.png");
        RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 255]))
            .save(&path)
            .expect("save png");

        let mut harness = harness();
        harness.editor.set_viewport(8, 8);
        assert!(harness.editor.drop_file(&path));
        assert_eq!(harness.editor.layout().display_width, 8.0);
        assert_eq!(harness.editor.layout().display_height, 4.0);
    }

    #[test]
    fn editor_reset_clears_session() {
        let mut harness = editor_with_image();
        harness.editor.add_caption().expect("caption added");
        harness.editor.render_if_due().expect("render");

        harness.editor.reset();
        assert!(harness.editor.image().is_none());
        assert!(harness.editor.surface().is_none());
        assert!(harness.editor.store().is_empty());
        assert_eq!(harness.editor.layout().display_width, 0.0);
    }
}
