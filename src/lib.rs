pub mod align;
pub mod caption;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod logging;
pub mod notification;
pub mod render;
pub mod storage;
pub mod text;
pub use editor::CaptionEditor;
pub use error::{AppError, AppResult};

use storage::StorageService;

/// Entrypoint used by host integrations: logging, config, storage and a ready editor session.
pub fn start() -> AppResult<(CaptionEditor, StorageService)> {
    logging::init();
    tracing::info!("starting boxart");

    let config = config::load_app_config();
    let storage = StorageService::from_config(&config)?;
    let editor = CaptionEditor::from_config(&config);

    tracing::info!(
        export_dir = %storage.export_dir().display(),
        fonts = editor.available_fonts().len(),
        "startup complete"
    );
    Ok((editor, storage))
}
