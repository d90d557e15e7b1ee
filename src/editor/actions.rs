//! Export actions that hand editor output to storage.

use std::path::PathBuf;

use thiserror::Error;

use crate::caption::StoreError;
use crate::document::{self, DocumentError};
use crate::render::{pixmap_to_rgba_image, RenderError};
use crate::storage::{CaptionStorage, StorageError};

use super::CaptionEditor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    ExportImage,
    ExportDocument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    ImageExported { path: PathBuf },
    DocumentExported { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum EditorActionError {
    #[error("cannot {operation}: no image loaded")]
    NoImage { operation: &'static str },

    #[error("cannot {operation}: the canvas has not been drawn yet")]
    SurfaceNotReady { operation: &'static str },

    #[error("render error while {operation}: {source}")]
    Render {
        operation: &'static str,
        #[source]
        source: RenderError,
    },

    #[error("caption error while {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("storage error while {operation}: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("document error while {operation}: {source}")]
    Document {
        operation: &'static str,
        #[source]
        source: DocumentError,
    },
}

impl EditorActionError {
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::NoImage { operation }
            | Self::SurfaceNotReady { operation }
            | Self::Render { operation, .. }
            | Self::Store { operation, .. }
            | Self::Storage { operation, .. }
            | Self::Document { operation, .. } => *operation,
        }
    }
}

pub(super) fn execute_editor_action<S: CaptionStorage + ?Sized>(
    editor: &mut CaptionEditor,
    action: EditorAction,
    storage: &S,
) -> Result<EditorEvent, EditorActionError> {
    match action {
        EditorAction::ExportImage => {
            let operation = "export image";
            if editor.image().is_none() {
                return Err(EditorActionError::NoImage { operation });
            }
            editor
                .render_if_due()
                .map_err(|source| EditorActionError::Render { operation, source })?;
            let surface = editor
                .current_frame()
                .ok_or(EditorActionError::SurfaceNotReady { operation })?;
            let snapshot = pixmap_to_rgba_image(surface)
                .map_err(|source| EditorActionError::Render { operation, source })?;
            let path = storage
                .save_png(&snapshot)
                .map_err(|source| EditorActionError::Storage { operation, source })?;
            Ok(EditorEvent::ImageExported { path })
        }
        EditorAction::ExportDocument => {
            let operation = "export captions";
            let contents = document::export_document(editor.store())
                .map_err(|source| EditorActionError::Document { operation, source })?;
            let file_name =
                document::document_file_name(editor.document_prefix(), document::now_local())
                    .map_err(|source| EditorActionError::Document { operation, source })?;
            let path = storage
                .save_document(&file_name, &contents)
                .map_err(|source| EditorActionError::Storage { operation, source })?;
            Ok(EditorEvent::DocumentExported { path })
        }
    }
}
