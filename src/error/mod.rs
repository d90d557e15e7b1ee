use crate::document::DocumentError;
use crate::editor::EditorActionError;
use crate::render::RenderError;
use crate::storage::StorageError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    EditorAction(#[from] EditorActionError),
}
