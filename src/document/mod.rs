use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::caption::{Caption, CaptionId, CaptionStore, StoreError};

pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is not valid caption JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("caption {id}: {reason}")]
    InvalidCaption { id: CaptionId, reason: &'static str },
    #[error("caption id {0} appears more than once")]
    DuplicateId(CaptionId),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Serialized form of the caption list: `{"textElements": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionDocument {
    pub text_elements: Vec<Caption>,
}

impl CaptionDocument {
    pub fn from_store(store: &CaptionStore) -> Self {
        Self {
            text_elements: store.captions().to_vec(),
        }
    }

    /// Rejects captions that the render and hit-test paths cannot handle.
    pub fn validate(&self) -> DocumentResult<()> {
        let mut seen = HashSet::with_capacity(self.text_elements.len());
        for caption in &self.text_elements {
            validate_caption(caption)?;
            if !seen.insert(caption.id) {
                return Err(DocumentError::DuplicateId(caption.id));
            }
        }
        Ok(())
    }
}

fn validate_caption(caption: &Caption) -> DocumentResult<()> {
    let invalid = |reason| DocumentError::InvalidCaption {
        id: caption.id,
        reason,
    };
    if !caption.position.is_finite() {
        return Err(invalid("position must be finite"));
    }
    if !caption.font_size.is_finite() || caption.font_size <= 0.0 {
        return Err(invalid("font size must be a positive number"));
    }
    for opacity in [
        caption.font_color_opacity,
        caption.background_color_opacity,
    ] {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(invalid("opacity must be within 0 and 1"));
        }
    }
    Ok(())
}

/// Pretty-printed JSON of the whole caption list. Selection and drag state are not included.
pub fn export_document(store: &CaptionStore) -> DocumentResult<String> {
    let document = CaptionDocument::from_store(store);
    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn parse_document(raw: &str) -> DocumentResult<CaptionDocument> {
    let document: CaptionDocument = serde_json::from_str(raw)?;
    document.validate()?;
    Ok(document)
}

/// Replaces the store's captions with the document's; on any error the store is untouched.
pub fn import_document(store: &mut CaptionStore, raw: &str) -> DocumentResult<usize> {
    let document = parse_document(raw)?;
    let count = document.text_elements.len();
    store
        .replace_all(document.text_elements)
        .map_err(|err| match err {
            StoreError::DuplicateId(id) => DocumentError::DuplicateId(id),
            other => DocumentError::Store(other),
        })?;
    tracing::info!(count, "caption document imported");
    Ok(count)
}

/// `{prefix}_YYYYMMDD_HHMMSS.json`
pub fn document_file_name(prefix: &str, at: OffsetDateTime) -> DocumentResult<String> {
    let stamp = at.format(format_description!(
        "[year][month][day]_[hour][minute][second]"
    ))?;
    Ok(format!("{prefix}_{stamp}.json"))
}

/// Local wall-clock time, or UTC when the local offset cannot be determined.
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|err| {
        tracing::debug!(?err, "local offset unavailable; using UTC");
        OffsetDateTime::now_utc()
    })
}
