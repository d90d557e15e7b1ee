use std::collections::HashSet;

use thiserror::Error;

use super::template::{clamp_font_size, clamp_opacity};
use super::{Caption, CaptionId, CaptionTemplate, Color, Point, DEFAULT_CAPTION_POSITION};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("caption id {0} appears more than once")]
    DuplicateId(CaptionId),
    #[error("no caption ids left to allocate")]
    IdsExhausted,
}

/// Ordered captions (index ascending is back-to-front) plus the active selection.
///
/// The selection is held as an id and re-validated on every removal, so it can never
/// point at a caption that no longer exists. Every mutation bumps [`Self::revision`].
#[derive(Debug, Clone)]
pub struct CaptionStore {
    captions: Vec<Caption>,
    selected: Option<CaptionId>,
    template: CaptionTemplate,
    /// `None` once the id space is used up.
    next_id: Option<u64>,
    revision: u64,
}

impl Default for CaptionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptionStore {
    pub fn new() -> Self {
        Self {
            captions: Vec::new(),
            selected: None,
            template: CaptionTemplate::default(),
            next_id: Some(1),
            revision: 0,
        }
    }

    fn allocate_id(&mut self) -> Option<CaptionId> {
        let raw = self.next_id?;
        self.next_id = raw.checked_add(1);
        Some(CaptionId::new(raw))
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn selected_mut(&mut self) -> Option<&mut Caption> {
        let id = self.selected?;
        self.captions.iter_mut().find(|caption| caption.id == id)
    }

    /// Applies `edit` to the selection and bumps the revision; no-op without a selection.
    fn edit_selected(&mut self, edit: impl FnOnce(&mut Caption)) -> bool {
        let Some(caption) = self.selected_mut() else {
            return false;
        };
        edit(caption);
        self.touch();
        true
    }

    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    pub fn len(&self) -> usize {
        self.captions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub const fn selected_id(&self) -> Option<CaptionId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Caption> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: CaptionId) -> Option<&Caption> {
        self.captions.iter().find(|caption| caption.id == id)
    }

    pub fn template(&self) -> &CaptionTemplate {
        &self.template
    }

    /// Appends a caption built from the template on top of the stack and selects it.
    pub fn add(&mut self) -> Result<CaptionId, StoreError> {
        let Some(id) = self.allocate_id() else {
            tracing::warn!(count = self.captions.len(), "caption ids exhausted");
            return Err(StoreError::IdsExhausted);
        };
        let caption = Caption::from_template(id, &self.template, DEFAULT_CAPTION_POSITION);
        self.captions.push(caption);
        self.selected = Some(id);
        self.touch();
        tracing::debug!(%id, count = self.captions.len(), "caption added");
        Ok(id)
    }

    /// Removes the selected caption and clears the selection.
    pub fn delete_selected(&mut self) -> Option<Caption> {
        let id = self.selected.take()?;
        let index = self.captions.iter().position(|caption| caption.id == id);
        self.touch();
        let removed = index.map(|index| self.captions.remove(index));
        tracing::debug!(%id, removed = removed.is_some(), "caption deleted");
        removed
    }

    /// Selects an existing caption; unknown ids leave the selection untouched.
    pub fn select(&mut self, id: CaptionId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        if self.selected != Some(id) {
            self.selected = Some(id);
            self.touch();
            tracing::debug!(%id, "caption selected");
        }
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.touch();
            tracing::debug!("selection cleared");
        }
    }

    /// Loads the selection's text and style into the template.
    pub fn load_template_from_selection(&mut self) -> bool {
        let Some(caption) = self.selected().cloned() else {
            return false;
        };
        self.template.load_from(&caption);
        true
    }

    /// Writes the whole template onto the selection.
    pub fn apply_template_to_selection(&mut self) -> bool {
        let template = self.template.clone();
        self.edit_selected(|caption| template.apply_to(caption))
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        self.template.text = text.clone();
        self.edit_selected(|caption| caption.text = text)
    }

    pub fn set_font_size(&mut self, size: f32) -> bool {
        self.template.set_font_size(size);
        let size = clamp_font_size(size);
        self.edit_selected(|caption| caption.font_size = size)
    }

    pub fn set_font_color(&mut self, color: Color) -> bool {
        self.template.font_color = color;
        self.edit_selected(|caption| caption.font_color = color)
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) -> bool {
        let family = family.into();
        self.template.font_family = family.clone();
        self.edit_selected(|caption| caption.font_family = family)
    }

    pub fn set_background_color(&mut self, color: Color) -> bool {
        self.template.background_color = color;
        self.edit_selected(|caption| caption.background_color = color)
    }

    pub fn set_background_enabled(&mut self, enabled: bool) -> bool {
        self.template.background_color_enabled = enabled;
        self.edit_selected(|caption| caption.background_color_enabled = enabled)
    }

    /// Sets font and background opacity together.
    pub fn set_opacity(&mut self, opacity: f32) -> bool {
        self.template.set_opacity(opacity);
        let opacity = clamp_opacity(opacity);
        self.edit_selected(|caption| {
            caption.font_color_opacity = opacity;
            caption.background_color_opacity = opacity;
        })
    }

    /// Moves a caption; non-finite coordinates are rejected.
    pub fn set_position(&mut self, id: CaptionId, position: Point) -> bool {
        if !position.is_finite() {
            return false;
        }
        let Some(caption) = self.captions.iter_mut().find(|caption| caption.id == id) else {
            return false;
        };
        caption.position = position;
        self.touch();
        true
    }

    pub fn set_selected_position(&mut self, position: Point) -> bool {
        match self.selected {
            Some(id) => self.set_position(id, position),
            None => false,
        }
    }

    /// Replaces the whole sequence; selection is reset. Fails without mutating on duplicate ids.
    pub fn replace_all(&mut self, captions: Vec<Caption>) -> Result<(), StoreError> {
        let mut seen = HashSet::with_capacity(captions.len());
        if let Some(duplicate) = captions.iter().find(|caption| !seen.insert(caption.id)) {
            return Err(StoreError::DuplicateId(duplicate.id));
        }

        let max_id = captions.iter().map(|caption| caption.id.get()).max();
        if let Some(max_id) = max_id {
            self.next_id = self
                .next_id
                .zip(max_id.checked_add(1))
                .map(|(current, after)| current.max(after));
        }
        self.captions = captions;
        self.selected = None;
        self.touch();
        tracing::debug!(count = self.captions.len(), "captions replaced");
        Ok(())
    }

    /// Drops every caption and the selection and restores the default template.
    pub fn reset(&mut self) {
        self.captions.clear();
        self.selected = None;
        self.template = CaptionTemplate::default();
        self.touch();
    }
}
