use super::{Caption, Color};

pub const FONT_SIZE_MIN: f32 = 8.0;
pub const FONT_SIZE_MAX: f32 = 72.0;

const DEFAULT_TEXT: &str = "New text";
const DEFAULT_FONT_SIZE: f32 = 24.0;
const DEFAULT_FONT_FAMILY: &str = "Impact";

/// Style and text applied to the next added caption, mirroring the settings form.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTemplate {
    pub text: String,
    pub font_size: f32,
    pub font_color: Color,
    pub font_family: String,
    pub background_color: Color,
    pub background_color_enabled: bool,
    pub background_color_opacity: f32,
    pub font_color_opacity: f32,
}

impl Default for CaptionTemplate {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_color: Color::WHITE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            background_color: Color::WHITE,
            background_color_enabled: false,
            background_color_opacity: 1.0,
            font_color_opacity: 1.0,
        }
    }
}

impl CaptionTemplate {
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = clamp_font_size(size);
    }

    /// The form exposes a single slider for both opacities.
    pub fn set_opacity(&mut self, opacity: f32) {
        let opacity = clamp_opacity(opacity);
        self.font_color_opacity = opacity;
        self.background_color_opacity = opacity;
    }

    /// Copies text and style of an existing caption back into the form.
    pub fn load_from(&mut self, caption: &Caption) {
        self.text = caption.text.clone();
        self.font_size = caption.font_size;
        self.font_color = caption.font_color;
        self.font_family = caption.font_family.clone();
        self.background_color = caption.background_color;
        self.background_color_enabled = caption.background_color_enabled;
        self.background_color_opacity = caption.background_color_opacity;
        self.font_color_opacity = caption.font_color_opacity;
    }

    /// Writes text and style onto a caption, leaving its id and position alone.
    pub fn apply_to(&self, caption: &mut Caption) {
        caption.text = self.text.clone();
        caption.font_size = self.font_size;
        caption.font_color = self.font_color;
        caption.font_family = self.font_family.clone();
        caption.background_color = self.background_color;
        caption.background_color_enabled = self.background_color_enabled;
        caption.background_color_opacity = self.background_color_opacity;
        caption.font_color_opacity = self.font_color_opacity;
    }
}

pub(crate) fn clamp_font_size(size: f32) -> f32 {
    if size.is_nan() {
        DEFAULT_FONT_SIZE
    } else {
        size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX)
    }
}

pub(crate) fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        1.0
    } else {
        opacity.clamp(0.0, 1.0)
    }
}
