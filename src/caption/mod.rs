mod store;
mod template;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use crate::geometry::{Color, Point};
pub use store::{CaptionStore, StoreError};
pub use template::{CaptionTemplate, FONT_SIZE_MAX, FONT_SIZE_MIN};

/// Image-space position given to every newly added caption.
pub const DEFAULT_CAPTION_POSITION: Point = Point::new(50.0, 50.0);

/// Identifier of a caption, unique within a store and never reused by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaptionId(u64);

impl CaptionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CaptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Documents carry ids as strings; integers are accepted on read as well.
impl Serialize for CaptionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CaptionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(raw) => Ok(Self(raw)),
            RawId::Text(raw) => raw.trim().parse::<u64>().map(Self).map_err(|_| {
                serde::de::Error::custom(format!(
                    "caption id must be a non-negative integer, got {raw:?}"
                ))
            }),
        }
    }
}

/// One positioned, styled text overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    pub id: CaptionId,
    pub text: String,
    pub position: Point,
    pub font_size: f32,
    pub font_color: Color,
    pub font_family: String,
    pub background_color: Color,
    pub background_color_enabled: bool,
    pub background_color_opacity: f32,
    pub font_color_opacity: f32,
}

impl Caption {
    pub fn from_template(id: CaptionId, template: &CaptionTemplate, position: Point) -> Self {
        Self {
            id,
            text: template.text.clone(),
            position,
            font_size: template.font_size,
            font_color: template.font_color,
            font_family: template.font_family.clone(),
            background_color: Color::WHITE,
            background_color_enabled: template.background_color_enabled,
            background_color_opacity: 1.0,
            font_color_opacity: 1.0,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }
}
