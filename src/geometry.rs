//! Shared geometric and color primitives used across layout, render and interaction modules.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Edges are inclusive on every side.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Grows the box by independent margins on each side.
    pub fn expand(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(
            self.x - left,
            self.y - top,
            self.width + left + right,
            self.height + top + bottom,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color must look like #rrggbb, got {0:?}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse_hex(value: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidFormat(value.to_string());
        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Pairs the color with an opacity in [0, 1]; out-of-range opacities are clamped.
    pub fn with_opacity(self, opacity: f32) -> RgbaColor {
        let alpha = if opacity.is_finite() {
            (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
        } else {
            0
        };
        RgbaColor::new(self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(value)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbaColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl RgbaColor {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parse_hex_accepts_mixed_case_and_prints_lowercase() {
        let color = Color::parse_hex("#1A2b3C").expect("valid color");
        assert_eq!(color, Color::new(0x1a, 0x2b, 0x3c));
        assert_eq!(color.to_string(), "#1a2b3c");
    }

    #[test]
    fn color_parse_hex_rejects_short_named_and_unprefixed_values() {
        for raw in ["#fff", "red", "ffffff", "#gg0000", "#ffffff00", ""] {
            assert!(Color::parse_hex(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn color_with_opacity_clamps_and_rounds_alpha() {
        assert_eq!(Color::BLACK.with_opacity(0.8).alpha, 204);
        assert_eq!(Color::BLACK.with_opacity(2.0).alpha, 255);
        assert_eq!(Color::BLACK.with_opacity(-1.0).alpha, 0);
        assert_eq!(Color::BLACK.with_opacity(f32::NAN).alpha, 0);
    }

    #[test]
    fn bounds_contains_is_edge_inclusive() {
        let bounds = Bounds::new(10.0, 10.0, 20.0, 5.0);
        assert!(bounds.contains(Point::new(10.0, 10.0)));
        assert!(bounds.contains(Point::new(30.0, 15.0)));
        assert!(!bounds.contains(Point::new(30.1, 15.0)));
        assert!(!bounds.contains(Point::new(9.9, 12.0)));
    }

    #[test]
    fn bounds_expand_applies_each_margin() {
        let bounds = Bounds::new(50.0, 50.0, 100.0, 48.0).expand(4.0, 2.0, 4.0, 2.0);
        assert_eq!(bounds, Bounds::new(46.0, 48.0, 108.0, 52.0));
    }
}
