//! Drawable style subset derived from feature properties.
//!
//! After a property save, the rendering surface re-applies whatever style
//! keys the user set. Unknown keys and unparsable values are skipped; style
//! application is best-effort cosmetics, never an error the user sees.

use crate::properties::Properties;
use serde::{Deserialize, Serialize};

/// RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`).
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.strip_prefix('#')?.trim();
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b, 255))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Format as `#rrggbb` (alpha omitted when opaque).
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Style-relevant property subset for the rendering surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    /// Stroke color (`color` key).
    pub color: Option<Color>,
    /// Fill color (`fillColor` key).
    pub fill_color: Option<Color>,
    /// Stroke width (`weight` key).
    pub weight: Option<f64>,
    /// Stroke opacity (`opacity` key, 0.0 to 1.0).
    pub opacity: Option<f64>,
    /// Fill opacity (`fillOpacity` key, 0.0 to 1.0).
    pub fill_opacity: Option<f64>,
}

impl LayerStyle {
    /// Extract the drawable-affecting subset of a property mapping.
    ///
    /// Each key is applied independently; a value that fails to parse leaves
    /// that field unset and the rest of the style intact.
    pub fn from_properties(properties: &Properties) -> Self {
        let mut style = Self::default();
        for (key, value) in properties.iter() {
            match key {
                "color" => style.color = parse_color(key, value),
                "fillColor" => style.fill_color = parse_color(key, value),
                "weight" => style.weight = parse_number(key, value),
                "opacity" => style.opacity = parse_number(key, value),
                "fillOpacity" => style.fill_opacity = parse_number(key, value),
                _ => {}
            }
        }
        style
    }

    /// Check if no style keys were present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn parse_color(key: &str, value: &str) -> Option<Color> {
    let color = Color::from_hex(value);
    if color.is_none() {
        log::debug!("ignoring unparsable {key} value {value:?}");
    }
    color
}

fn parse_number(key: &str, value: &str) -> Option<f64> {
    let number = value.trim().parse().ok();
    if number.is_none() {
        log::debug!("ignoring unparsable {key} value {value:?}");
    }
    number
}
