//! Standard attribute keys shared by every figure kind.

use figurekit_core::Transform;

use super::key::AttributeKey;
use super::value::{Color, Gradient};

fn white() -> Option<Color> {
    Some(Color::WHITE)
}

fn black() -> Option<Color> {
    Some(Color::BLACK)
}

fn no_gradient() -> Option<Gradient> {
    None
}

fn no_transform() -> Option<Transform> {
    None
}

fn one() -> f64 {
    1.0
}

fn not_bold() -> bool {
    false
}

fn default_font_size() -> f64 {
    12.0
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

/// Interior paint. `None` leaves the interior empty and unhittable.
pub const FILL_COLOR: AttributeKey<Option<Color>> =
    AttributeKey::new("fill-color", "Fill Color", white);

/// Gradient paint, takes precedence over [`FILL_COLOR`] when present.
pub const FILL_GRADIENT: AttributeKey<Option<Gradient>> =
    AttributeKey::new("fill-gradient", "Fill Gradient", no_gradient);

pub const STROKE_COLOR: AttributeKey<Option<Color>> =
    AttributeKey::new("stroke-color", "Stroke Color", black);

pub const STROKE_WIDTH: AttributeKey<f64> = AttributeKey::new("stroke-width", "Stroke Width", one);

/// Dash lengths; empty means a solid stroke.
pub const STROKE_DASHES: AttributeKey<Vec<f64>> =
    AttributeKey::new("stroke-dashes", "Stroke Dashes", Vec::new);

pub const OPACITY: AttributeKey<f64> = AttributeKey::new("opacity", "Opacity", one);

/// Accumulated transform from figure coordinates to drawing coordinates.
pub const TRANSFORM: AttributeKey<Option<Transform>> =
    AttributeKey::new("transform", "Transform", no_transform);

pub const TEXT: AttributeKey<String> = AttributeKey::new("text", "Text", String::new);

pub const FONT_FAMILY: AttributeKey<String> =
    AttributeKey::new("font-family", "Font Family", default_font_family);

pub const FONT_SIZE: AttributeKey<f64> =
    AttributeKey::new("font-size", "Font Size", default_font_size);

pub const FONT_BOLD: AttributeKey<bool> = AttributeKey::new("font-bold", "Bold", not_bold);
