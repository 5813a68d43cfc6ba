use serde::{Deserialize, Serialize};

use figurekit_core::geometry::{Point, Transform};

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, 0.0 to 1.0
    pub offset: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientKind {
    Linear,
    Radial,
}

/// Fill gradient.
///
/// For a linear gradient `points` are the start and end of the gradient
/// vector; for a radial gradient they are the center and a point on the
/// outer circle. Gradients that are not relative to the figure bounds live
/// in figure coordinates and move with the geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub kind: GradientKind,
    pub points: [Point; 2],
    pub stops: Vec<GradientStop>,
    pub relative_to_bounds: bool,
}

impl Gradient {
    pub fn linear(start: Point, end: Point, stops: Vec<GradientStop>) -> Self {
        Self {
            kind: GradientKind::Linear,
            points: [start, end],
            stops,
            relative_to_bounds: false,
        }
    }

    pub fn radial(center: Point, edge: Point, stops: Vec<GradientStop>) -> Self {
        Self {
            kind: GradientKind::Radial,
            points: [center, edge],
            stops,
            relative_to_bounds: false,
        }
    }

    pub fn transform(&mut self, t: &Transform) {
        if self.relative_to_bounds {
            return;
        }
        for p in &mut self.points {
            *p = t.transform_point(*p);
        }
    }
}

/// Tagged value stored in an [`AttributeStore`](super::AttributeStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Numbers(Vec<f64>),
    Color(Option<Color>),
    Gradient(Option<Gradient>),
    Transform(Option<Transform>),
}

impl AttributeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Number(_) => "number",
            AttributeValue::Text(_) => "text",
            AttributeValue::Numbers(_) => "numbers",
            AttributeValue::Color(_) => "color",
            AttributeValue::Gradient(_) => "gradient",
            AttributeValue::Transform(_) => "transform",
        }
    }
}

/// A Rust type that can be stored under an [`AttributeKey`](super::AttributeKey).
pub trait Attribute: Clone + std::fmt::Debug + PartialEq + 'static {
    fn into_value(self) -> AttributeValue;
    fn from_value(value: &AttributeValue) -> Option<Self>;
}

macro_rules! impl_attribute {
    ($ty:ty, $variant:ident) => {
        impl Attribute for $ty {
            fn into_value(self) -> AttributeValue {
                AttributeValue::$variant(self)
            }

            fn from_value(value: &AttributeValue) -> Option<Self> {
                match value {
                    AttributeValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_attribute!(bool, Bool);
impl_attribute!(f64, Number);
impl_attribute!(String, Text);
impl_attribute!(Vec<f64>, Numbers);
impl_attribute!(Option<Color>, Color);
impl_attribute!(Option<Gradient>, Gradient);
impl_attribute!(Option<Transform>, Transform);
