use serde::{Deserialize, Serialize};

use figurekit_core::geometry::{Point, Rect, Transform, Vector};

use crate::attributes::{AttributeChange, AttributeStore};
use crate::bezier::BezierPath;

mod ellipse;
mod path;
mod rectangle;
mod text;

pub use ellipse::EllipseShape;
pub use rectangle::RectangleShape;
pub use text::TextShape;

/// Parameters of one hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTest {
    /// Allowed distance from the outline, stroke half width included
    pub tolerance: f64,
    /// Whether the interior counts as a hit
    pub filled: bool,
    /// Samples per curve segment
    pub samples: usize,
}

/// Behaviour shared by every leaf geometry.
///
/// All coordinates are in figure space; the owning figure's `TRANSFORM`
/// attribute is applied by the drawing, never here.
pub trait FigureShape {
    fn bounds(&self, attrs: &AttributeStore) -> Rect;
    fn contains_point(&self, attrs: &AttributeStore, p: Point, hit: &HitTest) -> bool;
    fn translate(&mut self, delta: Vector);

    /// Bakes `t` into the geometry.
    ///
    /// Returns the attribute changes made along the way, or `None` when this
    /// kind cannot represent the transformed shape, leaving it untouched.
    fn apply_transform(
        &mut self,
        t: &Transform,
        attrs: &mut AttributeStore,
    ) -> Option<Vec<AttributeChange>>;

    /// Outline as a Bezier path, `None` for kinds without one.
    fn to_path(&self) -> Option<BezierPath>;
}

/// Shape-specific geometry of a leaf figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Rectangle(RectangleShape),
    Ellipse(EllipseShape),
    Path(BezierPath),
    Text(TextShape),
}

impl Geometry {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Rectangle(_) => "Rectangle",
            Geometry::Ellipse(_) => "Ellipse",
            Geometry::Path(_) => "Path",
            Geometry::Text(_) => "Text",
        }
    }

    pub fn as_path(&self) -> Option<&BezierPath> {
        match self {
            Geometry::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Bakes `t` into the geometry, converting rectangles and ellipses to
    /// paths when the transform is not axis aligned.
    ///
    /// Returns the attribute changes made, `None` when the transform could
    /// not be absorbed.
    pub fn flatten(
        &mut self,
        t: &Transform,
        attrs: &mut AttributeStore,
    ) -> Option<Vec<AttributeChange>> {
        if let Some(changes) = self.apply_transform(t, attrs) {
            return Some(changes);
        }
        let mut path = self.to_path()?;
        tracing::debug!("Converting {} to path to absorb transform", self.kind_name());
        path.transform(t);
        *self = Geometry::Path(path);
        Some(Vec::new())
    }
}

impl FigureShape for Geometry {
    fn bounds(&self, attrs: &AttributeStore) -> Rect {
        match self {
            Geometry::Rectangle(s) => s.bounds(attrs),
            Geometry::Ellipse(s) => s.bounds(attrs),
            Geometry::Path(s) => FigureShape::bounds(s, attrs),
            Geometry::Text(s) => s.bounds(attrs),
        }
    }

    fn contains_point(&self, attrs: &AttributeStore, p: Point, hit: &HitTest) -> bool {
        match self {
            Geometry::Rectangle(s) => s.contains_point(attrs, p, hit),
            Geometry::Ellipse(s) => s.contains_point(attrs, p, hit),
            Geometry::Path(s) => s.contains_point(attrs, p, hit),
            Geometry::Text(s) => s.contains_point(attrs, p, hit),
        }
    }

    fn translate(&mut self, delta: Vector) {
        match self {
            Geometry::Rectangle(s) => s.translate(delta),
            Geometry::Ellipse(s) => s.translate(delta),
            Geometry::Path(s) => FigureShape::translate(s, delta),
            Geometry::Text(s) => s.translate(delta),
        }
    }

    fn apply_transform(
        &mut self,
        t: &Transform,
        attrs: &mut AttributeStore,
    ) -> Option<Vec<AttributeChange>> {
        match self {
            Geometry::Rectangle(s) => s.apply_transform(t, attrs),
            Geometry::Ellipse(s) => s.apply_transform(t, attrs),
            Geometry::Path(s) => s.apply_transform(t, attrs),
            Geometry::Text(s) => s.apply_transform(t, attrs),
        }
    }

    fn to_path(&self) -> Option<BezierPath> {
        match self {
            Geometry::Rectangle(s) => s.to_path(),
            Geometry::Ellipse(s) => s.to_path(),
            Geometry::Path(s) => Some(s.clone()),
            Geometry::Text(s) => s.to_path(),
        }
    }
}

impl From<RectangleShape> for Geometry {
    fn from(s: RectangleShape) -> Self {
        Geometry::Rectangle(s)
    }
}

impl From<EllipseShape> for Geometry {
    fn from(s: EllipseShape) -> Self {
        Geometry::Ellipse(s)
    }
}

impl From<BezierPath> for Geometry {
    fn from(p: BezierPath) -> Self {
        Geometry::Path(p)
    }
}

impl From<TextShape> for Geometry {
    fn from(s: TextShape) -> Self {
        Geometry::Text(s)
    }
}
