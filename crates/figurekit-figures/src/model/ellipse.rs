use serde::{Deserialize, Serialize};

use figurekit_core::geometry::{self, point, Point, Rect, Transform, Vector};

use super::{FigureShape, HitTest};
use crate::attributes::{AttributeChange, AttributeStore};
use crate::bezier::BezierPath;

/// Ellipse inscribed in an axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseShape {
    pub rect: Rect,
}

impl EllipseShape {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            rect: geometry::rect(x, y, width, height),
        }
    }

    pub fn from_center(center: Point, rx: f64, ry: f64) -> Self {
        Self::new(center.x - rx, center.y - ry, rx * 2.0, ry * 2.0)
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    pub fn radii(&self) -> (f64, f64) {
        (self.rect.width() / 2.0, self.rect.height() / 2.0)
    }

    fn normalized_distance(&self, p: Point, grow: f64) -> f64 {
        let c = self.center();
        let (rx, ry) = self.radii();
        let nx = (p.x - c.x) / (rx + grow);
        let ny = (p.y - c.y) / (ry + grow);
        nx * nx + ny * ny
    }
}

impl FigureShape for EllipseShape {
    fn bounds(&self, _attrs: &AttributeStore) -> Rect {
        self.rect
    }

    fn contains_point(&self, _attrs: &AttributeStore, p: Point, hit: &HitTest) -> bool {
        let (rx, ry) = self.radii();
        if rx <= 0.0 || ry <= 0.0 {
            // Collapsed to its major axis
            let c = self.center();
            let (a, b) = if rx <= 0.0 {
                (point(c.x, self.rect.min.y), point(c.x, self.rect.max.y))
            } else {
                (point(self.rect.min.x, c.y), point(self.rect.max.x, c.y))
            };
            return geometry::distance_to_segment(p, a, b) <= hit.tolerance;
        }
        // Inside the ellipse grown by the tolerance ...
        if self.normalized_distance(p, hit.tolerance) > 1.0 {
            return false;
        }
        if hit.filled {
            return true;
        }
        // ... and outside the one shrunk by it.
        if rx.min(ry) <= hit.tolerance {
            return true;
        }
        self.normalized_distance(p, -hit.tolerance) >= 1.0
    }

    fn translate(&mut self, delta: Vector) {
        self.rect = self.rect.translate(delta);
    }

    fn apply_transform(
        &mut self,
        t: &Transform,
        _attrs: &mut AttributeStore,
    ) -> Option<Vec<AttributeChange>> {
        if !geometry::is_axis_aligned(t) {
            return None;
        }
        self.rect = geometry::transform_rect(t, &self.rect);
        Some(Vec::new())
    }

    fn to_path(&self) -> Option<BezierPath> {
        Some(BezierPath::from_ellipse(&self.rect))
    }
}
