use serde::{Deserialize, Serialize};

use figurekit_core::geometry::{self, point, Point, Rect, Transform, Vector};

use super::{FigureShape, HitTest};
use crate::attributes::{AttributeChange, AttributeStore};
use crate::bezier::BezierPath;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleShape {
    pub rect: Rect,
}

impl RectangleShape {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            rect: geometry::rect(x, y, width, height),
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    fn corners(&self) -> [Point; 4] {
        let r = &self.rect;
        [
            r.min,
            point(r.max.x, r.min.y),
            r.max,
            point(r.min.x, r.max.y),
        ]
    }
}

impl FigureShape for RectangleShape {
    fn bounds(&self, _attrs: &AttributeStore) -> Rect {
        self.rect
    }

    fn contains_point(&self, _attrs: &AttributeStore, p: Point, hit: &HitTest) -> bool {
        if hit.filled {
            return geometry::contains_inclusive(&geometry::inflate(&self.rect, hit.tolerance), p);
        }
        let c = self.corners();
        (0..4).any(|i| geometry::distance_to_segment(p, c[i], c[(i + 1) % 4]) <= hit.tolerance)
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
        Some(BezierPath::from_rect(&self.rect))
    }
}
