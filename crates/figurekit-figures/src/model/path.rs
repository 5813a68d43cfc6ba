use figurekit_core::geometry::{Point, Rect, Transform, Vector};

use super::{FigureShape, HitTest};
use crate::attributes::{AttributeChange, AttributeStore};
use crate::bezier::BezierPath;

impl FigureShape for BezierPath {
    fn bounds(&self, _attrs: &AttributeStore) -> Rect {
        BezierPath::bounds(self).unwrap_or_else(Rect::zero)
    }

    fn contains_point(&self, _attrs: &AttributeStore, p: Point, hit: &HitTest) -> bool {
        self.contains_sampled(p, hit.tolerance, hit.filled, hit.samples)
    }

    fn translate(&mut self, delta: Vector) {
        BezierPath::translate(self, delta);
    }

    fn apply_transform(
        &mut self,
        t: &Transform,
        _attrs: &mut AttributeStore,
    ) -> Option<Vec<AttributeChange>> {
        self.transform(t);
        Some(Vec::new())
    }

    fn to_path(&self) -> Option<BezierPath> {
        Some(self.clone())
    }
}
