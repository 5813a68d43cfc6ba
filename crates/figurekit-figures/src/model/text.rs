use serde::{Deserialize, Serialize};

use figurekit_core::geometry::{self, Point, Rect, Transform, Vector};

use super::{FigureShape, HitTest};
use crate::attributes::keys::{FONT_SIZE, TEXT};
use crate::attributes::{AttributeChange, AttributeStore};
use crate::bezier::BezierPath;

/// Average glyph advance as a fraction of the font size.
const ADVANCE_RATIO: f64 = 0.6;

/// Text anchored at its top left corner.
///
/// The string and font size are the figure's `TEXT` and `FONT_SIZE`
/// attributes; layout is an estimate, real metrics belong to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub origin: Point,
}

impl TextShape {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            origin: geometry::point(x, y),
        }
    }
}

impl FigureShape for TextShape {
    fn bounds(&self, attrs: &AttributeStore) -> Rect {
        let size = attrs.get(&FONT_SIZE);
        let chars = attrs.get(&TEXT).chars().count() as f64;
        geometry::rect(self.origin.x, self.origin.y, chars * size * ADVANCE_RATIO, size)
    }

    fn contains_point(&self, attrs: &AttributeStore, p: Point, hit: &HitTest) -> bool {
        geometry::contains_inclusive(&geometry::inflate(&self.bounds(attrs), hit.tolerance), p)
    }

    fn translate(&mut self, delta: Vector) {
        self.origin += delta;
    }

    /// Only translation combined with a positive uniform scale is absorbed.
    fn apply_transform(
        &mut self,
        t: &Transform,
        attrs: &mut AttributeStore,
    ) -> Option<Vec<AttributeChange>> {
        if !geometry::is_axis_aligned(t) || t.m11 <= 0.0 || t.m22 <= 0.0 {
            return None;
        }
        let scale = geometry::uniform_scale(t)?;
        self.origin = t.transform_point(self.origin);
        let mut changes = Vec::new();
        if (scale - 1.0).abs() > geometry::EPSILON {
            let size = attrs.get(&FONT_SIZE);
            changes.push(attrs.set(&FONT_SIZE, size * scale));
        }
        Some(changes)
    }

    fn to_path(&self) -> Option<BezierPath> {
        None
    }
}
