//! Geometry primitives.
//!
//! Figures keep every coordinate in `f64`. The aliases are lyon's euclid
//! types so geometry can be handed to lyon's curve segments without
//! conversion.

use lyon::geom::euclid::default::{Box2D, Point2D, Transform2D, Vector2D};

pub use lyon::geom::euclid::Angle;

pub type Point = Point2D<f64>;
pub type Vector = Vector2D<f64>;
pub type Rect = Box2D<f64>;
pub type Transform = Transform2D<f64>;

/// Threshold below which a transform determinant counts as singular.
pub const EPSILON: f64 = 1e-9;

pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    Vector::new(x, y)
}

/// Rectangle from origin and size.
pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(point(x, y), point(x + width, y + height))
}

/// True when the transform only moves points (no rotation, scale or shear).
pub fn is_translation(t: &Transform) -> bool {
    t.m11 == 1.0 && t.m12 == 0.0 && t.m21 == 0.0 && t.m22 == 1.0
}

/// True when the transform maps axis-aligned rectangles onto axis-aligned rectangles.
pub fn is_axis_aligned(t: &Transform) -> bool {
    t.m12 == 0.0 && t.m21 == 0.0
}

pub fn is_invertible(t: &Transform) -> bool {
    let det = t.determinant();
    det.is_finite() && det.abs() > EPSILON
}

/// Uniform scale factor of the transform, `None` if x and y scale differ.
pub fn uniform_scale(t: &Transform) -> Option<f64> {
    let sx = (t.m11 * t.m11 + t.m12 * t.m12).sqrt();
    let sy = (t.m21 * t.m21 + t.m22 * t.m22).sqrt();
    ((sx - sy).abs() <= EPSILON).then_some(sx)
}

/// Axis-aligned bounds of `r` after transforming its corners.
pub fn transform_rect(t: &Transform, r: &Rect) -> Rect {
    t.outer_transformed_box(r)
}

pub fn union(a: Option<Rect>, b: Rect) -> Rect {
    match a {
        Some(a) => a.union(&b),
        None => b,
    }
}

/// Smallest rectangle containing all points, `None` for an empty iterator.
pub fn rect_from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Rect> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let (mut min, mut max) = (first, first);
    for p in iter {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some(Rect::new(min, max))
}

/// Grow the rectangle by `d` on every side.
pub fn inflate(r: &Rect, d: f64) -> Rect {
    r.inflate(d, d)
}

/// Containment test that includes the rectangle's edges.
pub fn contains_inclusive(r: &Rect, p: Point) -> bool {
    p.x >= r.min.x && p.x <= r.max.x && p.y >= r.min.y && p.y <= r.max.y
}

pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len2 = ab.square_length();
    if len2 <= EPSILON * EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    (p - closest_point_on_segment(p, a, b)).length()
}

pub fn approx_eq_point(a: Point, b: Point, eps: f64) -> bool {
    (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps
}

pub fn approx_eq_rect(a: &Rect, b: &Rect, eps: f64) -> bool {
    approx_eq_point(a.min, b.min, eps) && approx_eq_point(a.max, b.max, eps)
}
