//! Bezier path geometry.
//!
//! A path is an ordered list of [`Node`]s. Each node carries an anchor point
//! and optional incoming and outgoing control points; which of the two are
//! present decides the kind of the segment between consecutive nodes.
//! Coordinates are always in figure space, never pre-multiplied by the
//! owning figure's `TRANSFORM` attribute.

use lyon::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use lyon::path::Path;
use serde::{Deserialize, Serialize};
use std::ops::BitOr;

use figurekit_core::geometry::{self, point, Point, Rect, Transform, Vector};
use figurekit_core::PathError;

/// Samples per curve segment used when no explicit count is given.
pub const DEFAULT_CURVE_SAMPLES: usize = 32;

/// Magic number for approximating a quarter ellipse with one cubic.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Which control points of a node are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct NodeMask(u8);

impl NodeMask {
    pub const NONE: NodeMask = NodeMask(0);
    pub const CONTROL_IN: NodeMask = NodeMask(1);
    pub const CONTROL_OUT: NodeMask = NodeMask(2);
    pub const BOTH: NodeMask = NodeMask(3);

    pub const fn contains(self, other: NodeMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for NodeMask {
    type Output = NodeMask;

    fn bitor(self, rhs: NodeMask) -> NodeMask {
        NodeMask(self.0 | rhs.0)
    }
}

/// Anchor point with optional control points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub point: Point,
    pub control_in: Option<Point>,
    pub control_out: Option<Point>,
}

impl Node {
    /// Corner node without control points.
    pub fn new(point: Point) -> Self {
        Self {
            point,
            control_in: None,
            control_out: None,
        }
    }

    pub fn curve(point: Point, control_in: Point, control_out: Point) -> Self {
        Self {
            point,
            control_in: Some(control_in),
            control_out: Some(control_out),
        }
    }

    pub fn with_control_in(mut self, control: Point) -> Self {
        self.control_in = Some(control);
        self
    }

    pub fn with_control_out(mut self, control: Point) -> Self {
        self.control_out = Some(control);
        self
    }

    pub fn mask(&self) -> NodeMask {
        let mut mask = NodeMask::NONE;
        if self.control_in.is_some() {
            mask = mask | NodeMask::CONTROL_IN;
        }
        if self.control_out.is_some() {
            mask = mask | NodeMask::CONTROL_OUT;
        }
        mask
    }

    pub fn transform(&mut self, t: &Transform) {
        self.point = t.transform_point(self.point);
        self.control_in = self.control_in.map(|c| t.transform_point(c));
        self.control_out = self.control_out.map(|c| t.transform_point(c));
    }

    pub fn translate(&mut self, delta: Vector) {
        self.point += delta;
        self.control_in = self.control_in.map(|c| c + delta);
        self.control_out = self.control_out.map(|c| c + delta);
    }
}

/// Kind of the segment between two consecutive nodes, named by the
/// outgoing side of the start node and the incoming side of the end node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    LineLine,
    LineCurve,
    CurveLine,
    CurveCurve,
}

impl SegmentKind {
    pub fn between(start: &Node, end: &Node) -> Self {
        let out = start.mask().contains(NodeMask::CONTROL_OUT);
        let inc = end.mask().contains(NodeMask::CONTROL_IN);
        match (out, inc) {
            (false, false) => SegmentKind::LineLine,
            (false, true) => SegmentKind::LineCurve,
            (true, false) => SegmentKind::CurveLine,
            (true, true) => SegmentKind::CurveCurve,
        }
    }
}

/// One evaluated segment of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(LineSegment<f64>),
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
}

impl Segment {
    /// Builds the segment from `start` to `end`.
    ///
    /// Each kind reads exactly the control points its mask guarantees.
    pub fn between(start: &Node, end: &Node) -> Self {
        let from = start.point;
        let to = end.point;
        match (SegmentKind::between(start, end), start.control_out, end.control_in) {
            (SegmentKind::LineLine, _, _) => Segment::Line(LineSegment { from, to }),
            (SegmentKind::LineCurve, None, Some(ctrl))
            | (SegmentKind::CurveLine, Some(ctrl), None) => {
                Segment::Quadratic(QuadraticBezierSegment { from, ctrl, to })
            }
            (SegmentKind::CurveCurve, Some(ctrl1), Some(ctrl2)) => {
                Segment::Cubic(CubicBezierSegment {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                })
            }
            (kind, out, inc) => unreachable!(
                "segment kind {:?} does not match controls out={:?} in={:?}",
                kind, out, inc
            ),
        }
    }

    pub fn from(&self) -> Point {
        match self {
            Segment::Line(s) => s.from,
            Segment::Quadratic(s) => s.from,
            Segment::Cubic(s) => s.from,
        }
    }

    pub fn to(&self) -> Point {
        match self {
            Segment::Line(s) => s.to,
            Segment::Quadratic(s) => s.to,
            Segment::Cubic(s) => s.to,
        }
    }

    pub fn sample(&self, t: f64) -> Point {
        match self {
            Segment::Line(s) => s.sample(t),
            Segment::Quadratic(s) => s.sample(t),
            Segment::Cubic(s) => s.sample(t),
        }
    }

    /// Tight bounds including curve extrema.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Segment::Line(s) => s.bounding_box(),
            Segment::Quadratic(s) => s.bounding_box(),
            Segment::Cubic(s) => s.bounding_box(),
        }
    }

    /// Polyline approximation with `samples` chords.
    pub fn flattened(&self, samples: usize) -> Vec<Point> {
        match self {
            Segment::Line(s) => vec![s.from, s.to],
            _ => {
                let n = samples.max(2);
                (0..=n).map(|i| self.sample(i as f64 / n as f64)).collect()
            }
        }
    }

    /// Parameter and point on the segment closest to `p`.
    pub fn closest_point(&self, p: Point, samples: usize) -> (f64, Point) {
        let polyline = self.flattened(samples);
        let chords = (polyline.len() - 1) as f64;
        let mut best = (0.0, polyline[0], f64::INFINITY);
        for (i, pair) in polyline.windows(2).enumerate() {
            let q = geometry::closest_point_on_segment(p, pair[0], pair[1]);
            let d = (p - q).length();
            if d < best.2 {
                let chord = (pair[1] - pair[0]).length();
                let local = if chord > 0.0 {
                    (q - pair[0]).length() / chord
                } else {
                    0.0
                };
                best = ((i as f64 + local) / chords, q, d);
            }
        }
        let t = best.0.clamp(0.0, 1.0);
        match self {
            Segment::Line(_) => (t, best.1),
            _ => (t, self.sample(t)),
        }
    }

    pub fn distance_to(&self, p: Point, samples: usize) -> f64 {
        let (_, q) = self.closest_point(p, samples);
        (p - q).length()
    }
}

/// Ordered node sequence, optionally closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BezierPath {
    nodes: Vec<Node>,
    closed: bool,
}

impl BezierPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<Node>, closed: bool) -> Self {
        Self { nodes, closed }
    }

    /// Polyline through `points`.
    pub fn from_points(points: &[Point], closed: bool) -> Self {
        Self {
            nodes: points.iter().copied().map(Node::new).collect(),
            closed,
        }
    }

    /// Closed four node outline, clockwise from the top left corner.
    pub fn from_rect(r: &Rect) -> Self {
        Self::from_points(
            &[
                r.min,
                point(r.max.x, r.min.y),
                r.max,
                point(r.min.x, r.max.y),
            ],
            true,
        )
    }

    /// Closed four node cubic approximation of the ellipse inscribed in `r`.
    pub fn from_ellipse(r: &Rect) -> Self {
        let c = r.center();
        let rx = r.width() / 2.0;
        let ry = r.height() / 2.0;
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;
        let nodes = vec![
            Node::curve(
                point(c.x + rx, c.y),
                point(c.x + rx, c.y - ky),
                point(c.x + rx, c.y + ky),
            ),
            Node::curve(
                point(c.x, c.y + ry),
                point(c.x + kx, c.y + ry),
                point(c.x - kx, c.y + ry),
            ),
            Node::curve(
                point(c.x - rx, c.y),
                point(c.x - rx, c.y + ky),
                point(c.x - rx, c.y - ky),
            ),
            Node::curve(
                point(c.x, c.y - ry),
                point(c.x - kx, c.y - ry),
                point(c.x + kx, c.y - ry),
            ),
        ];
        Self::from_nodes(nodes, true)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Inserts `node` before `index`; `index == len` appends.
    pub fn add_node(&mut self, index: usize, node: Node) -> Result<(), PathError> {
        if index > self.nodes.len() {
            return Err(PathError::NodeIndexOutOfBounds {
                index,
                len: self.nodes.len(),
            });
        }
        self.nodes.insert(index, node);
        Ok(())
    }

    pub fn remove_node(&mut self, index: usize) -> Result<Node, PathError> {
        if index >= self.nodes.len() {
            return Err(PathError::NodeIndexOutOfBounds {
                index,
                len: self.nodes.len(),
            });
        }
        if self.nodes.len() <= 2 {
            return Err(PathError::TooFewNodes { min: 2 });
        }
        Ok(self.nodes.remove(index))
    }

    pub fn segment_count(&self) -> usize {
        match self.nodes.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Segment starting at node `index`.
    pub fn segment(&self, index: usize) -> Option<Segment> {
        if index >= self.segment_count() {
            return None;
        }
        let start = &self.nodes[index];
        let end = &self.nodes[(index + 1) % self.nodes.len()];
        Some(Segment::between(start, end))
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.segment_count()).filter_map(move |i| self.segment(i))
    }

    pub fn point_at(&self, segment: usize, t: f64) -> Option<Point> {
        self.segment(segment).map(|s| s.sample(t.clamp(0.0, 1.0)))
    }

    /// Bounds of the curve itself; control points off the curve are excluded.
    pub fn bounds(&self) -> Option<Rect> {
        if self.nodes.len() == 1 {
            let p = self.nodes[0].point;
            return Some(Rect::new(p, p));
        }
        self.segments()
            .map(|s| s.bounding_box())
            .reduce(|a, b| a.union(&b))
    }

    pub fn find_segment(&self, p: Point, tolerance: f64) -> Option<usize> {
        self.find_segment_sampled(p, tolerance, DEFAULT_CURVE_SAMPLES)
    }

    /// Index of the segment nearest to `p` within `tolerance`.
    pub fn find_segment_sampled(&self, p: Point, tolerance: f64, samples: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, segment) in self.segments().enumerate() {
            let d = segment.distance_to(p, samples);
            if d <= tolerance && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Index of the node whose anchor is nearest to `p` within `tolerance`.
    pub fn find_node(&self, p: Point, tolerance: f64) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (i, (n.point - p).length()))
            .filter(|(_, d)| *d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    pub fn split_segment(&mut self, p: Point, tolerance: f64) -> Option<usize> {
        self.split_segment_sampled(p, tolerance, DEFAULT_CURVE_SAMPLES)
    }

    /// Inserts a corner node on the hit segment, returning its index.
    pub fn split_segment_sampled(
        &mut self,
        p: Point,
        tolerance: f64,
        samples: usize,
    ) -> Option<usize> {
        let index = self.find_segment_sampled(p, tolerance, samples)?;
        let segment = self.segment(index)?;
        let (_, on_curve) = segment.closest_point(p, samples);
        let insert_at = index + 1;
        self.nodes.insert(insert_at, Node::new(on_curve));
        Some(insert_at)
    }

    /// Removes the interior node hit by `p`, merging its two segments.
    ///
    /// Endpoints of an open path are never removed, and a closed path keeps
    /// at least three nodes.
    pub fn join_segments(&mut self, p: Point, tolerance: f64) -> Option<usize> {
        let index = self.find_node(p, tolerance)?;
        let len = self.nodes.len();
        let removable = if self.closed {
            len > 3
        } else {
            index > 0 && index + 1 < len
        };
        if !removable {
            return None;
        }
        self.nodes.remove(index);
        Some(index)
    }

    pub fn contains(&self, p: Point, tolerance: f64) -> bool {
        self.contains_sampled(p, tolerance, true, DEFAULT_CURVE_SAMPLES)
    }

    /// Hit test against the outline and, for closed filled paths, the interior.
    pub fn contains_sampled(&self, p: Point, tolerance: f64, filled: bool, samples: usize) -> bool {
        if let [only] = self.nodes.as_slice() {
            return (only.point - p).length() <= tolerance;
        }
        if self.segments().any(|s| s.distance_to(p, samples) <= tolerance) {
            return true;
        }
        filled && self.closed && self.even_odd_contains(p, samples)
    }

    fn even_odd_contains(&self, p: Point, samples: usize) -> bool {
        let mut polygon: Vec<Point> = Vec::new();
        for segment in self.segments() {
            let mut pts = segment.flattened(samples);
            pts.pop();
            polygon.extend(pts);
        }
        let mut inside = false;
        let n = polygon.len();
        for i in 0..n {
            let a = polygon[i];
            let b = polygon[(i + n - 1) % n];
            if (a.y > p.y) != (b.y > p.y) {
                let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    pub fn transform(&mut self, t: &Transform) {
        for node in &mut self.nodes {
            node.transform(t);
        }
    }

    pub fn translate(&mut self, delta: Vector) {
        for node in &mut self.nodes {
            node.translate(delta);
        }
    }

    /// Converts to a lyon path for renderers and tessellators.
    pub fn render(&self) -> Path {
        let mut builder = Path::builder();
        let Some(first) = self.nodes.first() else {
            return builder.build();
        };
        builder.begin(to_f32(first.point));
        for segment in self.segments() {
            match segment {
                Segment::Line(s) => {
                    builder.line_to(to_f32(s.to));
                }
                Segment::Quadratic(s) => {
                    builder.quadratic_bezier_to(to_f32(s.ctrl), to_f32(s.to));
                }
                Segment::Cubic(s) => {
                    builder.cubic_bezier_to(to_f32(s.ctrl1), to_f32(s.ctrl2), to_f32(s.to));
                }
            }
        }
        builder.end(self.closed);
        builder.build()
    }
}

fn to_f32(p: Point) -> lyon::math::Point {
    lyon::math::point(p.x as f32, p.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_kind_follows_masks() {
        let a = Node::new(point(0.0, 0.0));
        let b = Node::new(point(10.0, 0.0)).with_control_in(point(8.0, 5.0));
        let c = Node::new(point(0.0, 0.0)).with_control_out(point(2.0, 5.0));
        assert_eq!(SegmentKind::between(&a, &a), SegmentKind::LineLine);
        assert_eq!(SegmentKind::between(&a, &b), SegmentKind::LineCurve);
        assert_eq!(SegmentKind::between(&c, &a), SegmentKind::CurveLine);
        assert_eq!(SegmentKind::between(&c, &b), SegmentKind::CurveCurve);
        assert!(matches!(Segment::between(&c, &b), Segment::Cubic(_)));
        assert!(matches!(Segment::between(&a, &b), Segment::Quadratic(_)));
    }

    #[test]
    fn test_closest_point_on_line() {
        let seg = Segment::Line(LineSegment {
            from: point(0.0, 0.0),
            to: point(10.0, 0.0),
        });
        let (t, q) = seg.closest_point(point(4.0, 3.0), 8);
        assert!((t - 0.4).abs() < 1e-9);
        assert!(geometry::approx_eq_point(q, point(4.0, 0.0), 1e-9));
    }
}
