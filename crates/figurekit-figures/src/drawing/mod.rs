//! The figure tree.
//!
//! A [`Drawing`] owns every figure in an id-keyed registry. Composites hold
//! ordered child id lists and each figure records the slot it occupies, so
//! parent links never own anything. All mutation goes through the drawing,
//! which brackets it with [`Drawing::will_change`]/[`Drawing::changed`] and
//! reports it to the registered [`FigureListener`]s.

mod event;
mod figure;
mod paths;
mod structure;
mod transform;

pub use event::{FigureEvent, FigureListener, ListenerHandle};
pub use transform::TransformRestoreData;

use std::collections::HashMap;

use figurekit_core::geometry::{self, Point, Rect};
use figurekit_core::{FigureError, FigureId, PathError, Result};
use figurekit_settings::GeometrySettings;

use crate::attributes::keys::{FILL_COLOR, FILL_GRADIENT, STROKE_COLOR, STROKE_WIDTH, TRANSFORM};
use crate::attributes::{
    Attribute, AttributeChange, AttributeKey, AttributeRestoreData, AttributeStore, AttributeValue,
};
use crate::bezier::{BezierPath, DEFAULT_CURVE_SAMPLES};
use crate::model::{FigureShape, Geometry, HitTest};
use event::Listeners;
use figure::{FigureKind, FigureNode, Slot};

#[derive(Debug)]
pub struct Drawing {
    figures: HashMap<FigureId, FigureNode>,
    top_level: Vec<FigureId>,
    next_id: u64,
    curve_samples: usize,
    listeners: Listeners,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawing {
    pub fn new() -> Self {
        Self {
            figures: HashMap::new(),
            top_level: Vec::new(),
            next_id: 1,
            curve_samples: DEFAULT_CURVE_SAMPLES,
            listeners: Listeners::default(),
        }
    }

    pub fn with_settings(settings: &GeometrySettings) -> Self {
        let mut drawing = Self::new();
        drawing.curve_samples = settings.curve_samples;
        drawing
    }

    /// Samples per curve segment used for hit testing.
    pub fn curve_samples(&self) -> usize {
        self.curve_samples
    }

    /// Creates a detached leaf figure with default attributes.
    pub fn create(&mut self, geometry: impl Into<Geometry>) -> FigureId {
        self.create_with(geometry, AttributeStore::new())
    }

    pub fn create_with(
        &mut self,
        geometry: impl Into<Geometry>,
        attributes: AttributeStore,
    ) -> FigureId {
        let geometry = geometry.into();
        let id = self.allocate_id();
        tracing::debug!("Created {} figure {}", geometry.kind_name(), id);
        self.figures
            .insert(id, FigureNode::new(FigureKind::Shape(geometry), attributes));
        id
    }

    /// Creates a detached, empty composite.
    pub fn create_composite(&mut self) -> FigureId {
        let id = self.allocate_id();
        tracing::debug!("Created composite figure {}", id);
        self.figures
            .insert(id, FigureNode::new(FigureKind::composite(), AttributeStore::new()));
        id
    }

    fn allocate_id(&mut self) -> FigureId {
        let id = FigureId::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn node(&self, id: FigureId) -> Result<&FigureNode> {
        self.figures
            .get(&id)
            .ok_or_else(|| FigureError::UnknownFigure { id }.into())
    }

    pub(crate) fn node_mut(&mut self, id: FigureId) -> Result<&mut FigureNode> {
        self.figures
            .get_mut(&id)
            .ok_or_else(|| FigureError::UnknownFigure { id }.into())
    }

    pub fn contains_figure(&self, id: FigureId) -> bool {
        self.figures.contains_key(&id)
    }

    /// Number of figures in the registry, attached or not.
    pub fn figure_count(&self) -> usize {
        self.figures.len()
    }

    pub fn is_composite(&self, id: FigureId) -> bool {
        self.figures
            .get(&id)
            .is_some_and(|n| n.children().is_some())
    }

    pub fn geometry(&self, id: FigureId) -> Option<&Geometry> {
        self.figures.get(&id).and_then(|n| n.geometry())
    }

    pub fn path(&self, id: FigureId) -> Result<&BezierPath> {
        self.node(id)?
            .geometry()
            .and_then(Geometry::as_path)
            .ok_or_else(|| PathError::NotAPath { figure: id }.into())
    }

    /// Holding composite; `None` for top-level and detached figures.
    pub fn parent(&self, id: FigureId) -> Option<FigureId> {
        self.figures.get(&id).and_then(|n| n.slot.parent())
    }

    pub fn is_attached(&self, id: FigureId) -> bool {
        self.figures
            .get(&id)
            .is_some_and(|n| n.slot != Slot::Detached)
    }

    /// Top-level figures in z-order, front-most last.
    pub fn top_level(&self) -> &[FigureId] {
        &self.top_level
    }

    pub fn children(&self, id: FigureId) -> Result<&[FigureId]> {
        self.node(id)?
            .children()
            .ok_or_else(|| FigureError::NotComposite { figure: id }.into())
    }

    /// Position of the figure in its holder's child list.
    pub fn index_of(&self, id: FigureId) -> Option<usize> {
        let slot = self.figures.get(&id)?.slot;
        let list = match slot {
            Slot::Detached => return None,
            Slot::TopLevel => &self.top_level[..],
            Slot::Child(parent) => self.figures.get(&parent)?.children()?,
        };
        list.iter().position(|c| *c == id)
    }

    pub(crate) fn child_list(&self, parent: Option<FigureId>) -> Result<&[FigureId]> {
        match parent {
            Some(p) => self.children(p),
            None => Ok(&self.top_level),
        }
    }

    pub(crate) fn child_list_mut(
        &mut self,
        parent: Option<FigureId>,
    ) -> Result<&mut Vec<FigureId>> {
        match parent {
            Some(p) => self
                .node_mut(p)?
                .children_mut()
                .ok_or_else(|| FigureError::NotComposite { figure: p }.into()),
            None => Ok(&mut self.top_level),
        }
    }

    pub fn attributes(&self, id: FigureId) -> Result<&AttributeStore> {
        Ok(&self.node(id)?.attributes)
    }

    pub fn attribute<T: Attribute>(&self, id: FigureId, key: &AttributeKey<T>) -> Result<T> {
        Ok(self.node(id)?.attributes.get(key))
    }

    pub fn set_attribute<T: Attribute>(
        &mut self,
        id: FigureId,
        key: &AttributeKey<T>,
        value: T,
    ) -> Result<AttributeChange> {
        self.check_attribute(id, key.name())?;
        self.with_change(id, |d| {
            let change = d.node_mut(id)?.attributes.set(key, value);
            d.emit_attribute_change(id, &change);
            Ok(change)
        })
    }

    pub fn remove_attribute<T: Attribute>(
        &mut self,
        id: FigureId,
        key: &AttributeKey<T>,
    ) -> Result<AttributeChange> {
        self.set_attribute_value(id, key.name(), None)
    }

    /// Composites never hold a `TRANSFORM` of their own.
    fn check_attribute(&self, id: FigureId, name: &str) -> Result<()> {
        if self.node(id)?.children().is_some() && name == TRANSFORM.name() {
            return Err(FigureError::CompositeTransform { figure: id }.into());
        }
        Ok(())
    }

    /// Untyped write used when replaying recorded edits.
    pub(crate) fn set_attribute_value(
        &mut self,
        id: FigureId,
        name: &str,
        value: Option<AttributeValue>,
    ) -> Result<AttributeChange> {
        if value.is_some() {
            self.check_attribute(id, name)?;
        } else {
            self.node(id)?;
        }
        self.with_change(id, |d| {
            let change = d.node_mut(id)?.attributes.set_value(name, value);
            d.emit_attribute_change(id, &change);
            Ok(change)
        })
    }

    fn emit_attribute_change(&mut self, id: FigureId, change: &AttributeChange) {
        self.emit(FigureEvent::AttributeChanged {
            figure: id,
            name: change.name.clone(),
            old: change.old.clone(),
            new: change.new.clone(),
        });
    }

    pub fn attributes_restore_data(&self, id: FigureId) -> Result<AttributeRestoreData> {
        Ok(self.node(id)?.attributes.restore_data())
    }

    /// Replaces the figure's whole attribute map, returning the previous one.
    pub fn restore_attributes_to(
        &mut self,
        id: FigureId,
        data: &AttributeRestoreData,
    ) -> Result<AttributeRestoreData> {
        if data.contains(TRANSFORM.name()) {
            self.check_attribute(id, TRANSFORM.name())?;
        } else {
            self.node(id)?;
        }
        self.with_change(id, |d| {
            let old = d.node_mut(id)?.attributes.restore_from(data);
            d.emit(FigureEvent::AttributesRestored {
                figure: id,
                old: old.clone(),
                new: data.clone(),
            });
            Ok(old)
        })
    }

    /// Opens a change bracket. Brackets nest; only the outermost one
    /// captures the area and fires on close.
    pub fn will_change(&mut self, id: FigureId) -> Result<()> {
        if self.node(id)?.change_depth == 0 {
            let area = self.area(id)?;
            self.node_mut(id)?.pending_area = area;
        }
        self.node_mut(id)?.change_depth += 1;
        Ok(())
    }

    pub fn changed(&mut self, id: FigureId) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.change_depth == 0 {
            tracing::warn!("changed() without will_change() on {}", id);
            return Err(FigureError::UnbalancedChange { figure: id }.into());
        }
        node.change_depth -= 1;
        if node.change_depth > 0 {
            return Ok(());
        }
        let before = node.pending_area.take();
        node.invalidate_bounds();

        self.invalidate_ancestors(id);
        let after = self.area(id)?;
        let area = match (before, after) {
            (Some(a), Some(b)) => a.union(&b),
            (a, b) => a.or(b).unwrap_or_else(Rect::zero),
        };
        self.emit(FigureEvent::Changed { figure: id, area });
        Ok(())
    }

    /// Change depth of the figure; nonzero while a bracket is open.
    pub fn change_depth(&self, id: FigureId) -> Result<usize> {
        Ok(self.node(id)?.change_depth)
    }

    pub(crate) fn with_change<R>(
        &mut self,
        id: FigureId,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.will_change(id)?;
        let result = f(self);
        self.changed(id)?;
        result
    }

    /// Drops cached bounds on every composite above `id`.
    fn invalidate_ancestors(&mut self, id: FigureId) {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if let Some(node) = self.figures.get(&parent) {
                node.invalidate_bounds();
            }
            self.emit(FigureEvent::Invalidated { figure: parent });
            current = self.parent(parent);
        }
    }

    /// Drops cached bounds on `composite` and its ancestors.
    pub(crate) fn invalidate_from(&mut self, composite: Option<FigureId>) {
        if let Some(c) = composite {
            if let Some(node) = self.figures.get(&c) {
                node.invalidate_bounds();
            }
            self.emit(FigureEvent::Invalidated { figure: c });
            self.invalidate_ancestors(c);
        }
    }

    /// Bounds in drawing coordinates; an empty composite reports a zero rect.
    pub fn bounds(&self, id: FigureId) -> Result<Rect> {
        Ok(self.bounds_opt(id)?.unwrap_or_else(Rect::zero))
    }

    fn bounds_opt(&self, id: FigureId) -> Result<Option<Rect>> {
        let node = self.node(id)?;
        match &node.kind {
            FigureKind::Shape(g) => {
                let local = g.bounds(&node.attributes);
                Ok(Some(match node.attributes.get(&TRANSFORM) {
                    Some(t) => geometry::transform_rect(&t, &local),
                    None => local,
                }))
            }
            FigureKind::Composite { children, bounds } => {
                if let Some(cached) = bounds.get() {
                    return Ok(cached);
                }
                let mut union = None;
                for child in children {
                    if let Some(b) = self.bounds_opt(*child)? {
                        union = Some(geometry::union(union, b));
                    }
                }
                bounds.set(union);
                Ok(union)
            }
        }
    }

    /// True while a composite's bounds are cached.
    pub fn has_cached_bounds(&self, id: FigureId) -> bool {
        self.figures.get(&id).is_some_and(|n| n.has_cached_bounds())
    }

    /// Bounds grown by half the stroke width, the area a renderer repaints.
    pub fn drawing_area(&self, id: FigureId) -> Result<Rect> {
        Ok(self.area(id)?.unwrap_or_else(Rect::zero))
    }

    fn area(&self, id: FigureId) -> Result<Option<Rect>> {
        let node = self.node(id)?;
        match &node.kind {
            FigureKind::Shape(_) => {
                let bounds = self.bounds_opt(id)?;
                let grow = stroke_half_width(&node.attributes);
                Ok(bounds.map(|b| geometry::inflate(&b, grow)))
            }
            FigureKind::Composite { children, .. } => {
                let mut union = None;
                for child in children {
                    if let Some(a) = self.area(*child)? {
                        union = Some(geometry::union(union, a));
                    }
                }
                Ok(union)
            }
        }
    }

    /// Maps a drawing point into the figure's own coordinate space.
    pub fn to_figure_space(&self, id: FigureId, p: Point) -> Result<Option<Point>> {
        match self.node(id)?.attributes.get(&TRANSFORM) {
            Some(t) => Ok(t.inverse().map(|inv| inv.transform_point(p))),
            None => Ok(Some(p)),
        }
    }

    /// Hit test in drawing coordinates.
    pub fn contains(&self, id: FigureId, p: Point, tolerance: f64) -> Result<bool> {
        let node = self.node(id)?;
        match &node.kind {
            FigureKind::Composite { children, .. } => {
                for child in children.iter().rev() {
                    if self.contains(*child, p, tolerance)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            FigureKind::Shape(g) => {
                let Some(local) = self.to_figure_space(id, p)? else {
                    return Ok(false);
                };
                let attrs = &node.attributes;
                let hit = HitTest {
                    tolerance: tolerance + stroke_half_width(attrs),
                    filled: attrs.get(&FILL_COLOR).is_some() || attrs.get(&FILL_GRADIENT).is_some(),
                    samples: self.curve_samples,
                };
                Ok(g.contains_point(attrs, local, &hit))
            }
        }
    }

    /// Front-most top-level figure under `p`.
    pub fn figure_at(&self, p: Point, tolerance: f64) -> Option<FigureId> {
        self.top_level
            .iter()
            .rev()
            .find(|id| self.contains(**id, p, tolerance).unwrap_or(false))
            .copied()
    }

    pub fn add_listener(&mut self, listener: impl FigureListener + 'static) -> ListenerHandle {
        self.listeners.add(Box::new(listener))
    }

    pub fn remove_listener(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.remove(handle)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn emit(&mut self, event: FigureEvent) {
        tracing::trace!("Figure event {:?}", event);
        self.listeners.dispatch(&event);
    }
}

fn stroke_half_width(attrs: &AttributeStore) -> f64 {
    if attrs.get(&STROKE_COLOR).is_some() {
        attrs.get(&STROKE_WIDTH).max(0.0) / 2.0
    } else {
        0.0
    }
}
