//! Transform engine.
//!
//! A leaf without a `TRANSFORM` attribute absorbs pure translations
//! directly into its coordinates. Every other transform is composed into
//! the attribute and stays symbolic until [`Drawing::flatten_transform`].
//! Composites never carry a transform of their own; they pass it on to
//! their children.

use figurekit_core::geometry::{self, vector, Transform};
use figurekit_core::{FigureId, Result};

use super::figure::{FigureKind, FigureNode};
use super::Drawing;
use crate::attributes::keys::{FILL_GRADIENT, FONT_SIZE, TRANSFORM};
use crate::attributes::{AttributeChange, AttributeValue};
use crate::model::{FigureShape, Geometry};

/// Attribute entries that change together with the geometry.
const GEOMETRY_ATTRIBUTES: [&str; 3] = [TRANSFORM.name(), FILL_GRADIENT.name(), FONT_SIZE.name()];

/// Snapshot of a figure's geometry and geometry-bound attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformRestoreData {
    figure: FigureId,
    state: RestoreState,
}

#[derive(Debug, Clone, PartialEq)]
enum RestoreState {
    Shape {
        geometry: Geometry,
        attributes: Vec<(&'static str, Option<AttributeValue>)>,
    },
    Composite(Vec<TransformRestoreData>),
}

impl TransformRestoreData {
    pub fn figure(&self) -> FigureId {
        self.figure
    }
}

impl Drawing {
    pub fn transform(&mut self, id: FigureId, t: &Transform) -> Result<()> {
        match self.node(id)?.children().map(<[FigureId]>::to_vec) {
            Some(children) => self.with_change(id, |d| {
                for child in children {
                    d.transform(child, t)?;
                }
                Ok(())
            }),
            None => self.with_change(id, |d| d.transform_leaf(id, t)),
        }
    }

    pub fn transform_figures(&mut self, ids: &[FigureId], t: &Transform) -> Result<()> {
        for &id in ids {
            self.transform(id, t)?;
        }
        Ok(())
    }

    fn transform_leaf(&mut self, id: FigureId, t: &Transform) -> Result<()> {
        let existing = self.node(id)?.attributes.get(&TRANSFORM);
        if existing.is_none() && geometry::is_translation(t) {
            let node = self.node_mut(id)?;
            if let FigureKind::Shape(g) = &mut node.kind {
                g.translate(vector(t.m31, t.m32));
            }
            let change = move_gradient(node, t);
            if let Some(change) = change {
                self.emit_attribute_change(id, &change);
            }
            tracing::trace!("Translated {} in place", id);
            return Ok(());
        }

        let combined = match existing {
            Some(e) => e.then(t),
            None => *t,
        };
        tracing::trace!("Accumulated transform on {}", id);
        self.set_attribute(id, &TRANSFORM, Some(combined))?;
        Ok(())
    }

    /// Bakes the `TRANSFORM` attribute into the geometry and clears it.
    ///
    /// Returns false when some figure kept its attribute because its
    /// geometry cannot represent the transform (rotated text).
    pub fn flatten_transform(&mut self, id: FigureId) -> Result<bool> {
        if let Some(children) = self.node(id)?.children().map(<[FigureId]>::to_vec) {
            return self.with_change(id, |d| {
                let mut all = true;
                for child in children {
                    all &= d.flatten_transform(child)?;
                }
                Ok(all)
            });
        }

        let Some(t) = self.node(id)?.attributes.get(&TRANSFORM) else {
            return Ok(true);
        };
        self.with_change(id, |d| {
            let node = d.node_mut(id)?;
            let FigureNode { attributes, kind, .. } = node;
            let FigureKind::Shape(g) = kind else {
                return Ok(false);
            };
            let Some(mut changes) = g.flatten(&t, attributes) else {
                tracing::debug!("{} cannot absorb its transform", id);
                return Ok(false);
            };
            changes.extend(move_gradient(node, &t));
            changes.push(node.attributes.remove(&TRANSFORM));
            for change in &changes {
                d.emit_attribute_change(id, change);
            }
            tracing::debug!("Flattened transform of {}", id);
            Ok(true)
        })
    }

    pub fn transform_restore_data(&self, id: FigureId) -> Result<TransformRestoreData> {
        let node = self.node(id)?;
        let state = match &node.kind {
            FigureKind::Shape(geometry) => RestoreState::Shape {
                geometry: geometry.clone(),
                attributes: GEOMETRY_ATTRIBUTES
                    .iter()
                    .map(|name| (*name, node.attributes.get_value(name).cloned()))
                    .collect(),
            },
            FigureKind::Composite { children, .. } => RestoreState::Composite(
                children
                    .iter()
                    .map(|child| self.transform_restore_data(*child))
                    .collect::<Result<Vec<_>>>()?,
            ),
        };
        Ok(TransformRestoreData { figure: id, state })
    }

    pub fn restore_transform_to(&mut self, data: &TransformRestoreData) -> Result<()> {
        let id = data.figure;
        self.node(id)?;
        match &data.state {
            RestoreState::Composite(children) => self.with_change(id, |d| {
                for child in children {
                    d.restore_transform_to(child)?;
                }
                Ok(())
            }),
            RestoreState::Shape { geometry, attributes } => self.with_change(id, |d| {
                let node = d.node_mut(id)?;
                if let FigureKind::Shape(g) = &mut node.kind {
                    *g = geometry.clone();
                }
                let changes: Vec<AttributeChange> = attributes
                    .iter()
                    .map(|(name, value)| node.attributes.set_value(name, value.clone()))
                    .filter(|change| !change.is_noop())
                    .collect();
                for change in &changes {
                    d.emit_attribute_change(id, change);
                }
                Ok(())
            }),
        }
    }
}

/// Moves an absolute fill gradient along with the geometry.
fn move_gradient(node: &mut FigureNode, t: &Transform) -> Option<AttributeChange> {
    let mut gradient = node.attributes.get(&FILL_GRADIENT)?;
    if gradient.relative_to_bounds {
        return None;
    }
    gradient.transform(t);
    Some(node.attributes.set(&FILL_GRADIENT, Some(gradient)))
}
