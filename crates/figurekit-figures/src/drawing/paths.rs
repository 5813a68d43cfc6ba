//! Node editing on path figures.
//!
//! Query points arrive in drawing coordinates and are mapped into figure
//! space first. Operations that find nothing leave the figure untouched and
//! send no notification.

use figurekit_core::geometry::Point;
use figurekit_core::{FigureId, PathError, Result};

use super::figure::FigureKind;
use super::Drawing;
use crate::bezier::{BezierPath, Node};
use crate::model::Geometry;

impl Drawing {
    /// Replaces the path of a path figure, returning the previous one.
    pub fn set_path(&mut self, id: FigureId, path: BezierPath) -> Result<BezierPath> {
        self.path(id)?;
        self.with_change(id, |d| {
            let node = d.node_mut(id)?;
            match &mut node.kind {
                FigureKind::Shape(Geometry::Path(current)) => Ok(std::mem::replace(current, path)),
                _ => Err(PathError::NotAPath { figure: id }.into()),
            }
        })
    }

    fn edit_path_copy<R>(
        &mut self,
        id: FigureId,
        p: Point,
        f: impl FnOnce(&mut BezierPath, Point) -> Option<R>,
    ) -> Result<Option<R>> {
        let mut path = self.path(id)?.clone();
        let Some(local) = self.to_figure_space(id, p)? else {
            return Ok(None);
        };
        match f(&mut path, local) {
            Some(result) => {
                self.set_path(id, path)?;
                Ok(Some(result))
            }
            None => Ok(None),
        }
    }

    pub fn find_segment(&self, id: FigureId, p: Point, tolerance: f64) -> Result<Option<usize>> {
        let path = self.path(id)?;
        Ok(self
            .to_figure_space(id, p)?
            .and_then(|local| path.find_segment_sampled(local, tolerance, self.curve_samples)))
    }

    pub fn split_segment(
        &mut self,
        id: FigureId,
        p: Point,
        tolerance: f64,
    ) -> Result<Option<usize>> {
        let samples = self.curve_samples;
        self.edit_path_copy(id, p, |path, local| {
            path.split_segment_sampled(local, tolerance, samples)
        })
    }

    pub fn join_segments(
        &mut self,
        id: FigureId,
        p: Point,
        tolerance: f64,
    ) -> Result<Option<usize>> {
        self.edit_path_copy(id, p, |path, local| path.join_segments(local, tolerance))
    }

    pub fn insert_node(&mut self, id: FigureId, index: usize, node: Node) -> Result<()> {
        let mut path = self.path(id)?.clone();
        path.add_node(index, node)?;
        self.set_path(id, path)?;
        Ok(())
    }

    pub fn remove_node(&mut self, id: FigureId, index: usize) -> Result<Node> {
        let mut path = self.path(id)?.clone();
        let removed = path.remove_node(index)?;
        self.set_path(id, path)?;
        Ok(removed)
    }
}
