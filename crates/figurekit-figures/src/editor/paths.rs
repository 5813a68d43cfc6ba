use figurekit_core::geometry::Point;
use figurekit_core::{FigureId, Result};

use super::DrawingEditor;
use crate::bezier::{BezierPath, Node};
use crate::commands::PathEdit;

impl DrawingEditor {
    fn record_path(&mut self, id: FigureId, name: &str, before: BezierPath) -> Result<()> {
        let after = self.drawing.path(id)?.clone();
        self.log.push(
            PathEdit {
                name: name.to_string(),
                figure: id,
                before,
                after,
            }
            .into(),
        );
        Ok(())
    }

    /// Splits the segment under `p`, returning the new node's index.
    pub fn split_segment(&mut self, id: FigureId, p: Point) -> Result<Option<usize>> {
        let before = self.drawing.path(id)?.clone();
        let tolerance = self.tolerance();
        let index = self.drawing.split_segment(id, p, tolerance)?;
        if index.is_some() {
            self.record_path(id, "Split Segment", before)?;
        }
        Ok(index)
    }

    /// Removes the interior node under `p`, returning its former index.
    pub fn join_segments(&mut self, id: FigureId, p: Point) -> Result<Option<usize>> {
        let before = self.drawing.path(id)?.clone();
        let tolerance = self.tolerance();
        let index = self.drawing.join_segments(id, p, tolerance)?;
        if index.is_some() {
            self.record_path(id, "Join Segments", before)?;
        }
        Ok(index)
    }

    pub fn insert_node(&mut self, id: FigureId, index: usize, node: Node) -> Result<()> {
        let before = self.drawing.path(id)?.clone();
        self.drawing.insert_node(id, index, node)?;
        self.record_path(id, "Insert Node", before)
    }

    pub fn remove_node(&mut self, id: FigureId, index: usize) -> Result<Node> {
        let before = self.drawing.path(id)?.clone();
        let removed = self.drawing.remove_node(id, index)?;
        self.record_path(id, "Remove Node", before)?;
        Ok(removed)
    }
}
