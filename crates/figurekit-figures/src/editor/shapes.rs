use figurekit_core::{FigureError, FigureId, Result};

use super::DrawingEditor;
use crate::attributes::{Attribute, AttributeKey, AttributeRestoreData};
use crate::commands::{AddFigureEdit, AttributeEdit, AttributesRestoreEdit, RemoveFigureEdit};
use crate::model::Geometry;

impl DrawingEditor {
    /// Creates a leaf figure and appends it to the top level.
    pub fn add_figure(&mut self, geometry: impl Into<Geometry>) -> Result<FigureId> {
        let id = self.drawing.create(geometry);
        let index = self.drawing.top_level().len();
        self.insert_figure(None, index, id)?;
        Ok(id)
    }

    /// Attaches an existing detached figure and records it.
    pub fn insert_figure(
        &mut self,
        parent: Option<FigureId>,
        index: usize,
        figure: FigureId,
    ) -> Result<()> {
        self.drawing.add(parent, index, figure)?;
        self.log.push(
            AddFigureEdit {
                parent,
                index,
                figure,
            }
            .into(),
        );
        Ok(())
    }

    /// Detaches the figures as one undo step. They stay in the registry so
    /// the deletion can be redone and undone.
    pub fn delete_figures(&mut self, ids: &[FigureId]) -> Result<()> {
        if let Some(&figure) = ids.iter().find(|id| !self.drawing.is_attached(**id)) {
            return Err(FigureError::NotAttached { figure }.into());
        }
        if ids.is_empty() {
            return Ok(());
        }
        self.record("Delete", |editor| {
            for &figure in ids {
                let parent = editor.drawing.parent(figure);
                let index = editor.drawing.remove(figure)?;
                editor.log.push(
                    RemoveFigureEdit {
                        parent,
                        index,
                        figure,
                    }
                    .into(),
                );
            }
            Ok(())
        })
    }

    /// Sets one attribute. Consecutive sets of the same key on the same
    /// figure coalesce into one undo step.
    pub fn set_attribute<T: Attribute>(
        &mut self,
        id: FigureId,
        key: &AttributeKey<T>,
        value: T,
    ) -> Result<()> {
        let change = self.drawing.set_attribute(id, key, value)?;
        if change.is_noop() {
            return Ok(());
        }
        self.log.push(AttributeEdit::new(id, key, change).into());
        Ok(())
    }

    /// Replaces the whole attribute map from a snapshot, as one undo step.
    pub fn restore_attributes(
        &mut self,
        id: FigureId,
        data: &AttributeRestoreData,
        name: &str,
    ) -> Result<()> {
        let before = self.drawing.restore_attributes_to(id, data)?;
        if before == *data {
            return Ok(());
        }
        self.log.push(
            AttributesRestoreEdit {
                name: name.to_string(),
                figure: id,
                before,
                after: data.clone(),
            }
            .into(),
        );
        Ok(())
    }
}
