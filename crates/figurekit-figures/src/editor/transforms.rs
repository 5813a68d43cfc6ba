use figurekit_core::geometry::{self, Transform};
use figurekit_core::{FigureId, Result};

use super::DrawingEditor;
use crate::commands::{TransformEdit, TransformRestoreEdit};
use crate::drawing::TransformRestoreData;

impl DrawingEditor {
    /// Transforms the figures and records the change.
    ///
    /// Translations are recorded as their inverse and coalesce while a drag
    /// continues. Every other transform records before/after snapshots so
    /// undo never accumulates rounding error.
    pub fn transform_figures(&mut self, ids: &[FigureId], t: &Transform) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let before = self.snapshot(ids)?;

        if geometry::is_translation(t) {
            let epsilon = self.settings.geometry.epsilon;
            if let Ok(edit) = TransformEdit::with_epsilon(ids.to_vec(), *t, epsilon) {
                self.drawing.transform_figures(ids, t)?;
                self.log.push(edit.into());
                return Ok(());
            }
        }

        tracing::debug!("Recording snapshot transform of {} figures", ids.len());
        self.drawing.transform_figures(ids, t)?;
        let after = self.snapshot(ids)?;
        self.log.push(
            TransformRestoreEdit {
                name: "Transform".to_string(),
                before,
                after,
            }
            .into(),
        );
        Ok(())
    }

    /// Bakes the figure's transform into its geometry as one undo step.
    pub fn flatten_transform(&mut self, id: FigureId) -> Result<bool> {
        let before = self.snapshot(&[id])?;
        let flattened = self.drawing.flatten_transform(id)?;
        let after = self.snapshot(&[id])?;
        if before != after {
            self.log.push(
                TransformRestoreEdit {
                    name: "Flatten Transform".to_string(),
                    before,
                    after,
                }
                .into(),
            );
        }
        Ok(flattened)
    }

    fn snapshot(&self, ids: &[FigureId]) -> Result<Vec<TransformRestoreData>> {
        ids.iter()
            .map(|id| self.drawing.transform_restore_data(*id))
            .collect()
    }
}
