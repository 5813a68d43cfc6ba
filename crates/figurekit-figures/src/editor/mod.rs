//! Editor facade.
//! Owns a drawing, its edit log and the settings, and turns gestures into
//! recorded edits.
//!
//! This module is split into submodules:
//! - `history`: undo/redo and gesture bracketing
//! - `shapes`: figure creation, deletion and attributes
//! - `transforms`: move, rotate, scale and flatten
//! - `arrange`: group, ungroup and stacking order
//! - `paths`: Bezier node editing

mod arrange;
mod history;
mod paths;
mod shapes;
mod transforms;

use figurekit_core::geometry::Point;
use figurekit_core::{FigureId, Result};
use figurekit_settings::EditorSettings;

use crate::drawing::Drawing;
use crate::history::EditLog;

#[derive(Debug)]
pub struct DrawingEditor {
    drawing: Drawing,
    log: EditLog,
    settings: EditorSettings,
}

impl DrawingEditor {
    /// Creates an editor with default settings.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    /// Creates an editor from already validated settings.
    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            drawing: Drawing::with_settings(&settings.geometry),
            log: EditLog::with_settings(&settings.history),
            settings,
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// Direct access to the drawing. Changes made here are not recorded.
    pub fn drawing_mut(&mut self) -> &mut Drawing {
        &mut self.drawing
    }

    pub fn log(&self) -> &EditLog {
        &self.log
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    fn tolerance(&self) -> f64 {
        self.settings.hit_testing.tolerance
    }

    /// Front-most top-level figure under `p`, using the configured tolerance.
    pub fn figure_at(&self, p: Point) -> Option<FigureId> {
        self.drawing.figure_at(p, self.tolerance())
    }

    /// Runs `f` inside a composite edit named `name`. On error the
    /// composite is rolled back and nothing is recorded.
    fn record<R>(&mut self, name: &str, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        self.log.begin_composite(name);
        match f(self) {
            Ok(result) => {
                self.log.end_composite()?;
                Ok(result)
            }
            Err(err) => {
                tracing::warn!("Rolling back '{}': {}", name, err);
                self.log.discard_composite(&mut self.drawing)?;
                Err(err)
            }
        }
    }
}

impl Default for DrawingEditor {
    fn default() -> Self {
        Self::new()
    }
}
