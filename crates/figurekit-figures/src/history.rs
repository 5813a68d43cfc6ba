//! Linear edit log with coalescing and gesture grouping

use figurekit_core::{EditError, Result};
use figurekit_settings::HistorySettings;

use crate::commands::{CompositeEdit, UndoableEdit};
use crate::drawing::Drawing;

/// Sequential log of undoable edits with a current position.
///
/// Edits before the position can be undone, edits after it redone.
#[derive(Debug, Clone)]
pub struct EditLog {
    edits: Vec<UndoableEdit>,
    position: usize,
    limit: usize,
    coalesce: bool,
    /// Set at gesture boundaries; the next push never coalesces
    sealed: bool,
    open: Vec<CompositeEdit>,
    clean_position: Option<usize>,
}

impl EditLog {
    /// Create a log with default depth (100)
    pub fn new() -> Self {
        Self::with_limit(100)
    }

    /// Create with custom maximum history depth
    pub fn with_limit(limit: usize) -> Self {
        Self {
            edits: Vec::new(),
            position: 0,
            limit: limit.max(1),
            coalesce: true,
            sealed: false,
            open: Vec::new(),
            clean_position: Some(0),
        }
    }

    /// Create from the history section of the editor settings
    pub fn with_settings(settings: &HistorySettings) -> Self {
        let mut log = Self::with_limit(settings.undo_limit);
        log.coalesce = settings.coalesce_edits;
        log
    }

    /// Record an edit whose mutation has already been applied.
    ///
    /// Returns true when the edit was absorbed by the previous one.
    pub fn push(&mut self, edit: UndoableEdit) -> bool {
        let coalesce = self.coalesce && !self.sealed;
        if let Some(composite) = self.open.last_mut() {
            if coalesce {
                if let Some(last) = composite.edits.last_mut() {
                    if last.add_edit(&edit) {
                        return true;
                    }
                }
            }
            composite.edits.push(edit);
            self.sealed = false;
            return false;
        }

        self.truncate_redo();
        if coalesce && self.position > 0 {
            let last = &mut self.edits[self.position - 1];
            if last.add_edit(&edit) {
                tracing::trace!("Coalesced {} into previous edit", edit.presentation_name());
                if self.clean_position == Some(self.position) {
                    self.clean_position = None;
                }
                return true;
            }
        }
        self.append(edit);
        false
    }

    fn truncate_redo(&mut self) {
        if self.position < self.edits.len() {
            tracing::debug!("Dropping {} redo edits", self.edits.len() - self.position);
            self.edits.truncate(self.position);
            if self.clean_position.is_some_and(|c| c > self.position) {
                self.clean_position = None;
            }
        }
    }

    fn append(&mut self, edit: UndoableEdit) {
        tracing::debug!("Recorded edit '{}'", edit.presentation_name());
        self.edits.push(edit);
        self.position += 1;
        self.sealed = false;
        while self.edits.len() > self.limit {
            self.edits.remove(0);
            self.position -= 1;
            self.clean_position = match self.clean_position {
                Some(0) | None => None,
                Some(c) => Some(c - 1),
            };
            tracing::trace!("History trimmed to {} edits", self.limit);
        }
    }

    /// Undo the edit before the current position
    pub fn undo(&mut self, drawing: &mut Drawing) -> Result<()> {
        self.ensure_closed()?;
        if self.position == 0 {
            return Err(EditError::NothingToUndo.into());
        }
        self.edits[self.position - 1].undo(drawing)?;
        self.position -= 1;
        self.sealed = true;
        Ok(())
    }

    /// Redo the edit after the current position
    pub fn redo(&mut self, drawing: &mut Drawing) -> Result<()> {
        self.ensure_closed()?;
        if self.position >= self.edits.len() {
            return Err(EditError::NothingToRedo.into());
        }
        self.edits[self.position].redo(drawing)?;
        self.position += 1;
        self.sealed = true;
        Ok(())
    }

    fn ensure_closed(&self) -> std::result::Result<(), EditError> {
        match self.open.last() {
            Some(open) => Err(EditError::CompositeOpen {
                name: open.name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.open.is_empty() && self.position > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.open.is_empty() && self.position < self.edits.len()
    }

    /// Menu label for the next undo, e.g. "Undo Fill Color"
    pub fn undo_presentation_name(&self) -> Option<String> {
        if !self.can_undo() {
            return None;
        }
        Some(format!("Undo {}", self.edits[self.position - 1].presentation_name()))
    }

    /// Menu label for the next redo
    pub fn redo_presentation_name(&self) -> Option<String> {
        if !self.can_redo() {
            return None;
        }
        Some(format!("Redo {}", self.edits[self.position].presentation_name()))
    }

    /// Start collecting edits into one composite entry. Composites nest.
    pub fn begin_composite(&mut self, name: impl Into<String>) {
        let composite = CompositeEdit::new(name);
        tracing::debug!("Begin composite edit '{}'", composite.name);
        self.open.push(composite);
        self.sealed = true;
    }

    /// Close the innermost composite.
    ///
    /// Returns true when it was recorded, false when it was empty and dropped.
    pub fn end_composite(&mut self) -> Result<bool> {
        let composite = self.open.pop().ok_or(EditError::NoOpenComposite)?;
        if composite.is_empty() {
            tracing::debug!("Dropped empty composite edit '{}'", composite.name);
            return Ok(false);
        }
        match self.open.last_mut() {
            Some(outer) => outer.edits.push(composite.into()),
            None => {
                self.truncate_redo();
                self.append(composite.into());
            }
        }
        self.sealed = true;
        Ok(true)
    }

    /// Abandon the innermost composite, reverting what it recorded.
    pub fn discard_composite(&mut self, drawing: &mut Drawing) -> Result<()> {
        let composite = self.open.pop().ok_or(EditError::NoOpenComposite)?;
        tracing::debug!("Discarding composite edit '{}'", composite.name);
        for edit in composite.edits.iter().rev() {
            edit.undo(drawing)?;
        }
        self.sealed = true;
        Ok(())
    }

    /// Name of the innermost open composite
    pub fn open_composite(&self) -> Option<&str> {
        self.open.last().map(|c| c.name.as_str())
    }

    /// End of a continuous interaction; the next edit starts a new entry
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Remember the current position as the saved state
    pub fn mark_clean(&mut self) {
        self.clean_position = Some(self.position);
    }

    /// True when the drawing differs from the last saved state
    pub fn is_modified(&self) -> bool {
        self.clean_position != Some(self.position)
    }

    /// Clear all history, including open composites
    pub fn clear(&mut self) {
        self.edits.clear();
        self.open.clear();
        self.position = 0;
        self.sealed = false;
        self.clean_position = Some(0);
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Entries before this index are undoable
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn edits(&self) -> &[UndoableEdit] {
        &self.edits
    }
}

impl Default for EditLog {
    fn default() -> Self {
        Self::new()
    }
}
