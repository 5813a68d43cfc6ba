use figurekit_core::Result;

use super::DrawingEditor;

impl DrawingEditor {
    /// Undo the last recorded edit.
    pub fn undo(&mut self) -> Result<()> {
        self.log.undo(&mut self.drawing)
    }

    /// Redo the last undone edit.
    pub fn redo(&mut self) -> Result<()> {
        self.log.redo(&mut self.drawing)
    }

    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    pub fn undo_presentation_name(&self) -> Option<String> {
        self.log.undo_presentation_name()
    }

    pub fn redo_presentation_name(&self) -> Option<String> {
        self.log.redo_presentation_name()
    }

    /// Starts a gesture; every edit until [`end_gesture`](Self::end_gesture)
    /// becomes one undo step.
    pub fn begin_gesture(&mut self, name: &str) {
        self.log.begin_composite(name);
    }

    /// Ends the gesture. Returns false when it recorded nothing.
    pub fn end_gesture(&mut self) -> Result<bool> {
        let recorded = self.log.end_composite()?;
        self.log.seal();
        Ok(recorded)
    }

    /// Abandons the gesture and reverts everything it changed.
    pub fn cancel_gesture(&mut self) -> Result<()> {
        self.log.discard_composite(&mut self.drawing)
    }

    /// Stops the next edit from coalescing with the previous one.
    pub fn seal(&mut self) {
        self.log.seal();
    }

    pub fn mark_clean(&mut self) {
        self.log.mark_clean();
    }

    pub fn is_modified(&self) -> bool {
        self.log.is_modified()
    }
}
