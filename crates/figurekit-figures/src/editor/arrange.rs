use figurekit_core::{FigureId, Result};

use super::DrawingEditor;
use crate::commands::{GroupEdit, ReorderEdit, UngroupEdit};

impl DrawingEditor {
    /// Groups the selection. Returns `None` for an empty selection.
    pub fn group(&mut self, selection: &[FigureId]) -> Result<Option<FigureId>> {
        let Some((_, sorted)) = self.drawing.common_parent(selection)? else {
            return Ok(None);
        };
        let members: Vec<(FigureId, usize)> = sorted
            .iter()
            .filter_map(|id| self.drawing.index_of(*id).map(|index| (*id, index)))
            .collect();
        let Some(group) = self.drawing.group(selection)? else {
            return Ok(None);
        };
        self.log.push(GroupEdit { group, members }.into());
        Ok(Some(group))
    }

    /// Ungroups a composite. Returns `None` when `group` is not one.
    pub fn ungroup(&mut self, group: FigureId) -> Result<Option<Vec<FigureId>>> {
        let Some(members) = self.drawing.ungroup(group)? else {
            return Ok(None);
        };
        self.log.push(
            UngroupEdit {
                group,
                members: members.clone(),
            }
            .into(),
        );
        Ok(Some(members))
    }

    pub fn bring_to_front(&mut self, selection: &[FigureId]) -> Result<()> {
        self.restack(selection, true)
    }

    pub fn send_to_back(&mut self, selection: &[FigureId]) -> Result<()> {
        self.restack(selection, false)
    }

    fn restack(&mut self, selection: &[FigureId], front: bool) -> Result<()> {
        let Some(&first) = selection.first() else {
            return Ok(());
        };
        let before = if front {
            self.drawing.bring_to_front(selection)?
        } else {
            self.drawing.send_to_back(selection)?
        };
        let Some(before) = before else {
            return Ok(());
        };
        let parent = self.drawing.parent(first);
        let after = self.drawing.child_list(parent)?.to_vec();
        if before == after {
            return Ok(());
        }
        let name = if front { "Bring to Front" } else { "Send to Back" };
        self.log.push(
            ReorderEdit {
                name: name.to_string(),
                parent,
                before,
                after,
            }
            .into(),
        );
        Ok(())
    }
}
