//! Structural edits: attach, detach, reorder, group and clone.

use std::collections::HashSet;

use figurekit_core::{FigureError, FigureId, Result};

use super::figure::{FigureKind, FigureNode, Slot};
use super::{Drawing, FigureEvent};

fn describe(parent: Option<FigureId>) -> String {
    match parent {
        Some(p) => p.to_string(),
        None => "the top level".to_string(),
    }
}

impl Drawing {
    /// Inserts a detached figure into `parent` (`None` for the top level)
    /// before `index`.
    pub fn add(&mut self, parent: Option<FigureId>, index: usize, figure: FigureId) -> Result<()> {
        let node = self.node(figure)?;
        match node.slot {
            Slot::Detached => {}
            Slot::TopLevel => {
                return Err(FigureError::AlreadyAttached {
                    figure,
                    parent: describe(None),
                }
                .into())
            }
            Slot::Child(p) => {
                return Err(FigureError::AlreadyAttached {
                    figure,
                    parent: describe(Some(p)),
                }
                .into())
            }
        }
        let len = self.child_list(parent)?.len();
        if index > len {
            return Err(FigureError::IndexOutOfBounds { index, len }.into());
        }
        if let Some(p) = parent {
            if self.is_ancestor_or_self(figure, p) {
                return Err(FigureError::Cycle { figure, parent: p }.into());
            }
        }

        self.child_list_mut(parent)?.insert(index, figure);
        self.node_mut(figure)?.slot = Slot::of_parent(parent);
        tracing::debug!("Added {} to {} at {}", figure, describe(parent), index);
        self.invalidate_from(parent);
        self.emit(FigureEvent::FigureAdded { parent, figure, index });
        Ok(())
    }

    pub fn add_last(&mut self, parent: Option<FigureId>, figure: FigureId) -> Result<()> {
        let index = self.child_list(parent)?.len();
        self.add(parent, index, figure)
    }

    /// Detaches the figure from its holder and returns its former index.
    /// The figure stays in the registry.
    pub fn remove(&mut self, figure: FigureId) -> Result<usize> {
        let slot = self.node(figure)?.slot;
        let parent = match slot {
            Slot::Detached => return Err(FigureError::NotAttached { figure }.into()),
            Slot::TopLevel => None,
            Slot::Child(p) => Some(p),
        };
        let list = self.child_list_mut(parent)?;
        let index = list
            .iter()
            .position(|c| *c == figure)
            .ok_or(FigureError::NotAttached { figure })?;
        list.remove(index);
        self.node_mut(figure)?.slot = Slot::Detached;
        tracing::debug!("Removed {} from {} at {}", figure, describe(parent), index);
        self.invalidate_from(parent);
        self.emit(FigureEvent::FigureRemoved { parent, figure, index });
        Ok(index)
    }

    /// Drops a detached figure and its whole subtree from the registry.
    pub fn discard(&mut self, figure: FigureId) -> Result<()> {
        if self.is_attached(figure) {
            return Err(FigureError::AlreadyAttached {
                figure,
                parent: describe(self.parent(figure)),
            }
            .into());
        }
        let mut pending = vec![figure];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.figures.remove(&id) {
                if let Some(children) = node.children() {
                    pending.extend_from_slice(children);
                }
            }
        }
        tracing::debug!("Discarded {}", figure);
        Ok(())
    }

    fn is_ancestor_or_self(&self, ancestor: FigureId, mut id: FigureId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    /// Members of `set` held by `parent`, in z-order.
    pub fn sort(&self, parent: Option<FigureId>, set: &[FigureId]) -> Result<Vec<FigureId>> {
        let wanted: HashSet<FigureId> = set.iter().copied().collect();
        Ok(self
            .child_list(parent)?
            .iter()
            .copied()
            .filter(|c| wanted.contains(c))
            .collect())
    }

    /// Checks that every figure of a non-empty selection exists and shares
    /// one holder; returns the holder and the selection in z-order.
    pub(crate) fn common_parent(
        &self,
        selection: &[FigureId],
    ) -> Result<Option<(Option<FigureId>, Vec<FigureId>)>> {
        let Some(&first) = selection.first() else {
            return Ok(None);
        };
        let slot = self.node(first)?.slot;
        if slot == Slot::Detached {
            return Err(FigureError::NotAttached { figure: first }.into());
        }
        for &other in &selection[1..] {
            if self.node(other)?.slot != slot {
                return Err(FigureError::MixedParents { first, other }.into());
            }
        }
        let parent = slot.parent();
        Ok(Some((parent, self.sort(parent, selection)?)))
    }

    /// Replaces the children of `parent` with a permutation of themselves.
    pub fn reorder(&mut self, parent: Option<FigureId>, order: &[FigureId]) -> Result<()> {
        let current = self.child_list(parent)?;
        let members: HashSet<&FigureId> = current.iter().collect();
        let proposed: HashSet<&FigureId> = order.iter().collect();
        let same_members =
            current.len() == order.len() && proposed.len() == order.len() && members == proposed;
        if !same_members {
            return Err(FigureError::NotAPermutation {
                parent: describe(parent),
            }
            .into());
        }
        *self.child_list_mut(parent)? = order.to_vec();
        self.invalidate_from(parent);
        Ok(())
    }

    /// Moves the selection to the front, keeping its relative order.
    /// Returns the holder's child order before the move.
    pub fn bring_to_front(&mut self, selection: &[FigureId]) -> Result<Option<Vec<FigureId>>> {
        self.restack(selection, true)
    }

    pub fn send_to_back(&mut self, selection: &[FigureId]) -> Result<Option<Vec<FigureId>>> {
        self.restack(selection, false)
    }

    fn restack(&mut self, selection: &[FigureId], front: bool) -> Result<Option<Vec<FigureId>>> {
        let Some((parent, sorted)) = self.common_parent(selection)? else {
            return Ok(None);
        };
        let before = self.child_list(parent)?.to_vec();
        let rest = before.iter().copied().filter(|c| !sorted.contains(c));
        let order: Vec<FigureId> = if front {
            rest.chain(sorted.iter().copied()).collect()
        } else {
            sorted.iter().copied().chain(rest).collect()
        };
        self.reorder(parent, &order)?;
        Ok(Some(before))
    }

    /// Groups the selection into a new empty composite.
    pub fn group(&mut self, selection: &[FigureId]) -> Result<Option<FigureId>> {
        self.group_with(selection, Drawing::create_composite)
    }

    /// Groups the selection into the composite built by `factory`.
    ///
    /// The group takes the position of the lowest selected figure and holds
    /// the selection in z-order. Nothing is mutated if validation fails.
    pub fn group_with<F>(&mut self, selection: &[FigureId], factory: F) -> Result<Option<FigureId>>
    where
        F: FnOnce(&mut Drawing) -> FigureId,
    {
        if self.common_parent(selection)?.is_none() {
            return Ok(None);
        }
        let group = factory(self);
        self.group_into(selection, group)
    }

    /// Groups the selection into an existing empty, detached composite.
    pub fn group_into(
        &mut self,
        selection: &[FigureId],
        group: FigureId,
    ) -> Result<Option<FigureId>> {
        let Some((parent, sorted)) = self.common_parent(selection)? else {
            return Ok(None);
        };
        match self.node(group)?.children() {
            None => return Err(FigureError::NotComposite { figure: group }.into()),
            Some(children) if !children.is_empty() => {
                return Err(FigureError::AlreadyAttached {
                    figure: children[0],
                    parent: group.to_string(),
                }
                .into())
            }
            Some(_) => {}
        }
        if self.is_attached(group) {
            return Err(FigureError::AlreadyAttached {
                figure: group,
                parent: describe(self.parent(group)),
            }
            .into());
        }

        let mut index = usize::MAX;
        for &member in sorted.iter().rev() {
            index = index.min(self.remove(member)?);
        }
        for &member in &sorted {
            self.add_last(Some(group), member)?;
        }
        self.add(parent, index, group)?;
        tracing::debug!("Grouped {} figures into {}", sorted.len(), group);
        Ok(Some(group))
    }

    /// Splices the group's children back into its holder at the group's
    /// index. The emptied group stays detached in the registry.
    ///
    /// Returns `None` when `group` is not a composite.
    pub fn ungroup(&mut self, group: FigureId) -> Result<Option<Vec<FigureId>>> {
        let Some(children) = self.node(group)?.children().map(<[FigureId]>::to_vec) else {
            return Ok(None);
        };
        if !self.is_attached(group) {
            return Err(FigureError::NotAttached { figure: group }.into());
        }
        let parent = self.parent(group);
        for &child in children.iter().rev() {
            self.remove(child)?;
        }
        let index = self.remove(group)?;
        for (offset, &child) in children.iter().enumerate() {
            self.add(parent, index + offset, child)?;
        }
        tracing::debug!("Ungrouped {} into {} figures", group, children.len());
        Ok(Some(children))
    }

    /// Undoes a grouping exactly: members return to their recorded indices
    /// in ascending order and the group is detached.
    pub fn dissolve_group(
        &mut self,
        group: FigureId,
        placement: &[(FigureId, usize)],
    ) -> Result<()> {
        let parent = self.parent(group);
        for &(member, _) in placement.iter().rev() {
            self.remove(member)?;
        }
        self.remove(group)?;
        let mut ordered = placement.to_vec();
        ordered.sort_by_key(|(_, index)| *index);
        for (member, index) in ordered {
            self.add(parent, index, member)?;
        }
        Ok(())
    }

    /// Deep copy with a fresh identity, detached.
    pub fn clone_figure(&mut self, id: FigureId) -> Result<FigureId> {
        let node = self.node(id)?;
        let attributes = node.attributes.clone();
        let (kind, children) = match &node.kind {
            FigureKind::Shape(geometry) => (FigureKind::Shape(geometry.clone()), Vec::new()),
            FigureKind::Composite { children, .. } => (FigureKind::composite(), children.clone()),
        };
        let copy = self.allocate_id();
        self.figures.insert(copy, FigureNode::new(kind, attributes));
        for child in children {
            let child_copy = self.clone_figure(child)?;
            if let Some(list) = self.node_mut(copy)?.children_mut() {
                list.push(child_copy);
            }
            self.node_mut(child_copy)?.slot = Slot::Child(copy);
        }
        tracing::debug!("Cloned {} as {}", id, copy);
        Ok(copy)
    }
}
