//! Undoable edits.
//!
//! Each edit is a plain record of the state it needs to replay a mutation
//! in either direction. Edits are built after the drawing has already been
//! changed and never hold references into it.

use figurekit_core::geometry::{self, Transform};
use figurekit_core::{EditError, FigureId, Result};

use crate::attributes::{
    Attribute, AttributeChange, AttributeKey, AttributeRestoreData, AttributeValue,
};
use crate::bezier::BezierPath;
use crate::drawing::{Drawing, TransformRestoreData};

/// Replay direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Undo,
    Redo,
}

#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum UndoableEdit {
    Transform(TransformEdit),
    TransformRestore(TransformRestoreEdit),
    Attribute(AttributeEdit),
    AttributesRestore(AttributesRestoreEdit),
    Composite(CompositeEdit),
    Group(GroupEdit),
    Ungroup(UngroupEdit),
    AddFigure(AddFigureEdit),
    RemoveFigure(RemoveFigureEdit),
    Path(PathEdit),
    Reorder(ReorderEdit),
}

/// Lossless transform of a figure set; undo applies the inverse.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformEdit {
    figures: Vec<FigureId>,
    transform: Transform,
    inverse: Transform,
}

impl TransformEdit {
    pub fn new(
        figures: Vec<FigureId>,
        transform: Transform,
    ) -> std::result::Result<Self, EditError> {
        Self::with_epsilon(figures, transform, geometry::EPSILON)
    }

    /// Rejects transforms whose determinant is within `epsilon` of zero.
    pub fn with_epsilon(
        figures: Vec<FigureId>,
        transform: Transform,
        epsilon: f64,
    ) -> std::result::Result<Self, EditError> {
        let det = transform.determinant();
        if !det.is_finite() || det.abs() <= epsilon {
            return Err(EditError::NonInvertibleTransform);
        }
        let inverse = transform.inverse().ok_or(EditError::NonInvertibleTransform)?;
        Ok(Self {
            figures,
            transform,
            inverse,
        })
    }

    pub fn figures(&self) -> &[FigureId] {
        &self.figures
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

/// Snapshot swap for transforms that are not exactly reversible.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformRestoreEdit {
    pub name: String,
    pub before: Vec<TransformRestoreData>,
    pub after: Vec<TransformRestoreData>,
}

/// One attribute entry on one figure.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeEdit {
    figure: FigureId,
    name: &'static str,
    presentation_name: &'static str,
    old: Option<AttributeValue>,
    new: Option<AttributeValue>,
}

impl AttributeEdit {
    pub fn new<T: Attribute>(
        figure: FigureId,
        key: &AttributeKey<T>,
        change: AttributeChange,
    ) -> Self {
        Self {
            figure,
            name: key.name(),
            presentation_name: key.presentation_name(),
            old: change.old,
            new: change.new,
        }
    }

    pub fn figure(&self) -> FigureId {
        self.figure
    }

    pub fn key_name(&self) -> &'static str {
        self.name
    }
}

/// Whole attribute map swap on one figure.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributesRestoreEdit {
    pub name: String,
    pub figure: FigureId,
    pub before: AttributeRestoreData,
    pub after: AttributeRestoreData,
}

/// Several edits recorded as one user gesture.
#[derive(Debug, Clone)]
pub struct CompositeEdit {
    pub name: String,
    pub edits: Vec<UndoableEdit>,
}

impl CompositeEdit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            edits: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

/// Grouping; `members` holds each member's index before grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupEdit {
    pub group: FigureId,
    pub members: Vec<(FigureId, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UngroupEdit {
    pub group: FigureId,
    pub members: Vec<FigureId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddFigureEdit {
    pub parent: Option<FigureId>,
    pub index: usize,
    pub figure: FigureId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveFigureEdit {
    pub parent: Option<FigureId>,
    pub index: usize,
    pub figure: FigureId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathEdit {
    pub name: String,
    pub figure: FigureId,
    pub before: BezierPath,
    pub after: BezierPath,
}

/// Child order change of one holder.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderEdit {
    pub name: String,
    pub parent: Option<FigureId>,
    pub before: Vec<FigureId>,
    pub after: Vec<FigureId>,
}

impl UndoableEdit {
    pub fn apply(&self, drawing: &mut Drawing, direction: Direction) -> Result<()> {
        let redo = direction == Direction::Redo;
        match self {
            UndoableEdit::Transform(edit) => {
                let t = if redo { &edit.transform } else { &edit.inverse };
                drawing.transform_figures(&edit.figures, t)
            }
            UndoableEdit::TransformRestore(edit) => {
                let data = if redo { &edit.after } else { &edit.before };
                for d in data {
                    drawing.restore_transform_to(d)?;
                }
                Ok(())
            }
            UndoableEdit::Attribute(edit) => {
                let value = if redo { &edit.new } else { &edit.old };
                drawing.set_attribute_value(edit.figure, edit.name, value.clone())?;
                Ok(())
            }
            UndoableEdit::AttributesRestore(edit) => {
                let data = if redo { &edit.after } else { &edit.before };
                drawing.restore_attributes_to(edit.figure, data)?;
                Ok(())
            }
            UndoableEdit::Composite(edit) => {
                if redo {
                    for e in &edit.edits {
                        e.apply(drawing, direction)?;
                    }
                } else {
                    for e in edit.edits.iter().rev() {
                        e.apply(drawing, direction)?;
                    }
                }
                Ok(())
            }
            UndoableEdit::Group(edit) => {
                if redo {
                    let ids: Vec<FigureId> = edit.members.iter().map(|(id, _)| *id).collect();
                    drawing.group_into(&ids, edit.group)?;
                    Ok(())
                } else {
                    drawing.dissolve_group(edit.group, &edit.members)
                }
            }
            UndoableEdit::Ungroup(edit) => {
                if redo {
                    drawing.ungroup(edit.group)?;
                } else {
                    drawing.group_into(&edit.members, edit.group)?;
                }
                Ok(())
            }
            UndoableEdit::AddFigure(edit) => {
                if redo {
                    drawing.add(edit.parent, edit.index, edit.figure)
                } else {
                    drawing.remove(edit.figure).map(|_| ())
                }
            }
            UndoableEdit::RemoveFigure(edit) => {
                if redo {
                    drawing.remove(edit.figure).map(|_| ())
                } else {
                    drawing.add(edit.parent, edit.index, edit.figure)
                }
            }
            UndoableEdit::Path(edit) => {
                let path = if redo { &edit.after } else { &edit.before };
                drawing.set_path(edit.figure, path.clone())?;
                Ok(())
            }
            UndoableEdit::Reorder(edit) => {
                let order = if redo { &edit.after } else { &edit.before };
                drawing.reorder(edit.parent, order)
            }
        }
    }

    pub fn undo(&self, drawing: &mut Drawing) -> Result<()> {
        tracing::debug!("Undo {}", self.presentation_name());
        self.apply(drawing, Direction::Undo)
    }

    pub fn redo(&self, drawing: &mut Drawing) -> Result<()> {
        tracing::debug!("Redo {}", self.presentation_name());
        self.apply(drawing, Direction::Redo)
    }

    pub fn presentation_name(&self) -> &str {
        match self {
            UndoableEdit::Transform(_) => "Transform",
            UndoableEdit::TransformRestore(edit) => &edit.name,
            UndoableEdit::Attribute(edit) => edit.presentation_name,
            UndoableEdit::AttributesRestore(edit) => &edit.name,
            UndoableEdit::Composite(edit) => &edit.name,
            UndoableEdit::Group(_) => "Group",
            UndoableEdit::Ungroup(_) => "Ungroup",
            UndoableEdit::AddFigure(_) => "Add Figure",
            UndoableEdit::RemoveFigure(_) => "Delete",
            UndoableEdit::Path(edit) => &edit.name,
            UndoableEdit::Reorder(edit) => &edit.name,
        }
    }

    /// Tries to absorb `other`, the edit recorded right after this one.
    ///
    /// Transforms on the identical figure list compose; attribute edits on
    /// the same figure and key keep the first old value and the last new
    /// value. Nothing else coalesces.
    pub fn add_edit(&mut self, other: &UndoableEdit) -> bool {
        match (self, other) {
            (UndoableEdit::Transform(a), UndoableEdit::Transform(b)) if a.figures == b.figures => {
                a.transform = a.transform.then(&b.transform);
                a.inverse = b.inverse.then(&a.inverse);
                true
            }
            (UndoableEdit::Attribute(a), UndoableEdit::Attribute(b))
                if a.figure == b.figure && a.name == b.name =>
            {
                a.new = b.new.clone();
                true
            }
            _ => false,
        }
    }
}

impl From<TransformEdit> for UndoableEdit {
    fn from(edit: TransformEdit) -> Self {
        UndoableEdit::Transform(edit)
    }
}

impl From<TransformRestoreEdit> for UndoableEdit {
    fn from(edit: TransformRestoreEdit) -> Self {
        UndoableEdit::TransformRestore(edit)
    }
}

impl From<AttributeEdit> for UndoableEdit {
    fn from(edit: AttributeEdit) -> Self {
        UndoableEdit::Attribute(edit)
    }
}

impl From<AttributesRestoreEdit> for UndoableEdit {
    fn from(edit: AttributesRestoreEdit) -> Self {
        UndoableEdit::AttributesRestore(edit)
    }
}

impl From<CompositeEdit> for UndoableEdit {
    fn from(edit: CompositeEdit) -> Self {
        UndoableEdit::Composite(edit)
    }
}

impl From<GroupEdit> for UndoableEdit {
    fn from(edit: GroupEdit) -> Self {
        UndoableEdit::Group(edit)
    }
}

impl From<UngroupEdit> for UndoableEdit {
    fn from(edit: UngroupEdit) -> Self {
        UndoableEdit::Ungroup(edit)
    }
}

impl From<AddFigureEdit> for UndoableEdit {
    fn from(edit: AddFigureEdit) -> Self {
        UndoableEdit::AddFigure(edit)
    }
}

impl From<RemoveFigureEdit> for UndoableEdit {
    fn from(edit: RemoveFigureEdit) -> Self {
        UndoableEdit::RemoveFigure(edit)
    }
}

impl From<PathEdit> for UndoableEdit {
    fn from(edit: PathEdit) -> Self {
        UndoableEdit::Path(edit)
    }
}

impl From<ReorderEdit> for UndoableEdit {
    fn from(edit: ReorderEdit) -> Self {
        UndoableEdit::Reorder(edit)
    }
}
