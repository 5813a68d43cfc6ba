//! Error handling for figurekit
//!
//! Errors fall into three groups:
//! - Figure errors (structural invariants of the figure tree)
//! - Path errors (Bezier node editing)
//! - Edit errors (undoable edit construction and the edit log)
//!
//! Conditions that are merely "nothing there" (a hit test that misses, a
//! split that finds no segment) are reported through `Option` return values
//! and never appear here.

use thiserror::Error;

use crate::id::FigureId;

/// Structural error in the figure tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FigureError {
    /// No figure with this id exists in the drawing
    #[error("Unknown figure {id}")]
    UnknownFigure {
        /// The id that was looked up.
        id: FigureId,
    },

    /// The figure already belongs to a composite
    #[error("Figure {figure} is already attached to {parent}")]
    AlreadyAttached {
        /// The figure being inserted.
        figure: FigureId,
        /// The composite currently holding it.
        parent: String,
    },

    /// The figure is not part of the tree
    #[error("Figure {figure} is not attached to any composite")]
    NotAttached {
        /// The detached figure.
        figure: FigureId,
    },

    /// A composite was required
    #[error("Figure {figure} is not a composite")]
    NotComposite {
        /// The figure that has no children list.
        figure: FigureId,
    },

    /// Insertion index past the end of the child list
    #[error("Index {index} out of bounds for {len} children")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The current child count.
        len: usize,
    },

    /// Inserting the figure would make it its own ancestor
    #[error("Adding {figure} to {parent} would create a cycle")]
    Cycle {
        /// The figure being inserted.
        figure: FigureId,
        /// The composite that is a descendant of `figure`.
        parent: FigureId,
    },

    /// A multi-figure operation was given figures with different parents
    #[error("Figures {first} and {other} do not share a parent")]
    MixedParents {
        /// First figure of the selection.
        first: FigureId,
        /// A figure whose parent differs from `first`'s.
        other: FigureId,
    },

    /// A reorder did not name exactly the current children
    #[error("New order for {parent} is not a permutation of its children")]
    NotAPermutation {
        /// The holder being reordered.
        parent: String,
    },

    /// Composites pass transforms on to their children and hold none
    #[error("Composite {figure} cannot carry a transform attribute")]
    CompositeTransform {
        /// The composite that was given the attribute.
        figure: FigureId,
    },

    /// `changed()` called without a matching `will_change()`
    #[error("Unbalanced change notification on {figure}")]
    UnbalancedChange {
        /// The figure whose change depth would go negative.
        figure: FigureId,
    },
}

/// Error while editing Bezier path nodes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Node index outside the path
    #[error("Node index {index} out of bounds for path with {len} nodes")]
    NodeIndexOutOfBounds {
        /// The requested node index.
        index: usize,
        /// The node count of the path.
        len: usize,
    },

    /// The figure has no Bezier geometry
    #[error("Figure {figure} is not a path figure")]
    NotAPath {
        /// The figure that was asked for path editing.
        figure: FigureId,
    },

    /// Removing the node would leave a degenerate path
    #[error("Path needs at least {min} nodes")]
    TooFewNodes {
        /// The minimum node count for this path.
        min: usize,
    },
}

/// Error while building or replaying undoable edits.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// A transform edit needs an inverse to undo
    #[error("Transform is not invertible")]
    NonInvertibleTransform,

    /// The log has no edit before its position
    #[error("Nothing to undo")]
    NothingToUndo,

    /// The log has no edit after its position
    #[error("Nothing to redo")]
    NothingToRedo,

    /// `end_composite` without a matching `begin_composite`
    #[error("No composite edit is open")]
    NoOpenComposite,

    /// Undo/redo requested while a gesture is still recording
    #[error("Composite edit '{name}' is still open")]
    CompositeOpen {
        /// Presentation name of the open composite.
        name: String,
    },
}

/// Main error type for figurekit
#[derive(Error, Debug)]
pub enum Error {
    /// Figure tree error
    #[error(transparent)]
    Figure(#[from] FigureError),

    /// Path editing error
    #[error(transparent)]
    Path(#[from] PathError),

    /// Edit log error
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    pub fn is_figure_error(&self) -> bool {
        matches!(self, Error::Figure(_))
    }

    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Path(_))
    }

    pub fn is_edit_error(&self) -> bool {
        matches!(self, Error::Edit(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
