//! # figurekit Figures
//!
//! The editable model behind a structured vector drawing:
//! - [`attributes`]: typed attribute keys and per-figure attribute stores
//! - [`bezier`]: Bezier paths with node editing and hit testing
//! - [`model`]: leaf geometry (rectangle, ellipse, path, text)
//! - [`drawing`]: the figure tree, change notification and the transform engine
//! - [`commands`] and [`history`]: undoable edits and the edit log
//! - [`editor`]: a facade that records every mutation it performs
//!
//! ## Example
//!
//! ```
//! use figurekit_core::{rect, Transform};
//! use figurekit_figures::{DrawingEditor, RectangleShape};
//!
//! let mut editor = DrawingEditor::new();
//! let id = editor.add_figure(RectangleShape::new(0.0, 0.0, 10.0, 10.0)).unwrap();
//! editor.transform_figures(&[id], &Transform::translation(5.0, 5.0)).unwrap();
//! assert_eq!(editor.drawing().bounds(id).unwrap(), rect(5.0, 5.0, 10.0, 10.0));
//!
//! editor.undo().unwrap();
//! assert_eq!(editor.drawing().bounds(id).unwrap(), rect(0.0, 0.0, 10.0, 10.0));
//! ```

pub mod attributes;
pub mod bezier;
pub mod commands;
pub mod drawing;
pub mod editor;
pub mod history;
pub mod model;

pub use attributes::{
    keys, Attribute, AttributeChange, AttributeKey, AttributeRestoreData, AttributeStore,
    AttributeValue, Color, Gradient, GradientKind, GradientStop,
};
pub use bezier::{BezierPath, Node, NodeMask, Segment, SegmentKind};
pub use commands::{CompositeEdit, Direction, TransformEdit, UndoableEdit};
pub use drawing::{Drawing, FigureEvent, FigureListener, ListenerHandle, TransformRestoreData};
pub use editor::DrawingEditor;
pub use history::EditLog;
pub use model::{EllipseShape, FigureShape, Geometry, HitTest, RectangleShape, TextShape};
