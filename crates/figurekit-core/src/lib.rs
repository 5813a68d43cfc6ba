//! # figurekit Core
//!
//! Core types shared by every figurekit crate:
//! - [`FigureId`]: identity of one figure inside a drawing
//! - [`geometry`]: `f64` point/rect/transform aliases over lyon's euclid types
//! - [`error`]: the error taxonomy for structural, path and edit failures

pub mod error;
pub mod geometry;
pub mod id;

pub use error::{EditError, Error, FigureError, PathError, Result};
pub use geometry::{point, rect, vector, Angle, Point, Rect, Transform, Vector, EPSILON};
pub use id::FigureId;
