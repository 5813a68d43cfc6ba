//! Error taxonomy tests

use figurekit_core::{EditError, Error, FigureError, FigureId, PathError};

#[test]
fn test_figure_error_converts_and_formats() {
    let err: Error = FigureError::Cycle {
        figure: FigureId::new(3),
        parent: FigureId::new(7),
    }
    .into();
    assert!(err.is_figure_error());
    assert!(!err.is_edit_error());
    assert_eq!(err.to_string(), "Adding #3 to #7 would create a cycle");
}

#[test]
fn test_composite_transform_message() {
    let err: Error = FigureError::CompositeTransform {
        figure: FigureId::new(5),
    }
    .into();
    assert!(err.is_figure_error());
    assert_eq!(
        err.to_string(),
        "Composite #5 cannot carry a transform attribute"
    );
}

#[test]
fn test_path_error_message() {
    let err: Error = PathError::NodeIndexOutOfBounds { index: 4, len: 2 }.into();
    assert!(err.is_path_error());
    assert_eq!(
        err.to_string(),
        "Node index 4 out of bounds for path with 2 nodes"
    );
}

#[test]
fn test_edit_error_message() {
    let err: Error = EditError::CompositeOpen {
        name: "Drag".to_string(),
    }
    .into();
    assert!(err.is_edit_error());
    assert_eq!(err.to_string(), "Composite edit 'Drag' is still open");
}

#[test]
fn test_other_error() {
    let err = Error::other("bad input");
    assert_eq!(err.to_string(), "bad input");
}

#[test]
fn test_figure_ids_order_by_creation() {
    let a = FigureId::new(1);
    let b = FigureId::new(2);
    assert!(a < b);
    assert_eq!(b.raw(), 2);
    assert_eq!(format!("{}", b), "#2");
}
