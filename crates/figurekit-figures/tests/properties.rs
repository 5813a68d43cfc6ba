//! Property tests for edits that must be exactly reversible

use proptest::prelude::*;

use figurekit_core::geometry::approx_eq_rect;
use figurekit_core::{rect, Transform};
use figurekit_figures::keys::{OPACITY, STROKE_WIDTH};
use figurekit_figures::{AttributeStore, DrawingEditor, RectangleShape};

fn coordinate() -> impl Strategy<Value = f64> {
    (-1000i32..1000).prop_map(|v| v as f64 / 4.0)
}

proptest! {
    #[test]
    fn prop_snapshot_restore_round_trips(widths in prop::collection::vec(0.0f64..50.0, 1..8)) {
        let mut store = AttributeStore::new();
        store.set(&OPACITY, 0.5);
        let snapshot = store.restore_data();
        for w in &widths {
            store.set(&STROKE_WIDTH, *w);
        }
        store.restore_from(&snapshot);
        prop_assert_eq!(store.restore_data(), snapshot);
    }

    #[test]
    fn prop_translation_undo_restores_bounds(
        x in coordinate(),
        y in coordinate(),
        dx in coordinate(),
        dy in coordinate(),
    ) {
        let mut editor = DrawingEditor::new();
        let id = editor.add_figure(RectangleShape::new(x, y, 10.0, 10.0)).expect("add");
        editor.transform_figures(&[id], &Transform::translation(dx, dy)).expect("move");
        editor.undo().expect("undo");
        let bounds = editor.drawing().bounds(id).expect("bounds");
        prop_assert!(approx_eq_rect(&bounds, &rect(x, y, 10.0, 10.0), 1e-9));
    }

    #[test]
    fn prop_coalesced_steps_match_single_move(
        steps in prop::collection::vec((coordinate(), coordinate()), 1..6),
    ) {
        let mut stepped = DrawingEditor::new();
        let a = stepped.add_figure(RectangleShape::new(0.0, 0.0, 10.0, 10.0)).expect("add");
        stepped.seal();
        let (mut tx, mut ty) = (0.0f64, 0.0f64);
        for (dx, dy) in &steps {
            stepped.transform_figures(&[a], &Transform::translation(*dx, *dy)).expect("step");
            tx += *dx;
            ty += *dy;
        }
        prop_assert_eq!(stepped.log().len(), 2);

        let expected = rect(tx, ty, 10.0, 10.0);
        let bounds = stepped.drawing().bounds(a).expect("bounds");
        prop_assert!(approx_eq_rect(&bounds, &expected, 1e-6));

        stepped.undo().expect("undo");
        let bounds = stepped.drawing().bounds(a).expect("bounds");
        prop_assert!(approx_eq_rect(&bounds, &rect(0.0, 0.0, 10.0, 10.0), 1e-6));
    }
}
