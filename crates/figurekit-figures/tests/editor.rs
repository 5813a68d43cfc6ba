//! Recorded editing and undo/redo through the editor facade

use figurekit_core::{point, rect, Angle, EditError, Error, FigureId, Transform};
use figurekit_figures::keys::{FILL_COLOR, STROKE_WIDTH, TRANSFORM};
use figurekit_figures::{BezierPath, Color, DrawingEditor, Node, RectangleShape, UndoableEdit};
use figurekit_settings::EditorSettings;

fn square(editor: &mut DrawingEditor, x: f64) -> FigureId {
    editor
        .add_figure(RectangleShape::new(x, 0.0, 10.0, 10.0))
        .expect("add")
}

fn fill(editor: &DrawingEditor, id: FigureId) -> Option<Color> {
    editor.drawing().attribute(id, &FILL_COLOR).expect("fill")
}

#[test]
fn test_edit_sequence_undoes_and_redoes_in_order() {
    let mut editor = DrawingEditor::new();
    let id = square(&mut editor, 0.0);

    editor.set_attribute(id, &FILL_COLOR, Some(Color::RED)).expect("red");
    let red = editor.drawing().attributes_restore_data(id).expect("snapshot");
    editor.seal();
    editor.set_attribute(id, &FILL_COLOR, Some(Color::BLUE)).expect("blue");
    editor.restore_attributes(id, &red, "Paste Style").expect("restore");
    assert_eq!(fill(&editor, id), Some(Color::RED));

    editor
        .transform_figures(&[id], &Transform::translation(5.0, 5.0))
        .expect("move");
    assert_eq!(editor.drawing().bounds(id).expect("bounds"), rect(5.0, 5.0, 10.0, 10.0));
    assert_eq!(editor.log().len(), 5);
    assert_eq!(editor.undo_presentation_name().as_deref(), Some("Undo Transform"));

    editor.undo().expect("undo move");
    assert_eq!(editor.drawing().bounds(id).expect("bounds"), rect(0.0, 0.0, 10.0, 10.0));
    editor.undo().expect("undo paste");
    assert_eq!(fill(&editor, id), Some(Color::BLUE));
    editor.undo().expect("undo blue");
    assert_eq!(fill(&editor, id), Some(Color::RED));
    editor.undo().expect("undo red");
    assert_eq!(fill(&editor, id), Some(Color::WHITE));
    editor.undo().expect("undo add");
    assert!(editor.drawing().top_level().is_empty());

    assert!(!editor.can_undo());
    assert!(matches!(editor.undo(), Err(Error::Edit(EditError::NothingToUndo))));

    for _ in 0..5 {
        editor.redo().expect("redo");
    }
    assert!(!editor.can_redo());
    assert_eq!(editor.drawing().top_level(), &[id]);
    assert_eq!(fill(&editor, id), Some(Color::RED));
    assert_eq!(editor.drawing().bounds(id).expect("bounds"), rect(5.0, 5.0, 10.0, 10.0));
}

#[test]
fn test_drag_translations_coalesce() {
    let mut editor = DrawingEditor::new();
    let id = square(&mut editor, 0.0);
    editor.seal();

    for _ in 0..3 {
        editor
            .transform_figures(&[id], &Transform::translation(1.0, 0.0))
            .expect("step");
    }
    assert_eq!(editor.log().len(), 2);
    match &editor.log().edits()[1] {
        UndoableEdit::Transform(edit) => {
            assert_eq!(*edit.transform(), Transform::translation(3.0, 0.0));
        }
        other => panic!("unexpected edit {:?}", other),
    }

    editor.undo().expect("undo drag");
    assert_eq!(editor.drawing().bounds(id).expect("bounds"), rect(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_seal_separates_gestures() {
    let mut editor = DrawingEditor::new();
    let id = square(&mut editor, 0.0);

    editor.set_attribute(id, &STROKE_WIDTH, 2.0).expect("first");
    editor.set_attribute(id, &STROKE_WIDTH, 3.0).expect("merged");
    assert_eq!(editor.log().len(), 2);

    editor.seal();
    editor.set_attribute(id, &STROKE_WIDTH, 4.0).expect("second");
    assert_eq!(editor.log().len(), 3);

    editor.undo().expect("undo second");
    assert_eq!(editor.drawing().attribute(id, &STROKE_WIDTH).expect("width"), 3.0);
    editor.undo().expect("undo first");
    assert_eq!(editor.drawing().attribute(id, &STROKE_WIDTH).expect("width"), 1.0);
}

#[test]
fn test_unchanged_attribute_records_nothing() {
    let mut editor = DrawingEditor::new();
    let id = square(&mut editor, 0.0);
    editor.set_attribute(id, &STROKE_WIDTH, 2.0).expect("set");
    editor.seal();
    editor.set_attribute(id, &STROKE_WIDTH, 2.0).expect("same");
    assert_eq!(editor.log().len(), 2);
}

#[test]
fn test_gesture_is_one_undo_step() {
    let mut editor = DrawingEditor::new();
    let id = square(&mut editor, 0.0);

    editor.begin_gesture("Style");
    editor.set_attribute(id, &FILL_COLOR, Some(Color::GREEN)).expect("fill");
    editor.set_attribute(id, &STROKE_WIDTH, 5.0).expect("stroke");
    assert!(matches!(
        editor.undo(),
        Err(Error::Edit(EditError::CompositeOpen { .. }))
    ));
    assert!(editor.end_gesture().expect("end"));

    assert_eq!(editor.log().len(), 2);
    assert_eq!(editor.undo_presentation_name().as_deref(), Some("Undo Style"));
    editor.undo().expect("undo style");
    assert_eq!(fill(&editor, id), Some(Color::WHITE));
    assert_eq!(editor.drawing().attribute(id, &STROKE_WIDTH).expect("width"), 1.0);
    assert_eq!(editor.redo_presentation_name().as_deref(), Some("Redo Style"));
}

#[test]
fn test_empty_gesture_is_dropped() {
    let mut editor = DrawingEditor::new();
    square(&mut editor, 0.0);
    editor.begin_gesture("Nothing");
    assert!(!editor.end_gesture().expect("end"));
    assert_eq!(editor.log().len(), 1);
    assert!(matches!(
        editor.end_gesture(),
        Err(Error::Edit(EditError::NoOpenComposite))
    ));
}

#[test]
fn test_cancelled_gesture_reverts() {
    let mut editor = DrawingEditor::new();
    let id = square(&mut editor, 0.0);

    editor.begin_gesture("Drag");
    editor
        .transform_figures(&[id], &Transform::translation(4.0, 0.0))
        .expect("drag");
    editor.cancel_gesture().expect("cancel");

    assert_eq!(editor.drawing().bounds(id).expect("bounds"), rect(0.0, 0.0, 10.0, 10.0));
    assert_eq!(editor.log().len(), 1);
}

#[test]
fn test_undo_limit_trims_oldest() {
    let mut settings = EditorSettings::default();
    settings.history.undo_limit = 3;
    let mut editor = DrawingEditor::with_settings(settings);

    let ids: Vec<FigureId> = (0..5).map(|i| square(&mut editor, i as f64 * 20.0)).collect();
    assert_eq!(editor.log().len(), 3);
    for _ in 0..3 {
        editor.undo().expect("undo");
    }
    assert!(!editor.can_undo());
    assert_eq!(editor.drawing().top_level(), &ids[..2]);
}

#[test]
fn test_new_edit_drops_redo_tail() {
    let mut editor = DrawingEditor::new();
    square(&mut editor, 0.0);
    square(&mut editor, 20.0);
    editor.undo().expect("undo");
    assert!(editor.can_redo());

    square(&mut editor, 40.0);
    assert!(!editor.can_redo());
    assert_eq!(editor.log().len(), 2);
}

#[test]
fn test_modified_flag_tracks_saved_position() {
    let mut editor = DrawingEditor::new();
    assert!(!editor.is_modified());

    square(&mut editor, 0.0);
    assert!(editor.is_modified());
    editor.mark_clean();
    assert!(!editor.is_modified());

    editor.undo().expect("undo");
    assert!(editor.is_modified());
    editor.redo().expect("redo");
    assert!(!editor.is_modified());
}

#[test]
fn test_delete_restores_positions_on_undo() {
    let mut editor = DrawingEditor::new();
    let a = square(&mut editor, 0.0);
    let b = square(&mut editor, 20.0);
    let c = square(&mut editor, 40.0);

    editor.delete_figures(&[a, c]).expect("delete");
    assert_eq!(editor.drawing().top_level(), &[b]);
    assert_eq!(editor.undo_presentation_name().as_deref(), Some("Undo Delete"));

    editor.undo().expect("undo delete");
    assert_eq!(editor.drawing().top_level(), &[a, b, c]);
    editor.redo().expect("redo delete");
    assert_eq!(editor.drawing().top_level(), &[b]);
}

#[test]
fn test_failed_delete_rolls_back() {
    let mut editor = DrawingEditor::new();
    let a = square(&mut editor, 0.0);

    assert!(editor.delete_figures(&[a, a]).is_err());
    assert_eq!(editor.drawing().top_level(), &[a]);
    assert_eq!(editor.log().len(), 1);
}

#[test]
fn test_group_undo_restores_exact_indices() {
    let mut editor = DrawingEditor::new();
    let a = square(&mut editor, 0.0);
    let b = square(&mut editor, 20.0);
    let c = square(&mut editor, 40.0);

    let group = editor.group(&[a, c]).expect("group").expect("group id");
    assert_eq!(editor.drawing().top_level(), &[group, b]);

    editor.undo().expect("undo group");
    assert_eq!(editor.drawing().top_level(), &[a, b, c]);
    assert!(!editor.drawing().is_attached(group));

    editor.redo().expect("redo group");
    assert_eq!(editor.drawing().top_level(), &[group, b]);
    assert_eq!(editor.drawing().children(group).expect("children"), &[a, c]);
}

#[test]
fn test_ungroup_undo_regroups() {
    let mut editor = DrawingEditor::new();
    let a = square(&mut editor, 0.0);
    let b = square(&mut editor, 20.0);
    let group = editor.group(&[a, b]).expect("group").expect("group id");

    let members = editor.ungroup(group).expect("ungroup").expect("members");
    assert_eq!(members, vec![a, b]);
    assert_eq!(editor.drawing().top_level(), &[a, b]);

    editor.undo().expect("undo ungroup");
    assert_eq!(editor.drawing().top_level(), &[group]);
    assert_eq!(editor.drawing().children(group).expect("children"), &[a, b]);
}

#[test]
fn test_restack_undo() {
    let mut editor = DrawingEditor::new();
    let a = square(&mut editor, 0.0);
    let b = square(&mut editor, 20.0);

    editor.bring_to_front(&[a]).expect("front");
    assert_eq!(editor.drawing().top_level(), &[b, a]);
    assert_eq!(editor.undo_presentation_name().as_deref(), Some("Undo Bring to Front"));

    // Already at the front; nothing to record
    editor.bring_to_front(&[a]).expect("front again");
    assert_eq!(editor.log().len(), 3);

    editor.undo().expect("undo");
    assert_eq!(editor.drawing().top_level(), &[a, b]);
    editor.send_to_back(&[b]).expect("back");
    assert_eq!(editor.drawing().top_level(), &[b, a]);
}

#[test]
fn test_rotation_undo_is_exact() {
    let mut editor = DrawingEditor::new();
    let id = square(&mut editor, 0.0);
    let rotate = Transform::rotation(Angle::degrees(30.0));

    editor.transform_figures(&[id], &rotate).expect("rotate");
    assert_eq!(editor.drawing().attribute(id, &TRANSFORM).expect("t"), Some(rotate));
    editor.undo().expect("undo");
    assert_eq!(editor.drawing().attribute(id, &TRANSFORM).expect("t"), None);
    assert!(!editor.drawing().attributes(id).expect("attrs").contains("transform"));
}

#[test]
fn test_flatten_is_undoable() {
    let mut editor = DrawingEditor::new();
    let id = square(&mut editor, 0.0);
    editor
        .transform_figures(&[id], &Transform::scale(2.0, 2.0))
        .expect("scale");

    assert!(editor.flatten_transform(id).expect("flatten"));
    assert_eq!(editor.drawing().bounds(id).expect("bounds"), rect(0.0, 0.0, 20.0, 20.0));
    assert_eq!(
        editor.undo_presentation_name().as_deref(),
        Some("Undo Flatten Transform")
    );

    editor.undo().expect("undo flatten");
    assert_eq!(
        editor.drawing().attribute(id, &TRANSFORM).expect("t"),
        Some(Transform::scale(2.0, 2.0))
    );

    let before = editor.log().len();
    editor.undo().expect("undo scale");
    assert!(editor.flatten_transform(id).expect("nothing to flatten"));
    assert_eq!(editor.log().len(), before);
}

#[test]
fn test_path_edits_are_undoable() {
    let mut editor = DrawingEditor::new();
    let line = BezierPath::from_points(&[point(0.0, 0.0), point(10.0, 0.0)], false);
    let id = editor.add_figure(line.clone()).expect("add");

    let index = editor.split_segment(id, point(5.0, 1.0)).expect("split");
    assert_eq!(index, Some(1));
    assert_eq!(editor.drawing().path(id).expect("path").len(), 3);

    assert_eq!(editor.split_segment(id, point(5.0, 9.0)).expect("miss"), None);
    assert_eq!(editor.log().len(), 2);

    editor.undo().expect("undo split");
    assert_eq!(editor.drawing().path(id).expect("path"), &line);

    editor
        .insert_node(id, 1, Node::new(point(5.0, 5.0)))
        .expect("insert");
    let removed = editor.remove_node(id, 1).expect("remove");
    assert_eq!(removed.point, point(5.0, 5.0));
    editor.undo().expect("undo remove");
    assert_eq!(editor.drawing().path(id).expect("path").len(), 3);
    assert_eq!(editor.undo_presentation_name().as_deref(), Some("Undo Insert Node"));
}

#[test]
fn test_join_in_figure_space() {
    let mut editor = DrawingEditor::new();
    let path = BezierPath::from_points(
        &[point(0.0, 0.0), point(10.0, 0.0), point(20.0, 0.0)],
        false,
    );
    let id = editor.add_figure(path).expect("add");
    editor
        .transform_figures(&[id], &Transform::scale(2.0, 1.0))
        .expect("scale");

    // The middle node sits at (20, 0) in drawing coordinates
    assert_eq!(editor.join_segments(id, point(20.0, 0.0)).expect("join"), Some(1));
    assert_eq!(editor.drawing().path(id).expect("path").len(), 2);
    assert_eq!(editor.undo_presentation_name().as_deref(), Some("Undo Join Segments"));
}

#[test]
fn test_figure_at_uses_configured_tolerance() {
    let mut editor = DrawingEditor::new();
    let id = square(&mut editor, 0.0);
    assert_eq!(editor.figure_at(point(11.5, 5.0)), Some(id));
    assert_eq!(editor.figure_at(point(14.0, 5.0)), None);
}
