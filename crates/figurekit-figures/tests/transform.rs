//! Transform engine tests

use std::cell::RefCell;
use std::rc::Rc;

use figurekit_core::geometry::approx_eq_rect;
use figurekit_core::{point, rect, Angle, FigureId, Transform};
use figurekit_figures::keys::{FILL_GRADIENT, FONT_SIZE, TEXT, TRANSFORM};
use figurekit_figures::{
    AttributeValue, Color, Drawing, EllipseShape, FigureEvent, Geometry, Gradient, GradientStop,
    RectangleShape, TextShape,
};

fn add(drawing: &mut Drawing, geometry: impl Into<Geometry>) -> FigureId {
    let id = drawing.create(geometry);
    drawing.add_last(None, id).expect("add");
    id
}

fn quarter_turn() -> Transform {
    Transform::rotation(Angle::degrees(90.0))
}

#[test]
fn test_translation_moves_geometry_directly() {
    let mut drawing = Drawing::new();
    let id = add(&mut drawing, RectangleShape::new(0.0, 0.0, 10.0, 10.0));

    drawing
        .transform(id, &Transform::translation(5.0, 5.0))
        .expect("translate");
    assert_eq!(drawing.attribute(id, &TRANSFORM).expect("attr"), None);
    assert_eq!(
        drawing.geometry(id),
        Some(&Geometry::Rectangle(RectangleShape::new(5.0, 5.0, 10.0, 10.0)))
    );
}

#[test]
fn test_rotation_accumulates_in_attribute() {
    let mut drawing = Drawing::new();
    let id = add(&mut drawing, RectangleShape::new(0.0, 0.0, 10.0, 10.0));

    drawing.transform(id, &quarter_turn()).expect("rotate");
    assert_eq!(drawing.attribute(id, &TRANSFORM).expect("attr"), Some(quarter_turn()));
    assert_eq!(
        drawing.geometry(id),
        Some(&Geometry::Rectangle(RectangleShape::new(0.0, 0.0, 10.0, 10.0)))
    );
    let bounds = drawing.bounds(id).expect("bounds");
    assert!(approx_eq_rect(&bounds, &rect(-10.0, 0.0, 10.0, 10.0), 1e-9));

    // Once a transform is present, translations compose into it as well
    let shift = Transform::translation(3.0, 0.0);
    drawing.transform(id, &shift).expect("translate");
    assert_eq!(
        drawing.attribute(id, &TRANSFORM).expect("attr"),
        Some(quarter_turn().then(&shift))
    );
}

#[test]
fn test_flatten_axis_aligned_keeps_rectangle() {
    let mut drawing = Drawing::new();
    let id = add(&mut drawing, RectangleShape::new(1.0, 1.0, 10.0, 10.0));

    drawing.transform(id, &Transform::scale(2.0, 3.0)).expect("scale");
    assert!(drawing.flatten_transform(id).expect("flatten"));
    assert_eq!(drawing.attribute(id, &TRANSFORM).expect("attr"), None);
    assert_eq!(
        drawing.geometry(id),
        Some(&Geometry::Rectangle(RectangleShape::new(2.0, 3.0, 20.0, 30.0)))
    );
}

#[test]
fn test_flatten_rotation_converts_to_path() {
    let mut drawing = Drawing::new();
    let id = add(&mut drawing, EllipseShape::new(0.0, 0.0, 20.0, 10.0));
    drawing.transform(id, &quarter_turn()).expect("rotate");

    assert!(drawing.flatten_transform(id).expect("flatten"));
    assert_eq!(drawing.attribute(id, &TRANSFORM).expect("attr"), None);
    assert!(drawing.path(id).is_ok());

    let flattened = drawing.bounds(id).expect("bounds");
    assert!(approx_eq_rect(&flattened, &rect(-10.0, 0.0, 10.0, 20.0), 1e-6));
}

#[test]
fn test_text_absorbs_uniform_scale() {
    let mut drawing = Drawing::new();
    let id = add(&mut drawing, TextShape::new(10.0, 10.0));
    drawing.set_attribute(id, &TEXT, "Hi".to_string()).expect("text");

    drawing.transform(id, &Transform::scale(2.0, 2.0)).expect("scale");
    assert!(drawing.flatten_transform(id).expect("flatten"));
    assert_eq!(drawing.attribute(id, &FONT_SIZE).expect("size"), 24.0);
    assert_eq!(
        drawing.geometry(id),
        Some(&Geometry::Text(TextShape::new(20.0, 20.0)))
    );
}

#[test]
fn test_flatten_notifies_font_size_change() {
    let mut drawing = Drawing::new();
    let id = add(&mut drawing, TextShape::new(0.0, 0.0));
    drawing.set_attribute(id, &TEXT, "Hi".to_string()).expect("text");
    drawing.transform(id, &Transform::scale(2.0, 2.0)).expect("scale");

    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    drawing.add_listener(move |event: &FigureEvent| {
        if let FigureEvent::AttributeChanged { name, old, new, .. } = event {
            sink.borrow_mut().push((name.clone(), old.clone(), new.clone()));
        }
    });

    assert!(drawing.flatten_transform(id).expect("flatten"));
    let changes = changes.borrow();
    let names: Vec<&str> = changes.iter().map(|(name, _, _)| name.as_str()).collect();
    assert_eq!(names, vec!["font-size", "transform"]);
    assert_eq!(changes[0].1, Some(AttributeValue::Number(12.0)));
    assert_eq!(changes[0].2, Some(AttributeValue::Number(24.0)));
}

#[test]
fn test_rotated_text_keeps_transform() {
    let mut drawing = Drawing::new();
    let id = add(&mut drawing, TextShape::new(0.0, 0.0));
    drawing.transform(id, &quarter_turn()).expect("rotate");

    assert!(!drawing.flatten_transform(id).expect("flatten"));
    assert_eq!(drawing.attribute(id, &TRANSFORM).expect("attr"), Some(quarter_turn()));
    assert_eq!(drawing.attribute(id, &FONT_SIZE).expect("size"), 12.0);
}

#[test]
fn test_flatten_without_transform_is_noop() {
    let mut drawing = Drawing::new();
    let id = add(&mut drawing, RectangleShape::new(0.0, 0.0, 5.0, 5.0));
    assert!(drawing.flatten_transform(id).expect("flatten"));
    assert_eq!(
        drawing.geometry(id),
        Some(&Geometry::Rectangle(RectangleShape::new(0.0, 0.0, 5.0, 5.0)))
    );
}

#[test]
fn test_composite_distributes_to_children() {
    let mut drawing = Drawing::new();
    let a = add(&mut drawing, RectangleShape::new(0.0, 0.0, 10.0, 10.0));
    let b = add(&mut drawing, EllipseShape::new(20.0, 0.0, 10.0, 10.0));
    let group = drawing.group(&[a, b]).expect("group").expect("group id");

    drawing
        .transform(group, &Transform::translation(0.0, 5.0))
        .expect("translate");
    assert_eq!(drawing.attribute(group, &TRANSFORM).expect("attr"), None);
    assert_eq!(drawing.bounds(a).expect("bounds"), rect(0.0, 5.0, 10.0, 10.0));
    assert_eq!(drawing.bounds(b).expect("bounds"), rect(20.0, 5.0, 10.0, 10.0));
    assert_eq!(drawing.bounds(group).expect("bounds"), rect(0.0, 5.0, 30.0, 10.0));

    drawing.transform(group, &quarter_turn()).expect("rotate");
    assert_eq!(drawing.attribute(a, &TRANSFORM).expect("attr"), Some(quarter_turn()));
    assert_eq!(drawing.attribute(b, &TRANSFORM).expect("attr"), Some(quarter_turn()));
    let bounds = drawing.bounds(group).expect("bounds");
    assert!(approx_eq_rect(&bounds, &rect(-15.0, 0.0, 10.0, 30.0), 1e-9));
}

#[test]
fn test_composite_bounds_follow_child_transform() {
    let mut drawing = Drawing::new();
    let a = add(&mut drawing, RectangleShape::new(0.0, 0.0, 10.0, 10.0));
    let b = add(&mut drawing, RectangleShape::new(20.0, 0.0, 10.0, 10.0));
    let group = drawing.group(&[a, b]).expect("group").expect("group id");
    assert_eq!(drawing.bounds(group).expect("bounds"), rect(0.0, 0.0, 30.0, 10.0));

    drawing.transform(a, &Transform::scale(4.0, 2.0)).expect("scale");
    assert_eq!(drawing.bounds(a).expect("bounds"), rect(0.0, 0.0, 40.0, 20.0));
    assert_eq!(drawing.bounds(group).expect("bounds"), rect(0.0, 0.0, 40.0, 20.0));
}

#[test]
fn test_absolute_gradient_moves_with_geometry() {
    let mut drawing = Drawing::new();
    let id = add(&mut drawing, RectangleShape::new(0.0, 0.0, 10.0, 10.0));
    let stops = vec![
        GradientStop {
            offset: 0.0,
            color: Color::RED,
        },
        GradientStop {
            offset: 1.0,
            color: Color::BLUE,
        },
    ];
    let gradient = Gradient::linear(point(0.0, 0.0), point(10.0, 0.0), stops);
    drawing
        .set_attribute(id, &FILL_GRADIENT, Some(gradient))
        .expect("gradient");

    drawing
        .transform(id, &Transform::translation(5.0, 0.0))
        .expect("translate");
    let moved = drawing
        .attribute(id, &FILL_GRADIENT)
        .expect("attr")
        .expect("gradient");
    assert_eq!(moved.points, [point(5.0, 0.0), point(15.0, 0.0)]);
}

#[test]
fn test_restore_data_undoes_any_transform() {
    let mut drawing = Drawing::new();
    let a = add(&mut drawing, RectangleShape::new(0.0, 0.0, 10.0, 10.0));
    let b = add(&mut drawing, TextShape::new(0.0, 20.0));
    let group = drawing.group(&[a, b]).expect("group").expect("group id");
    let before = drawing.transform_restore_data(group).expect("snapshot");

    drawing
        .transform(group, &Transform::scale(3.0, 3.0))
        .expect("scale");
    drawing.flatten_transform(group).expect("flatten");
    assert_eq!(drawing.attribute(b, &FONT_SIZE).expect("size"), 36.0);

    drawing.restore_transform_to(&before).expect("restore");
    assert_eq!(drawing.transform_restore_data(group).expect("snapshot"), before);
    assert_eq!(drawing.attribute(b, &FONT_SIZE).expect("size"), 12.0);
    assert_eq!(drawing.bounds(a).expect("bounds"), rect(0.0, 0.0, 10.0, 10.0));
}
