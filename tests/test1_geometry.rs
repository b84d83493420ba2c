mod common;

use common::close;
use minigolf_spectator::geometry::{
    BoundingBox, CourseTransform, Point, TransformConfig, Viewport, bounding_box, convex_hull,
    transform,
};
use proptest::prelude::*;

fn unit_square() -> BoundingBox {
    bounding_box(&[
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ])
    .expect("non-empty")
}

#[test]
fn flag_at_course_center_lands_at_viewport_center() {
    let screen = transform(
        Point::new(5.0, 5.0),
        &unit_square(),
        Viewport::new(100.0, 100.0),
        &TransformConfig::default(),
    );
    assert!(close(screen, Point::new(50.0, 50.0)), "{screen:?}");
}

#[test]
fn corners_of_unit_square_fill_the_viewport() {
    let t = CourseTransform::new(
        &unit_square(),
        Viewport::new(100.0, 100.0),
        &TransformConfig::default(),
    );
    assert!(close(t.apply(Point::new(0.0, 0.0)), Point::new(0.0, 100.0)));
    assert!(close(t.apply(Point::new(10.0, 10.0)), Point::new(100.0, 0.0)));
}

#[test]
fn rotation_keeps_rotated_course_inside_viewport() {
    let config = TransformConfig {
        rotation_degrees: -30.0,
        ..TransformConfig::default()
    };
    let viewport = Viewport::new(120.0, 80.0);
    let t = CourseTransform::new(&unit_square(), viewport, &config);
    for corner in [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ] {
        let p = t.apply(corner);
        assert!(p.x >= -1e-9 && p.x <= viewport.width + 1e-9, "{p:?}");
        assert!(p.y >= -1e-9 && p.y <= viewport.height + 1e-9, "{p:?}");
    }
}

#[test]
fn star_hull_keeps_outer_points_counter_clockwise() {
    let outer = [
        Point::new(-6.0, -8.0),
        Point::new(6.0, -8.0),
        Point::new(10.0, 3.0),
        Point::new(0.0, 10.0),
        Point::new(-10.0, 3.0),
    ];
    let inner = [
        Point::new(-3.0, 2.0),
        Point::new(3.0, 2.0),
        Point::new(4.0, -2.0),
        Point::new(0.0, -4.0),
        Point::new(-4.0, -2.0),
    ];
    let mut input: Vec<Point> = inner.to_vec();
    input.push(Point::new(0.0, 0.0));
    input.extend_from_slice(&outer);

    let hull = convex_hull(&input);
    assert_eq!(hull, outer.to_vec());

    let twice_area: f64 = hull
        .iter()
        .zip(hull.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    assert!(twice_area > 0.0, "hull is not counter-clockwise");
}

#[test]
fn hull_of_two_points_is_unchanged() {
    let pts = vec![Point::new(3.0, 1.0), Point::new(-1.0, 2.0)];
    assert_eq!(convex_hull(&pts), pts);
    assert!(convex_hull(&[]).is_empty());
}

#[test]
fn empty_input_has_no_bounds() {
    assert!(bounding_box(&[]).is_none());
}

fn point() -> impl Strategy<Value = Point> {
    (-1000.0..1000.0f64, -1000.0..1000.0f64).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn invert_undoes_apply(
        p in point(),
        rotation in -180.0..180.0f64,
        zoom in 0.1..4.0f64,
        offset_x in -50.0..50.0f64,
        offset_y in -50.0..50.0f64,
    ) {
        let bounds = bounding_box(&[Point::new(-200.0, -50.0), Point::new(300.0, 400.0)]).unwrap();
        let config = TransformConfig { rotation_degrees: rotation, padding: 10.0, offset_x, offset_y, zoom };
        let t = CourseTransform::new(&bounds, Viewport::new(1200.0, 800.0), &config);
        let back = t.invert(t.apply(p));
        prop_assert!((back.x - p.x).abs() < 1e-6 && (back.y - p.y).abs() < 1e-6, "{:?} vs {:?}", back, p);
    }

    #[test]
    fn invert_undoes_apply_without_rotation(p in point()) {
        let t = CourseTransform::new(&unit_square(), Viewport::new(100.0, 100.0), &TransformConfig::default());
        let back = t.invert(t.apply(p));
        prop_assert!((back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn bounding_box_only_grows(points in prop::collection::vec(point(), 1..40), extra in point()) {
        let before = bounding_box(&points).unwrap();
        let mut more = points.clone();
        more.push(extra);
        let after = bounding_box(&more).unwrap();
        prop_assert!(after.min_x <= before.min_x && after.min_y <= before.min_y);
        prop_assert!(after.max_x >= before.max_x && after.max_y >= before.max_y);
        prop_assert!(after.min_x <= extra.x && extra.x <= after.max_x);
        prop_assert!(after.min_y <= extra.y && extra.y <= after.max_y);
    }
}
