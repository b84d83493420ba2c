mod common;

use std::time::Instant;

use common::{Op, RecordingCanvas, close, loaded_store};
use minigolf_spectator::geometry::{Point, TransformConfig, Viewport};
use minigolf_spectator::interpolation::InterpolationTracker;
use minigolf_spectator::model::wire::{CourseDataPayload, ServerMessage};
use minigolf_spectator::model::Hole;
use minigolf_spectator::store::{CONNECTION_LOST_MESSAGE, StateStore, StoreEvent};
use minigolf_spectator::view::{FrameOutcome, RenderStyle, Renderer, SvgCanvas, svg_document};
use scraper::{Html, Selector};

fn renderer(width: f64, height: f64) -> Renderer {
    Renderer::new(
        Viewport::new(width, height),
        TransformConfig::default(),
        RenderStyle::default(),
    )
}

fn synced(store: &StateStore, now: Instant) -> InterpolationTracker {
    let mut tracker = InterpolationTracker::default();
    tracker.sync(store.game(), now);
    tracker
}

fn square(x0: f64, y0: f64, side: f64) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x0 + side, y0),
        Point::new(x0 + side, y0 + side),
        Point::new(x0, y0 + side),
    ]
}

fn course_store(holes: Vec<Hole>) -> StateStore {
    let mut store = StateStore::new();
    store.apply(
        StoreEvent::Message(ServerMessage::CourseData(CourseDataPayload {
            holes,
            water: vec![],
            bridges: vec![],
            tick_interval: Some(1.0),
        })),
        Instant::now(),
    );
    store
}

#[test]
fn full_frame_draws_every_layer_back_to_front() {
    let now = Instant::now();
    let store = loaded_store(now);
    let tracker = synced(&store, now);
    let r = renderer(1200.0, 800.0);
    let style = &r.style;

    let mut canvas = RecordingCanvas::default();
    assert_eq!(
        r.draw_frame(&mut canvas, &store, &tracker, now),
        FrameOutcome::Course
    );

    assert_eq!(canvas.polygons_filled(style.water.color), 2);
    assert_eq!(canvas.polygons_filled(style.bridge.color), 1);
    assert_eq!(canvas.polygons_filled(style.fairway.color), 2);
    assert_eq!(canvas.polygons_filled(style.green.color), 2);
    assert_eq!(canvas.polygons_filled(style.bunker.color), 1);
    assert_eq!(canvas.polygons_filled(style.tee.color), 1);
    let outlines = canvas
        .ops
        .iter()
        .filter(|op| matches!(op, Op::Outline { stroke, .. } if stroke.dash.is_some()))
        .count();
    assert_eq!(outlines, 2);

    for id in [1, 2, 3] {
        assert_eq!(canvas.circles_filled(style.player_color(id)).len(), 1);
    }
    assert_eq!(canvas.circles_filled(style.ball).len(), 3);
    assert_eq!(canvas.circles_filled(style.greenkeeper).len(), 1);

    let texts = canvas.texts();
    assert!(texts.contains(&"1") && texts.contains(&"2"), "{texts:?}");
    assert!(texts.contains(&"3.5 m/s"), "{texts:?}");
    assert!(texts.contains(&"90°"), "{texts:?}");

    let first_water = canvas.ops.iter().position(
        |op| matches!(op, Op::Polygon { fill, .. } if fill.color == style.water.color),
    );
    let first_fairway = canvas.ops.iter().position(
        |op| matches!(op, Op::Polygon { fill, .. } if fill.color == style.fairway.color),
    );
    let first_player = canvas.ops.iter().position(
        |op| matches!(op, Op::Circle { fill, .. } if fill.color == style.player_color(1)),
    );
    let keeper = canvas.ops.iter().position(
        |op| matches!(op, Op::Circle { fill, .. } if fill.color == style.greenkeeper),
    );
    assert!(first_water < first_fairway);
    assert!(first_fairway < first_player);
    assert!(first_player < keeper);
    assert!(matches!(canvas.ops.last(), Some(Op::Text { content, .. }) if content == "90°"));
}

#[test]
fn flag_of_centered_hole_is_at_viewport_center() {
    let store = course_store(vec![Hole {
        fairway: square(0.0, 0.0, 10.0),
        flag: Point::new(5.0, 5.0),
        ..Hole::default()
    }]);
    let now = Instant::now();
    let mut canvas = RecordingCanvas::default();
    renderer(100.0, 100.0).draw_frame(&mut canvas, &store, &InterpolationTracker::default(), now);

    let pole_base = canvas.ops.iter().find_map(|op| match op {
        Op::Line { from, .. } => Some(*from),
        _ => None,
    });
    let pole_base = pole_base.expect("flag pole drawn");
    assert!(close(pole_base, Point::new(50.0, 50.0)), "{pole_base:?}");
}

#[test]
fn disconnected_frame_is_only_the_overlay() {
    let now = Instant::now();
    let mut store = loaded_store(now);
    store.apply(StoreEvent::ConnectionLost, now);
    let tracker = synced(&store, now);
    let r = renderer(400.0, 300.0);

    let mut canvas = RecordingCanvas::default();
    assert_eq!(
        r.draw_frame(&mut canvas, &store, &tracker, now),
        FrameOutcome::ErrorOverlay
    );
    assert_eq!(canvas.ops.len(), 3, "{:?}", canvas.ops);
    assert!(matches!(
        &canvas.ops[1],
        Op::Rect { width, height, fill, .. }
            if (*width - 400.0).abs() < f64::EPSILON
            && (*height - 300.0).abs() < f64::EPSILON
            && *fill == r.style.overlay
    ));
    assert!(matches!(
        &canvas.ops[2],
        Op::Text { at, content } if content == CONNECTION_LOST_MESSAGE && *at == Point::new(200.0, 150.0)
    ));

    store.apply(StoreEvent::ConnectionRestored, now);
    assert_eq!(
        r.draw_frame(&mut canvas, &store, &tracker, now),
        FrameOutcome::Course
    );
}

#[test]
fn no_course_means_background_only() {
    let store = StateStore::new();
    let mut canvas = RecordingCanvas::default();
    let outcome = renderer(100.0, 100.0).draw_frame(
        &mut canvas,
        &store,
        &InterpolationTracker::default(),
        Instant::now(),
    );
    assert_eq!(outcome, FrameOutcome::Idle);
    assert_eq!(canvas.ops, vec![Op::Clear(Viewport::new(100.0, 100.0))]);
}

#[test]
fn untracked_players_are_not_drawn() {
    let now = Instant::now();
    let store = loaded_store(now);
    let r = renderer(600.0, 400.0);
    let mut canvas = RecordingCanvas::default();
    r.draw_frame(&mut canvas, &store, &InterpolationTracker::default(), now);
    assert!(canvas.circles_filled(r.style.ball).is_empty());
    assert!(canvas.circles_filled(r.style.greenkeeper).is_empty());
}

#[test]
fn degenerate_polygons_are_skipped() {
    let store = course_store(vec![Hole {
        fairway: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
        green: vec![],
        tees: vec![vec![]],
        bunkers: vec![vec![Point::new(1.0, 1.0)]],
        flag: Point::new(5.0, 5.0),
        water: vec![],
    }]);
    let r = renderer(100.0, 100.0);
    let mut canvas = RecordingCanvas::default();
    assert_eq!(
        r.draw_frame(&mut canvas, &store, &InterpolationTracker::default(), Instant::now()),
        FrameOutcome::Course
    );
    assert_eq!(canvas.polygons_filled(r.style.fairway.color), 0);
    assert_eq!(canvas.polygons_filled(r.style.green.color), 0);
    assert_eq!(canvas.polygons_filled(r.style.bunker.color), 0);
    assert_eq!(canvas.polygons_filled(r.style.tee.color), 0);
}

#[test]
fn svg_frame_contains_the_course() -> Result<(), Box<dyn std::error::Error>> {
    let now = Instant::now();
    let store = loaded_store(now);
    let tracker = synced(&store, now);
    let r = renderer(1200.0, 800.0);

    let mut recorded = RecordingCanvas::default();
    r.draw_frame(&mut recorded, &store, &tracker, now);
    let mut svg = SvgCanvas::new();
    r.draw_frame(&mut svg, &store, &tracker, now);
    assert_eq!(svg.element_count(), recorded.ops.len());

    let document = svg_document(&svg);
    assert!(document.starts_with("<?xml"));

    let html = Html::parse_fragment(&svg.into_string());
    let circles = Selector::parse("circle").unwrap();
    let polygons = Selector::parse("polygon").unwrap();
    let texts = Selector::parse("text").unwrap();

    let recorded_circles = recorded
        .ops
        .iter()
        .filter(|op| matches!(op, Op::Circle { .. }))
        .count();
    assert_eq!(html.select(&circles).count(), recorded_circles);

    let recorded_polygons = recorded
        .ops
        .iter()
        .filter(|op| matches!(op, Op::Polygon { .. } | Op::Outline { .. }))
        .count();
    assert_eq!(html.select(&polygons).count(), recorded_polygons);

    let fairway_hex = r.style.fairway.color.hex();
    assert_eq!(
        html.select(&polygons)
            .filter(|p| p.value().attr("fill") == Some(fairway_hex.as_str()))
            .count(),
        2
    );

    let labels: Vec<String> = html
        .select(&texts)
        .map(|t| t.text().collect::<String>())
        .collect();
    assert!(labels.iter().any(|l| l == "3.5 m/s"), "{labels:?}");
    Ok(())
}
