#![allow(dead_code)]

use std::time::{Duration, Instant};

use minigolf_spectator::geometry::{Point, Viewport};
use minigolf_spectator::model::wire::{ServerMessage, decode};
use minigolf_spectator::model::{GameState, Player};
use minigolf_spectator::store::{StateStore, StoreEvent};
use minigolf_spectator::view::{Canvas, Fill, Rgb, Stroke, TextStyle};
use tokio::net::TcpListener;

pub const COURSE_JSON: &str = include_str!("../fixtures/course_data.json");
pub const GAMESTATE_JSON: &str = include_str!("../fixtures/gamestate.json");

pub fn course_message() -> ServerMessage {
    decode(COURSE_JSON).expect("course fixture decodes")
}

pub fn gamestate_message() -> ServerMessage {
    decode(GAMESTATE_JSON).expect("gamestate fixture decodes")
}

/// Store with the fixture course and one snapshot applied at `now`.
pub fn loaded_store(now: Instant) -> StateStore {
    let mut store = StateStore::new();
    store.apply(StoreEvent::Message(course_message()), now);
    store.apply(StoreEvent::Message(gamestate_message()), now);
    store
}

pub fn player(id: u32, position: (f64, f64), ball: (f64, f64)) -> Player {
    Player {
        id,
        position: Point::new(position.0, position.1),
        ball_position: Point::new(ball.0, ball.1),
        score: 0,
        current_hole: 1,
        lie: "fairway".to_string(),
        state: "idle".to_string(),
    }
}

pub fn game_with(players: Vec<Player>, at: Instant) -> GameState {
    GameState {
        players,
        last_update: Some(at),
        revision: 1,
        ..GameState::default()
    }
}

pub fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

pub fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

/// One recorded [`Canvas`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear(Viewport),
    Rect { origin: Point, width: f64, height: f64, fill: Fill },
    Polygon { points: Vec<Point>, fill: Fill },
    Outline { points: Vec<Point>, stroke: Stroke },
    Circle { center: Point, radius: f64, fill: Fill },
    Line { from: Point, to: Point },
    Text { at: Point, content: String },
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn circles_filled(&self, color: Rgb) -> Vec<Point> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Circle { center, fill, .. } if fill.color == color => Some(*center),
                _ => None,
            })
            .collect()
    }

    pub fn polygons_filled(&self, color: Rgb) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Polygon { fill, .. } if fill.color == color))
            .count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, viewport: Viewport, _background: Rgb) {
        self.ops.clear();
        self.ops.push(Op::Clear(viewport));
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, fill: Fill) {
        self.ops.push(Op::Rect {
            origin,
            width,
            height,
            fill,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], fill: Fill, _stroke: Option<Stroke>) {
        self.ops.push(Op::Polygon {
            points: points.to_vec(),
            fill,
        });
    }

    fn stroke_polygon(&mut self, points: &[Point], stroke: Stroke) {
        self.ops.push(Op::Outline {
            points: points.to_vec(),
            stroke,
        });
    }

    fn circle(&mut self, center: Point, radius: f64, fill: Fill, _stroke: Option<Stroke>) {
        self.ops.push(Op::Circle {
            center,
            radius,
            fill,
        });
    }

    fn line(&mut self, from: Point, to: Point, _stroke: Stroke) {
        self.ops.push(Op::Line { from, to });
    }

    fn text(&mut self, at: Point, content: &str, _style: &TextStyle) {
        self.ops.push(Op::Text {
            at,
            content: content.to_string(),
        });
    }
}

/// Binds a socket server on an ephemeral port. Returns the listener and the
/// base url (without the `/ws` path).
pub async fn ws_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    (listener, format!("ws://{addr}"))
}

/// An address nothing is listening on.
pub async fn dead_url() -> String {
    let (listener, url) = ws_listener().await;
    drop(listener);
    url
}
