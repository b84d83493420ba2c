//! Server message envelope and its payloads.
//!
//! Optional fields are defaulted here, once, so nothing downstream has to
//! second-guess a missing `water` or `bridges` list.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{CourseData, Greenkeeper, GreenkeeperTask, Hole, Player, Wind};
use crate::error::SpectatorError;
use crate::geometry::Point;

/// `{"type": ..., "data": ...}` as sent over the socket.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "course_data")]
    CourseData(CourseDataPayload),
    #[serde(rename = "gamestate")]
    GameState(GameStatePayload),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CourseDataPayload {
    pub holes: Vec<Hole>,
    #[serde(default)]
    pub water: Vec<Vec<Point>>,
    #[serde(default)]
    pub bridges: Vec<Vec<Point>>,
    /// Seconds between server ticks. The plain HTTP course endpoint leaves
    /// it out.
    #[serde(default)]
    pub tick_interval: Option<f64>,
}

impl CourseDataPayload {
    /// Splits into the course and the interpolation time base. Negative or
    /// non-finite intervals count as unknown.
    #[must_use]
    pub fn into_parts(self) -> (CourseData, Option<Duration>) {
        let tick_interval = self
            .tick_interval
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok());
        (
            CourseData {
                holes: self.holes,
                water: self.water,
                bridges: self.bridges,
            },
            tick_interval,
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GameStatePayload {
    pub tick: u64,
    pub groups: Vec<WireGroup>,
    #[serde(default)]
    pub greenkeeper: Option<WireGreenkeeper>,
    #[serde(default)]
    pub wind: Option<WireWind>,
    #[serde(default)]
    pub flag_update: Option<FlagUpdate>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WireGroup {
    pub current_hole: u32,
    pub players: Vec<WirePlayer>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WirePlayer {
    pub id: u32,
    pub position: Point,
    pub ball_position: Point,
    pub strokes: u32,
    #[serde(default)]
    pub current_lie: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WireGreenkeeper {
    pub id: u32,
    pub position: Point,
    pub state: String,
    #[serde(default)]
    pub current_hole: Option<u32>,
    #[serde(default)]
    pub holes_needing_service: u32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct WireWind {
    pub direction: f64,
    pub speed: f64,
}

/// New flag position for a single hole (numbered from 1).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct FlagUpdate {
    pub hole: u32,
    pub position: Point,
}

/// A decoded game state in internal shape: groups flattened into one roster.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub players: Vec<Player>,
    pub greenkeepers: Vec<Greenkeeper>,
    pub wind: Option<Wind>,
    pub flag_update: Option<FlagUpdate>,
}

impl From<GameStatePayload> for Snapshot {
    fn from(payload: GameStatePayload) -> Self {
        let players = payload
            .groups
            .into_iter()
            .flat_map(|group| {
                let hole = group.current_hole;
                group.players.into_iter().map(move |p| Player {
                    id: p.id,
                    position: p.position,
                    ball_position: p.ball_position,
                    score: p.strokes,
                    current_hole: hole,
                    lie: p.current_lie,
                    state: p.state,
                })
            })
            .collect();

        let greenkeepers = payload
            .greenkeeper
            .into_iter()
            .map(|gk| Greenkeeper {
                id: gk.id,
                position: gk.position,
                current_task: GreenkeeperTask::from_wire(&gk.state),
                assigned_hole: gk.current_hole,
                holes_needing_service: gk.holes_needing_service,
            })
            .collect();

        Self {
            tick: payload.tick,
            players,
            greenkeepers,
            wind: payload.wind.map(|w| Wind {
                direction: w.direction,
                speed: w.speed,
            }),
            flag_update: payload.flag_update,
        }
    }
}

/// Parses one text frame.
///
/// # Errors
///
/// Returns `SpectatorError::Decode` for invalid JSON, an unknown `type`, or a
/// payload missing required fields.
pub fn decode(text: &str) -> Result<ServerMessage, SpectatorError> {
    Ok(serde_json::from_str(text)?)
}
