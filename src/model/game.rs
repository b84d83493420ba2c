use std::time::Instant;

use crate::geometry::Point;

pub type PlayerId = u32;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    /// Where the player is standing.
    pub position: Point,
    pub ball_position: Point,
    /// Strokes taken on the current hole.
    pub score: u32,
    pub current_hole: u32,
    pub lie: String,
    pub state: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GreenkeeperTask {
    Break,
    PlacingFlag,
    Maintaining,
    #[default]
    Waiting,
}

impl GreenkeeperTask {
    /// Maps the server's greenkeeper state onto a task. The server reports
    /// its own walk states; the task names are accepted as-is too.
    #[must_use]
    pub fn from_wire(state: &str) -> Self {
        match state {
            "placing_flag" => Self::PlacingFlag,
            "walking_to_hole" | "maintaining" => Self::Maintaining,
            "walking_to_idle" | "break" => Self::Break,
            _ => Self::Waiting,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Break => "break",
            Self::PlacingFlag => "placing flag",
            Self::Maintaining => "maintaining",
            Self::Waiting => "waiting",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Greenkeeper {
    pub id: u32,
    pub position: Point,
    pub current_task: GreenkeeperTask,
    pub assigned_hole: Option<u32>,
    pub holes_needing_service: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WeatherCondition {
    #[default]
    Sunny,
    Rainy,
    Foggy,
}

/// `direction` is in degrees, the way the wind is coming from.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Wind {
    pub direction: f64,
    pub speed: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Weather {
    pub condition: WeatherCondition,
    pub wind: Wind,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct GameState {
    pub players: Vec<Player>,
    pub greenkeepers: Vec<Greenkeeper>,
    pub weather: Weather,
    pub tick: u64,
    /// Set on every accepted snapshot.
    pub last_update: Option<Instant>,
    /// Bumped on every accepted snapshot, 0 until the first. Consumers watch
    /// this rather than `last_update`, which can repeat on a coarse clock.
    pub revision: u64,
}

impl GameState {
    /// Only the first greenkeeper of the roster is ever drawn.
    #[must_use]
    pub fn greenkeeper(&self) -> Option<&Greenkeeper> {
        self.greenkeepers.first()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}
