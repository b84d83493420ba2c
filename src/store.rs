//! Latest reconciled course and game state.
//!
//! All writes go through [`StateStore::apply`]; everything else is read-only.
//! Interested parties either look at the returned [`Change`] list or register
//! a listener with [`StateStore::subscribe`].

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::model::wire::{ServerMessage, Snapshot};
use crate::model::{CourseData, GameState};

pub const CONNECTION_LOST_MESSAGE: &str = "Connection to server lost. Reconnecting...";

/// Everything that can mutate the store.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    Message(ServerMessage),
    ConnectionLost,
    ConnectionRestored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    CourseReplaced,
    FlagMoved { hole: u32 },
    GameStateReplaced,
    ConnectionLost,
    ConnectionRestored,
}

pub type ListenerId = usize;

type Listener = Box<dyn FnMut(Change, &StateStore)>;

#[derive(Default)]
pub struct StateStore {
    course: Option<CourseData>,
    tick_interval: Option<Duration>,
    game: GameState,
    connection_error: Option<String>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: ListenerId,
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("course", &self.course.as_ref().map(|c| c.holes.len()))
            .field("tick_interval", &self.tick_interval)
            .field("players", &self.game.players.len())
            .field("connection_error", &self.connection_error)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl StateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn course(&self) -> Option<&CourseData> {
        self.course.as_ref()
    }

    /// Server tick interval from the last `course_data`; `None` until known.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    #[must_use]
    pub fn connection_error(&self) -> Option<&str> {
        self.connection_error.as_deref()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(Change, &StateStore) + 'static) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        before != self.listeners.len()
    }

    /// The single mutation entry point. A message is applied completely before
    /// this returns, then listeners hear about each change in order.
    pub fn apply(&mut self, event: StoreEvent, now: Instant) -> Vec<Change> {
        let changes = match event {
            StoreEvent::Message(ServerMessage::CourseData(payload)) => {
                let (course, tick_interval) = payload.into_parts();
                info!(
                    holes = course.holes.len(),
                    tick_interval = ?tick_interval,
                    "course data replaced"
                );
                self.course = Some(course);
                if tick_interval.is_some() {
                    self.tick_interval = tick_interval;
                }
                vec![Change::CourseReplaced]
            }
            StoreEvent::Message(ServerMessage::GameState(payload)) => {
                self.apply_snapshot(Snapshot::from(payload), now)
            }
            StoreEvent::ConnectionLost => {
                if self.connection_error.is_some() {
                    vec![]
                } else {
                    self.connection_error = Some(CONNECTION_LOST_MESSAGE.to_string());
                    vec![Change::ConnectionLost]
                }
            }
            StoreEvent::ConnectionRestored => {
                if self.connection_error.take().is_some() {
                    vec![Change::ConnectionRestored]
                } else {
                    vec![]
                }
            }
        };
        self.notify(&changes);
        changes
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot, now: Instant) -> Vec<Change> {
        let mut changes = Vec::with_capacity(2);

        if let Some(update) = snapshot.flag_update {
            match self.course.as_mut().and_then(|c| c.hole_mut(update.hole)) {
                Some(hole) => {
                    hole.flag = update.position;
                    changes.push(Change::FlagMoved { hole: update.hole });
                }
                None => warn!(hole = update.hole, "flag update for unknown hole ignored"),
            }
        }

        debug!(
            tick = snapshot.tick,
            players = snapshot.players.len(),
            "game state replaced"
        );
        self.game.players = snapshot.players;
        self.game.greenkeepers = snapshot.greenkeepers;
        if let Some(wind) = snapshot.wind {
            self.game.weather.wind = wind;
        }
        self.game.tick = snapshot.tick;
        self.game.last_update = Some(now);
        self.game.revision += 1;
        changes.push(Change::GameStateReplaced);
        changes
    }

    fn notify(&mut self, changes: &[Change]) {
        if changes.is_empty() || self.listeners.is_empty() {
            return;
        }
        let mut listeners = std::mem::take(&mut self.listeners);
        for change in changes {
            for (_, listener) in &mut listeners {
                listener(*change, self);
            }
        }
        // Listeners registered from inside a callback land in self.listeners.
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }
}
