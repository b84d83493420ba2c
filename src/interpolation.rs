//! Smooths discrete server snapshots into continuous motion.
//!
//! Each tracked entity keeps the position it is leaving (`previous`), the one
//! it is heading to (`target`) and when that target last changed. Frames blend
//! between the two by elapsed time relative to the server tick interval.

use std::time::{Duration, Instant};

use ahash::{AHashMap, AHashSet};
use tracing::debug;

use crate::geometry::Point;
use crate::model::{GameState, PlayerId};

/// The ball covers its path this many times faster than the walking body.
pub const BALL_SPEEDUP: f64 = 6.0;

/// Snapshots an id may be missing from before its entry is dropped.
pub const DEFAULT_EVICT_AFTER: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendFactors {
    pub body: f64,
    pub ball: f64,
}

/// `body = min(elapsed / T, 1)`, `ball = min(elapsed / (T / 6), 1)`.
/// With no usable `T` both snap to 1.
#[must_use]
pub fn blend_factors(elapsed: Duration, tick_interval: Option<Duration>) -> BlendFactors {
    let Some(tick) = tick_interval.filter(|t| !t.is_zero()) else {
        return BlendFactors {
            body: 1.0,
            ball: 1.0,
        };
    };
    let elapsed = elapsed.as_secs_f64();
    let tick = tick.as_secs_f64();
    BlendFactors {
        body: (elapsed / tick).min(1.0),
        ball: (elapsed / (tick / BALL_SPEEDUP)).min(1.0),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendedPosition {
    pub position: Point,
    pub ball_position: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpolationEntry {
    pub previous_position: Point,
    pub previous_ball_position: Point,
    pub target_position: Point,
    pub target_ball_position: Point,
    pub last_change: Instant,
    missed_snapshots: u32,
}

impl InterpolationEntry {
    /// First sighting: previous and target coincide, so the entity is drawn
    /// at rest until it moves.
    #[must_use]
    pub fn new(position: Point, ball_position: Point, now: Instant) -> Self {
        Self {
            previous_position: position,
            previous_ball_position: ball_position,
            target_position: position,
            target_ball_position: ball_position,
            last_change: now,
            missed_snapshots: 0,
        }
    }

    /// Shifts target to previous when either incoming value differs.
    /// Returns whether anything changed.
    pub fn retarget(&mut self, position: Point, ball_position: Point, now: Instant) -> bool {
        if position == self.target_position && ball_position == self.target_ball_position {
            return false;
        }
        self.previous_position = self.target_position;
        self.previous_ball_position = self.target_ball_position;
        self.target_position = position;
        self.target_ball_position = ball_position;
        self.last_change = now;
        true
    }

    #[must_use]
    pub fn factors(&self, now: Instant, tick_interval: Option<Duration>) -> BlendFactors {
        blend_factors(now.saturating_duration_since(self.last_change), tick_interval)
    }

    #[must_use]
    pub fn blend(&self, now: Instant, tick_interval: Option<Duration>) -> BlendedPosition {
        let factors = self.factors(now, tick_interval);
        BlendedPosition {
            position: self
                .previous_position
                .lerp(self.target_position, factors.body),
            ball_position: self
                .previous_ball_position
                .lerp(self.target_ball_position, factors.ball),
        }
    }
}

/// Per-player entries live in a slot arena keyed by id; freed slots are
/// reused. The greenkeeper has its own independent entry.
#[derive(Debug)]
pub struct InterpolationTracker {
    slots: Vec<Option<InterpolationEntry>>,
    free: Vec<usize>,
    index: AHashMap<PlayerId, usize>,
    greenkeeper: Option<InterpolationEntry>,
    evict_after: u32,
    last_seen_revision: u64,
}

impl Default for InterpolationTracker {
    fn default() -> Self {
        Self::new(DEFAULT_EVICT_AFTER)
    }
}

impl InterpolationTracker {
    /// `evict_after` below 1 is treated as 1.
    #[must_use]
    pub fn new(evict_after: u32) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: AHashMap::new(),
            greenkeeper: None,
            evict_after: evict_after.max(1),
            last_seen_revision: 0,
        }
    }

    /// Observes `game` only if its `revision` moved since the previous call.
    /// Returns whether it did.
    pub fn sync(&mut self, game: &GameState, now: Instant) -> bool {
        if game.revision == 0 || game.revision == self.last_seen_revision {
            return false;
        }
        self.last_seen_revision = game.revision;
        self.observe(game, now);
        true
    }

    /// Folds one snapshot in unconditionally.
    pub fn observe(&mut self, game: &GameState, now: Instant) {
        let mut present = AHashSet::with_capacity(game.players.len());
        for player in &game.players {
            present.insert(player.id);
            match self.index.get(&player.id).copied() {
                Some(slot) => {
                    if let Some(entry) = self.slots[slot].as_mut() {
                        entry.missed_snapshots = 0;
                        entry.retarget(player.position, player.ball_position, now);
                    }
                }
                None => {
                    let entry = InterpolationEntry::new(player.position, player.ball_position, now);
                    let slot = self.allocate(entry);
                    self.index.insert(player.id, slot);
                }
            }
        }

        let mut evicted = Vec::new();
        for (&id, &slot) in &self.index {
            if present.contains(&id) {
                continue;
            }
            if let Some(entry) = self.slots[slot].as_mut() {
                entry.missed_snapshots += 1;
                if entry.missed_snapshots >= self.evict_after {
                    evicted.push(id);
                }
            }
        }
        for id in evicted {
            if let Some(slot) = self.index.remove(&id) {
                self.slots[slot] = None;
                self.free.push(slot);
                debug!(player = id, "evicted stale interpolation entry");
            }
        }

        match (game.greenkeeper(), self.greenkeeper.as_mut()) {
            (Some(gk), Some(entry)) => {
                entry.retarget(gk.position, gk.position, now);
            }
            (Some(gk), None) => {
                self.greenkeeper = Some(InterpolationEntry::new(gk.position, gk.position, now));
            }
            (None, _) => self.greenkeeper = None,
        }
    }

    fn allocate(&mut self, entry: InterpolationEntry) -> usize {
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = Some(entry);
            slot
        } else {
            self.slots.push(Some(entry));
            self.slots.len() - 1
        }
    }

    #[must_use]
    pub fn entry(&self, id: PlayerId) -> Option<&InterpolationEntry> {
        let slot = *self.index.get(&id)?;
        self.slots.get(slot)?.as_ref()
    }

    /// `None` means the player has not been observed yet and is not drawable.
    #[must_use]
    pub fn player(
        &self,
        id: PlayerId,
        now: Instant,
        tick_interval: Option<Duration>,
    ) -> Option<BlendedPosition> {
        self.entry(id).map(|entry| entry.blend(now, tick_interval))
    }

    #[must_use]
    pub fn greenkeeper(&self, now: Instant, tick_interval: Option<Duration>) -> Option<Point> {
        self.greenkeeper
            .as_ref()
            .map(|entry| entry.blend(now, tick_interval).position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Slots allocated so far, live or free.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
