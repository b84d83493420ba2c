//! Fixed-rate frame tick source.
//!
//! [`FrameLoop`] is awaited from the application loop alongside other event
//! sources. While running, [`next_frame`](FrameLoop::next_frame) resolves once
//! per frame period; missed periods are skipped rather than replayed, so frames
//! never burst after a stall. While stopped it never resolves.

use std::time::{Duration, Instant};

use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::debug;

pub const DEFAULT_FPS: u32 = 60;

#[derive(Debug)]
pub struct FrameLoop {
    period: Duration,
    ticker: Option<Interval>,
    frame_counter: u64,
}

impl FrameLoop {
    /// `fps` of zero is treated as one frame per second.
    #[must_use]
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / fps.max(1),
            ticker: None,
            frame_counter: 0,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Begins ticking. No-op if already running.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            return;
        }
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.ticker = Some(ticker);
        debug!(period = ?self.period, "frame loop started");
    }

    /// Stops ticking. No-op if already stopped.
    pub fn stop(&mut self) {
        if self.ticker.take().is_some() {
            debug!(frames = self.frame_counter, "frame loop stopped");
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Frames produced since construction.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_counter
    }

    /// Waits for the next frame and returns the time it fired, not the
    /// deadline it was scheduled for; after a stall `Skip` hands back a
    /// deadline already in the past. Pending forever while stopped, which
    /// keeps it usable as a `tokio::select!` branch.
    pub async fn next_frame(&mut self) -> Instant {
        match self.ticker.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
                self.frame_counter += 1;
                Instant::now()
            }
            None => std::future::pending().await,
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}
