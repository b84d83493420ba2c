//! Reconnect policy, kept free of I/O so it can be driven by the socket task
//! and tested on its own.

use std::time::Duration;

/// Fixed delay between a lost connection and the next attempt.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// What the driver must do after feeding an event in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Connect,
    ScheduleReconnect(Duration),
    /// Close the open socket and stop for good.
    Close,
    None,
}

#[derive(Debug)]
pub struct ConnectionMachine {
    state: ConnectionState,
    reconnect_delay: Duration,
    reconnect_pending: bool,
    torn_down: bool,
    attempts: u64,
}

impl Default for ConnectionMachine {
    fn default() -> Self {
        Self::new(RECONNECT_DELAY)
    }
}

impl ConnectionMachine {
    #[must_use]
    pub fn new(reconnect_delay: Duration) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            reconnect_delay,
            reconnect_pending: false,
            torn_down: false,
            attempts: 0,
        }
    }

    /// Initial connect.
    pub fn start(&mut self) -> Action {
        if self.torn_down || self.state != ConnectionState::Disconnected || self.reconnect_pending {
            return Action::None;
        }
        self.begin_attempt()
    }

    /// The socket opened. Returns `true` if the caller should report the
    /// connection as restored.
    pub fn on_open(&mut self) -> bool {
        if self.torn_down || self.state != ConnectionState::Connecting {
            return false;
        }
        self.state = ConnectionState::Connected;
        true
    }

    pub fn on_close(&mut self) -> Action {
        self.lost()
    }

    /// Errors and closes are handled the same way; a socket that errors
    /// usually closes right after, which must not schedule twice.
    pub fn on_error(&mut self) -> Action {
        self.lost()
    }

    pub fn on_reconnect_due(&mut self) -> Action {
        if self.torn_down || !self.reconnect_pending {
            return Action::None;
        }
        self.reconnect_pending = false;
        self.begin_attempt()
    }

    pub fn teardown(&mut self) -> Action {
        if self.torn_down {
            return Action::None;
        }
        self.torn_down = true;
        self.reconnect_pending = false;
        self.state = ConnectionState::Disconnected;
        Action::Close
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    #[must_use]
    pub fn reconnect_pending(&self) -> bool {
        self.reconnect_pending
    }

    /// Connect attempts made so far, the first one included.
    #[must_use]
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn begin_attempt(&mut self) -> Action {
        self.state = ConnectionState::Connecting;
        self.attempts += 1;
        Action::Connect
    }

    fn lost(&mut self) -> Action {
        if self.torn_down || self.reconnect_pending {
            return Action::None;
        }
        self.state = ConnectionState::Disconnected;
        self.reconnect_pending = true;
        Action::ScheduleReconnect(self.reconnect_delay)
    }
}
