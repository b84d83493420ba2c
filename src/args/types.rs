use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::controller::transport::TransportConfig;
use crate::error::SpectatorError;
use crate::geometry::{TransformConfig, Viewport};
use crate::interpolation::DEFAULT_EVICT_AFTER;
use crate::view::{RenderStyle, Renderer};

pub const DEFAULT_SERVER: &str = "ws://localhost:8000";
pub const WS_PATH: &str = "/ws";

#[derive(Parser, Debug)]
#[command(author, version, about = "Live top-down spectator for the minigolf simulation", long_about = None)]
pub struct Args {
    /// Server base url, ws:// or wss://. The socket path is appended.
    #[arg(short = 's', long, value_name = "URL", default_value = DEFAULT_SERVER)]
    pub server: String,
    #[arg(long, value_name = "PIXELS", default_value_t = 1200.0)]
    pub width: f64,
    #[arg(long, value_name = "PIXELS", default_value_t = 800.0)]
    pub height: f64,
    #[arg(long, value_name = "FPS", default_value_t = 60)]
    pub fps: u32,
    /// Course rotation in degrees, counter-clockwise.
    #[arg(long, value_name = "DEGREES", default_value_t = -30.0, allow_negative_numbers = true)]
    pub rotation: f64,
    #[arg(long, value_name = "FACTOR", default_value_t = 1.6)]
    pub zoom: f64,
    #[arg(long, value_name = "PIXELS", default_value_t = 0.0)]
    pub padding: f64,
    #[arg(long, value_name = "PIXELS", default_value_t = 35.0, allow_negative_numbers = true)]
    pub offset_x: f64,
    #[arg(long, value_name = "PIXELS", default_value_t = 85.0, allow_negative_numbers = true)]
    pub offset_y: f64,
    /// Write the latest frame to this file as SVG.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub frame_out: Option<PathBuf>,
    /// Skip the initial http course fetch and wait for the socket.
    #[arg(long)]
    pub no_bootstrap: bool,
    /// Give up on a connect attempt after this many seconds. Off by default.
    #[arg(long, value_name = "SECONDS")]
    pub connect_timeout: Option<f64>,
    /// Drop a player after this many consecutive snapshots without them.
    #[arg(long, value_name = "SNAPSHOTS", default_value_t = DEFAULT_EVICT_AFTER)]
    pub evict_after: u32,
}

/// Validated settings, see [`Args::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server: String,
    pub viewport: Viewport,
    pub transform: TransformConfig,
    pub fps: u32,
    pub frame_out: Option<PathBuf>,
    pub bootstrap: bool,
    pub connect_timeout: Option<Duration>,
    pub reconnect_delay: Duration,
    pub evict_after: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            viewport: Viewport::new(1200.0, 800.0),
            transform: TransformConfig {
                rotation_degrees: -30.0,
                padding: 0.0,
                offset_x: 35.0,
                offset_y: 85.0,
                zoom: 1.6,
            },
            fps: 60,
            frame_out: None,
            bootstrap: true,
            connect_timeout: None,
            reconnect_delay: crate::controller::connection::RECONNECT_DELAY,
            evict_after: DEFAULT_EVICT_AFTER,
        }
    }
}

impl Config {
    #[must_use]
    pub fn ws_url(&self) -> String {
        format!("{}{WS_PATH}", self.server.trim_end_matches('/'))
    }

    /// # Errors
    ///
    /// Will return `Err` if `server` is not a ws:// or wss:// url.
    pub fn http_base(&self) -> Result<String, SpectatorError> {
        crate::controller::bootstrap::http_base_from_ws(&self.server)
    }

    #[must_use]
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            url: self.ws_url(),
            reconnect_delay: self.reconnect_delay,
            connect_timeout: self.connect_timeout,
        }
    }

    #[must_use]
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.viewport, self.transform, RenderStyle::default())
    }
}
