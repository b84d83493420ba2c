use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::controller::transport::{TransportEvent, TransportHandle};
use crate::error::SpectatorError;
use crate::frame_loop::FrameLoop;
use crate::interpolation::InterpolationTracker;
use crate::model::wire::{CourseDataPayload, ServerMessage};
use crate::store::{StateStore, StoreEvent};
use crate::view::{FrameOutcome, Renderer, SvgCanvas, svg_document};

#[derive(Debug)]
pub struct SpectatorModel {
    pub store: StateStore,
    pub tracker: InterpolationTracker,
    pub renderer: Renderer,
    pub frames_drawn: u64,
    pub last_frame: Option<FrameOutcome>,
    pub shutting_down: bool,
}

impl SpectatorModel {
    #[must_use]
    pub fn new(renderer: Renderer, evict_after: u32) -> Self {
        Self {
            store: StateStore::new(),
            tracker: InterpolationTracker::new(evict_after),
            renderer,
            frames_drawn: 0,
            last_frame: None,
            shutting_down: false,
        }
    }
}

#[derive(Debug)]
pub enum Msg {
    Transport { event: TransportEvent, at: Instant },
    Bootstrapped(Result<CourseDataPayload, SpectatorError>),
    Frame(Instant),
    Rendered(FrameOutcome),
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Render(Instant),
    StopFrames,
    Teardown,
}

pub fn update(model: &mut SpectatorModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::Transport { event, at } => {
            match event {
                TransportEvent::Connecting { attempt } => {
                    debug!(attempt, "connecting");
                }
                TransportEvent::Connected => {
                    model.store.apply(StoreEvent::ConnectionRestored, at);
                }
                TransportEvent::Disconnected { reason } => {
                    debug!(%reason, "transport reported disconnect");
                    model.store.apply(StoreEvent::ConnectionLost, at);
                }
                TransportEvent::Message(message) => {
                    model.store.apply(StoreEvent::Message(message), at);
                    model.tracker.sync(model.store.game(), at);
                }
            }
            vec![]
        }
        Msg::Bootstrapped(Ok(payload)) => {
            // The socket's own course_data wins if it arrived first.
            if model.store.course().is_none() {
                info!(holes = payload.holes.len(), "course bootstrapped over http");
                model.store.apply(
                    StoreEvent::Message(ServerMessage::CourseData(payload)),
                    Instant::now(),
                );
            } else {
                debug!("bootstrap course ignored, socket course already present");
            }
            vec![]
        }
        Msg::Bootstrapped(Err(e)) => {
            warn!(error = %e, "course bootstrap failed, waiting for the socket");
            vec![]
        }
        Msg::Frame(at) => {
            if model.shutting_down {
                vec![]
            } else {
                vec![Effect::Render(at)]
            }
        }
        Msg::Rendered(outcome) => {
            if model.last_frame != Some(outcome) {
                info!(?outcome, "frame content changed");
            }
            model.last_frame = Some(outcome);
            model.frames_drawn += 1;
            vec![]
        }
        Msg::Shutdown => {
            if model.shutting_down {
                vec![]
            } else {
                model.shutting_down = true;
                vec![Effect::StopFrames, Effect::Teardown]
            }
        }
    }
}

pub struct Deps<'a> {
    pub frames: &'a mut FrameLoop,
    pub transport: Option<&'a TransportHandle>,
    /// Where the latest frame is written, if anywhere.
    pub frame_out: Option<&'a Path>,
}

pub async fn run_effect(effect: Effect, model: &SpectatorModel, deps: &mut Deps<'_>) -> Option<Msg> {
    match effect {
        Effect::Render(at) => {
            let mut canvas = SvgCanvas::new();
            let outcome = model
                .renderer
                .draw_frame(&mut canvas, &model.store, &model.tracker, at);
            if let Some(path) = deps.frame_out {
                if let Err(e) = write_frame(path, &svg_document(&canvas)).await {
                    warn!(path = %path.display(), error = %e, "could not write frame");
                }
            }
            Some(Msg::Rendered(outcome))
        }
        Effect::StopFrames => {
            deps.frames.stop();
            None
        }
        Effect::Teardown => {
            if let Some(transport) = deps.transport {
                transport.teardown();
            }
            None
        }
    }
}

/// Replaces `path` in one step so readers never see a half-written frame.
///
/// # Errors
///
/// Will return `Err` if the temp file cannot be written or renamed.
pub async fn write_frame(path: &Path, document: &str) -> Result<(), SpectatorError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    tokio::fs::write(&tmp, document).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
