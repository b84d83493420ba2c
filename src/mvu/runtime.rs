use std::future::Future;
use std::time::Instant;

use tokio::sync::mpsc::unbounded_channel;
use tracing::{debug, info};

use super::spectator::{Deps, Msg, SpectatorModel, run_effect, update};
use crate::args::Config;
use crate::controller::{bootstrap, transport};
use crate::error::SpectatorError;
use crate::frame_loop::FrameLoop;

/// Feeds one message through `update` and drains the resulting effects.
pub async fn dispatch(model: &mut SpectatorModel, msg: Msg, deps: &mut Deps<'_>) {
    let mut effects = update(model, msg);
    while let Some(effect) = effects.pop() {
        debug!(?effect, "running effect");
        if let Some(next) = run_effect(effect, model, deps).await {
            effects.extend(update(model, next));
        }
    }
}

/// Runs until ctrl-c. Returns the number of frames drawn.
///
/// # Errors
///
/// Will return `Err` if the configuration cannot be turned into a server
/// address.
pub async fn run(config: Config) -> Result<u64, SpectatorError> {
    run_until(config, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// Runs until `shutdown` resolves. Each transport event is applied in full
/// before the next frame is drawn; nothing here runs concurrently with the
/// store.
///
/// # Errors
///
/// Will return `Err` if the configuration cannot be turned into a server
/// address.
pub async fn run_until<F>(config: Config, shutdown: F) -> Result<u64, SpectatorError>
where
    F: Future<Output = ()>,
{
    let http_base = config.http_base()?;
    let (events_tx, mut events_rx) = unbounded_channel();
    let (app_tx, mut app_rx) = unbounded_channel();

    info!(url = %config.ws_url(), "starting spectator");
    let transport = transport::spawn(config.transport(), events_tx);

    if config.bootstrap {
        tokio::spawn(async move {
            let result = bootstrap::fetch_course(&http_base).await;
            // Receiver gone means we are already shutting down.
            let _ = app_tx.send(Msg::Bootstrapped(result));
        });
    } else {
        drop(app_tx);
    }

    let mut model = SpectatorModel::new(config.renderer(), config.evict_after);
    let mut frames = FrameLoop::new(config.fps);
    frames.start();

    tokio::pin!(shutdown);
    loop {
        let msg = tokio::select! {
            () = &mut shutdown => Msg::Shutdown,
            Some(event) = events_rx.recv() => Msg::Transport { event, at: Instant::now() },
            Some(msg) = app_rx.recv() => msg,
            at = frames.next_frame() => Msg::Frame(at),
        };
        let stopping = matches!(msg, Msg::Shutdown);
        let mut deps = Deps {
            frames: &mut frames,
            transport: Some(&transport),
            frame_out: config.frame_out.as_deref(),
        };
        dispatch(&mut model, msg, &mut deps).await;
        if stopping {
            break;
        }
    }

    transport.shutdown().await;
    info!(frames = model.frames_drawn, "spectator stopped");
    Ok(model.frames_drawn)
}
