// Framework bootstrap for the headless game client runtime.

use crate::domain::tuning::{ReloadTuning, TrayTuning};
use crate::domain::{InputPort, RenderPort};
use crate::frameworks::config::ClientConfig;
use crate::interface_adapters::{
    ChannelTransport, Connection, IdleInput, NetError, TracingRenderer, connect,
};
use crate::use_cases::{ControlLoop, Dispatcher, EndOfGame, InboundEvent, SceneContext};
use std::io::Result;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{Instrument, debug, error, info, info_span};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// How a scene ended.
#[derive(Debug)]
pub enum SessionEnd {
    // The server's final data plus both halves of the still-open connection. Events that
    // arrive after `gameOver` queue on `inbound` for the next scene.
    GameOver {
        end: EndOfGame,
        inbound: mpsc::Receiver<InboundEvent>,
    },
    // The server closed the stream before `gameOver`.
    Disconnected,
}

/// Drives one scene on the current task until `gameOver` or until the inbound stream ends.
pub async fn run_session<R, I>(
    connection: Connection,
    frame_interval: Duration,
    renderer: &mut R,
    input: &mut I,
) -> SessionEnd
where
    R: RenderPort + ?Sized,
    I: InputPort + ?Sized,
{
    let span = info_span!("scene", connection_id = %connection.connection_id);
    scene_loop(connection, frame_interval, renderer, input)
        .instrument(span)
        .await
}

async fn scene_loop<R, I>(
    connection: Connection,
    frame_interval: Duration,
    renderer: &mut R,
    input: &mut I,
) -> SessionEnd
where
    R: RenderPort + ?Sized,
    I: InputPort + ?Sized,
{
    let Connection {
        connection_id,
        mut inbound,
        outbound,
    } = connection;

    let reload = ReloadTuning::default();
    let mut ctx = SceneContext::with_tuning(
        connection_id,
        Box::new(ChannelTransport::new(outbound)),
        TrayTuning::default(),
        reload,
    );
    let mut dispatcher = Dispatcher::subscribe(&mut ctx);
    let mut control = ControlLoop::new();
    ctx.render.flush_into(&mut *renderer);

    let mut frames = interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut reload_ticks = interval(reload.tick_quantum);
    reload_ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // Inbound server event, in arrival order.
            event = inbound.recv() => {
                let Some(event) = event else {
                    info!("inbound stream closed; tearing down scene");
                    drop(ctx.teardown());
                    ctx.render.flush_into(&mut *renderer);
                    return SessionEnd::Disconnected;
                };
                let outcome = dispatcher.dispatch(&mut ctx, &event);
                debug!(event = %event.name, ?outcome, "dispatched");
            }

            // Render/update frame.
            _ = frames.tick() => {
                let frame = input.sample();
                if let Err(e) = control.frame(&mut ctx, &frame, Instant::now()) {
                    error!(error = %e, "control frame rejected");
                }
            }

            // Reload bar timer, independent of the frame rate.
            _ = reload_ticks.tick() => {
                ctx.tick_reloads();
            }
        }

        ctx.render.flush_into(&mut *renderer);
        if let Some(end) = ctx.take_end_of_game() {
            return SessionEnd::GameOver { end, inbound };
        }
    }
}

pub async fn run<R, I>(
    config: &ClientConfig,
    renderer: &mut R,
    input: &mut I,
) -> std::result::Result<SessionEnd, NetError>
where
    R: RenderPort + ?Sized,
    I: InputPort + ?Sized,
{
    let connection = connect(&config.transport).await.inspect_err(|e| {
        error!(url = %config.transport.url, error = %e, "failed to connect");
    })?;
    Ok(run_session(connection, config.frame_interval, renderer, input).await)
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let config = ClientConfig::from_env();
    let mut renderer = TracingRenderer::new();
    let mut input = IdleInput::default();

    match run(&config, &mut renderer, &mut input).await {
        Ok(SessionEnd::GameOver { end, .. }) => {
            info!(data = %end.data, render_commands = renderer.applied(), "game over");
            Ok(())
        }
        Ok(SessionEnd::Disconnected) => {
            info!(render_commands = renderer.applied(), "disconnected before game over");
            Ok(())
        }
        Err(e) => Err(std::io::Error::other(e)),
    }
}
