// Headless render port: every command becomes a trace event.

use crate::domain::{Clip, RenderCommand, RenderPort};
use tracing::{debug, info, trace};

#[derive(Debug, Default)]
pub struct TracingRenderer {
    applied: u64,
}

impl TracingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> u64 {
        self.applied
    }
}

impl RenderPort for TracingRenderer {
    fn apply(&mut self, command: RenderCommand) {
        self.applied += 1;
        match command {
            // Per-frame churn.
            RenderCommand::Move { kind, id, position } => {
                trace!(?kind, %id, x = position.x, y = position.y, "move");
            }
            RenderCommand::Rotate { kind, id, rotation } => {
                trace!(?kind, %id, rotation, "rotate");
            }
            RenderCommand::ReloadBarFill { owner, fill } => {
                trace!(%owner, fill, "reload bar fill");
            }
            RenderCommand::Explosion {
                position,
                scale,
                time_scale,
            } => {
                debug!(
                    clip = ?Clip::Explode,
                    x = position.x,
                    y = position.y,
                    scale,
                    time_scale,
                    "explosion"
                );
            }
            RenderCommand::SetText { slot, text } => {
                info!(?slot, %text, "hud text");
            }
            other => debug!(command = ?other, "render"),
        }
    }
}
