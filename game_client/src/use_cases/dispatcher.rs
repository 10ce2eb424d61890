// Maps inbound event names to handlers. The table is data; `subscribe` builds the lookup
// once per scene and `dispatch` runs events strictly in the order they are handed in.

use crate::use_cases::context::SceneContext;
use crate::use_cases::handlers::{self, Handler};
use crate::use_cases::types::{InboundEvent, OutboundEvent};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const LOG_THROTTLE: Duration = Duration::from_secs(2);

const HANDLERS: &[(&str, Handler)] = &[
    ("currentPlayers", handlers::current_players),
    ("newPlayer", handlers::new_player),
    ("newMissile", handlers::new_missile),
    ("newCrosshair", handlers::new_crosshair),
    ("newComet", handlers::new_comet),
    ("initComets", handlers::init_comets),
    ("missileCountChange", handlers::missile_count_change),
    ("missileDestroyed", handlers::missile_destroyed),
    ("cometDestroyed", handlers::comet_destroyed),
    ("crosshairDestroyed", handlers::crosshair_destroyed),
    ("disconnect", handlers::disconnect),
    ("baseDamaged", handlers::base_damaged),
    ("missileUpdate", handlers::missile_update),
    ("cometUpdate", handlers::comet_update),
    ("playerMoved", handlers::player_moved),
    ("missileFired", handlers::missile_fired),
    ("timerUpdate", handlers::timer_text),
    ("updateCredits", handlers::credits_text),
    ("updateScore", handlers::score_text),
    ("updateRound", handlers::round_text),
    ("updateCost", handlers::update_cost),
    ("initHealth", handlers::health_text),
    ("initTimer", handlers::timer_text),
    ("initCredits", handlers::credits_text),
    ("initScore", handlers::score_text),
    ("initRound", handlers::round_text),
    ("spectate", handlers::spectate),
    ("debug", handlers::debug_session),
    ("regenSpeedChange", handlers::regen_speed_change),
    ("cometLimitChange", handlers::comet_limit_change),
    ("cometRateChange", handlers::comet_rate_change),
    ("cometHealthChange", handlers::comet_health_change),
    ("cometSpeedChange", handlers::comet_speed_change),
    ("baseHealthChange", handlers::base_health_change),
    ("gameOver", handlers::game_over),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied,
    // No handler for this event name.
    Unhandled,
    // Payload was rejected; state is unchanged past the failing sub-operation.
    Malformed,
    // Scene already torn down.
    Ignored,
}

pub struct Dispatcher {
    handlers: HashMap<&'static str, Handler>,
    last_malformed_log: Instant,
}

impl Dispatcher {
    /// Registers every handler and announces the scene to the server. The registry and UI
    /// state in `ctx` must already exist.
    pub fn subscribe(ctx: &mut SceneContext) -> Self {
        let handlers = HANDLERS.iter().copied().collect::<HashMap<_, _>>();
        handlers::build_shop(ctx);
        ctx.emit(OutboundEvent::RequestInitialize);
        info!(events = handlers.len(), "dispatcher subscribed");

        Self {
            handlers,
            last_malformed_log: Instant::now() - LOG_THROTTLE,
        }
    }

    pub fn handles(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn dispatch(&mut self, ctx: &mut SceneContext, event: &InboundEvent) -> DispatchOutcome {
        if ctx.is_torn_down() {
            debug!(event = %event.name, "scene torn down; dropping event");
            return DispatchOutcome::Ignored;
        }

        let Some(&handler) = self.handlers.get(event.name.as_str()) else {
            debug!(event = %event.name, "no handler for event");
            return DispatchOutcome::Unhandled;
        };

        match handler(ctx, &event.args) {
            Ok(()) => DispatchOutcome::Applied,
            Err(e) => {
                if should_log(&mut self.last_malformed_log) {
                    warn!(event = %event.name, error = %e, "malformed event payload");
                }
                DispatchOutcome::Malformed
            }
        }
    }
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}
