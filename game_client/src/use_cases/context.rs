// Explicit scene context shared by the dispatcher, the timed controllers and the control loop.
//
// Initialization order: the registry and UI state exist before `Dispatcher::subscribe`
// runs. `teardown` is the single exit point; it drops timers and hands the transport back.

use crate::domain::tuning::{ReloadTuning, TrayTuning};
use crate::domain::{EntityId, EntityRegistry, HudSlot, RenderCommand, RenderPort, SpriteKind};
use crate::use_cases::debug::DebugSession;
use crate::use_cases::hud::Hud;
use crate::use_cases::reload::ReloadIndicators;
use crate::use_cases::tray::TrayState;
use crate::use_cases::types::{OutboundEvent, TransportPort};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Render commands produced by one step, drained into the render port afterwards.
#[derive(Debug, Default)]
pub struct RenderQueue {
    commands: Vec<RenderCommand>,
}

impl RenderQueue {
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn drain(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn flush_into(&mut self, port: &mut (impl RenderPort + ?Sized)) {
        for command in self.commands.drain(..) {
            port.apply(command);
        }
    }
}

/// Hand-off to the end-of-game scene.
pub struct EndOfGame {
    pub data: Value,
    pub transport: Option<Box<dyn TransportPort>>,
}

impl fmt::Debug for EndOfGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndOfGame")
            .field("data", &self.data)
            .field("transport", &self.transport.is_some())
            .finish()
    }
}

pub struct SceneContext {
    // Own connection id; decides local vs remote on `currentPlayers`.
    pub connection_id: EntityId,
    pub registry: EntityRegistry,
    pub hud: Hud,
    pub tray: TrayState,
    pub reloads: ReloadIndicators,
    pub debug: Option<DebugSession>,
    pub spectating: bool,
    pub render: RenderQueue,
    transport: Option<Box<dyn TransportPort>>,
    end_of_game: Option<EndOfGame>,
    torn_down: bool,
}

impl SceneContext {
    pub fn new(connection_id: EntityId, transport: Box<dyn TransportPort>) -> Self {
        Self::with_tuning(
            connection_id,
            transport,
            TrayTuning::default(),
            ReloadTuning::default(),
        )
    }

    pub fn with_tuning(
        connection_id: EntityId,
        transport: Box<dyn TransportPort>,
        tray: TrayTuning,
        reload: ReloadTuning,
    ) -> Self {
        Self {
            connection_id,
            registry: EntityRegistry::new(),
            hud: Hud::default(),
            tray: TrayState::new(tray),
            reloads: ReloadIndicators::new(reload.tick_quantum),
            debug: None,
            spectating: false,
            render: RenderQueue::default(),
            transport: Some(transport),
            end_of_game: None,
            torn_down: false,
        }
    }

    /// Fire-and-forget send. Dropped silently once the transport has been handed off.
    pub fn emit(&mut self, event: OutboundEvent) {
        match self.transport.as_mut() {
            Some(transport) => transport.emit(event),
            None => debug!(event = event.name(), "transport released; dropping event"),
        }
    }

    pub fn set_text(&mut self, slot: HudSlot, text: impl Into<String>) {
        let text = text.into();
        self.hud.set(slot, text.clone());
        self.render.push(RenderCommand::SetText { slot, text });
    }

    pub fn is_debug_active(&self) -> bool {
        self.debug.is_some()
    }

    /// Advances every live reload indicator by one tick quantum.
    pub fn tick_reloads(&mut self) -> usize {
        let Self {
            reloads,
            registry,
            render,
            ..
        } = self;
        reloads.tick(registry, render)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Releases timers and mirrored state and returns the transport for the next scene.
    pub fn teardown(&mut self) -> Option<Box<dyn TransportPort>> {
        self.torn_down = true;
        self.despawn_all();
        self.reloads.clear();
        self.tray.reset();
        self.debug = None;
        self.registry.clear();
        self.transport.take()
    }

    // Removal commands for every sprite the registry still mirrors.
    fn despawn_all(&mut self) {
        let Self {
            registry,
            reloads,
            render,
            ..
        } = self;
        let mut despawn = |kind: SpriteKind, id: &EntityId| {
            render.push(RenderCommand::Despawn {
                kind,
                id: id.clone(),
            });
        };

        registry.missiles.for_each(|missile| despawn(SpriteKind::Missile, &missile.id));
        registry.comets.for_each(|comet| despawn(SpriteKind::Comet, &comet.id));
        registry
            .crosshairs
            .for_each(|crosshair| despawn(SpriteKind::Crosshair, &crosshair.id));

        let mut players: Vec<EntityId> = Vec::new();
        players.extend(registry.local().map(|player| player.id.clone()));
        registry
            .remote_players
            .for_each(|player| players.push(player.id.clone()));
        for id in players {
            reloads.cancel(&id, render);
            render.push(RenderCommand::RemoveAmmoCounter { owner: id.clone() });
            render.push(RenderCommand::Despawn {
                kind: SpriteKind::TankBarrel,
                id: id.clone(),
            });
            render.push(RenderCommand::Despawn {
                kind: SpriteKind::TankBody,
                id,
            });
        }
    }

    pub fn finish(&mut self, end: EndOfGame) {
        self.end_of_game = Some(end);
    }

    pub fn take_end_of_game(&mut self) -> Option<EndOfGame> {
        self.end_of_game.take()
    }
}
