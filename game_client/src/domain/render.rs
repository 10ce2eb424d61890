// Commands handed to the render collaborator. The core never touches sprites directly.

use crate::domain::controls::{DebugField, UpgradeKind};
use crate::domain::entities::{EntityId, Vec2};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    TankBody,
    TankBarrel,
    Missile,
    Comet,
    Crosshair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clip {
    Explode,
    Fire,
}

/// HUD text slots owned by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HudSlot {
    Round,
    Timer,
    BaseHealth,
    Score,
    Credits,
    Upgrade(UpgradeKind),
    Spectating,
    DebugBanner,
    DebugLine(DebugField),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Spawn {
        kind: SpriteKind,
        id: EntityId,
        position: Vec2,
        rotation: f32,
    },
    Despawn {
        kind: SpriteKind,
        id: EntityId,
    },
    Move {
        kind: SpriteKind,
        id: EntityId,
        position: Vec2,
    },
    Rotate {
        kind: SpriteKind,
        id: EntityId,
        rotation: f32,
    },
    Play {
        kind: SpriteKind,
        id: EntityId,
        clip: Clip,
    },
    // One-shot effect; the renderer owns and removes it.
    Explosion {
        position: Vec2,
        scale: f32,
        time_scale: f32,
    },
    // Creates or rewrites the "count/max" counter under a player.
    AmmoCounter {
        owner: EntityId,
        x: f32,
        text: String,
    },
    RemoveAmmoCounter {
        owner: EntityId,
    },
    ShowReloadBar {
        owner: EntityId,
        x: f32,
    },
    ReloadBarFill {
        owner: EntityId,
        fill: f32,
    },
    RemoveReloadBar {
        owner: EntityId,
    },
    SlideTray {
        offset_y: f32,
        duration: Duration,
    },
    SetText {
        slot: HudSlot,
        text: String,
    },
}
