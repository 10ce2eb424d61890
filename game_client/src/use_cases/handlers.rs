// Handlers behind the dispatcher table. Each takes the scene context and the event's
// positional args. Unknown ids are silent no-ops; a malformed payload returns an error and
// skips only the affected sub-operation.

use crate::domain::tuning::layout::{BASE_HIT_EXPLOSION_SCALE, EXPLOSION_FRAME_SIZE};
use crate::domain::{
    Ammo, Clip, Comet, Crosshair, DebugField, EntityId, HudSlot, LocalPlayer, Missile,
    PayloadError, RemotePlayer, RenderCommand, SpriteKind, UpgradeKind, Vec2,
};
use crate::use_cases::context::{EndOfGame, SceneContext};
use crate::use_cases::debug::{DebugBaseline, DebugSession};
use crate::use_cases::payload::{
    BodyInfo, CrosshairInfo, PlayerInfo, PlayerRotation, SnapshotPosition, arg, display_value,
    entries, parse, parse_arg, truthy, tuple_args,
};
use crate::use_cases::reload::ReloadIndicator;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

pub type Handler = fn(&mut SceneContext, &[Value]) -> Result<(), PayloadError>;

// Players

pub fn current_players(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    for (_, entry) in entries(arg(args, 0)?, "players")? {
        match parse::<PlayerInfo>(entry, "player") {
            Ok(info) if info.player_id == ctx.connection_id => spawn_local(ctx, info),
            Ok(info) => spawn_remote(ctx, info),
            Err(e) => warn!(error = %e, "skipping malformed player entry"),
        }
    }
    Ok(())
}

pub fn new_player(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let info: PlayerInfo = parse_arg(args, 0, "player")?;
    spawn_remote(ctx, info);
    Ok(())
}

fn spawn_player_sprites(
    ctx: &mut SceneContext,
    id: &EntityId,
    barrel: Vec2,
    rotation: f32,
    ammo: Ammo,
) {
    ctx.render.push(RenderCommand::Spawn {
        kind: SpriteKind::TankBody,
        id: id.clone(),
        position: barrel,
        rotation: 0.0,
    });
    ctx.render.push(RenderCommand::Spawn {
        kind: SpriteKind::TankBarrel,
        id: id.clone(),
        position: barrel,
        rotation,
    });
    ctx.render.push(RenderCommand::AmmoCounter {
        owner: id.clone(),
        x: barrel.x,
        text: ammo.label(),
    });
}

fn despawn_player_sprites(ctx: &mut SceneContext, id: &EntityId) {
    ctx.render.push(RenderCommand::RemoveAmmoCounter { owner: id.clone() });
    ctx.render.push(RenderCommand::Despawn {
        kind: SpriteKind::TankBarrel,
        id: id.clone(),
    });
    ctx.render.push(RenderCommand::Despawn {
        kind: SpriteKind::TankBody,
        id: id.clone(),
    });
}

// Firing stays open until a `missileCountChange` reports an empty magazine.
fn spawn_local(ctx: &mut SceneContext, info: PlayerInfo) {
    let mut player = LocalPlayer::new(
        info.player_id.clone(),
        info.position(),
        Ammo::new(info.missiles, info.max_missiles),
    );
    player.rotation = info.rotation;

    if ctx.registry.set_local(player.clone()).is_some() {
        debug!(entity_id = %player.id, "local player replaced");
        despawn_player_sprites(ctx, &player.id);
    }
    spawn_player_sprites(ctx, &player.id, player.barrel_position(), player.rotation, player.ammo);
    info!(entity_id = %player.id, "local player mirrored");
}

fn spawn_remote(ctx: &mut SceneContext, info: PlayerInfo) {
    let player = RemotePlayer {
        id: info.player_id.clone(),
        position: info.position(),
        rotation: info.rotation,
        ammo: Ammo::new(info.missiles, info.max_missiles),
    };
    let (id, barrel, rotation, ammo) = (
        player.id.clone(),
        player.barrel_position(),
        player.rotation,
        player.ammo,
    );

    if ctx.registry.remote_players.create(player).is_some() {
        debug!(entity_id = %id, "remote player replaced");
        despawn_player_sprites(ctx, &id);
    }
    spawn_player_sprites(ctx, &id, barrel, rotation, ammo);
    debug!(entity_id = %id, "remote player mirrored");
}

pub fn disconnect(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let id: EntityId = parse_arg(args, 0, "playerId")?;
    if ctx.registry.remote_players.destroy(&id).is_none() {
        debug!(entity_id = %id, "disconnect for unknown player");
        return Ok(());
    }
    let SceneContext {
        reloads, render, ..
    } = ctx;
    reloads.cancel(&id, render);
    despawn_player_sprites(ctx, &id);
    info!(entity_id = %id, "remote player left");
    Ok(())
}

pub fn player_moved(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let moved: PlayerRotation = parse_arg(args, 0, "playerInfo")?;
    let Some(player) = ctx.registry.remote_players.get_mut(&moved.player_id) else {
        return Ok(());
    };
    player.rotation = moved.rotation;
    ctx.render.push(RenderCommand::Rotate {
        kind: SpriteKind::TankBarrel,
        id: moved.player_id,
        rotation: moved.rotation,
    });
    Ok(())
}

pub fn missile_fired(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let id: EntityId = parse_arg(args, 0, "playerId")?;
    if ctx.registry.remote_players.contains(&id) {
        ctx.render.push(RenderCommand::Play {
            kind: SpriteKind::TankBarrel,
            id,
            clip: Clip::Fire,
        });
    }
    Ok(())
}

pub fn missile_count_change(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let id: EntityId = parse_arg(args, 0, "id")?;
    let count: u32 = parse_arg(args, 1, "newAmount")?;
    let max: u32 = parse_arg(args, 2, "maxAmount")?;
    let display_bar = truthy(args.get(4));

    let Some(update) = ctx.registry.update_ammo(&id, count, max) else {
        debug!(entity_id = %id, "missile count for unknown player");
        return Ok(());
    };
    ctx.render.push(RenderCommand::AmmoCounter {
        owner: id.clone(),
        x: update.anchor_x,
        text: update.ammo.label(),
    });

    // The counter above stands even when the reload bar's duration is unusable.
    if display_bar {
        let regen_ms: f64 = parse_arg(args, 3, "regenTime")?;
        let duration = Duration::try_from_secs_f64(regen_ms / 1000.0)
            .map_err(|e| PayloadError::invalid("regenTime", e.to_string()))?;
        let indicator = ReloadIndicator::new(id, update.anchor_x, duration, update.ammo.generation);
        let SceneContext {
            reloads, render, ..
        } = ctx;
        reloads.spawn(indicator, render);
    }
    Ok(())
}

// Missiles, comets, crosshairs

pub fn new_missile(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let info: BodyInfo = parse_arg(args, 0, "missile")?;
    let position = info.position();
    let missile = Missile {
        id: info.id.clone(),
        position,
        rotation: info.rotation,
    };
    if ctx.registry.missiles.create(missile).is_some() {
        despawn(ctx, SpriteKind::Missile, &info.id);
    }
    spawn(ctx, SpriteKind::Missile, info.id, position, info.rotation);
    Ok(())
}

pub fn new_comet(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let info: BodyInfo = parse_arg(args, 0, "comet")?;
    add_comet(ctx, info);
    Ok(())
}

pub fn init_comets(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    for (_, entry) in entries(arg(args, 0)?, "comets")? {
        match parse::<BodyInfo>(entry, "comet") {
            Ok(info) => add_comet(ctx, info),
            Err(e) => warn!(error = %e, "skipping malformed comet entry"),
        }
    }
    Ok(())
}

fn add_comet(ctx: &mut SceneContext, info: BodyInfo) {
    let position = info.position();
    let comet = Comet {
        id: info.id.clone(),
        position,
        rotation: info.rotation,
    };
    if ctx.registry.comets.create(comet).is_some() {
        despawn(ctx, SpriteKind::Comet, &info.id);
    }
    spawn(ctx, SpriteKind::Comet, info.id, position, info.rotation);
}

pub fn new_crosshair(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let info: CrosshairInfo = parse_arg(args, 0, "crosshair")?;
    let position = Vec2::new(info.mouse_x, info.mouse_y);
    let crosshair = Crosshair {
        id: info.id.clone(),
        position,
    };
    if ctx.registry.crosshairs.create(crosshair).is_some() {
        despawn(ctx, SpriteKind::Crosshair, &info.id);
    }
    spawn(ctx, SpriteKind::Crosshair, info.id, position, 0.0);
    Ok(())
}

pub fn missile_destroyed(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let id: EntityId = parse_arg(args, 0, "missileId")?;
    let Some(missile) = ctx.registry.missiles.destroy(&id) else {
        return Ok(());
    };
    despawn(ctx, SpriteKind::Missile, &id);
    explode_scaled(ctx, missile.position, args)
}

pub fn comet_destroyed(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let id: EntityId = parse_arg(args, 0, "cometId")?;
    let Some(comet) = ctx.registry.comets.destroy(&id) else {
        return Ok(());
    };
    despawn(ctx, SpriteKind::Comet, &id);
    explode_scaled(ctx, comet.position, args)
}

// Explosion sized by args[1] and slowed by args[2]. A bad duration plays at normal speed.
fn explode_scaled(
    ctx: &mut SceneContext,
    position: Vec2,
    args: &[Value],
) -> Result<(), PayloadError> {
    let size: f32 = parse_arg(args, 1, "size")?;
    let time_scale = args
        .get(2)
        .and_then(Value::as_f64)
        .filter(|duration| duration.is_finite() && *duration > 0.0)
        .map_or(1.0, |duration| (1.0 / duration) as f32);

    ctx.render.push(RenderCommand::Explosion {
        position,
        scale: size / EXPLOSION_FRAME_SIZE,
        time_scale,
    });
    Ok(())
}

pub fn crosshair_destroyed(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let id: EntityId = parse_arg(args, 0, "crosshairId")?;
    if ctx.registry.crosshairs.destroy(&id).is_some() {
        despawn(ctx, SpriteKind::Crosshair, &id);
    }
    Ok(())
}

pub fn base_damaged(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let args = tuple_args(args);
    let id: EntityId = parse_arg(args, 0, "cometId")?;
    if let Some(comet) = ctx.registry.comets.destroy(&id) {
        despawn(ctx, SpriteKind::Comet, &id);
        ctx.render.push(RenderCommand::Explosion {
            position: comet.position,
            scale: BASE_HIT_EXPLOSION_SCALE,
            time_scale: 1.0,
        });
    }

    let health = arg(args, 1)?;
    ctx.set_text(HudSlot::BaseHealth, display_value(health));
    Ok(())
}

pub fn missile_update(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    apply_snapshot(ctx, SpriteKind::Missile, arg(args, 0)?)
}

pub fn comet_update(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    apply_snapshot(ctx, SpriteKind::Comet, arg(args, 0)?)
}

// Overwrites positions for ids in the snapshot. Ids missing from it stay where they are.
fn apply_snapshot(
    ctx: &mut SceneContext,
    kind: SpriteKind,
    snapshot: &Value,
) -> Result<(), PayloadError> {
    let Value::Object(map) = snapshot else {
        return Err(PayloadError::invalid("snapshot", "expected a map keyed by id"));
    };

    for (key, entry) in map {
        let Ok(position) = parse::<SnapshotPosition>(entry, "position") else {
            continue;
        };
        let id = EntityId::from(key.as_str());
        let position = Vec2::new(position.x, position.y);
        let applied = match kind {
            SpriteKind::Missile => ctx.registry.missiles.update_position(&id, position, None),
            SpriteKind::Comet => ctx.registry.comets.update_position(&id, position, None),
            _ => false,
        };
        if applied {
            ctx.render.push(RenderCommand::Move { kind, id, position });
        }
    }
    Ok(())
}

fn spawn(ctx: &mut SceneContext, kind: SpriteKind, id: EntityId, position: Vec2, rotation: f32) {
    ctx.render.push(RenderCommand::Spawn {
        kind,
        id,
        position,
        rotation,
    });
}

fn despawn(ctx: &mut SceneContext, kind: SpriteKind, id: &EntityId) {
    ctx.render.push(RenderCommand::Despawn {
        kind,
        id: id.clone(),
    });
}

// HUD passthroughs

fn set_slot_from_arg(
    ctx: &mut SceneContext,
    slot: HudSlot,
    args: &[Value],
) -> Result<(), PayloadError> {
    let value = arg(args, 0)?;
    ctx.set_text(slot, display_value(value));
    Ok(())
}

pub fn round_text(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    set_slot_from_arg(ctx, HudSlot::Round, args)
}

pub fn timer_text(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    set_slot_from_arg(ctx, HudSlot::Timer, args)
}

pub fn health_text(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    set_slot_from_arg(ctx, HudSlot::BaseHealth, args)
}

pub fn score_text(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    set_slot_from_arg(ctx, HudSlot::Score, args)
}

pub fn credits_text(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    set_slot_from_arg(ctx, HudSlot::Credits, args)
}

pub fn update_cost(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let args = tuple_args(args);
    let kind: String = parse_arg(args, 0, "upgradeType")?;
    let kind = UpgradeKind::from_wire(&kind)
        .ok_or_else(|| PayloadError::invalid("upgradeType", format!("unknown upgrade {kind}")))?;
    let cost = display_value(arg(args, 1)?);
    ctx.set_text(HudSlot::Upgrade(kind), kind.button_label(&cost));
    Ok(())
}

/// Lays out the shop buttons with their starting costs.
pub fn build_shop(ctx: &mut SceneContext) {
    for kind in UpgradeKind::ALL {
        let cost = kind.starting_cost().to_string();
        ctx.set_text(HudSlot::Upgrade(kind), kind.button_label(&cost));
    }
}

pub fn spectate(ctx: &mut SceneContext, _args: &[Value]) -> Result<(), PayloadError> {
    ctx.spectating = true;
    ctx.set_text(HudSlot::Spectating, "Spectating");
    info!("spectating");
    Ok(())
}

// Debug overlay

pub fn debug_session(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let baseline: DebugBaseline = match args.first() {
        Some(value) if !value.is_null() => parse(value, "debug")?,
        _ => DebugBaseline::default(),
    };

    let session = DebugSession::new(baseline);
    let lines: Vec<_> = DebugField::ALL
        .into_iter()
        .map(|field| {
            let value = session.baseline().value_for(field).map(display_value);
            (field, field.overlay_line(value.as_deref()))
        })
        .collect();

    ctx.set_text(HudSlot::DebugBanner, "Debug");
    for (field, line) in lines {
        ctx.set_text(HudSlot::DebugLine(field), line);
    }
    ctx.debug = Some(session);
    info!("debug session active");
    Ok(())
}

fn debug_line(
    ctx: &mut SceneContext,
    field: DebugField,
    args: &[Value],
) -> Result<(), PayloadError> {
    if !ctx.is_debug_active() {
        return Ok(());
    }
    let value = display_value(arg(args, 0)?);
    ctx.set_text(HudSlot::DebugLine(field), field.overlay_line(Some(&value)));
    Ok(())
}

pub fn regen_speed_change(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    debug_line(ctx, DebugField::RegenSpeed, args)
}

pub fn comet_limit_change(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    debug_line(ctx, DebugField::CometLimit, args)
}

pub fn comet_rate_change(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    debug_line(ctx, DebugField::CometRate, args)
}

pub fn comet_health_change(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    debug_line(ctx, DebugField::CometHealth, args)
}

pub fn comet_speed_change(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    debug_line(ctx, DebugField::CometSpeed, args)
}

pub fn base_health_change(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    if !ctx.is_debug_active() {
        return Ok(());
    }
    set_slot_from_arg(ctx, HudSlot::BaseHealth, args)
}

// Scene exit

pub fn game_over(ctx: &mut SceneContext, args: &[Value]) -> Result<(), PayloadError> {
    let data = args.first().cloned().unwrap_or(Value::Null);
    let transport = ctx.teardown();
    info!("game over; handing off to end scene");
    ctx.finish(EndOfGame { data, transport });
    Ok(())
}
