// Per-frame local control: aim, tray, fire, shop and debug keys. Runs on the frame
// interval, independently of inbound events.

use crate::domain::{
    Clip, GeometryError, HudSlot, InputFrame, Key, RenderCommand, SpriteKind, aim_heading,
};
use crate::use_cases::context::SceneContext;
use crate::use_cases::debug::DebugAction;
use crate::use_cases::types::{OutboundEvent, ShotInfo};
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ControlLoop {
    // Set on a shot; cleared once the pointer is seen up.
    fire_latch: bool,
}

impl ControlLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// One frame of input. Non-finite pointer coordinates fail the frame before anything
    /// is emitted.
    pub fn frame(
        &mut self,
        ctx: &mut SceneContext,
        input: &InputFrame,
        now: Instant,
    ) -> Result<(), GeometryError> {
        // Nothing to control until the local tank is mirrored.
        if ctx.is_torn_down() || ctx.spectating || ctx.registry.local().is_none() {
            return Ok(());
        }

        if !input.pointer.is_down {
            self.fire_latch = false;
        }

        self.steer(ctx, input, now)?;

        if let Some(kind) = input.upgrade_clicked {
            ctx.emit(OutboundEvent::AttemptUpgrade(kind));
        }

        for &key in &input.key_events {
            handle_key(ctx, key);
        }
        if let Some(session) = ctx.debug.as_mut() {
            session.observe_held(|key| input.is_held(key));
        }
        Ok(())
    }

    fn steer(
        &mut self,
        ctx: &mut SceneContext,
        input: &InputFrame,
        now: Instant,
    ) -> Result<(), GeometryError> {
        let Some(player) = ctx.registry.local_mut() else {
            return Ok(());
        };
        let pointer = input.pointer;
        let barrel = player.barrel_position();
        let rotation = aim_heading(pointer.x, pointer.y, barrel.x, barrel.y)?;
        player.rotation = rotation;
        let id = player.id.clone();
        let can_fire = player.can_fire();

        ctx.render.push(RenderCommand::Rotate {
            kind: SpriteKind::TankBarrel,
            id: id.clone(),
            rotation,
        });
        ctx.emit(OutboundEvent::RotationChange { radians: rotation });

        if let Some(slide) = ctx.tray.update(pointer.y, now) {
            ctx.render.push(RenderCommand::SlideTray {
                offset_y: slide.offset_y,
                duration: slide.duration,
            });
        }

        let below_tray = pointer.y >= ctx.tray.cutoff_y();
        if !self.fire_latch && pointer.is_down && below_tray && can_fire {
            self.fire_latch = true;
            ctx.render.push(RenderCommand::Play {
                kind: SpriteKind::TankBarrel,
                id,
                clip: Clip::Fire,
            });
            ctx.emit(OutboundEvent::MissileShot(ShotInfo {
                x: barrel.x,
                y: barrel.y,
                mouse_x: pointer.x,
                mouse_y: pointer.y,
                rotation,
            }));
        }
        Ok(())
    }
}

fn handle_key(ctx: &mut SceneContext, key: Key) {
    if key == Key::Backquote {
        ctx.emit(OutboundEvent::EnterDebug);
        return;
    }

    let Some(session) = ctx.debug.as_mut() else {
        return;
    };
    match session.on_key_down(key) {
        DebugAction::Select(field) => {
            debug!(field = field.name(), "debug field selected");
            ctx.set_text(HudSlot::DebugBanner, format!("Debug: {}", field.name()));
        }
        DebugAction::Adjust { field, delta } => {
            ctx.emit(OutboundEvent::DebugAdjust { field, delta });
        }
        DebugAction::Nothing => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Ammo, DebugField, EntityId, LocalPlayer, UpgradeKind, Vec2};
    use crate::use_cases::debug::{DebugBaseline, DebugSession};
    use crate::use_cases::types::TransportPort;
    use tokio::sync::mpsc;

    struct Recording(mpsc::UnboundedSender<OutboundEvent>);

    impl TransportPort for Recording {
        fn emit(&mut self, event: OutboundEvent) {
            let _ = self.0.send(event);
        }
    }

    fn scene_with_local(missiles: u32) -> (SceneContext, mpsc::UnboundedReceiver<OutboundEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut ctx = SceneContext::new(EntityId::from("A"), Box::new(Recording(tx)));
        let mut player = LocalPlayer::new(
            EntityId::from("A"),
            Vec2::new(400.0, 600.0),
            Ammo::new(missiles, 5),
        );
        player.out_of_ammo = missiles == 0;
        ctx.registry.set_local(player);
        (ctx, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<OutboundEvent>) -> Vec<OutboundEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn shots(events: &[OutboundEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, OutboundEvent::MissileShot(_)))
            .count()
    }

    #[test]
    fn when_local_player_exists_then_rotation_is_sent_every_frame() {
        let (mut ctx, mut rx) = scene_with_local(3);
        let mut control = ControlLoop::new();
        let input = InputFrame::default().pointer_at(400.0, 300.0, false);

        control.frame(&mut ctx, &input, Instant::now()).expect("finite pointer");
        control.frame(&mut ctx, &input, Instant::now()).expect("finite pointer");

        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| matches!(e, OutboundEvent::RotationChange { .. })));
        // Pointer straight above the barrel.
        let rotation = ctx.registry.local().expect("local").rotation;
        assert!(rotation.abs() < 1e-5);
    }

    #[test]
    fn when_no_local_player_then_nothing_is_sent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ctx = SceneContext::new(EntityId::from("A"), Box::new(Recording(tx)));
        ctx.debug = Some(DebugSession::new(DebugBaseline::default()));
        let mut input = InputFrame::default()
            .pointer_at(10.0, 500.0, true)
            .press(Key::Backquote)
            .press(Key::Digit(0))
            .press(Key::Minus);
        input.upgrade_clicked = Some(UpgradeKind::Speed);

        ControlLoop::new()
            .frame(&mut ctx, &input, Instant::now())
            .expect("no geometry without a player");

        assert!(drain(&mut rx).is_empty());
        assert!(ctx.render.is_empty());
        let selected = ctx.debug.as_ref().and_then(|session| session.selected());
        assert_eq!(selected, None);
    }

    #[test]
    fn when_pointer_is_held_then_only_one_shot_fires_until_release() {
        let (mut ctx, mut rx) = scene_with_local(3);
        let mut control = ControlLoop::new();
        let down = InputFrame::default().pointer_at(420.0, 500.0, true);
        let up = InputFrame::default().pointer_at(420.0, 500.0, false);
        let now = Instant::now();

        control.frame(&mut ctx, &down, now).expect("frame");
        control.frame(&mut ctx, &down, now).expect("frame");
        assert_eq!(shots(&drain(&mut rx)), 1);

        control.frame(&mut ctx, &up, now).expect("frame");
        control.frame(&mut ctx, &down, now).expect("frame");
        assert_eq!(shots(&drain(&mut rx)), 1);
    }

    #[test]
    fn when_shot_fires_then_it_carries_barrel_and_pointer() {
        let (mut ctx, mut rx) = scene_with_local(3);
        let down = InputFrame::default().pointer_at(420.0, 500.0, true);

        ControlLoop::new().frame(&mut ctx, &down, Instant::now()).expect("frame");

        let shot = drain(&mut rx).into_iter().find_map(|e| match e {
            OutboundEvent::MissileShot(shot) => Some(shot),
            _ => None,
        });
        let shot = shot.expect("shot emitted");
        assert_eq!((shot.x, shot.y), (400.0, 590.0));
        assert_eq!((shot.mouse_x, shot.mouse_y), (420.0, 500.0));
    }

    #[test]
    fn when_out_of_ammo_or_pointer_over_tray_then_no_shot() {
        let (mut ctx, mut rx) = scene_with_local(0);
        let mut control = ControlLoop::new();
        control
            .frame(&mut ctx, &InputFrame::default().pointer_at(420.0, 500.0, true), Instant::now())
            .expect("frame");
        assert_eq!(shots(&drain(&mut rx)), 0);

        let (mut ctx, mut rx) = scene_with_local(3);
        control
            .frame(&mut ctx, &InputFrame::default().pointer_at(420.0, 50.0, true), Instant::now())
            .expect("frame");
        assert_eq!(shots(&drain(&mut rx)), 0);
        assert!(ctx.tray.is_extended());
    }

    #[test]
    fn when_spectating_then_frames_are_inert() {
        let (mut ctx, mut rx) = scene_with_local(3);
        ctx.spectating = true;
        let input = InputFrame::default()
            .pointer_at(420.0, 500.0, true)
            .press(Key::Backquote);

        ControlLoop::new().frame(&mut ctx, &input, Instant::now()).expect("frame");

        assert!(drain(&mut rx).is_empty());
        assert!(ctx.render.is_empty());
    }

    #[test]
    fn when_pointer_is_not_finite_then_frame_fails() {
        let (mut ctx, _rx) = scene_with_local(3);
        let input = InputFrame::default().pointer_at(f32::NAN, 10.0, false);

        let result = ControlLoop::new().frame(&mut ctx, &input, Instant::now());

        assert_eq!(result, Err(GeometryError::InvalidArgument));
    }

    #[test]
    fn when_shop_button_clicked_then_upgrade_is_attempted() {
        let (mut ctx, mut rx) = scene_with_local(3);
        let mut input = InputFrame::default().pointer_at(100.0, 50.0, true);
        input.upgrade_clicked = Some(UpgradeKind::MaxMissiles);

        ControlLoop::new().frame(&mut ctx, &input, Instant::now()).expect("frame");

        assert!(drain(&mut rx).contains(&OutboundEvent::AttemptUpgrade(UpgradeKind::MaxMissiles)));
    }

    #[test]
    fn when_debug_key_pressed_then_enter_debug_is_requested() {
        let (mut ctx, mut rx) = scene_with_local(3);
        let input = InputFrame::default().pointer_at(400.0, 300.0, false).press(Key::Backquote);

        ControlLoop::new().frame(&mut ctx, &input, Instant::now()).expect("frame");

        assert!(drain(&mut rx).contains(&OutboundEvent::EnterDebug));
        assert!(ctx.debug.is_none());
    }

    #[test]
    fn when_minus_is_held_on_comet_speed_then_one_adjustment_until_release() {
        let (mut ctx, mut rx) = scene_with_local(3);
        ctx.debug = Some(DebugSession::new(DebugBaseline::default()));
        let mut control = ControlLoop::new();
        let now = Instant::now();
        let at = |frame: InputFrame| frame.pointer_at(400.0, 300.0, false);

        let frames = [
            at(InputFrame::default().press(Key::Digit(0))),
            at(InputFrame::default().press(Key::Minus)),
            // Auto-repeat while held.
            at(InputFrame::default().press(Key::Minus)),
            at(InputFrame::default().hold(Key::Minus)),
        ];
        for frame in &frames {
            control.frame(&mut ctx, frame, now).expect("frame");
        }

        let adjustments: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter(|e| matches!(e, OutboundEvent::DebugAdjust { .. }))
            .collect();
        assert_eq!(
            adjustments,
            vec![OutboundEvent::DebugAdjust {
                field: DebugField::CometSpeed,
                delta: Some(-1),
            }]
        );
        assert_eq!(ctx.hud.get(HudSlot::DebugBanner), Some("Debug: cometSpeed"));

        control.frame(&mut ctx, &at(InputFrame::default()), now).expect("frame");
        control.frame(&mut ctx, &at(InputFrame::default().press(Key::Minus)), now).expect("frame");
        let again = drain(&mut rx)
            .into_iter()
            .filter(|e| matches!(e, OutboundEvent::DebugAdjust { .. }))
            .count();
        assert_eq!(again, 1);
    }
}
