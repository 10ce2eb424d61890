// Wire protocol DTOs for the game server WebSocket.
// Every frame in either direction is `{"event": <name>, "args": [...]}`.

use crate::domain::UpgradeKind;
use crate::use_cases::{InboundEvent, OutboundEvent};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// First inbound event on a connection; carries the own connection id.
pub const SESSION_EVENT: &str = "session";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFrame {
    pub event: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl EventFrame {
    pub fn new(event: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            event: event.into(),
            args,
        }
    }
}

impl From<EventFrame> for InboundEvent {
    fn from(frame: EventFrame) -> Self {
        InboundEvent::new(frame.event, frame.args)
    }
}

impl From<&OutboundEvent> for EventFrame {
    fn from(event: &OutboundEvent) -> Self {
        let args = match event {
            OutboundEvent::RequestInitialize | OutboundEvent::EnterDebug => Vec::new(),
            OutboundEvent::RotationChange { radians } => vec![json!(radians)],
            OutboundEvent::MissileShot(shot) => vec![json!({
                "x": shot.x,
                "y": shot.y,
                "mouseX": shot.mouse_x,
                "mouseY": shot.mouse_y,
                "rotation": shot.rotation,
            })],
            OutboundEvent::AttemptUpgrade(kind) => vec![upgrade_arg(*kind)],
            OutboundEvent::DebugAdjust { delta, .. } => delta.iter().map(|d| json!(d)).collect(),
        };
        EventFrame::new(event.name(), args)
    }
}

fn upgrade_arg(kind: UpgradeKind) -> Value {
    Value::String(kind.wire_name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DebugField;
    use crate::use_cases::ShotInfo;

    #[test]
    fn when_args_are_absent_then_frame_defaults_to_empty() {
        let frame: EventFrame =
            serde_json::from_str(r#"{"event":"spectate"}"#).expect("valid frame");
        let event = InboundEvent::from(frame);
        assert_eq!(event.name, "spectate");
        assert!(event.args.is_empty());
    }

    #[test]
    fn when_shot_is_encoded_then_payload_uses_camel_case() {
        let shot = OutboundEvent::MissileShot(ShotInfo {
            x: 1.0,
            y: 2.0,
            mouse_x: 3.0,
            mouse_y: 4.0,
            rotation: 0.5,
        });

        let text = serde_json::to_value(EventFrame::from(&shot)).expect("serializes");

        assert_eq!(
            text,
            json!({
                "event": "missileShot",
                "args": [{"x": 1.0, "y": 2.0, "mouseX": 3.0, "mouseY": 4.0, "rotation": 0.5}],
            })
        );
    }

    #[test]
    fn when_debug_adjust_has_no_step_then_args_are_empty() {
        let round = EventFrame::from(&OutboundEvent::DebugAdjust {
            field: DebugField::Round,
            delta: None,
        });
        let rate = EventFrame::from(&OutboundEvent::DebugAdjust {
            field: DebugField::CometRate,
            delta: Some(500),
        });

        assert_eq!(round, EventFrame::new("changeRound", vec![]));
        assert_eq!(rate, EventFrame::new("changeCometRate", vec![json!(500)]));
    }

    #[test]
    fn when_upgrade_is_attempted_then_wire_name_is_sent() {
        let frame = EventFrame::from(&OutboundEvent::AttemptUpgrade(UpgradeKind::RegenSpeed));
        assert_eq!(frame.args, vec![json!("regenSpeed")]);
    }
}
