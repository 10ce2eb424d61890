// Use-case level inputs/outputs exchanged with the transport collaborator.

use crate::domain::{DebugField, UpgradeKind};
use serde_json::Value;

/// A named server event with positional payload values, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub name: String,
    pub args: Vec<Value>,
}

impl InboundEvent {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotInfo {
    pub x: f32,
    pub y: f32,
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    RequestInitialize,
    RotationChange { radians: f32 },
    MissileShot(ShotInfo),
    EnterDebug,
    AttemptUpgrade(UpgradeKind),
    // `delta` is absent for fields whose adjustment carries no payload.
    DebugAdjust { field: DebugField, delta: Option<i32> },
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::RequestInitialize => "requestInitialize",
            OutboundEvent::RotationChange { .. } => "rotationChange",
            OutboundEvent::MissileShot(_) => "missileShot",
            OutboundEvent::EnterDebug => "enterDebug",
            OutboundEvent::AttemptUpgrade(_) => "attemptUpgrade",
            OutboundEvent::DebugAdjust { field, .. } => field.event_name(),
        }
    }
}

// Port for fire-and-forget sends to the server. Implementations must never block.
pub trait TransportPort: Send {
    fn emit(&mut self, event: OutboundEvent);
}
