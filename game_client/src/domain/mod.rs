// Domain layer: mirrored entity types, geometry and the keyed registry.

pub mod controls;
pub mod entities;
pub mod errors;
pub mod geometry;
pub mod ports;
pub mod registry;
pub mod render;
pub mod tuning;

pub use controls::{DebugField, InputFrame, Key, Pointer, UpgradeKind};
pub use entities::{Ammo, Comet, Crosshair, EntityId, LocalPlayer, Missile, RemotePlayer, Vec2};
pub use errors::{GeometryError, PayloadError};
pub use geometry::aim_heading;
pub use ports::{InputPort, RenderPort};
pub use registry::{AmmoUpdate, Collection, EntityRegistry, Mirrored};
pub use render::{Clip, HudSlot, RenderCommand, SpriteKind};
