// Scene layout constants shared by the mirrored entities and their render commands.

/// Vertical offset from a player's server position to its barrel and body sprites.
pub const BARREL_OFFSET_Y: f32 = -10.0;

/// Source size in pixels of one explosion frame; server sizes are divided by this.
pub const EXPLOSION_FRAME_SIZE: f32 = 16.0;

/// Fixed explosion scale used when a comet reaches the base.
pub const BASE_HIT_EXPLOSION_SCALE: f32 = 4.5;
