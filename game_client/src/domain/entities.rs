// Locally mirrored copies of server-owned entities.

use crate::domain::tuning::layout::BARREL_OFFSET_Y;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned identifier. Numeric ids are kept in their decimal form so that snapshot
/// map keys (`"7"`) and ids delivered as numbers (`7`) compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => Self(id),
            RawId::Signed(id) => Self(id.to_string()),
            RawId::Unsigned(id) => Self(id.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Missile stock for a player, plus the generation counter reload indicators snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ammo {
    pub count: u32,
    pub max: u32,
    // Bumped every time `max` changes.
    pub generation: u64,
}

impl Ammo {
    pub fn new(count: u32, max: u32) -> Self {
        Self {
            count,
            max,
            generation: 0,
        }
    }

    /// Overwrites both counters. Returns true when `max` changed and the generation moved.
    pub fn set(&mut self, count: u32, max: u32) -> bool {
        let max_changed = self.max != max;
        self.count = count;
        self.max = max;
        if max_changed {
            self.generation += 1;
        }
        max_changed
    }

    pub fn label(&self) -> String {
        format!("{}/{}", self.count, self.max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalPlayer {
    pub id: EntityId,
    pub position: Vec2,
    pub rotation: f32,
    pub ammo: Ammo,
    // Firing gate; only the local player tracks it.
    pub out_of_ammo: bool,
}

impl LocalPlayer {
    pub fn new(id: EntityId, position: Vec2, ammo: Ammo) -> Self {
        Self {
            id,
            position,
            rotation: 0.0,
            out_of_ammo: false,
            ammo,
        }
    }

    /// Where the barrel sprite sits; aiming and shots originate here.
    pub fn barrel_position(&self) -> Vec2 {
        self.position.offset(0.0, BARREL_OFFSET_Y)
    }

    pub fn can_fire(&self) -> bool {
        !self.out_of_ammo
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemotePlayer {
    pub id: EntityId,
    pub position: Vec2,
    pub rotation: f32,
    pub ammo: Ammo,
}

impl RemotePlayer {
    pub fn barrel_position(&self) -> Vec2 {
        self.position.offset(0.0, BARREL_OFFSET_Y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Missile {
    pub id: EntityId,
    pub position: Vec2,
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comet {
    pub id: EntityId,
    pub position: Vec2,
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Crosshair {
    pub id: EntityId,
    pub position: Vec2,
}
