// Keyed collections of mirrored entities.
//
// Creation only happens through explicit create calls; updates and destroys that name an
// unknown id are no-ops and report `false`/`None` so callers can log them.

use crate::domain::entities::{
    Ammo, Comet, Crosshair, EntityId, LocalPlayer, Missile, RemotePlayer, Vec2,
};
use std::collections::BTreeMap;

/// Anything the registry can key, move and rotate.
pub trait Mirrored {
    fn id(&self) -> &EntityId;
    fn set_position(&mut self, position: Vec2);
    fn set_rotation(&mut self, _rotation: f32) {}
}

macro_rules! mirrored_with_rotation {
    ($($ty:ty),*) => {
        $(
            impl Mirrored for $ty {
                fn id(&self) -> &EntityId {
                    &self.id
                }

                fn set_position(&mut self, position: Vec2) {
                    self.position = position;
                }

                fn set_rotation(&mut self, rotation: f32) {
                    self.rotation = rotation;
                }
            }
        )*
    };
}

mirrored_with_rotation!(RemotePlayer, Missile, Comet);

impl Mirrored for Crosshair {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

/// One entity kind, keyed by server id. Iteration order is id order.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: BTreeMap<EntityId, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<T: Mirrored> Collection<T> {
    /// Inserts the entity, replacing (and returning) any previous entry with the same id.
    pub fn create(&mut self, entity: T) -> Option<T> {
        self.items.insert(entity.id().clone(), entity)
    }

    pub fn update_position(
        &mut self,
        id: &EntityId,
        position: Vec2,
        rotation: Option<f32>,
    ) -> bool {
        let Some(entity) = self.items.get_mut(id) else {
            return false;
        };
        entity.set_position(position);
        if let Some(rotation) = rotation {
            entity.set_rotation(rotation);
        }
        true
    }

    pub fn destroy(&mut self, id: &EntityId) -> Option<T> {
        self.items.remove(id)
    }

    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut T> {
        self.items.get_mut(id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn for_each(&self, f: impl FnMut(&T)) {
        self.items.values().for_each(f);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Result of overwriting a player's ammo counters.
#[derive(Debug, Clone, PartialEq)]
pub struct AmmoUpdate {
    pub is_local: bool,
    pub anchor_x: f32,
    pub ammo: Ammo,
}

#[derive(Debug, Default)]
pub struct EntityRegistry {
    local: Option<LocalPlayer>,
    pub remote_players: Collection<RemotePlayer>,
    pub missiles: Collection<Missile>,
    pub comets: Collection<Comet>,
    pub crosshairs: Collection<Crosshair>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn local(&self) -> Option<&LocalPlayer> {
        self.local.as_ref()
    }

    pub fn local_mut(&mut self) -> Option<&mut LocalPlayer> {
        self.local.as_mut()
    }

    /// Installs the local player; last write wins.
    pub fn set_local(&mut self, player: LocalPlayer) -> Option<LocalPlayer> {
        self.local.replace(player)
    }

    pub fn is_local(&self, id: &EntityId) -> bool {
        self.local.as_ref().is_some_and(|player| &player.id == id)
    }

    /// Live generation counter of the local or remote player with this id.
    pub fn generation(&self, id: &EntityId) -> Option<u64> {
        match &self.local {
            Some(player) if &player.id == id => Some(player.ammo.generation),
            _ => self.remote_players.get(id).map(|player| player.ammo.generation),
        }
    }

    /// Overwrites ammo counters on the local or remote player with this id.
    pub fn update_ammo(&mut self, id: &EntityId, count: u32, max: u32) -> Option<AmmoUpdate> {
        if let Some(player) = self.local.as_mut().filter(|player| &player.id == id) {
            player.ammo.set(count, max);
            player.out_of_ammo = count == 0;
            return Some(AmmoUpdate {
                is_local: true,
                anchor_x: player.barrel_position().x,
                ammo: player.ammo,
            });
        }

        let player = self.remote_players.get_mut(id)?;
        player.ammo.set(count, max);
        Some(AmmoUpdate {
            is_local: false,
            anchor_x: player.barrel_position().x,
            ammo: player.ammo,
        })
    }

    /// Drops every mirrored entity, the local player included.
    pub fn clear(&mut self) {
        self.local = None;
        self.remote_players.clear();
        self.missiles.clear();
        self.comets.clear();
        self.crosshairs.clear();
    }
}
