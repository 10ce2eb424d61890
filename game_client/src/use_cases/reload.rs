// Reload indicators: one per player at most, each a small state machine ticked by the
// runtime's reload timer rather than by its own callback.

use crate::domain::{EntityId, EntityRegistry, RenderCommand};
use crate::use_cases::context::RenderQueue;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReloadStatus {
    Running { fill: f32 },
    Completed,
    Invalidated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReloadIndicator {
    owner: EntityId,
    anchor_x: f32,
    elapsed: Duration,
    duration: Duration,
    // Owner's generation counter when the indicator was created.
    generation: u64,
}

impl ReloadIndicator {
    pub fn new(owner: EntityId, anchor_x: f32, duration: Duration, generation: u64) -> Self {
        Self {
            owner,
            anchor_x,
            elapsed: Duration::ZERO,
            duration,
            generation,
        }
    }

    pub fn owner(&self) -> &EntityId {
        &self.owner
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Advances by `quantum`. `live_generation` is the owner's current counter, `None` when
    /// the owner is gone; any mismatch with the snapshot invalidates the indicator.
    pub fn tick(&mut self, quantum: Duration, live_generation: Option<u64>) -> ReloadStatus {
        if live_generation != Some(self.generation) {
            return ReloadStatus::Invalidated;
        }
        if self.elapsed >= self.duration {
            return ReloadStatus::Completed;
        }

        let fill = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.elapsed += quantum;
        ReloadStatus::Running { fill }
    }
}

#[derive(Debug)]
pub struct ReloadIndicators {
    live: BTreeMap<EntityId, ReloadIndicator>,
    quantum: Duration,
}

impl ReloadIndicators {
    pub fn new(quantum: Duration) -> Self {
        Self {
            live: BTreeMap::new(),
            quantum,
        }
    }

    /// Starts an indicator, invalidating any indicator its owner already has.
    pub fn spawn(&mut self, indicator: ReloadIndicator, render: &mut RenderQueue) {
        let owner = indicator.owner.clone();
        let anchor_x = indicator.anchor_x;
        if let Some(stale) = self.live.insert(owner.clone(), indicator) {
            debug!(owner = %stale.owner, "reload indicator superseded");
            render.push(RenderCommand::RemoveReloadBar {
                owner: owner.clone(),
            });
        }
        render.push(RenderCommand::ShowReloadBar { owner, x: anchor_x });
    }

    /// One reload tick for every live indicator; finished or stale ones are removed.
    /// Returns how many remain live.
    pub fn tick(&mut self, registry: &EntityRegistry, render: &mut RenderQueue) -> usize {
        let quantum = self.quantum;
        self.live.retain(|owner, indicator| {
            match indicator.tick(quantum, registry.generation(owner)) {
                ReloadStatus::Running { fill } => {
                    render.push(RenderCommand::ReloadBarFill {
                        owner: owner.clone(),
                        fill,
                    });
                    true
                }
                status => {
                    debug!(owner = %owner, ?status, "reload indicator finished");
                    render.push(RenderCommand::RemoveReloadBar {
                        owner: owner.clone(),
                    });
                    false
                }
            }
        });
        self.live.len()
    }

    /// Drops the owner's indicator and its visuals, if any.
    pub fn cancel(&mut self, owner: &EntityId, render: &mut RenderQueue) -> bool {
        if self.live.remove(owner).is_none() {
            return false;
        }
        render.push(RenderCommand::RemoveReloadBar {
            owner: owner.clone(),
        });
        true
    }

    pub fn get(&self, owner: &EntityId) -> Option<&ReloadIndicator> {
        self.live.get(owner)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }
}
