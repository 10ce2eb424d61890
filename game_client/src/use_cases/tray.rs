// Shop tray slide state. The settle deadline replaces a one-shot timer so re-entrant slides
// are refused until it passes, whether or not the animation has reported completion.

use crate::domain::tuning::TrayTuning;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraySlide {
    pub offset_y: f32,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct TrayState {
    extended: bool,
    settles_at: Option<Instant>,
    tuning: TrayTuning,
}

impl TrayState {
    pub fn new(tuning: TrayTuning) -> Self {
        Self {
            extended: false,
            settles_at: None,
            tuning,
        }
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }

    pub fn is_transitioning(&self, now: Instant) -> bool {
        self.settles_at.is_some_and(|deadline| now < deadline)
    }

    pub fn cutoff_y(&self) -> f32 {
        self.tuning.cutoff_y
    }

    /// Per-frame check against the pointer. Returns the slide to animate when the tray
    /// changes state.
    pub fn update(&mut self, pointer_y: f32, now: Instant) -> Option<TraySlide> {
        if self.is_transitioning(now) {
            return None;
        }
        self.settles_at = None;

        let want_extended = pointer_y < self.tuning.cutoff_y;
        if want_extended == self.extended {
            return None;
        }

        self.extended = want_extended;
        self.settles_at = Some(now + self.tuning.settle_delay);
        let distance = self.tuning.slide_distance;
        Some(TraySlide {
            offset_y: if want_extended { distance } else { -distance },
            duration: self.tuning.slide_duration,
        })
    }

    /// Drops any pending settle deadline.
    pub fn reset(&mut self) {
        self.settles_at = None;
    }
}
