// Tuning for the sliding shop tray.
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct TrayTuning {
    /// Pointer y below which the tray retracts (and firing is allowed).
    pub cutoff_y: f32,

    /// Distance in pixels the tray moves per slide.
    pub slide_distance: f32,

    /// Duration of the slide animation.
    pub slide_duration: Duration,

    /// Time after a slide starts before another may begin; slightly longer than the slide.
    pub settle_delay: Duration,
}

impl Default for TrayTuning {
    fn default() -> Self {
        Self {
            cutoff_y: 120.0,
            slide_distance: 120.0,
            slide_duration: Duration::from_millis(100),
            settle_delay: Duration::from_millis(150),
        }
    }
}
