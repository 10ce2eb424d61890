// Tuning for the ammo reload indicator.
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ReloadTuning {
    /// Elapsed time added to every live indicator per reload tick.
    pub tick_quantum: Duration,
}

impl Default for ReloadTuning {
    fn default() -> Self {
        Self {
            tick_quantum: Duration::from_millis(16),
        }
    }
}
