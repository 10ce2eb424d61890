// Presentation and UI tuning, kept apart from runtime configuration.

pub mod layout;
pub mod reload;
pub mod tray;

pub use reload::ReloadTuning;
pub use tray::TrayTuning;
