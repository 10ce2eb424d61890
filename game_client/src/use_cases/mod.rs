// Use cases layer: scene context, event dispatch, timed controllers and the control loop.

pub mod context;
pub mod control;
pub mod debug;
pub mod dispatcher;
pub mod handlers;
pub mod hud;
pub mod payload;
pub mod reload;
pub mod tray;
pub mod types;

pub use context::{EndOfGame, RenderQueue, SceneContext};
pub use control::ControlLoop;
pub use debug::{DebugAction, DebugBaseline, DebugSession};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use hud::Hud;
pub use reload::{ReloadIndicator, ReloadIndicators, ReloadStatus};
pub use tray::{TraySlide, TrayState};
pub use types::{InboundEvent, OutboundEvent, ShotInfo, TransportPort};
