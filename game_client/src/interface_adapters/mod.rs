// Interface adapters: wire protocol, WebSocket transport and headless ports.

pub mod input;
pub mod net;
pub mod protocol;
pub mod render;
pub mod transport;
pub mod utils;

pub use input::{IdleInput, ScriptedInput};
pub use net::{Connection, NetError, TransportSettings, connect};
pub use protocol::{EventFrame, SESSION_EVENT};
pub use render::TracingRenderer;
pub use transport::ChannelTransport;
