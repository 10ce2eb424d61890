use crate::interface_adapters::TransportSettings;
use std::{env, time::Duration};

// Runtime/client constants (not gameplay tuning).

pub fn game_server_ws_url() -> String {
    env::var("GAME_SERVER_WS_URL").unwrap_or_else(|_| "ws://127.0.0.1:3001/ws".to_string())
}

pub fn handshake_timeout() -> Duration {
    let millis = env::var("HANDSHAKE_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(1500);
    Duration::from_millis(millis)
}

pub const INBOUND_CHANNEL_CAPACITY: usize = 1024;
pub const OUTBOUND_CHANNEL_CAPACITY: usize = 256;

pub const FRAME_INTERVAL: Duration = Duration::from_millis(1000 / 60);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub transport: TransportSettings,
    pub frame_interval: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::for_url(game_server_ws_url())
    }

    /// Defaults for everything but the server address.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            transport: TransportSettings {
                url: url.into(),
                handshake_timeout: handshake_timeout(),
                inbound_capacity: INBOUND_CHANNEL_CAPACITY,
                outbound_capacity: OUTBOUND_CHANNEL_CAPACITY,
            },
            frame_interval: FRAME_INTERVAL,
        }
    }
}
