// Channel-backed transport port. Sends never block the scene; a full queue drops the event.

use crate::interface_adapters::utils::throttle::{self, should_log};
use crate::use_cases::{OutboundEvent, TransportPort};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct ChannelTransport {
    tx: mpsc::Sender<OutboundEvent>,
    last_full_log: Instant,
}

impl ChannelTransport {
    pub fn new(tx: mpsc::Sender<OutboundEvent>) -> Self {
        Self {
            tx,
            last_full_log: throttle::primed(),
        }
    }
}

impl TransportPort for ChannelTransport {
    fn emit(&mut self, event: OutboundEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                if should_log(&mut self.last_full_log) {
                    warn!(event = event.name(), "outbound channel full; dropping event");
                }
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                debug!(event = event.name(), "outbound channel closed; dropping event");
            }
        }
    }
}
