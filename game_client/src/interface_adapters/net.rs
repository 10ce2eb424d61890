// WebSocket transport: connect, session handshake, then one reader and one writer task
// bridging the socket to bounded channels.

use crate::domain::EntityId;
use crate::interface_adapters::protocol::{EventFrame, SESSION_EVENT};
use crate::interface_adapters::utils::throttle::{self, should_log};
use crate::use_cases::{InboundEvent, OutboundEvent};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::fmt;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{Instrument, debug, info, info_span, warn};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug)]
pub enum NetError {
    Connect(tungstenite::Error),
    Ws(tungstenite::Error),
    Serialization(serde_json::Error),
    Handshake(&'static str),
    // The scene stopped reading inbound events.
    InboundClosed,
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::Connect(e) => write!(f, "connect failed: {e}"),
            NetError::Ws(e) => write!(f, "websocket error: {e}"),
            NetError::Serialization(e) => write!(f, "serialization error: {e}"),
            NetError::Handshake(reason) => write!(f, "session handshake failed: {reason}"),
            NetError::InboundClosed => f.write_str("inbound channel closed"),
        }
    }
}

impl std::error::Error for NetError {}

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub url: String,
    pub handshake_timeout: Duration,
    pub inbound_capacity: usize,
    pub outbound_capacity: usize,
}

/// A live session. Dropping every `outbound` sender closes the socket.
#[derive(Debug)]
pub struct Connection {
    pub connection_id: EntityId,
    pub inbound: mpsc::Receiver<InboundEvent>,
    pub outbound: mpsc::Sender<OutboundEvent>,
}

pub async fn connect(settings: &TransportSettings) -> Result<Connection, NetError> {
    let (mut socket, _response) = connect_async(settings.url.as_str())
        .await
        .map_err(NetError::Connect)?;

    let connection_id = match timeout(settings.handshake_timeout, read_session(&mut socket)).await
    {
        Ok(result) => result?,
        Err(_) => {
            let _ = socket.close(None).await;
            return Err(NetError::Handshake("timed out waiting for session"));
        }
    };
    info!(url = %settings.url, connection_id = %connection_id, "session established");

    let (inbound_tx, inbound) = mpsc::channel(settings.inbound_capacity);
    let (outbound, outbound_rx) = mpsc::channel(settings.outbound_capacity);
    let (sink, stream) = socket.split();

    let span = info_span!("conn", connection_id = %connection_id);
    tokio::spawn(
        async move {
            if let Err(e) = read_loop(stream, inbound_tx).await {
                warn!(error = %e, "read loop exited with error");
            }
        }
        .instrument(span.clone()),
    );
    tokio::spawn(
        async move {
            if let Err(e) = write_loop(sink, outbound_rx).await {
                warn!(error = %e, "write loop exited with error");
            }
        }
        .instrument(span),
    );

    Ok(Connection {
        connection_id,
        inbound,
        outbound,
    })
}

// The first text frame must be `session(<id>)`.
async fn read_session(socket: &mut Socket) -> Result<EntityId, NetError> {
    loop {
        let Some(incoming) = socket.next().await else {
            return Err(NetError::Handshake("closed before session"));
        };

        match incoming.map_err(NetError::Ws)? {
            Message::Text(text) => {
                let frame: EventFrame =
                    serde_json::from_str(text.as_str()).map_err(NetError::Serialization)?;
                if frame.event != SESSION_EVENT {
                    return Err(NetError::Handshake("first event was not session"));
                }
                let Some(id) = frame.args.into_iter().next() else {
                    return Err(NetError::Handshake("session carried no id"));
                };
                return serde_json::from_value(id).map_err(NetError::Serialization);
            }
            Message::Close(_) => return Err(NetError::Handshake("closed before session")),
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
        }
    }
}

async fn read_loop(
    mut stream: SplitStream<Socket>,
    inbound_tx: mpsc::Sender<InboundEvent>,
) -> Result<(), NetError> {
    let mut invalid_frames: u64 = 0;
    let mut last_invalid_log = throttle::primed();

    while let Some(incoming) = stream.next().await {
        match incoming.map_err(NetError::Ws)? {
            Message::Text(text) => match serde_json::from_str::<EventFrame>(text.as_str()) {
                Ok(frame) => {
                    // Awaiting keeps arrival order; inbound events are never dropped.
                    inbound_tx
                        .send(InboundEvent::from(frame))
                        .await
                        .map_err(|_| NetError::InboundClosed)?;
                }
                Err(e) => {
                    invalid_frames += 1;
                    if should_log(&mut last_invalid_log) {
                        warn!(error = %e, count = invalid_frames, "skipping unparseable frame");
                    }
                }
            },
            Message::Close(frame) => {
                info!(?frame, "server closed connection");
                break;
            }
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
        }
    }
    debug!("read loop finished");
    Ok(())
}

async fn write_loop(
    mut sink: SplitSink<Socket, Message>,
    mut outbound_rx: mpsc::Receiver<OutboundEvent>,
) -> Result<(), NetError> {
    while let Some(event) = outbound_rx.recv().await {
        let txt =
            serde_json::to_string(&EventFrame::from(&event)).map_err(NetError::Serialization)?;
        sink.send(Message::text(txt)).await.map_err(NetError::Ws)?;
    }

    debug!("outbound channel closed; closing socket");
    sink.close().await.map_err(NetError::Ws)
}

