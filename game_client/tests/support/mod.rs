// Shared helpers for integration tests: an in-memory scene and a scripted game server.
#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use game_client::domain::EntityId;
use game_client::interface_adapters::{ChannelTransport, EventFrame};
use game_client::use_cases::{Dispatcher, InboundEvent, OutboundEvent, SceneContext};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

// Scene wired to a bounded outbound channel, the way the runtime wires it.
pub struct TestScene {
    pub ctx: SceneContext,
    pub dispatcher: Dispatcher,
    pub outbound: mpsc::Receiver<OutboundEvent>,
}

impl TestScene {
    // Build the context, subscribe the dispatcher and discard its start-up output.
    pub fn new(own_id: &str) -> Self {
        let (tx, outbound) = mpsc::channel(256);
        let transport = Box::new(ChannelTransport::new(tx));
        let mut ctx = SceneContext::new(EntityId::from(own_id), transport);
        let dispatcher = Dispatcher::subscribe(&mut ctx);
        ctx.render.drain();
        let mut scene = Self {
            ctx,
            dispatcher,
            outbound,
        };
        scene.sent();
        scene
    }

    pub fn receive(&mut self, name: &str, args: Vec<Value>) {
        self.dispatcher
            .dispatch(&mut self.ctx, &InboundEvent::new(name, args));
    }

    // Everything emitted since the last call.
    pub fn sent(&mut self) -> Vec<OutboundEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.outbound.try_recv() {
            events.push(event);
        }
        events
    }
}

// Game server stand-in bound to an ephemeral port; serves exactly one client.
pub struct FakeServer {
    pub url: String,
    // Frames the client sent, in order.
    pub received: mpsc::UnboundedReceiver<EventFrame>,
    _task: JoinHandle<()>,
}

impl FakeServer {
    // `opening` goes out right after the upgrade; `after_init` answers `requestInitialize`.
    pub async fn start(
        opening: Vec<EventFrame>,
        after_init: Vec<EventFrame>,
        close_after_init: bool,
    ) -> Self {
        // Bind to an ephemeral port to avoid collisions with local services.
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral test port");
        let addr = listener.local_addr().expect("get local addr");
        let (received_tx, received) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept client");
            let mut ws = tokio_tungstenite::accept_async(stream)
                .await
                .expect("websocket upgrade");

            for frame in &opening {
                send_frame(&mut ws, frame).await;
            }

            let mut after_init = Some(after_init);
            while let Some(Ok(message)) = ws.next().await {
                let Message::Text(text) = message else {
                    continue;
                };
                let frame: EventFrame =
                    serde_json::from_str(text.as_str()).expect("client sends event frames");
                let is_init = frame.event == "requestInitialize";
                let _ = received_tx.send(frame);

                if is_init {
                    if let Some(script) = after_init.take() {
                        for frame in &script {
                            send_frame(&mut ws, frame).await;
                        }
                        if close_after_init {
                            let _ = ws.close(None).await;
                        }
                    }
                }
            }
        });

        Self {
            url: format!("ws://{addr}/ws"),
            received,
            _task: task,
        }
    }

    pub fn received_now(&mut self) -> Vec<EventFrame> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.received.try_recv() {
            frames.push(frame);
        }
        frames
    }
}

async fn send_frame<S>(ws: &mut S, frame: &EventFrame)
where
    S: SinkExt<Message> + Unpin,
{
    let text = serde_json::to_string(frame).expect("frame serializes");
    let _ = ws.send(Message::text(text)).await;
}

pub fn frame(event: &str, args: Vec<Value>) -> EventFrame {
    EventFrame::new(event, args)
}
