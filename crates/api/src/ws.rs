use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use runtime::LedgerEvent;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

use crate::state::AppState;

/// Close code sent when the ledger stops publishing (RFC 6455 "going away").
const CLOSE_LEDGER_GONE: u16 = 1001;

pub async fn events_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| stream_ledger_events(socket, state))
}

/// Per-connection bookkeeping reported when the stream ends.
#[derive(Debug, Default)]
struct StreamStats {
    forwarded: u64,
    skipped: u64,
}

async fn stream_ledger_events(mut socket: WebSocket, state: AppState) {
    // Subscribe before reading the snapshot so no tick between the two is lost.
    let mut ledger_events = state.subscribe_events();
    let mut stats = StreamStats::default();

    let greeting = LedgerEvent::connected(&state.snapshot());
    if forward(&mut socket, &greeting).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
            received = ledger_events.recv() => match received {
                Ok(event) => {
                    if forward(&mut socket, &event).await.is_err() {
                        break;
                    }
                    stats.forwarded += 1;
                }
                Err(RecvError::Lagged(skipped)) => {
                    stats.skipped += skipped;
                    debug!(skipped, total_skipped = stats.skipped, "event subscriber lagged");
                }
                Err(RecvError::Closed) => {
                    let _ = socket
                        .send(Message::Close(Some(CloseFrame {
                            code: CLOSE_LEDGER_GONE,
                            reason: "ledger stopped".into(),
                        })))
                        .await;
                    break;
                }
            },
        }
    }

    info!(
        forwarded = stats.forwarded,
        skipped = stats.skipped,
        "event stream ended"
    );
}

async fn forward(socket: &mut WebSocket, event: &LedgerEvent) -> Result<(), axum::Error> {
    let payload = serde_json::to_string(event).map_err(axum::Error::new)?;
    socket.send(Message::Text(payload)).await
}
