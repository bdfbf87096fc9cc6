//! WebSocket subscription endpoint.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};

use crate::{
    infrastructure::dto::websocket::EventFrame, ui::state::AppState, usecase::Subscription,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that forwards queued events to the WebSocket sender.
///
/// The task ends when the hub evicts the subscriber or a write fails. The
/// subscription is dropped with the task.
fn pusher_loop(
    mut subscription: Subscription,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            let json = match serde_json::to_string(&EventFrame::from(&event)) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize '{}' event: {}", event.topic, e);
                    continue;
                }
            };
            if let Err(e) = sender.send(Message::Text(json.into())).await {
                tracing::debug!("Write to subscriber '{}' failed: {}", subscription.id(), e);
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // スナップショットはこの時点でキューに入る
    let subscription = state.subscribe_usecase.connect().await;
    let id = subscription.id();

    // Inbound frames only matter for detecting the close
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!("Subscriber '{}' requested close", id);
                    break;
                }
                Ok(Message::Ping(_)) => tracing::debug!("Received ping"),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    let mut send_task = pusher_loop(subscription, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
        _ = state.shutdown.clone().wait() => {
            tracing::debug!("Closing subscriber '{}' for shutdown", id);
            send_task.abort();
            recv_task.abort();
        }
    };

    // The subscription is dropped with the pusher task, which deregisters it
}
