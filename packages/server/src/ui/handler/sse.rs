//! Server-sent events subscription endpoint.

use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::State,
    response::sse::{Event as SseEvent, Sse},
};
use futures_util::stream::{self, Stream, StreamExt};

use crate::ui::state::AppState;

/// `GET /events`
///
/// The stream owns the subscription; when the client goes away axum drops the
/// stream and the subscriber is deregistered. The stream also ends on server
/// shutdown.
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let subscription = state.subscribe_usecase.connect().await;

    let stream = stream::unfold(subscription, |mut subscription| async move {
        let event = subscription.recv().await?;
        let frame = SseEvent::default()
            .event(event.topic.as_str())
            .data(&*event.payload);
        Some((Ok::<_, Infallible>(frame), subscription))
    })
    .take_until(state.shutdown.clone().wait());

    Sse::new(stream)
}
