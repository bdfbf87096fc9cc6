//! WebSocket フレームの DTO

use serde::{Deserialize, Serialize};

use crate::domain::Event;

/// One event as a JSON text frame: `{"topic": "...", "payload": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFrame {
    pub topic: String,
    pub payload: String,
}

impl From<&Event> for EventFrame {
    fn from(event: &Event) -> Self {
        Self {
            topic: event.topic.as_str().to_string(),
            payload: event.payload.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Topic;

    #[test]
    fn test_event_frame_json_shape() {
        // テスト項目: イベントが topic と payload を持つ JSON に変換される
        // given (前提条件):
        let event = Event::new(Topic::SessionStarted, "{\"running\":true}");

        // when (操作):
        let json = serde_json::to_string(&EventFrame::from(&event)).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            r#"{"topic":"session-started","payload":"{\"running\":true}"}"#
        );
    }
}
