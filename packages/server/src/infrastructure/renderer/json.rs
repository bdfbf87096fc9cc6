//! Renders each region as a JSON document.

use serde::Serialize;

use crate::{
    domain::{Region, Renderer, TimerState},
    infrastructure::dto::view::{ActivitiesView, ControlsView, ModeView, TimerView, TrackedView},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn to_json<T: Serialize>(region: Region, view: &T) -> String {
    serde_json::to_string(view).unwrap_or_else(|e| {
        tracing::error!("Failed to render region '{}': {}", region.as_str(), e);
        String::from("{}")
    })
}

impl Renderer for JsonRenderer {
    fn render(&self, region: Region, state: &TimerState) -> String {
        match region {
            Region::Controls => to_json(region, &ControlsView::from(state)),
            Region::Timer => to_json(region, &TimerView::from(state)),
            Region::Tracked => to_json(region, &TrackedView::from(state)),
            Region::Activities => to_json(region, &ActivitiesView::from(state)),
            Region::Mode => to_json(region, &ModeView::from(state)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_every_region_as_json_object() {
        // テスト項目: 全リージョンが JSON オブジェクトとして描画される
        // given (前提条件):
        let renderer = JsonRenderer::new();
        let state = TimerState::default();

        for region in Region::ALL {
            // when (操作):
            let payload = renderer.render(region, &state);

            // then (期待する結果):
            let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
            assert!(value.is_object(), "region {}", region.as_str());
            assert!(!payload.contains('\n'));
        }
    }

    #[test]
    fn test_render_timer_display() {
        // テスト項目: timer リージョンに表示用の時間が含まれる
        let payload = JsonRenderer::new().render(Region::Timer, &TimerState::default());
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["display"], "25:00");
    }
}
