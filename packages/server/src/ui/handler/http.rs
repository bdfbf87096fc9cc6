//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    infrastructure::dto::http::{ClientsDto, StatsDto, TimerStateDto},
    ui::state::AppState,
    usecase::TimerError,
};

/// Form body of `POST /api/timer/duration`.
#[derive(Debug, Deserialize)]
pub struct DurationForm {
    pub duration: Option<String>,
}

/// Form body of `POST /api/timer/activity`.
#[derive(Debug, Deserialize)]
pub struct ActivityForm {
    pub activity: Option<String>,
}

fn transition_status(operation: &str, result: Result<(), TimerError>) -> StatusCode {
    match result {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => {
            tracing::warn!("Rejected '{}': {}", operation, e);
            StatusCode::BAD_REQUEST
        }
    }
}

pub async fn start_pause(State(state): State<Arc<AppState>>) -> StatusCode {
    state.timer_control_usecase.start_pause_resume().await;
    StatusCode::NO_CONTENT
}

/// Also mounted as skip-break.
pub async fn reset(State(state): State<Arc<AppState>>) -> StatusCode {
    state.timer_control_usecase.reset().await;
    StatusCode::NO_CONTENT
}

pub async fn save(State(state): State<Arc<AppState>>) -> StatusCode {
    transition_status("save", state.timer_control_usecase.save().await)
}

pub async fn start_break(State(state): State<Arc<AppState>>) -> StatusCode {
    transition_status("start-break", state.timer_control_usecase.start_break().await)
}

pub async fn toggle_flow(State(state): State<Arc<AppState>>) -> StatusCode {
    state.timer_control_usecase.toggle_flow_mode().await;
    StatusCode::NO_CONTENT
}

pub async fn toggle_auto_break(State(state): State<Arc<AppState>>) -> StatusCode {
    state.timer_control_usecase.toggle_auto_break().await;
    StatusCode::NO_CONTENT
}

/// Unparseable or missing minutes leave the preference untouched.
pub async fn set_duration(
    State(state): State<Arc<AppState>>,
    form: Result<Form<DurationForm>, FormRejection>,
) -> StatusCode {
    let minutes = form
        .ok()
        .and_then(|Form(form)| form.duration)
        .and_then(|raw| raw.trim().parse::<u32>().ok());

    match minutes {
        Some(minutes) => {
            state
                .timer_control_usecase
                .set_preferred_duration(minutes)
                .await
        }
        None => tracing::debug!("Ignoring malformed duration"),
    }
    StatusCode::NO_CONTENT
}

/// Unparseable or missing ids leave the activity untouched.
pub async fn set_activity(
    State(state): State<Arc<AppState>>,
    form: Result<Form<ActivityForm>, FormRejection>,
) -> StatusCode {
    let id = form
        .ok()
        .and_then(|Form(form)| form.activity)
        .and_then(|raw| raw.trim().parse::<i64>().ok());

    match id {
        Some(id) => state.timer_control_usecase.set_activity(id).await,
        None => tracing::debug!("Ignoring malformed activity id"),
    }
    StatusCode::NO_CONTENT
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug dump of the timer state
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<TimerStateDto> {
    let timer = state.get_timer_state_usecase.execute().await;
    Json(TimerStateDto::from(&timer))
}

pub async fn get_clients(State(state): State<Arc<AppState>>) -> Json<ClientsDto> {
    let clients = state.subscribe_usecase.subscriber_count().await;
    Json(ClientsDto { clients })
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsDto> {
    Json(StatsDto::from(state.stats_usecase.execute().await))
}
