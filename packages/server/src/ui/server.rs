//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::usecase::{GetTimerStateUseCase, StatsUseCase, SubscribeUseCase, TimerControlUseCase};

use super::{
    handler::{http, sse::events_handler, websocket::websocket_handler},
    signal::{Shutdown, shutdown_channel, shutdown_signal},
    state::AppState,
};

/// Pomodoro timer server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     timer_control_usecase,
///     subscribe_usecase,
///     get_timer_state_usecase,
///     stats_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 1323).await?;
/// ```
pub struct Server {
    timer_control_usecase: Arc<TimerControlUseCase>,
    subscribe_usecase: Arc<SubscribeUseCase>,
    get_timer_state_usecase: Arc<GetTimerStateUseCase>,
    stats_usecase: Arc<StatsUseCase>,
}

impl Server {
    pub fn new(
        timer_control_usecase: Arc<TimerControlUseCase>,
        subscribe_usecase: Arc<SubscribeUseCase>,
        get_timer_state_usecase: Arc<GetTimerStateUseCase>,
        stats_usecase: Arc<StatsUseCase>,
    ) -> Self {
        Self {
            timer_control_usecase,
            subscribe_usecase,
            get_timer_state_usecase,
            stats_usecase,
        }
    }

    /// Build the router with every endpoint mounted.
    ///
    /// Open `/events` and `/ws` streams end when `shutdown` resolves.
    pub fn into_router(self, shutdown: Shutdown) -> Router {
        let app_state = Arc::new(AppState {
            timer_control_usecase: self.timer_control_usecase,
            subscribe_usecase: self.subscribe_usecase,
            get_timer_state_usecase: self.get_timer_state_usecase,
            stats_usecase: self.stats_usecase,
            shutdown,
        });

        Router::new()
            // 購読エンドポイント
            .route("/events", get(events_handler))
            .route("/ws", get(websocket_handler))
            // タイマー操作
            .route("/api/timer/start-pause", post(http::start_pause))
            .route("/api/timer/reset", post(http::reset))
            .route("/api/timer/skip-break", post(http::reset))
            .route("/api/timer/save", post(http::save))
            .route("/api/timer/start-break", post(http::start_break))
            .route("/api/timer/toggle-flow", post(http::toggle_flow))
            .route("/api/timer/toggle-auto-break", post(http::toggle_auto_break))
            .route("/api/timer/duration", post(http::set_duration))
            .route("/api/timer/activity", post(http::set_activity))
            // 参照系
            .route("/api/health", get(http::health_check))
            .route("/api/state", get(http::get_state))
            .route("/api/clients", get(http::get_clients))
            .route("/api/stats", get(http::get_stats))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if binding fails or the server stops abnormally.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let (trigger, shutdown) = shutdown_channel();
        let app = self.into_router(shutdown);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Pomodoro server listening on {}", listener.local_addr()?);
        tracing::info!("Subscribe with: http://{}/events or ws://{}/ws", bind_addr, bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                trigger.trigger();
            })
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
