//! Live pomodoro timer server library.
//!
//! One shared timer state, advanced once per second and pushed to every
//! connected viewer as per-region render events over SSE or WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
