//! Shared utilities for the pomolive workspace.
//!
//! Logging setup, the clock abstraction and the duration formatting helpers
//! used when rendering timer state.

pub mod format;
pub mod logger;
pub mod time;
