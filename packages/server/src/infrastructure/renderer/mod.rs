//! Rendering collaborator implementations.

pub mod json;

pub use json::JsonRenderer;
