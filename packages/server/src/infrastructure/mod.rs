//! Infrastructure layer: concrete implementations of the domain abstractions.

pub mod dto;
pub mod event_hub;
pub mod renderer;
pub mod repository;
