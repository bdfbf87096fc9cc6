//! インメモリ Repository 実装

pub mod timer;

pub use timer::InMemoryTimerRepository;
