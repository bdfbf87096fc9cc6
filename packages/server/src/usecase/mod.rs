//! UseCase 層：タイマー操作、tick、購読、集計

pub mod announce;
pub mod dispatch;
pub mod error;
pub mod get_state;
pub mod stats;
pub mod subscribe;
pub mod tick;
pub mod timer_control;

pub use announce::Announcer;
pub use dispatch::EventDispatcher;
pub use error::TimerError;
pub use get_state::GetTimerStateUseCase;
pub use stats::StatsUseCase;
pub use subscribe::{SubscribeUseCase, Subscription};
pub use tick::{TickConfig, TickScheduler};
pub use timer_control::TimerControlUseCase;
