//! Domain layer: the timer state machine and the abstractions around it.

pub mod activity;
pub mod error;
pub mod event;
pub mod hub;
pub mod render;
pub mod repository;
pub mod session;
pub mod stats;
pub mod timer;

pub use activity::{Activity, ActivityRegistry, BREAK_ACTIVITY_ID};
pub use error::{DeliveryError, TransitionError};
pub use event::{Event, Notice, Region, Topic};
pub use hub::{EventHub, PublishReport, Subscriber, SubscriberId};
pub use render::Renderer;
pub use repository::{TimerRepository, TimerStateGuard};
pub use session::{Session, Timestamp};
pub use timer::{Phase, TimerConfig, TimerState};
