//! UseCase: 1 秒ごとのタイマー進行と keepalive 配信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - TickScheduler::tick() / ping()
//!
//! ### なぜこのテストが必要か
//! - 外部リクエストなしに状態を変更する唯一の経路であるため
//! - 自動休憩・休憩終了の遷移が tick から正しく起きることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：実行中のセッションの進行、25 分での自動休憩
//! - エッジケース：停止中の tick、1 tick あたりの秒数の倍率

use std::{sync::Arc, time::Duration};

use pomolive_shared::time::Clock;
use tokio::time::MissedTickBehavior;

use crate::domain::{Event, TimerRepository};

use super::announce::Announcer;

/// Cadence of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickConfig {
    /// Wall-clock time between ticks.
    pub interval: Duration,
    /// Simulated seconds added to the running session on each tick.
    pub seconds_per_tick: u64,
    /// Wall-clock time between keepalive events.
    pub ping_interval: Duration,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            seconds_per_tick: 1,
            ping_interval: Duration::from_secs(10),
        }
    }
}

/// The autonomous driver of the timer.
pub struct TickScheduler {
    repository: Arc<dyn TimerRepository>,
    announcer: Announcer,
    clock: Arc<dyn Clock>,
    config: TickConfig,
}

impl TickScheduler {
    pub fn new(
        repository: Arc<dyn TimerRepository>,
        announcer: Announcer,
        clock: Arc<dyn Clock>,
        config: TickConfig,
    ) -> Self {
        Self {
            repository,
            announcer,
            clock,
            config,
        }
    }

    /// Advance the running session once. Returns the number of events published.
    pub async fn tick(&self) -> usize {
        let mut state = self.repository.lock().await;
        let was_break = state.current().is_some_and(|s| s.is_break);
        let notices = state.tick(self.config.seconds_per_tick, self.clock.now_millis());

        match state.current() {
            Some(session) if session.is_break && !was_break => {
                tracing::info!(
                    "Work session completed, break of {}s started",
                    session.planned_duration.as_secs()
                );
            }
            None if was_break => tracing::info!("Break finished"),
            _ => {}
        }

        self.announcer.announce(&state, &notices)
    }

    /// Send a keepalive event to every subscriber.
    pub fn ping(&self) {
        self.announcer.dispatcher().publish(Event::keepalive());
    }

    /// Tick and ping forever. Runs for the lifetime of the process.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut pinger = tokio::time::interval(self.config.ping_interval);
        pinger.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // both intervals complete their first tick immediately
        ticker.tick().await;
        pinger.tick().await;

        tracing::info!(
            "Tick scheduler started ({}s per tick, every {:?})",
            self.config.seconds_per_tick,
            self.config.interval
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                _ = pinger.tick() => self.ping(),
            }
        }
    }
}
