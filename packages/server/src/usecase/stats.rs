//! UseCase: セッション履歴の集計

use std::sync::Arc;

use pomolive_shared::time::Clock;

use crate::domain::{TimerRepository, stats::StatsReport};

pub struct StatsUseCase {
    repository: Arc<dyn TimerRepository>,
    clock: Arc<dyn Clock>,
}

impl StatsUseCase {
    pub fn new(repository: Arc<dyn TimerRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn execute(&self) -> StatsReport {
        let tracked = self.repository.tracked().await;
        let daily_goal = self.repository.daily_goal().await;
        StatsReport::build(&tracked, daily_goal, self.clock.now_millis())
    }
}
