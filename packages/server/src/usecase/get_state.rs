//! UseCase: 現在のタイマー状態の取得

use std::sync::Arc;

use crate::domain::{TimerRepository, TimerState};

pub struct GetTimerStateUseCase {
    repository: Arc<dyn TimerRepository>,
}

impl GetTimerStateUseCase {
    pub fn new(repository: Arc<dyn TimerRepository>) -> Self {
        Self { repository }
    }

    /// 状態のコピーを返す
    pub async fn execute(&self) -> TimerState {
        self.repository.snapshot().await
    }
}
