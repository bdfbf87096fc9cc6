//! InMemory Timer Repository 実装
//!
//! ドメイン層が定義する TimerRepository trait の具体的な実装。
//! プロセス全体で 1 つの `TimerState` を Mutex で保護して保持します。
//! 再起動をまたいだ永続化は行いません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Session, TimerRepository, TimerState, repository::TimerStateGuard};

/// インメモリ Timer Repository 実装
pub struct InMemoryTimerRepository {
    /// タイマー状態（ドメインモデル）
    state: Arc<Mutex<TimerState>>,
}

impl InMemoryTimerRepository {
    /// 新しい InMemoryTimerRepository を作成
    pub fn new(state: Arc<Mutex<TimerState>>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl TimerRepository for InMemoryTimerRepository {
    async fn lock<'a>(&'a self) -> TimerStateGuard<'a> {
        Box::new(self.state.lock().await)
    }

    async fn snapshot(&self) -> TimerState {
        self.state.lock().await.clone()
    }

    async fn tracked(&self) -> Vec<Session> {
        self.state.lock().await.tracked().to_vec()
    }

    async fn daily_goal(&self) -> u32 {
        self.state.lock().await.daily_goal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Phase, TimerConfig};

    fn create_test_repository() -> InMemoryTimerRepository {
        InMemoryTimerRepository::new(Arc::new(Mutex::new(TimerState::new(
            TimerConfig {
                daily_goal: 6,
                ..TimerConfig::default()
            },
        ))))
    }

    #[tokio::test]
    async fn test_mutation_through_lock_is_visible() {
        // テスト項目: ロック経由の変更が以降の読み取りに反映される
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        {
            let mut state = repo.lock().await;
            state.start_pause_resume(1000);
            state.tick(90, 1000);
            state.save().unwrap();
        }

        // then (期待する結果):
        let tracked = repo.tracked().await;
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0].elapsed_ticks, 90);
        assert_eq!(repo.snapshot().await.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached_copy() {
        // テスト項目: スナップショットを変更しても保持している状態は変わらない
        // given (前提条件):
        let repo = create_test_repository();
        let mut copy = repo.snapshot().await;

        // when (操作):
        copy.start_pause_resume(1000);

        // then (期待する結果):
        assert_eq!(repo.snapshot().await.phase(), Phase::Idle);
        assert_eq!(repo.daily_goal().await, 6);
    }

    #[tokio::test]
    async fn test_lock_is_exclusive_until_guard_dropped() {
        // テスト項目: ガードを保持している間は次のロックが取得できない
        // given (前提条件):
        let repo = create_test_repository();
        let guard = repo.lock().await;

        // when (操作):
        let blocked =
            tokio::time::timeout(std::time::Duration::from_millis(50), repo.lock()).await;

        // then (期待する結果):
        assert!(blocked.is_err());
        drop(guard);
        let mut state = repo.lock().await;
        state.start_pause_resume(1000);
        assert_eq!(state.phase(), Phase::Running);
    }
}
