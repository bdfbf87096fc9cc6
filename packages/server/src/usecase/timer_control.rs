//! UseCase: タイマー操作（開始・一時停止・保存・リセット・休憩・モード切替）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - TimerControlUseCase の各操作
//! - 状態変更ごとに、影響を受けたリージョンの描画結果が配信されること
//!
//! ### なぜこのテストが必要か
//! - 状態遷移とイベント配信の対応を保証する
//! - 拒否された操作では状態もイベントも変化しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：開始→一時停止→再開、保存、休憩開始
//! - 異常系：セッションがない状態での保存・休憩開始
//! - エッジケース：未知のアクティビティ ID

use std::sync::Arc;

use pomolive_shared::time::Clock;

use crate::domain::TimerRepository;

use super::{announce::Announcer, error::TimerError};

/// タイマー操作のユースケース
///
/// 各操作は状態をロックしたまま遷移と描画を行い、イベントをキューに積んでから
/// ロックを解放する。ネットワークへの配信は待たない。
pub struct TimerControlUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn TimerRepository>,
    /// 描画と配信キューへの投入
    announcer: Announcer,
    /// 時刻の取得
    clock: Arc<dyn Clock>,
}

impl TimerControlUseCase {
    /// 新しい TimerControlUseCase を作成
    pub fn new(
        repository: Arc<dyn TimerRepository>,
        announcer: Announcer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            announcer,
            clock,
        }
    }

    /// 開始・一時停止・再開（休憩中は無視される）
    pub async fn start_pause_resume(&self) {
        let mut state = self.repository.lock().await;
        let notices = state.start_pause_resume(self.clock.now_millis());
        if notices.is_empty() {
            tracing::debug!("Ignoring start/pause while a break is running");
        }
        self.announcer.announce(&state, &notices);
    }

    /// 現在のセッションを破棄して Idle に戻す
    pub async fn reset(&self) {
        let mut state = self.repository.lock().await;
        let notices = state.reset();
        self.announcer.announce(&state, &notices);
    }

    /// 現在の作業セッションを履歴に保存
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 保存成功
    /// * `Err(TimerError)` - セッションがない、または休憩中
    pub async fn save(&self) -> Result<(), TimerError> {
        let mut state = self.repository.lock().await;
        let notices = state.save()?;
        tracing::info!("Session saved ({} tracked)", state.tracked().len());
        self.announcer.announce(&state, &notices);
        Ok(())
    }

    /// 現在の作業セッションを保存して休憩を開始
    pub async fn start_break(&self) -> Result<(), TimerError> {
        let mut state = self.repository.lock().await;
        let notices = state.start_break(self.clock.now_millis())?;
        if let Some(session) = state.current() {
            tracing::info!(
                "Break started for {}s",
                session.planned_duration.as_secs()
            );
        }
        self.announcer.announce(&state, &notices);
        Ok(())
    }

    pub async fn toggle_flow_mode(&self) {
        let mut state = self.repository.lock().await;
        let notices = state.toggle_flow_mode();
        self.announcer.announce(&state, &notices);
    }

    pub async fn toggle_auto_break(&self) {
        let mut state = self.repository.lock().await;
        let notices = state.toggle_auto_break();
        self.announcer.announce(&state, &notices);
    }

    /// 作業時間（分）を変更。0 分は無視される
    pub async fn set_preferred_duration(&self, minutes: u32) {
        let mut state = self.repository.lock().await;
        let notices = state.set_preferred_duration(minutes);
        self.announcer.announce(&state, &notices);
    }

    /// アクティビティを変更。未知の ID は無視される
    pub async fn set_activity(&self, id: i64) {
        let mut state = self.repository.lock().await;
        let before = state.current_activity().id;
        let notices = state.set_activity(id);
        if state.current_activity().id == before && before != id {
            tracing::debug!("Ignoring unknown activity id {}", id);
        }
        self.announcer.announce(&state, &notices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            Event, Phase, Region, Subscriber, TimerState, Topic, TransitionError,
            render::MockRenderer,
        },
        infrastructure::{event_hub::ChannelEventHub, repository::InMemoryTimerRepository},
        usecase::dispatch::EventDispatcher,
    };
    use pomolive_shared::time::FixedClock;
    use tokio::sync::{Mutex, mpsc};

    struct Fixture {
        usecase: TimerControlUseCase,
        repository: Arc<InMemoryTimerRepository>,
        dispatcher: EventDispatcher,
        receiver: mpsc::Receiver<Event>,
    }

    impl Fixture {
        async fn drain(&mut self) -> Vec<Event> {
            self.dispatcher.flush().await;
            let mut events = Vec::new();
            while let Ok(event) = self.receiver.try_recv() {
                events.push(event);
            }
            events
        }
    }

    // Renders each region as its name, so payloads show which region was rendered.
    fn region_name_renderer() -> MockRenderer {
        let mut renderer = MockRenderer::new();
        renderer
            .expect_render()
            .returning(|region: Region, _state: &TimerState| region.as_str().to_string());
        renderer
    }

    async fn create_fixture(renderer: MockRenderer) -> Fixture {
        let repository = Arc::new(InMemoryTimerRepository::new(Arc::new(Mutex::new(
            TimerState::default(),
        ))));
        let hub = Arc::new(ChannelEventHub::new());
        let (dispatcher, _handle) = EventDispatcher::spawn(hub);
        let (subscriber, receiver) = Subscriber::channel(100);
        dispatcher.attach(subscriber, Vec::new());

        let usecase = TimerControlUseCase::new(
            repository.clone(),
            Announcer::new(Arc::new(renderer), dispatcher.clone()),
            Arc::new(FixedClock::new(1_700_000_000_000)),
        );

        Fixture {
            usecase,
            repository,
            dispatcher,
            receiver,
        }
    }

    fn summary(events: &[Event]) -> Vec<(Topic, String)> {
        events
            .iter()
            .map(|e| (e.topic, e.payload.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_start_pause_resume_emits_lifecycle_events() {
        // テスト項目: 開始→一時停止→再開で session-started, session-paused, session-resumed が順に配信される
        // given (前提条件):
        let mut fixture = create_fixture(region_name_renderer()).await;

        // when (操作):
        fixture.usecase.start_pause_resume().await;
        fixture.usecase.start_pause_resume().await;
        fixture.usecase.start_pause_resume().await;

        // then (期待する結果):
        let events = fixture.drain().await;
        assert_eq!(
            summary(&events),
            vec![
                (Topic::SessionStarted, "controls".to_string()),
                (Topic::SessionPaused, "controls".to_string()),
                (Topic::SessionResumed, "controls".to_string()),
            ]
        );
        let state = fixture.repository.snapshot().await;
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.current().unwrap().started_at, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_save_publishes_history_controls_and_timer() {
        // テスト項目: 保存で履歴・controls・timer の各リージョンが配信される
        // given (前提条件):
        let mut fixture = create_fixture(region_name_renderer()).await;
        fixture.usecase.start_pause_resume().await;
        fixture.drain().await;

        // when (操作):
        let result = fixture.usecase.save().await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            summary(&fixture.drain().await),
            vec![
                (Topic::SyncTracked, "tracked".to_string()),
                (Topic::SessionSaved, "controls".to_string()),
                (Topic::SyncTimer, "timer".to_string()),
            ]
        );
        assert_eq!(fixture.repository.tracked().await.len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_save_publishes_nothing() {
        // テスト項目: セッションがない状態での保存は拒否され、何も配信されない
        // given (前提条件):
        let mut renderer = MockRenderer::new();
        renderer.expect_render().never();
        let mut fixture = create_fixture(renderer).await;

        // when (操作):
        let result = fixture.usecase.save().await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(TimerError::InvalidTransition(
                TransitionError::NoActiveSession
            ))
        );
        assert!(fixture.drain().await.is_empty());
    }

    #[tokio::test]
    async fn test_start_break_rejected_during_break() {
        // テスト項目: 休憩中に休憩開始を呼ぶと拒否される
        // given (前提条件):
        let mut fixture = create_fixture(region_name_renderer()).await;
        fixture.usecase.start_pause_resume().await;
        fixture.usecase.start_break().await.unwrap();
        fixture.drain().await;

        // when (操作):
        let result = fixture.usecase.start_break().await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(TimerError::InvalidTransition(
                TransitionError::BreakInProgress
            ))
        );
        assert!(fixture.drain().await.is_empty());
        assert!(fixture.repository.snapshot().await.current().unwrap().is_break);
    }

    #[tokio::test]
    async fn test_start_pause_ignored_during_break_publishes_nothing() {
        // テスト項目: 休憩中の開始/一時停止は無視され、何も配信されない
        // given (前提条件):
        let mut fixture = create_fixture(region_name_renderer()).await;
        fixture.usecase.start_pause_resume().await;
        fixture.usecase.start_break().await.unwrap();
        fixture.drain().await;

        // when (操作):
        fixture.usecase.start_pause_resume().await;

        // then (期待する結果):
        assert!(fixture.drain().await.is_empty());
        assert!(fixture.repository.snapshot().await.is_running());
    }

    #[tokio::test]
    async fn test_toggle_flow_mode_publishes_three_regions() {
        // テスト項目: フローモード切替で timer, mode, controls が 1 回ずつ配信される
        // given (前提条件):
        let mut fixture = create_fixture(region_name_renderer()).await;

        // when (操作):
        fixture.usecase.toggle_flow_mode().await;

        // then (期待する結果):
        let topics: Vec<Topic> = fixture.drain().await.iter().map(|e| e.topic).collect();
        assert_eq!(
            topics,
            vec![Topic::SyncTimer, Topic::SyncMode, Topic::SyncControls]
        );
        assert!(fixture.repository.snapshot().await.flow_mode());
    }

    #[tokio::test]
    async fn test_set_activity_unknown_id_keeps_current() {
        // テスト項目: 未知のアクティビティ ID ではエラーにならず、現在の選択が維持される
        // given (前提条件):
        let mut fixture = create_fixture(region_name_renderer()).await;
        fixture.usecase.set_activity(3).await;

        // when (操作):
        fixture.usecase.set_activity(1234).await;

        // then (期待する結果):
        let state = fixture.repository.snapshot().await;
        assert_eq!(state.current_activity().id, 3);
        let topics: Vec<Topic> = fixture.drain().await.iter().map(|e| e.topic).collect();
        assert_eq!(topics, vec![Topic::SyncActivities, Topic::SyncActivities]);
    }

    #[tokio::test]
    async fn test_set_preferred_duration_and_toggle_auto_break() {
        // テスト項目: 作業時間の変更と自動休憩の切り替えが状態に反映される
        // given (前提条件):
        let mut fixture = create_fixture(region_name_renderer()).await;

        // when (操作):
        fixture.usecase.set_preferred_duration(40).await;
        fixture.usecase.set_preferred_duration(0).await;
        fixture.usecase.toggle_auto_break().await;

        // then (期待する結果):
        let state = fixture.repository.snapshot().await;
        assert_eq!(state.preferred_duration().as_secs(), 40 * 60);
        assert!(!state.auto_break());
        let topics: Vec<Topic> = fixture.drain().await.iter().map(|e| e.topic).collect();
        assert_eq!(
            topics,
            vec![Topic::SyncTimer, Topic::SyncMode, Topic::SyncMode]
        );
    }

    #[tokio::test]
    async fn test_reset_twice_is_idempotent() {
        // テスト項目: reset を 2 回呼んでも状態は 1 回目と同じ
        // given (前提条件):
        let mut fixture = create_fixture(region_name_renderer()).await;
        fixture.usecase.start_pause_resume().await;

        // when (操作):
        fixture.usecase.reset().await;
        let once = fixture.repository.snapshot().await;
        fixture.usecase.reset().await;
        let twice = fixture.repository.snapshot().await;

        // then (期待する結果):
        assert_eq!(once.phase(), Phase::Idle);
        assert_eq!(twice.phase(), once.phase());
        assert_eq!(twice.tracked(), once.tracked());
        fixture.drain().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_operations_leave_consistent_state() {
        // テスト項目: reset / start_break / save を並行に実行しても、適用される保存は高々 1 回で、状態は整合している
        for _ in 0..50 {
            // given (前提条件):
            let fixture = create_fixture(region_name_renderer()).await;
            let repository = fixture.repository.clone();
            let usecase = Arc::new(fixture.usecase);
            usecase.start_pause_resume().await;

            // when (操作):
            let reset = tokio::spawn({
                let usecase = usecase.clone();
                async move { usecase.reset().await }
            });
            let start_break = tokio::spawn({
                let usecase = usecase.clone();
                async move { usecase.start_break().await }
            });
            let save = tokio::spawn({
                let usecase = usecase.clone();
                async move { usecase.save().await }
            });
            reset.await.unwrap();
            let results = [start_break.await.unwrap(), save.await.unwrap()];

            // then (期待する結果):
            let applied = results.iter().filter(|r| r.is_ok()).count();
            let state = repository.snapshot().await;
            assert!(applied <= 1);
            assert_eq!(state.tracked().len(), applied);
            assert!(!state.is_running() || state.current().is_some());
            if let Some(current) = state.current() {
                assert!(current.is_break, "only a break can survive the race");
            }
        }
    }
}
