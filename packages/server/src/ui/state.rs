//! Shared handler state.

use std::sync::Arc;

use super::signal::Shutdown;
use crate::usecase::{GetTimerStateUseCase, StatsUseCase, SubscribeUseCase, TimerControlUseCase};

pub struct AppState {
    /// TimerControlUseCase（タイマー操作のユースケース）
    pub timer_control_usecase: Arc<TimerControlUseCase>,
    /// SubscribeUseCase（購読者の接続・切断のユースケース）
    pub subscribe_usecase: Arc<SubscribeUseCase>,
    /// GetTimerStateUseCase（状態取得のユースケース）
    pub get_timer_state_usecase: Arc<GetTimerStateUseCase>,
    /// StatsUseCase（集計のユースケース）
    pub stats_usecase: Arc<StatsUseCase>,
    /// 購読ストリームを終了させるシャットダウン通知
    pub shutdown: Shutdown,
}
