//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::TransitionError;

/// タイマー操作のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    /// 現在の状態では実行できない操作
    #[error("Invalid transition: {0}")]
    InvalidTransition(#[from] TransitionError),
}
