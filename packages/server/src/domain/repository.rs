//! Repository trait 定義
//!
//! タイマー状態へのアクセスをドメイン層のインターフェースとして定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::ops::DerefMut;

use async_trait::async_trait;

use super::{Session, TimerState};

/// 排他ロック中のタイマー状態。drop でロックが解放される。
pub type TimerStateGuard<'a> = Box<dyn DerefMut<Target = TimerState> + Send + 'a>;

/// Timer Repository trait
///
/// タイマー状態全体が 1 つのクリティカルセクションになる。
/// 状態を変更する操作は必ず `lock` で得たガードを通して行う。
#[async_trait]
pub trait TimerRepository: Send + Sync {
    /// 状態の排他ロックを取得
    async fn lock<'a>(&'a self) -> TimerStateGuard<'a>;

    /// 現在の状態のコピーを取得
    async fn snapshot(&self) -> TimerState;

    /// 完了したセッションの履歴を取得
    async fn tracked(&self) -> Vec<Session>;

    /// 1 日あたりの目標セッション数を取得
    async fn daily_goal(&self) -> u32;
}
