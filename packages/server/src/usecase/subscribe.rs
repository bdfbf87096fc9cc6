//! UseCase: 購読者の接続・切断
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubscribeUseCase::connect() と Subscription の drop による切断
//! - 接続直後のスナップショット送信と、その後の差分配信の順序
//!
//! ### なぜこのテストが必要か
//! - 新規接続・再接続したクライアントが次の差分を待たずに現在の状態へ収束することを保証する
//! - 切断した購読者が Hub に残らないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：停止中・実行中それぞれでの接続
//! - エッジケース：スナップショット直後の状態変更、Subscription の drop

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{Event, EventHub, Notice, Region, Subscriber, SubscriberId, TimerRepository};

use super::{announce::Announcer, dispatch::EventDispatcher};

/// A live subscription. Dropping it deregisters the subscriber; this is the
/// only deregistration path, so each connection is detached exactly once.
pub struct Subscription {
    id: SubscriberId,
    receiver: mpsc::Receiver<Event>,
    dispatcher: EventDispatcher,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Next queued event. `None` once the hub has evicted this subscriber.
    pub async fn recv(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        tracing::info!("Subscriber '{}' disconnected", self.id);
        self.dispatcher.detach(self.id);
    }
}

/// 購読者のライフサイクルを扱うユースケース
pub struct SubscribeUseCase {
    repository: Arc<dyn TimerRepository>,
    announcer: Announcer,
    hub: Arc<dyn EventHub>,
    /// 購読者ごとのキュー長（スナップショットが必ず収まる長さ以上）
    capacity: usize,
}

impl SubscribeUseCase {
    pub fn new(
        repository: Arc<dyn TimerRepository>,
        announcer: Announcer,
        hub: Arc<dyn EventHub>,
        capacity: usize,
    ) -> Self {
        Self {
            repository,
            announcer,
            hub,
            capacity: capacity.max(Region::ALL.len()),
        }
    }

    /// 新しい購読者を登録し、全リージョンのスナップショットを送信する
    ///
    /// スナップショットは状態のロックを保持したまま描画・キュー投入されるため、
    /// 以降のどの差分よりも先に届く。
    pub async fn connect(&self) -> Subscription {
        let (subscriber, receiver) = Subscriber::channel(self.capacity);
        let id = subscriber.id();

        let state = self.repository.lock().await;
        let snapshot = self.announcer.render(&state, &Notice::snapshot());
        self.announcer.dispatcher().attach(subscriber, snapshot);
        drop(state);

        tracing::info!("Subscriber '{}' connected", id);

        Subscription {
            id,
            receiver,
            dispatcher: self.announcer.dispatcher().clone(),
        }
    }

    /// 現在登録されている購読者数
    pub async fn subscriber_count(&self) -> usize {
        self.hub.subscriber_count().await
    }
}
