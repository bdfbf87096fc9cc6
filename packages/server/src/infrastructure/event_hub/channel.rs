//! 有界 mpsc キューを使った EventHub 実装
//!
//! ## 責務
//!
//! - 購読者の `Subscriber`（送信側ハンドル）を管理
//! - 全購読者へのイベント配信（publish）
//! - キューが満杯・切断済みの購読者の除去
//!
//! ## 設計ノート
//!
//! 配信は `try_push` だけを使い、購読者を待つことはない。
//! 配信中は読み取りロックのみを保持し、除去が必要な場合だけ書き込みロックを取る。
//! 配信中に登録解除された購読者にはイベントが届かなくてもよい。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Event, EventHub, PublishReport, Subscriber, SubscriberId};

/// チャンネルベースの EventHub 実装
///
/// ## 使用例
///
/// ```ignore
/// let hub = ChannelEventHub::new();
/// let (subscriber, mut receiver) = Subscriber::channel(100);
/// hub.register(subscriber).await;
///
/// hub.publish(&Event::keepalive()).await;
/// assert_eq!(receiver.recv().await, Some(Event::keepalive()));
/// ```
#[derive(Default)]
pub struct ChannelEventHub {
    /// 登録中の購読者
    ///
    /// Key: SubscriberId
    /// Value: Subscriber（キューの送信側）
    subscribers: RwLock<HashMap<SubscriberId, Subscriber>>,
}

impl ChannelEventHub {
    /// 新しい ChannelEventHub を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventHub for ChannelEventHub {
    async fn register(&self, subscriber: Subscriber) {
        let id = subscriber.id();
        let mut subscribers = self.subscribers.write().await;
        subscribers.insert(id, subscriber);
        tracing::debug!(
            "Subscriber '{}' registered ({} live)",
            id,
            subscribers.len()
        );
    }

    async fn unregister(&self, id: &SubscriberId) -> bool {
        let mut subscribers = self.subscribers.write().await;
        let removed = subscribers.remove(id).is_some();
        if removed {
            tracing::debug!(
                "Subscriber '{}' unregistered ({} live)",
                id,
                subscribers.len()
            );
        }
        removed
    }

    async fn publish(&self, event: &Event) -> PublishReport {
        let mut report = PublishReport::default();
        let mut dead = Vec::new();

        {
            let subscribers = self.subscribers.read().await;
            for (id, subscriber) in subscribers.iter() {
                match subscriber.try_push(event.clone()) {
                    Ok(()) => report.delivered += 1,
                    Err(e) => {
                        tracing::warn!(
                            "Evicting subscriber '{}' while publishing '{}': {}",
                            id,
                            event.topic,
                            e
                        );
                        dead.push(*id);
                    }
                }
            }
        }

        if !dead.is_empty() {
            // Dropping the removed sender closes the subscriber's stream.
            let mut subscribers = self.subscribers.write().await;
            for id in &dead {
                if subscribers.remove(id).is_some() {
                    report.evicted += 1;
                }
            }
        }

        report
    }

    async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}
