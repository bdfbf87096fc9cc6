//! イベント配信（ブロードキャスト）の実装
//!
//! ## 実装
//!
//! - `channel`: 購読者ごとの有界 mpsc キューを使った実装

pub mod channel;

pub use channel::ChannelEventHub;
