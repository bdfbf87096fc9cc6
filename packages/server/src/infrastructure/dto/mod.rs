//! Data Transfer Objects
//!
//! - `view`: 各 UI リージョンの描画結果（イベントのペイロード）
//! - `http`: HTTP API のレスポンス
//! - `websocket`: WebSocket で送るフレーム

pub mod http;
pub mod view;
pub mod websocket;
