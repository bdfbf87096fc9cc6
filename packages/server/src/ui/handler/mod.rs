pub mod http;
pub mod sse;
pub mod websocket;
