//! Data Transfer Objects for the HTTP API and the room WebSocket channel.

mod conversion;
pub mod http;
pub mod room;
pub mod websocket;
