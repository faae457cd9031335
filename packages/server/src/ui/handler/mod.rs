//! Request handlers.

mod http;
mod websocket;

pub use http::{create_room, get_room, health_check, list_rooms, reset_room};
pub use websocket::websocket_handler;
