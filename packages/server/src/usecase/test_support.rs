//! Test helpers shared by the use case tests.

use std::sync::Arc;

use pomoroom_shared::time::{Clock, FixedClock};
use tokio::sync::mpsc;

use crate::{
    domain::{
        Connection, IntervalTicker, RoomConfig, RoomId, RoomSession, SessionContext, UserName,
    },
    infrastructure::{
        dto::websocket::ServerMessageDto, message_pusher::WebSocketMessagePusher,
        repository::InMemoryRoomRepository,
    },
};

pub const FIXED_NOW_MILLIS: i64 = 1_700_000_000_000;

pub fn test_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(FIXED_NOW_MILLIS))
}

pub fn test_session_context() -> SessionContext {
    SessionContext {
        message_pusher: Arc::new(WebSocketMessagePusher::default()),
        ticker: Arc::new(IntervalTicker::default()),
        clock: test_clock(),
    }
}

pub fn create_test_repository() -> Arc<InMemoryRoomRepository> {
    Arc::new(InMemoryRoomRepository::new(test_session_context()))
}

pub fn create_test_session(room_id: &str) -> Arc<RoomSession> {
    RoomSession::new(
        RoomConfig::with_defaults(RoomId::new(room_id.to_string()).unwrap()),
        test_session_context(),
    )
}

pub fn name(value: &str) -> UserName {
    UserName::new(value.to_string()).unwrap()
}

/// A subscribed-connection stand-in whose outbound JSON can be inspected
pub struct TestPeer {
    pub connection: Connection,
    receiver: mpsc::Receiver<String>,
}

impl TestPeer {
    pub fn new() -> Self {
        let (tx, receiver) = mpsc::channel(64);
        Self {
            connection: Connection::new(tx),
            receiver,
        }
    }

    /// Everything pushed so far, decoded
    pub fn drain(&mut self) -> Vec<ServerMessageDto> {
        let mut messages = Vec::new();
        while let Ok(raw) = self.receiver.try_recv() {
            messages.push(serde_json::from_str(&raw).unwrap());
        }
        messages
    }
}

impl Default for TestPeer {
    fn default() -> Self {
        Self::new()
    }
}
