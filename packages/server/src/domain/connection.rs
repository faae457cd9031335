//! Live connection handle.

use tokio::sync::mpsc;

use super::value_object::ConnectionId;

/// Outbound queue feeding one socket's writer task
pub type PusherChannel = mpsc::Sender<String>;

/// A subscribed socket: its identity plus the queue its writer task drains
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    sender: PusherChannel,
}

impl Connection {
    pub fn new(sender: PusherChannel) -> Self {
        Self {
            id: ConnectionId::generate(),
            sender,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn sender(&self) -> &PusherChannel {
        &self.sender
    }
}
