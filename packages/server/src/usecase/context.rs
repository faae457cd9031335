//! Per-connection state carried by the WebSocket gateway.

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomSession, UserName};

/// The room a connection belongs to and the identity it last established
pub struct ConnectionContext {
    session: Arc<RoomSession>,
    connection_id: ConnectionId,
    identity: UserName,
}

impl ConnectionContext {
    /// New context with an anonymous `guest-…` identity
    pub fn new(session: Arc<RoomSession>, connection_id: ConnectionId) -> Self {
        Self {
            session,
            connection_id,
            identity: UserName::guest(),
        }
    }

    pub fn session(&self) -> &Arc<RoomSession> {
        &self.session
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn identity(&self) -> &UserName {
        &self.identity
    }

    pub fn set_identity(&mut self, identity: UserName) {
        self.identity = identity;
    }

    /// The explicit user of a message, or this connection's identity
    pub fn resolve_user(&self, explicit: Option<UserName>) -> UserName {
        explicit.unwrap_or_else(|| self.identity.clone())
    }
}
