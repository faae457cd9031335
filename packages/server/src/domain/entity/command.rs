//! Inbound client commands, decoded from the wire and validated.

use serde_json::Value;

use crate::domain::value_object::UserName;

use super::{media::MediaState, notification::SignalKind};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    Join,
    Leave,
    StartFocus,
    StartBreak,
    Pause,
    Reset,
    SkipBreak,
    Chat {
        text: String,
    },
    GoalUpdate {
        goal: String,
    },
    MediaUpdate {
        media: MediaState,
    },
    Signal {
        kind: SignalKind,
        target: Option<UserName>,
        sdp: Option<Value>,
        candidate: Option<Value>,
    },
}

/// A command together with the explicit user it was sent as, if any
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub user: Option<UserName>,
    pub command: ClientCommand,
}

impl InboundMessage {
    pub fn new(user: Option<UserName>, command: ClientCommand) -> Self {
        Self { user, command }
    }
}
