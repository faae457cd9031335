//! Outbound notifications produced by a room session.
//!
//! These are wire-agnostic; the message pusher encodes them.

use serde_json::Value;

use crate::domain::value_object::{Goal, Timestamp, UserName};

use super::{media::MediaState, room::RoomSnapshot};

/// Named room events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomEvent {
    UserJoin,
    UserLeave,
    StartFocus,
    StartBreak,
    Pause,
    Reset,
    SkipBreak,
    BreakAuto,
    CycleComplete,
    GoalUpdate,
}

impl RoomEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomEvent::UserJoin => "user:join",
            RoomEvent::UserLeave => "user:leave",
            RoomEvent::StartFocus => "timer:start_focus",
            RoomEvent::StartBreak => "timer:start_break",
            RoomEvent::Pause => "timer:pause",
            RoomEvent::Reset => "timer:reset",
            RoomEvent::SkipBreak => "timer:skip_break",
            RoomEvent::BreakAuto => "timer:break_auto",
            RoomEvent::CycleComplete => "timer:cycle_complete",
            RoomEvent::GoalUpdate => "goal:update",
        }
    }
}

/// Peer-connection negotiation message kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Offer => "webrtc:offer",
            SignalKind::Answer => "webrtc:answer",
            SignalKind::Candidate => "webrtc:candidate",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    State(RoomSnapshot),
    Event {
        event: RoomEvent,
        user: Option<UserName>,
        goal: Option<Goal>,
    },
    Chat {
        user: UserName,
        text: String,
        sent_at: Timestamp,
    },
    MediaUpdate {
        user: UserName,
        media: MediaState,
    },
    Signal {
        kind: SignalKind,
        user: UserName,
        target: UserName,
        sdp: Option<Value>,
        candidate: Option<Value>,
    },
}

impl Notification {
    pub fn event(event: RoomEvent, user: Option<UserName>) -> Self {
        Notification::Event {
            event,
            user,
            goal: None,
        }
    }
}
