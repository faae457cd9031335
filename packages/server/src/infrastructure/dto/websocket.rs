//! Room WebSocket channel messages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::room::{MediaStateDto, RoomStateDto};

/// Inbound message. Only `type` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientMessageDto {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Map<String, Value>>,
}

/// Relayed peer-connection negotiation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDto {
    pub user: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Value>,
}

/// Outbound message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessageDto {
    #[serde(rename = "state")]
    State { data: RoomStateDto },
    #[serde(rename = "event")]
    Event {
        event: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        goal: Option<String>,
    },
    #[serde(rename = "chat")]
    Chat { user: String, text: String, ts: f64 },
    #[serde(rename = "media:update")]
    MediaUpdate { user: String, media: MediaStateDto },
    #[serde(rename = "webrtc:offer")]
    WebrtcOffer(SignalDto),
    #[serde(rename = "webrtc:answer")]
    WebrtcAnswer(SignalDto),
    #[serde(rename = "webrtc:candidate")]
    WebrtcCandidate(SignalDto),
}
