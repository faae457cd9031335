//! Conversion logic between DTOs and domain entities.

use pomoroom_shared::time::millis_to_unix_seconds;
use serde_json::{Map, Value};

use crate::domain::{
    BreakLength, ClientCommand, Goal, InboundMessage, MediaState, Notification, RoomConfig,
    RoomId, RoomSnapshot, SignalKind, TimerLength, UserName, ValueObjectError,
};

use super::{
    http::RoomConfigRequestDto,
    room::{MediaStateDto, RoomStateDto},
    websocket::{ClientMessageDto, ServerMessageDto, SignalDto},
};

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<RoomConfigRequestDto> for RoomConfig {
    type Error = ValueObjectError;

    fn try_from(dto: RoomConfigRequestDto) -> Result<Self, Self::Error> {
        Ok(Self {
            room_id: RoomId::new(dto.room_id)?,
            goal: Goal::new(dto.goal.unwrap_or_default()),
            timer_length: dto
                .timer_length
                .map(TimerLength::new)
                .transpose()?
                .unwrap_or_default(),
            break_length: dto
                .break_length
                .map(BreakLength::new)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

// Loose truthiness: missing, null, false, 0, "" and empty containers are all off.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn normalize_media(media: Option<&Map<String, Value>>) -> MediaState {
    let flag = |key: &str| media.and_then(|m| m.get(key)).is_some_and(is_truthy);
    MediaState::new(flag("audio"), flag("video"), flag("screen"))
}

fn non_empty_name(value: Option<String>) -> Option<UserName> {
    value.and_then(|v| UserName::new(v).ok())
}

impl ClientMessageDto {
    /// Decode into a domain message. Unknown `type` values yield `None`.
    pub fn into_inbound(self) -> Option<InboundMessage> {
        let command = match self.message_type.as_str() {
            "join" => ClientCommand::Join,
            "leave" => ClientCommand::Leave,
            "timer:start_focus" => ClientCommand::StartFocus,
            "timer:start_break" => ClientCommand::StartBreak,
            "timer:pause" => ClientCommand::Pause,
            "timer:reset" => ClientCommand::Reset,
            "timer:skip_break" => ClientCommand::SkipBreak,
            "chat" => ClientCommand::Chat {
                text: self.text.unwrap_or_default(),
            },
            "goal:update" => ClientCommand::GoalUpdate {
                goal: self.goal.unwrap_or_default(),
            },
            "media:update" => ClientCommand::MediaUpdate {
                media: normalize_media(self.media.as_ref()),
            },
            "webrtc:offer" | "webrtc:answer" | "webrtc:candidate" => {
                let kind = match self.message_type.as_str() {
                    "webrtc:offer" => SignalKind::Offer,
                    "webrtc:answer" => SignalKind::Answer,
                    _ => SignalKind::Candidate,
                };
                ClientCommand::Signal {
                    kind,
                    target: non_empty_name(self.target),
                    sdp: self.sdp,
                    candidate: self.candidate,
                }
            }
            _ => return None,
        };
        Some(InboundMessage::new(non_empty_name(self.user), command))
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<MediaState> for MediaStateDto {
    fn from(model: MediaState) -> Self {
        Self {
            audio: model.audio,
            video: model.video,
            screen: model.screen,
        }
    }
}

impl From<RoomSnapshot> for RoomStateDto {
    fn from(model: RoomSnapshot) -> Self {
        Self {
            room_id: model.room_id.into_string(),
            goal: model.goal.into_string(),
            timer_length: model.timer_length.seconds(),
            break_length: model.break_length.seconds(),
            remaining: model.remaining,
            status: model.status.as_str().to_string(),
            cycle: model.cycle.as_str().to_string(),
            participants: model
                .participants
                .into_iter()
                .map(UserName::into_string)
                .collect(),
            media_states: model
                .media_states
                .into_iter()
                .map(|(name, media)| (name.into_string(), media.into()))
                .collect(),
            updated_at: millis_to_unix_seconds(model.updated_at.value()),
        }
    }
}

impl From<&Notification> for ServerMessageDto {
    fn from(model: &Notification) -> Self {
        match model {
            Notification::State(snapshot) => ServerMessageDto::State {
                data: snapshot.clone().into(),
            },
            Notification::Event { event, user, goal } => ServerMessageDto::Event {
                event: event.as_str().to_string(),
                user: user.as_ref().map(|u| u.as_str().to_string()),
                goal: goal.as_ref().map(|g| g.as_str().to_string()),
            },
            Notification::Chat {
                user,
                text,
                sent_at,
            } => ServerMessageDto::Chat {
                user: user.as_str().to_string(),
                text: text.clone(),
                ts: millis_to_unix_seconds(sent_at.value()),
            },
            Notification::MediaUpdate { user, media } => ServerMessageDto::MediaUpdate {
                user: user.as_str().to_string(),
                media: (*media).into(),
            },
            Notification::Signal {
                kind,
                user,
                target,
                sdp,
                candidate,
            } => {
                let signal = SignalDto {
                    user: user.as_str().to_string(),
                    target: target.as_str().to_string(),
                    sdp: sdp.clone(),
                    candidate: candidate.clone(),
                };
                match kind {
                    SignalKind::Offer => ServerMessageDto::WebrtcOffer(signal),
                    SignalKind::Answer => ServerMessageDto::WebrtcAnswer(signal),
                    SignalKind::Candidate => ServerMessageDto::WebrtcCandidate(signal),
                }
            }
        }
    }
}
