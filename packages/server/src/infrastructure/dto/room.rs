//! Room state DTO, shared by the HTTP API and `state` WebSocket messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaStateDto {
    pub audio: bool,
    pub video: bool,
    pub screen: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomStateDto {
    pub room_id: String,
    pub goal: String,
    pub timer_length: u32,
    pub break_length: u32,
    pub remaining: u32,
    pub status: String,
    pub cycle: String,
    pub participants: Vec<String>,
    pub media_states: BTreeMap<String, MediaStateDto>,
    /// Unix seconds
    pub updated_at: f64,
}
