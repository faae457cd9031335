//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// `POST /rooms` body. Omitted fields fall back to the room defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfigRequestDto {
    pub room_id: String,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub timer_length: Option<u32>,
    #[serde(default)]
    pub break_length: Option<u32>,
}

/// `POST /rooms/{room_id}/reset` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetRoomQuery {
    pub user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub detail: String,
}

impl ErrorResponseDto {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
