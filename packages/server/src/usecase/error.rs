//! UseCase layer errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room not found")]
    RoomNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResetRoomError {
    #[error("Room not found")]
    RoomNotFound,
}
