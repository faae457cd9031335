//! Domain layer errors.

use thiserror::Error;

/// Value object construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room_id must be between {min} and {max} characters, got {actual}")]
    RoomIdLength {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("room_id must be alphanumeric")]
    RoomIdNotAlphanumeric,

    #[error("user name must not be empty")]
    UserNameEmpty,

    #[error("{field} must be between {min} and {max} seconds, got {actual}")]
    DurationOutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        actual: u32,
    },
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),
}

/// Message delivery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// The connection's outbound queue is closed (peer gone)
    #[error("Connection '{0}' is closed")]
    ChannelClosed(String),

    /// The connection did not accept the message within the send bound
    #[error("Timed out pushing to connection '{0}'")]
    Timeout(String),

    #[error("Failed to encode message: {0}")]
    Encode(String),
}
