//! Value objects of the study room domain.

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

pub const ROOM_ID_MIN_LEN: usize = 3;
pub const ROOM_ID_MAX_LEN: usize = 32;

pub const GOAL_MAX_CHARS: usize = 120;

pub const TIMER_LENGTH_MIN: u32 = 60;
pub const TIMER_LENGTH_MAX: u32 = 120 * 60;
pub const TIMER_LENGTH_DEFAULT: u32 = 25 * 60;

pub const BREAK_LENGTH_MIN: u32 = 60;
pub const BREAK_LENGTH_MAX: u32 = 30 * 60;
pub const BREAK_LENGTH_DEFAULT: u32 = 5 * 60;

/// Room identifier: trimmed, alphanumeric, case-folded to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let cleaned = value.trim();
        let len = cleaned.chars().count();
        if !(ROOM_ID_MIN_LEN..=ROOM_ID_MAX_LEN).contains(&len) {
            return Err(ValueObjectError::RoomIdLength {
                min: ROOM_ID_MIN_LEN,
                max: ROOM_ID_MAX_LEN,
                actual: len,
            });
        }
        if !cleaned.chars().all(char::is_alphanumeric) {
            return Err(ValueObjectError::RoomIdNotAlphanumeric);
        }
        Ok(Self(cleaned.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Participant display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserName(String);

impl UserName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::UserNameEmpty);
        }
        Ok(Self(value))
    }

    /// Anonymous identity for a connection that has not joined yet.
    pub fn guest() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("guest-{}", &suffix[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text room goal, truncated to `GOAL_MAX_CHARS` characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Goal(String);

impl Goal {
    pub fn new(value: String) -> Self {
        match value.char_indices().nth(GOAL_MAX_CHARS) {
            Some((cut, _)) => Self(value[..cut].to_string()),
            None => Self(value),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Goal {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

fn check_range(
    field: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<u32, ValueObjectError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValueObjectError::DurationOutOfRange {
            field,
            min,
            max,
            actual: value,
        })
    }
}

/// Focus interval length in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerLength(u32);

impl TimerLength {
    pub fn new(seconds: u32) -> Result<Self, ValueObjectError> {
        check_range("timer_length", seconds, TIMER_LENGTH_MIN, TIMER_LENGTH_MAX).map(Self)
    }

    pub fn seconds(&self) -> u32 {
        self.0
    }
}

impl Default for TimerLength {
    fn default() -> Self {
        Self(TIMER_LENGTH_DEFAULT)
    }
}

/// Break interval length in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakLength(u32);

impl BreakLength {
    pub fn new(seconds: u32) -> Result<Self, ValueObjectError> {
        check_range("break_length", seconds, BREAK_LENGTH_MIN, BREAK_LENGTH_MAX).map(Self)
    }

    pub fn seconds(&self) -> u32 {
        self.0
    }
}

impl Default for BreakLength {
    fn default() -> Self {
        Self(BREAK_LENGTH_DEFAULT)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Identity of one live socket, independent of the participant name it claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
