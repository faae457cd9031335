//! Per-participant media flags (advisory only).

/// Audio / video / screen-share flags announced by a participant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaState {
    pub audio: bool,
    pub video: bool,
    pub screen: bool,
}

impl MediaState {
    pub fn new(audio: bool, video: bool, screen: bool) -> Self {
        Self {
            audio,
            video,
            screen,
        }
    }
}
