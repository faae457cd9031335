//! Room entity: goal, timer, participants and media states of one study room.

use std::collections::{BTreeMap, HashMap};

use crate::domain::value_object::{BreakLength, Goal, RoomId, TimerLength, Timestamp, UserName};

use super::{
    media::MediaState,
    timer::{Cycle, TickOutcome, Timer, TimerGeneration, TimerStatus},
};

/// Validated creation / update input for a room
#[derive(Debug, Clone, PartialEq)]
pub struct RoomConfig {
    pub room_id: RoomId,
    pub goal: Goal,
    pub timer_length: TimerLength,
    pub break_length: BreakLength,
}

impl RoomConfig {
    pub fn with_defaults(room_id: RoomId) -> Self {
        Self {
            room_id,
            goal: Goal::default(),
            timer_length: TimerLength::default(),
            break_length: BreakLength::default(),
        }
    }
}

/// Immutable view of a room, as broadcast to clients
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub goal: Goal,
    pub timer_length: TimerLength,
    pub break_length: BreakLength,
    pub remaining: u32,
    pub status: TimerStatus,
    pub cycle: Cycle,
    /// Sorted by name
    pub participants: Vec<UserName>,
    pub media_states: BTreeMap<UserName, MediaState>,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    goal: Goal,
    timer: Timer,
    /// Participant name -> joined / last seen
    participants: HashMap<UserName, Timestamp>,
    media_states: HashMap<UserName, MediaState>,
    updated_at: Timestamp,
}

impl Room {
    pub fn new(config: RoomConfig, now: Timestamp) -> Self {
        Self {
            id: config.room_id,
            goal: config.goal,
            timer: Timer::new(config.timer_length, config.break_length),
            participants: HashMap::new(),
            media_states: HashMap::new(),
            updated_at: now,
        }
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // updated_at never goes backwards even if the wall clock does
    fn touch(&mut self, now: Timestamp) {
        self.updated_at = self.updated_at.max(now);
    }

    pub fn apply_config(&mut self, config: RoomConfig, now: Timestamp) {
        self.goal = config.goal;
        self.timer
            .apply_lengths(config.timer_length, config.break_length);
        self.touch(now);
    }

    pub fn set_goal(&mut self, goal: Goal, now: Timestamp) -> Goal {
        self.goal = goal;
        self.touch(now);
        self.goal.clone()
    }

    pub fn add_participant(&mut self, name: UserName, now: Timestamp) {
        self.participants.insert(name, now);
    }

    /// Removes the participant together with its media state.
    pub fn remove_participant(&mut self, name: &UserName) -> bool {
        self.media_states.remove(name);
        self.participants.remove(name).is_some()
    }

    pub fn update_media_state(&mut self, name: UserName, media: MediaState) -> MediaState {
        self.media_states.insert(name, media);
        media
    }

    pub fn start_focus(&mut self, now: Timestamp) -> TimerGeneration {
        self.touch(now);
        self.timer.start_focus()
    }

    pub fn start_break(&mut self, now: Timestamp) -> TimerGeneration {
        self.touch(now);
        self.timer.start_break()
    }

    pub fn pause(&mut self, now: Timestamp) -> bool {
        let paused = self.timer.pause();
        if paused {
            self.touch(now);
        }
        paused
    }

    pub fn reset(&mut self, now: Timestamp) {
        self.timer.reset();
        self.touch(now);
    }

    pub fn skip_break(&mut self, now: Timestamp) -> bool {
        let skipped = self.timer.skip_break();
        if skipped {
            self.touch(now);
        }
        skipped
    }

    /// Apply one timer tick. Cycle changes count as a mutation; plain decrements do not.
    pub fn tick(&mut self, generation: TimerGeneration, now: Timestamp) -> TickOutcome {
        let outcome = self.timer.tick(generation);
        if matches!(
            outcome,
            TickOutcome::BreakStarted | TickOutcome::CycleCompleted
        ) {
            self.touch(now);
        }
        outcome
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        let mut participants: Vec<UserName> = self.participants.keys().cloned().collect();
        participants.sort();

        RoomSnapshot {
            room_id: self.id.clone(),
            goal: self.goal.clone(),
            timer_length: self.timer.timer_length(),
            break_length: self.timer.break_length(),
            remaining: self.timer.remaining(),
            status: self.timer.status(),
            cycle: self.timer.cycle(),
            participants,
            media_states: self
                .media_states
                .iter()
                .map(|(name, media)| (name.clone(), *media))
                .collect(),
            updated_at: self.updated_at,
        }
    }
}
