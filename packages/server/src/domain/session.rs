//! Live room session.
//!
//! A `RoomSession` owns one room's mutable state behind a single lock:
//! the [`Room`] entity (goal, timer, participants, media states), the set of
//! subscribed connections and the name -> connection table used for targeted
//! relay. Every operation takes the lock for its critical section only and
//! releases it before any delivery, so a slow peer never holds up the room.
//!
//! At most one timer job counts for a session at a time: each job carries the
//! [`TimerGeneration`] it was started under and stops as soon as a tick reports
//! it as stale.

use std::{
    collections::HashMap,
    sync::{Arc, Weak},
};

use pomoroom_shared::time::Clock;
use tokio::sync::Mutex;

use super::{
    connection::Connection,
    entity::{
        MediaState, Notification, Room, RoomConfig, RoomEvent, RoomSnapshot, TickOutcome,
        TimerGeneration,
    },
    message_pusher::MessagePusher,
    ticker::Ticker,
    value_object::{ConnectionId, Goal, RoomId, Timestamp, UserName},
};

/// Collaborators shared by every session of a registry
#[derive(Clone)]
pub struct SessionContext {
    pub message_pusher: Arc<dyn MessagePusher>,
    pub ticker: Arc<dyn Ticker>,
    pub clock: Arc<dyn Clock>,
}

struct SessionState {
    room: Room,
    connections: HashMap<ConnectionId, Connection>,
    connection_by_user: HashMap<UserName, ConnectionId>,
}

impl SessionState {
    fn routed_names(&self, connection_id: ConnectionId) -> Vec<UserName> {
        self.connection_by_user
            .iter()
            .filter(|(_, id)| **id == connection_id)
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn detach(&mut self, connection_id: ConnectionId) -> bool {
        let removed = self.connections.remove(&connection_id).is_some();
        self.connection_by_user.retain(|_, id| *id != connection_id);
        removed
    }
}

pub struct RoomSession {
    id: RoomId,
    state: Mutex<SessionState>,
    context: SessionContext,
}

impl RoomSession {
    pub fn new(config: RoomConfig, context: SessionContext) -> Arc<Self> {
        let now = Timestamp::new(context.clock.now_millis());
        let id = config.room_id.clone();
        Arc::new(Self {
            id,
            state: Mutex::new(SessionState {
                room: Room::new(config, now),
                connections: HashMap::new(),
                connection_by_user: HashMap::new(),
            }),
            context,
        })
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.context.clock.now_millis())
    }

    pub async fn snapshot(&self) -> RoomSnapshot {
        self.state.lock().await.room.snapshot()
    }

    /// Update goal and lengths without touching status, cycle or the running job.
    pub async fn apply_config(&self, config: RoomConfig) {
        let now = self.now();
        let mut state = self.state.lock().await;
        state.room.apply_config(config, now);
    }

    // ------------------------------------------------------------------
    // Connections
    // ------------------------------------------------------------------

    pub async fn connect(&self, connection: Connection) {
        let mut state = self.state.lock().await;
        tracing::debug!("Connection '{}' subscribed to room '{}'", connection.id(), self.id);
        state.connections.insert(connection.id(), connection);
    }

    pub async fn disconnect(&self, connection_id: ConnectionId) {
        let mut state = self.state.lock().await;
        if state.detach(connection_id) {
            tracing::debug!("Connection '{}' left room '{}'", connection_id, self.id);
        }
    }

    /// Route targeted relay for `name` to `connection_id`. Last registration wins.
    ///
    /// Returns `false` if the connection is no longer subscribed.
    pub async fn register_socket(&self, name: UserName, connection_id: ConnectionId) -> bool {
        let mut state = self.state.lock().await;
        if !state.connections.contains_key(&connection_id) {
            return false;
        }
        if let Some(previous) = state.connection_by_user.insert(name.clone(), connection_id)
            && previous != connection_id
        {
            tracing::debug!(
                "User '{}' in room '{}' moved from connection '{}' to '{}'",
                name,
                self.id,
                previous,
                connection_id
            );
        }
        true
    }

    pub async fn connection_count(&self) -> usize {
        self.state.lock().await.connections.len()
    }

    // ------------------------------------------------------------------
    // Participants
    // ------------------------------------------------------------------

    pub async fn add_participant(&self, name: UserName) {
        let now = self.now();
        let mut state = self.state.lock().await;
        state.room.add_participant(name, now);
    }

    /// Remove the participant, its media state and its relay route.
    pub async fn remove_participant(&self, name: &UserName) -> bool {
        let mut state = self.state.lock().await;
        state.connection_by_user.remove(name);
        state.room.remove_participant(name)
    }

    /// Drop `name` and every name routed to `connection_id` after the
    /// connection went away. Names still registered to another live connection
    /// are kept. Media state goes with the name even if it never joined.
    ///
    /// Returns `true` if at least one participant was removed.
    pub async fn release_participant(&self, name: &UserName, connection_id: ConnectionId) -> bool {
        let mut state = self.state.lock().await;
        let mut names = state.routed_names(connection_id);
        if !names.contains(name) {
            names.push(name.clone());
        }
        state.detach(connection_id);

        let mut removed = false;
        for released in names {
            if state.connection_by_user.contains_key(&released) {
                continue;
            }
            removed |= state.room.remove_participant(&released);
        }
        removed
    }

    pub async fn update_media_state(&self, name: UserName, media: MediaState) -> MediaState {
        let mut state = self.state.lock().await;
        state.room.update_media_state(name, media)
    }

    pub async fn set_goal(&self, goal: Goal) -> Goal {
        let now = self.now();
        let mut state = self.state.lock().await;
        state.room.set_goal(goal, now)
    }

    // ------------------------------------------------------------------
    // Timer transitions
    // ------------------------------------------------------------------

    pub async fn start_focus(self: &Arc<Self>, user: UserName) {
        let generation = {
            let now = self.now();
            let mut state = self.state.lock().await;
            state.room.start_focus(now)
        };
        self.spawn_timer_job(generation);
        self.announce(RoomEvent::StartFocus, Some(user)).await;
    }

    pub async fn start_break(self: &Arc<Self>, user: UserName) {
        let generation = {
            let now = self.now();
            let mut state = self.state.lock().await;
            state.room.start_break(now)
        };
        self.spawn_timer_job(generation);
        self.announce(RoomEvent::StartBreak, Some(user)).await;
    }

    /// No-op (nothing broadcast) unless the timer is running.
    pub async fn pause(&self, user: UserName) -> bool {
        let paused = {
            let now = self.now();
            let mut state = self.state.lock().await;
            state.room.pause(now)
        };
        if paused {
            self.announce(RoomEvent::Pause, Some(user)).await;
        }
        paused
    }

    pub async fn reset(&self, user: UserName) {
        {
            let now = self.now();
            let mut state = self.state.lock().await;
            state.room.reset(now);
        }
        self.announce(RoomEvent::Reset, Some(user)).await;
    }

    /// No-op (nothing broadcast) unless the break cycle is active.
    pub async fn skip_break(&self, user: UserName) -> bool {
        let skipped = {
            let now = self.now();
            let mut state = self.state.lock().await;
            state.room.skip_break(now)
        };
        if skipped {
            self.announce(RoomEvent::SkipBreak, Some(user)).await;
        }
        skipped
    }

    fn spawn_timer_job(self: &Arc<Self>, generation: TimerGeneration) {
        let session = Arc::downgrade(self);
        let ticker = Arc::clone(&self.context.ticker);
        tracing::debug!("Room '{}' timer job {} started", self.id, generation);
        tokio::spawn(run_timer_job(session, ticker, generation));
    }

    async fn on_tick(&self, generation: TimerGeneration) -> TickOutcome {
        let outcome = {
            let now = self.now();
            let mut state = self.state.lock().await;
            state.room.tick(generation, now)
        };

        match outcome {
            TickOutcome::Stale => {
                tracing::debug!("Room '{}' timer job {} stopped", self.id, generation);
            }
            TickOutcome::Ticked {
                should_broadcast, ..
            } => {
                if should_broadcast {
                    self.broadcast_state().await;
                }
            }
            TickOutcome::BreakStarted => {
                tracing::info!("Room '{}' focus finished, break started", self.id);
                self.announce(RoomEvent::BreakAuto, None).await;
            }
            TickOutcome::CycleCompleted => {
                tracing::info!("Room '{}' completed a focus/break cycle", self.id);
                self.announce(RoomEvent::CycleComplete, None).await;
            }
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Fan-out
    // ------------------------------------------------------------------

    /// Emit `event`, then the full state.
    pub async fn announce(&self, event: RoomEvent, user: Option<UserName>) {
        self.broadcast(Notification::event(event, user)).await;
        self.broadcast_state().await;
    }

    pub async fn broadcast_state(&self) {
        let snapshot = self.snapshot().await;
        self.broadcast(Notification::State(snapshot)).await;
    }

    /// Deliver to every connection subscribed at call time.
    /// Connections that fail delivery are unsubscribed afterwards.
    pub async fn broadcast(&self, notification: Notification) {
        let targets: Vec<Connection> = {
            let state = self.state.lock().await;
            state.connections.values().cloned().collect()
        };
        if targets.is_empty() {
            return;
        }

        let failed = self
            .context
            .message_pusher
            .broadcast(targets, &notification)
            .await;
        if failed.is_empty() {
            return;
        }

        let mut state = self.state.lock().await;
        for connection_id in failed {
            tracing::warn!(
                "Dropping connection '{}' from room '{}' after failed delivery",
                connection_id,
                self.id
            );
            state.detach(connection_id);
        }
    }

    /// Deliver to the connection registered for `name`, if any.
    pub async fn send_to_user(&self, name: &UserName, notification: Notification) -> bool {
        let target = {
            let state = self.state.lock().await;
            state
                .connection_by_user
                .get(name)
                .and_then(|id| state.connections.get(id))
                .cloned()
        };
        let Some(connection) = target else {
            tracing::debug!("No connection registered for '{}' in room '{}'", name, self.id);
            return false;
        };

        match self
            .context
            .message_pusher
            .push_to(&connection, &notification)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to relay to '{}' in room '{}': {}", name, self.id, e);
                self.disconnect(connection.id()).await;
                false
            }
        }
    }
}

async fn run_timer_job(
    session: Weak<RoomSession>,
    ticker: Arc<dyn Ticker>,
    generation: TimerGeneration,
) {
    loop {
        ticker.tick().await;
        let Some(session) = session.upgrade() else {
            return;
        };
        if !session.on_tick(generation).await.keeps_running() {
            return;
        }
    }
}
