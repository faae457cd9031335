//! Domain layer: value objects, entities, the live room session and the ports
//! (repository, message pusher, ticker) it depends on.

pub mod connection;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod session;
pub mod ticker;
pub mod value_object;

pub use connection::{Connection, PusherChannel};
pub use entity::{
    ClientCommand, Cycle, InboundMessage, MediaState, Notification, Room, RoomConfig, RoomEvent,
    RoomSnapshot, SignalKind, TimerStatus,
};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use message_pusher::MessagePusher;
pub use repository::RoomRepository;
pub use session::{RoomSession, SessionContext};
pub use ticker::{IntervalTicker, Ticker};
pub use value_object::{BreakLength, ConnectionId, Goal, RoomId, TimerLength, Timestamp, UserName};
