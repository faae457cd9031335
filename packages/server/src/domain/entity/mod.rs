//! Domain entities.

pub mod command;
pub mod media;
pub mod notification;
pub mod room;
pub mod timer;

pub use command::{ClientCommand, InboundMessage};
pub use media::MediaState;
pub use notification::{Notification, RoomEvent, SignalKind};
pub use room::{Room, RoomConfig, RoomSnapshot};
pub use timer::{Cycle, TickOutcome, Timer, TimerGeneration, TimerStatus};
