//! UseCase layer: application operations on rooms and room connections.

mod connect_participant;
mod context;
mod disconnect_participant;
mod dispatch_message;
mod error;
mod get_room_detail;
mod get_rooms;
mod reset_room;
mod upsert_room;

pub use connect_participant::ConnectParticipantUseCase;
pub use context::ConnectionContext;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use dispatch_message::DispatchMessageUseCase;
pub use error::{GetRoomDetailError, ResetRoomError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use reset_room::ResetRoomUseCase;
pub use upsert_room::UpsertRoomUseCase;

#[cfg(test)]
pub(crate) mod test_support;
