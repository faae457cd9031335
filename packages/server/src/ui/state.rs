//! Server state shared by all handlers.

use std::sync::Arc;

use pomoroom_shared::time::{Clock, SystemClock};

use crate::{
    config::ServerSettings,
    domain::{IntervalTicker, RoomRepository, SessionContext},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, DispatchMessageUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, ResetRoomUseCase, UpsertRoomUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// DispatchMessageUseCase（受信メッセージ処理のユースケース）
    pub dispatch_message_usecase: Arc<DispatchMessageUseCase>,
    /// UpsertRoomUseCase（Room 作成・設定更新のユースケース）
    pub upsert_room_usecase: Arc<UpsertRoomUseCase>,
    /// GetRoomsUseCase（Room 一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（Room 詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// ResetRoomUseCase（タイマーリセットのユースケース）
    pub reset_room_usecase: Arc<ResetRoomUseCase>,
    /// 接続ごとの送信キューの長さ
    pub outbound_buffer: usize,
}

impl AppState {
    /// Wire the in-memory room registry and the WebSocket pusher.
    ///
    /// Dependencies are created in order:
    /// 1. Clock / Ticker / MessagePusher
    /// 2. Repository
    /// 3. UseCases
    pub fn in_memory(settings: &ServerSettings) -> Self {
        // 1. Collaborators shared by every room session
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let session_context = SessionContext {
            message_pusher: Arc::new(WebSocketMessagePusher::new(settings.send_timeout)),
            ticker: Arc::new(IntervalTicker::new(settings.tick_interval)),
            clock: Arc::clone(&clock),
        };

        // 2. Repository (in-memory room registry)
        let repository: Arc<dyn RoomRepository> =
            Arc::new(InMemoryRoomRepository::new(session_context));

        // 3. UseCases
        Self {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                repository.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new()),
            dispatch_message_usecase: Arc::new(DispatchMessageUseCase::new(clock)),
            upsert_room_usecase: Arc::new(UpsertRoomUseCase::new(repository.clone())),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(repository.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(repository.clone())),
            reset_room_usecase: Arc::new(ResetRoomUseCase::new(repository)),
            outbound_buffer: settings.outbound_buffer.max(1),
        }
    }
}
