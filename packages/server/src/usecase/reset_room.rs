//! UseCase: Room のタイマーリセット（管理用）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ResetRoomUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：実行中のタイマーのリセット（接続中のクライアントに通知）
//! - 正常系：user 未指定時は "system" として通知
//! - 異常系：存在しない Room

use std::sync::Arc;

use crate::domain::{RoomId, RoomRepository, RoomSnapshot, UserName};

use super::error::ResetRoomError;

/// user 未指定時のリセット実行者名
pub const SYSTEM_USER: &str = "system";

/// タイマーリセットのユースケース
pub struct ResetRoomUseCase {
    /// Repository（Room レジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl ResetRoomUseCase {
    /// 新しい ResetRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// タイマーをリセットし、リセット後のスナップショットを返す
    ///
    /// # Errors
    ///
    /// Room ID が不正、または Room が存在しない場合は `RoomNotFound`
    pub async fn execute(
        &self,
        room_id: String,
        user: Option<String>,
    ) -> Result<RoomSnapshot, ResetRoomError> {
        let room_id = RoomId::new(room_id).map_err(|_| ResetRoomError::RoomNotFound)?;
        let session = self
            .repository
            .get(&room_id)
            .await
            .map_err(|_| ResetRoomError::RoomNotFound)?;

        let user = user
            .and_then(|u| UserName::new(u).ok())
            .unwrap_or_else(system_user);
        tracing::info!("Room '{}' reset by '{}'", room_id, user);
        session.reset(user).await;
        Ok(session.snapshot().await)
    }
}

fn system_user() -> UserName {
    UserName::new(SYSTEM_USER.to_string()).unwrap_or_else(|_| UserName::guest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Cycle, TimerStatus},
        infrastructure::dto::websocket::ServerMessageDto,
        usecase::test_support::{TestPeer, create_test_repository, name},
    };

    #[tokio::test(start_paused = true)]
    async fn test_reset_running_timer_notifies_connections() {
        // テスト項目: 実行中のタイマーがリセットされ、接続中のクライアントに通知される
        // given (前提条件):
        let repository = create_test_repository();
        let session = repository
            .get_or_create(RoomId::new("studyroom1".to_string()).unwrap())
            .await;
        let mut peer = TestPeer::new();
        session.connect(peer.connection.clone()).await;
        session.start_break(name("alice")).await;
        peer.drain();
        let usecase = ResetRoomUseCase::new(repository);

        // when (操作):
        let snapshot = usecase
            .execute("studyroom1".to_string(), Some("admin".to_string()))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.status, TimerStatus::Idle);
        assert_eq!(snapshot.cycle, Cycle::Focus);
        assert_eq!(snapshot.remaining, 1500);
        match peer.drain().first() {
            Some(ServerMessageDto::Event { event, user, .. }) => {
                assert_eq!(event, "timer:reset");
                assert_eq!(user.as_deref(), Some("admin"));
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reset_defaults_to_system_user() {
        // テスト項目: user 未指定時は "system" として通知される
        // given (前提条件):
        let repository = create_test_repository();
        let session = repository
            .get_or_create(RoomId::new("studyroom1".to_string()).unwrap())
            .await;
        let mut peer = TestPeer::new();
        session.connect(peer.connection.clone()).await;
        let usecase = ResetRoomUseCase::new(repository);

        // when (操作):
        usecase.execute("studyroom1".to_string(), None).await.unwrap();

        // then (期待する結果):
        assert!(matches!(
            peer.drain().first(),
            Some(ServerMessageDto::Event { user: Some(user), .. }) if user == SYSTEM_USER
        ));
    }

    #[tokio::test]
    async fn test_reset_unknown_room() {
        // テスト項目: 存在しない Room のリセットは RoomNotFound になる
        // given (前提条件):
        let usecase = ResetRoomUseCase::new(create_test_repository());

        // when (操作):
        let result = usecase.execute("nowhere".to_string(), None).await;

        // then (期待する結果):
        assert_eq!(result, Err(ResetRoomError::RoomNotFound));
    }
}
