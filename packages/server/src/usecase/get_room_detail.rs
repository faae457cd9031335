//! UseCase: Room 詳細取得
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GetRoomDetailUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：存在する Room（大文字小文字を区別しない）
//! - 異常系：存在しない Room、Room ID として不正な文字列

use std::sync::Arc;

use crate::domain::{RoomId, RoomRepository, RoomSnapshot};

use super::error::GetRoomDetailError;

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Repository（Room レジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Room のスナップショットを取得
    ///
    /// # Errors
    ///
    /// Room ID が不正、または Room が存在しない場合は `RoomNotFound`
    pub async fn execute(&self, room_id: String) -> Result<RoomSnapshot, GetRoomDetailError> {
        let room_id = RoomId::new(room_id).map_err(|_| GetRoomDetailError::RoomNotFound)?;
        let session = self
            .repository
            .get(&room_id)
            .await
            .map_err(|_| GetRoomDetailError::RoomNotFound)?;
        Ok(session.snapshot().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RepositoryError, repository::MockRoomRepository},
        usecase::test_support::create_test_repository,
    };

    #[tokio::test]
    async fn test_get_room_detail_is_case_insensitive() {
        // テスト項目: Room ID の大文字小文字を区別せずに取得できる
        // given (前提条件):
        let repository = create_test_repository();
        repository
            .get_or_create(RoomId::new("studyroom1".to_string()).unwrap())
            .await;
        let usecase = GetRoomDetailUseCase::new(repository);

        // when (操作):
        let result = usecase.execute("StudyRoom1".to_string()).await;

        // then (期待する結果):
        assert_eq!(result.unwrap().room_id.as_str(), "studyroom1");
    }

    #[tokio::test]
    async fn test_get_room_detail_not_found() {
        // テスト項目: 存在しない Room は RoomNotFound になる
        // given (前提条件):
        let mut repository = MockRoomRepository::new();
        repository
            .expect_get()
            .times(1)
            .returning(|id| Err(RepositoryError::RoomNotFound(id.as_str().to_string())));
        let usecase = GetRoomDetailUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase.execute("nowhere".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Err(GetRoomDetailError::RoomNotFound));
    }

    #[tokio::test]
    async fn test_get_room_detail_invalid_id_skips_lookup() {
        // テスト項目: Room ID として不正な文字列は Repository を参照せず RoomNotFound になる
        // given (前提条件):
        let mut repository = MockRoomRepository::new();
        repository.expect_get().never();
        let usecase = GetRoomDetailUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase.execute("no/such room".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Err(GetRoomDetailError::RoomNotFound));
    }
}
