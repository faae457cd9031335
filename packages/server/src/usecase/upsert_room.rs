//! UseCase: Room の作成・設定更新
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpsertRoomUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規 Room の作成
//! - 正常系：既存 Room の設定更新（タイマーの状態は維持）

use std::sync::Arc;

use crate::domain::{RoomConfig, RoomRepository, RoomSnapshot};

/// Room の作成・設定更新のユースケース
pub struct UpsertRoomUseCase {
    /// Repository（Room レジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl UpsertRoomUseCase {
    /// 新しい UpsertRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 作成または設定更新を実行し、適用後のスナップショットを返す
    ///
    /// 設定は検証済み（DTO からの変換時に検証）であることを前提とします。
    pub async fn execute(&self, config: RoomConfig) -> RoomSnapshot {
        let session = self.repository.upsert(config).await;
        session.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{BreakLength, Goal, RoomId, TimerLength, TimerStatus},
        usecase::test_support::{create_test_repository, name},
    };

    fn config(goal: &str, timer_length: u32, break_length: u32) -> RoomConfig {
        RoomConfig {
            room_id: RoomId::new("studyroom1".to_string()).unwrap(),
            goal: Goal::new(goal.to_string()),
            timer_length: TimerLength::new(timer_length).unwrap(),
            break_length: BreakLength::new(break_length).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_room() {
        // テスト項目: 存在しない Room が作成される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = UpsertRoomUseCase::new(repository.clone());

        // when (操作):
        let snapshot = usecase.execute(config("read", 60, 60)).await;

        // then (期待する結果):
        assert_eq!(snapshot.room_id.as_str(), "studyroom1");
        assert_eq!(snapshot.goal.as_str(), "read");
        assert_eq!(snapshot.remaining, 60);
        assert_eq!(snapshot.status, TimerStatus::Idle);
        assert_eq!(repository.list().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upsert_updates_existing_room_without_restart() {
        // テスト項目: 既存 Room の設定更新で参加者と実行中のタイマーが維持される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = UpsertRoomUseCase::new(repository.clone());
        usecase.execute(config("read", 60, 60)).await;
        let session = repository
            .get(&RoomId::new("studyroom1".to_string()).unwrap())
            .await
            .unwrap();
        session.add_participant(name("alice")).await;
        session.start_focus(name("alice")).await;

        // when (操作):
        let snapshot = usecase.execute(config("write", 120, 300)).await;

        // then (期待する結果):
        assert_eq!(snapshot.goal.as_str(), "write");
        assert_eq!(snapshot.timer_length.seconds(), 120);
        assert_eq!(snapshot.break_length.seconds(), 300);
        assert_eq!(snapshot.status, TimerStatus::Running);
        assert_eq!(snapshot.remaining, 60);
        assert_eq!(snapshot.participants, vec![name("alice")]);
        assert_eq!(repository.list().await.len(), 1);
    }
}
