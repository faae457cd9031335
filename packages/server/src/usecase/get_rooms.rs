//! UseCase: Room 一覧取得
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GetRoomsUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：Room が 0 件
//! - 正常系：複数 Room（Room ID 順）

use std::sync::Arc;

use futures_util::future::join_all;

use crate::domain::{RoomRepository, RoomSnapshot};

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Repository（Room レジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 全 Room のスナップショットを Room ID 順に返す
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        let sessions = self.repository.list().await;
        join_all(sessions.iter().map(|session| session.snapshot())).await
    }
}
