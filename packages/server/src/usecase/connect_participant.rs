//! UseCase: 接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - Room の取得または自動作成、接続の購読登録、状態のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：未知の Room ID への接続（デフォルト設定で自動作成）
//! - 正常系：既存 Room への接続（既存の接続にも新しい状態が届く）

use std::sync::Arc;

use crate::domain::{Connection, RoomId, RoomRepository};

use super::context::ConnectionContext;

/// 接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（Room レジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 接続を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 接続先の Room ID（存在しなければデフォルト設定で作成）
    /// * `connection` - トランスポート層で確立済みの接続
    ///
    /// # Returns
    ///
    /// ゲスト ID を持つ接続コンテキスト
    pub async fn execute(&self, room_id: RoomId, connection: Connection) -> ConnectionContext {
        let session = self.repository.get_or_create(room_id).await;
        let connection_id = connection.id();

        session.connect(connection).await;
        session.broadcast_state().await;

        let context = ConnectionContext::new(session, connection_id);
        tracing::info!(
            "Connection '{}' joined room '{}' as '{}'",
            connection_id,
            context.session().id(),
            context.identity()
        );
        context
    }
}
