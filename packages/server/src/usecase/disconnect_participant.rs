//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 購読解除、参加者の削除、残りの接続への状態ブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みの接続の切断（参加者とメディア状態が消える）
//! - エッジケース：同名の別接続が残っている場合（参加者は残る）
//! - エッジケース：join していないゲスト接続の切断
//! - エッジケース：join せずにメディア状態を送ったゲストの切断（メディア状態も消える）
//! - エッジケース：名前を変えて join し直した接続の切断（全ての名前が消える）

use super::context::ConnectionContext;

/// 切断のユースケース
#[derive(Debug, Default)]
pub struct DisconnectParticipantUseCase;

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new() -> Self {
        Self
    }

    /// 切断を実行
    ///
    /// タイマーは接続とは独立して動き続けます。
    pub async fn execute(&self, context: &ConnectionContext) {
        let session = context.session();
        let removed = session
            .release_participant(context.identity(), context.connection_id())
            .await;
        session.broadcast_state().await;

        tracing::info!(
            "Connection '{}' left room '{}' (participant '{}' removed: {})",
            context.connection_id(),
            session.id(),
            context.identity(),
            removed
        );
    }
}
