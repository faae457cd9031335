//! MessagePusher trait 定義
//!
//! Room セッションが接続へ通知を届けるためのインターフェース。
//! エンコード方式と送信の時間制限は Infrastructure 層の実装が決めます。

use async_trait::async_trait;

use super::{
    MessagePushError, connection::Connection, entity::Notification, value_object::ConnectionId,
};

/// 通知送信の抽象化
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 単一の接続へ送信する
    async fn push_to(
        &self,
        connection: &Connection,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 全ての対象へ送信を試みる
    ///
    /// 個々の送信失敗は全体を中断しない。送信に失敗した接続の ID を返す。
    async fn broadcast(
        &self,
        targets: Vec<Connection>,
        notification: &Notification,
    ) -> Vec<ConnectionId>;
}
