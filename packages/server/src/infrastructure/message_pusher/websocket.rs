//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 通知を JSON にエンコード（ブロードキャストでは 1 回だけ）
//! - 接続ごとの送信キュー（`PusherChannel`）への投入
//! - 1 回の送信にかかる時間の上限（`send_timeout`）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! UI 層は送信キューの受信側を writer タスクで WebSocket に流し込み、
//! この実装は送信側へ投入するだけです。
//! キューが閉じている、または `send_timeout` 内に空きができない接続は
//! 配送失敗として呼び出し元に返します。

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;

use crate::{
    domain::{Connection, ConnectionId, MessagePushError, MessagePusher, Notification},
    infrastructure::dto::websocket::ServerMessageDto,
};

/// 送信のデフォルト上限時間
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(2);

/// WebSocket を使った MessagePusher 実装
#[derive(Debug, Clone)]
pub struct WebSocketMessagePusher {
    /// 1 接続あたりの送信待ち上限
    send_timeout: Duration,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(send_timeout: Duration) -> Self {
        Self { send_timeout }
    }

    fn encode(notification: &Notification) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerMessageDto::from(notification))
            .map_err(|e| MessagePushError::Encode(e.to_string()))
    }

    async fn deliver(
        &self,
        connection: &Connection,
        content: String,
    ) -> Result<(), MessagePushError> {
        let send = connection.sender().send(content);
        match tokio::time::timeout(self.send_timeout, send).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(MessagePushError::ChannelClosed(connection.id().to_string())),
            Err(_) => Err(MessagePushError::Timeout(connection.id().to_string())),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(DEFAULT_SEND_TIMEOUT)
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn push_to(
        &self,
        connection: &Connection,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(notification)?;
        self.deliver(connection, content).await?;
        tracing::debug!("Pushed message to connection '{}'", connection.id());
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<Connection>,
        notification: &Notification,
    ) -> Vec<ConnectionId> {
        let content = match Self::encode(notification) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Skipping broadcast: {}", e);
                return Vec::new();
            }
        };

        // ブロードキャストでは一部の送信失敗を許容し、失敗した接続を返す
        let results = join_all(
            targets
                .iter()
                .map(|target| self.deliver(target, content.clone())),
        )
        .await;

        targets
            .iter()
            .zip(results)
            .filter_map(|(target, result)| match result {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!(
                        "Failed to push message to connection '{}': {}",
                        target.id(),
                        e
                    );
                    Some(target.id())
                }
            })
            .collect()
    }
}
