//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap を Room ID → Room セッションの対応表として使用します。
//!
//! ## ロックの範囲
//!
//! 対応表のロックは検索・挿入の間だけ保持します。
//! 既存 Room への設定適用は、ロックを解放してから Room セッション側で行います。
//!
//! ## 既知の制約
//!
//! Room はプロセスの生存期間中削除されません（アイドル Room の回収は未実装）。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use pomoroom_shared::time::timestamp_to_rfc3339;
use tokio::sync::Mutex;

use crate::domain::{
    RepositoryError, RoomConfig, RoomId, RoomRepository, RoomSession, SessionContext,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// Room ID → Room セッション
    rooms: Mutex<HashMap<RoomId, Arc<RoomSession>>>,
    /// 新しい Room セッションに渡す協調オブジェクト
    context: SessionContext,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(context: SessionContext) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            context,
        }
    }

    /// 取得または作成。作成した場合は `true` を返す
    async fn get_or_insert(&self, config: RoomConfig) -> (Arc<RoomSession>, bool) {
        let mut rooms = self.rooms.lock().await;
        if let Some(session) = rooms.get(&config.room_id) {
            return (Arc::clone(session), false);
        }

        let room_id = config.room_id.clone();
        let session = RoomSession::new(config, self.context.clone());
        rooms.insert(room_id.clone(), Arc::clone(&session));
        tracing::info!(
            "Room '{}' created at {}",
            room_id,
            timestamp_to_rfc3339(self.context.clock.now_millis()).unwrap_or_default()
        );
        (session, true)
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn upsert(&self, config: RoomConfig) -> Arc<RoomSession> {
        let (session, created) = self.get_or_insert(config.clone()).await;
        if !created {
            session.apply_config(config).await;
            tracing::info!("Room '{}' configuration updated", session.id());
        }
        session
    }

    async fn get(&self, room_id: &RoomId) -> Result<Arc<RoomSession>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))
    }

    async fn get_or_create(&self, room_id: RoomId) -> Arc<RoomSession> {
        let (session, _) = self.get_or_insert(RoomConfig::with_defaults(room_id)).await;
        session
    }

    async fn list(&self) -> Vec<Arc<RoomSession>> {
        let mut sessions: Vec<Arc<RoomSession>> = {
            let rooms = self.rooms.lock().await;
            rooms.values().cloned().collect()
        };
        sessions.sort_by(|a, b| a.id().cmp(b.id()));
        sessions
    }
}
