//! Repository trait 定義
//!
//! Room ID から Room セッションへの対応表（レジストリ）のインターフェース。
//! Room は一度作成されるとプロセスの生存期間中は削除されません。

use std::sync::Arc;

use async_trait::async_trait;

use super::{RepositoryError, entity::RoomConfig, session::RoomSession, value_object::RoomId};

/// Room Repository trait
///
/// 実装は対応表のロックを検索・挿入の間だけ保持し、
/// Room セッションの操作中には保持してはならない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 存在すれば設定を適用し、なければ作成する
    async fn upsert(&self, config: RoomConfig) -> Arc<RoomSession>;

    /// Room を取得（存在しなければ RoomNotFound）
    async fn get(&self, room_id: &RoomId) -> Result<Arc<RoomSession>, RepositoryError>;

    /// Room を取得し、存在しなければデフォルト設定で作成する
    async fn get_or_create(&self, room_id: RoomId) -> Arc<RoomSession>;

    /// 全ての Room を取得（Room ID 順）
    async fn list(&self) -> Vec<Arc<RoomSession>>;
}
