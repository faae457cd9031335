//! UseCase: 受信メッセージのディスパッチ
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DispatchMessageUseCase::execute() メソッド
//! - 各メッセージ種別（join / leave / タイマー操作 / chat / goal:update /
//!   media:update / webrtc:*）から Room への操作と配信への変換
//!
//! ### どのような状況を想定しているか
//! - 正常系：join で参加者登録、イベントと状態のブロードキャスト
//! - 正常系：シグナリングは宛先の接続だけに届く
//! - 正常系：メディア状態の正規化と保存
//! - エッジケース：空白のみのチャット、宛先のないシグナリング（破棄）
//! - エッジケース：user 未指定時は接続の ID を使う

use std::sync::Arc;

use pomoroom_shared::time::Clock;

use crate::domain::{ClientCommand, Goal, InboundMessage, Notification, RoomEvent, Timestamp};

use super::context::ConnectionContext;

/// 受信メッセージのディスパッチのユースケース
pub struct DispatchMessageUseCase {
    /// チャットのタイムスタンプ用の時計
    clock: Arc<dyn Clock>,
}

impl DispatchMessageUseCase {
    /// 新しい DispatchMessageUseCase を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// 1 件のメッセージを処理する
    ///
    /// # Arguments
    ///
    /// * `context` - 送信元の接続コンテキスト（join で ID が更新される）
    /// * `message` - デコード済みのメッセージ
    pub async fn execute(&self, context: &mut ConnectionContext, message: InboundMessage) {
        let user = context.resolve_user(message.user);
        let session = Arc::clone(context.session());

        match message.command {
            ClientCommand::Join => {
                context.set_identity(user.clone());
                session.add_participant(user.clone()).await;
                session
                    .register_socket(user.clone(), context.connection_id())
                    .await;
                session.announce(RoomEvent::UserJoin, Some(user)).await;
            }
            ClientCommand::Leave => {
                session.remove_participant(&user).await;
                session.announce(RoomEvent::UserLeave, Some(user)).await;
            }
            ClientCommand::StartFocus => session.start_focus(user).await,
            ClientCommand::StartBreak => session.start_break(user).await,
            ClientCommand::Pause => {
                session.pause(user).await;
            }
            ClientCommand::Reset => session.reset(user).await,
            ClientCommand::SkipBreak => {
                session.skip_break(user).await;
            }
            ClientCommand::Chat { text } => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::debug!("Dropping empty chat from '{}'", user);
                    return;
                }
                let notification = Notification::Chat {
                    user,
                    text: text.to_string(),
                    sent_at: Timestamp::new(self.clock.now_millis()),
                };
                session.broadcast(notification).await;
            }
            ClientCommand::GoalUpdate { goal } => {
                let goal = session.set_goal(Goal::new(goal)).await;
                session
                    .broadcast(Notification::Event {
                        event: RoomEvent::GoalUpdate,
                        user: None,
                        goal: Some(goal),
                    })
                    .await;
                session.broadcast_state().await;
            }
            ClientCommand::MediaUpdate { media } => {
                let media = session.update_media_state(user.clone(), media).await;
                session
                    .broadcast(Notification::MediaUpdate { user, media })
                    .await;
            }
            ClientCommand::Signal {
                kind,
                target,
                sdp,
                candidate,
            } => {
                let Some(target) = target else {
                    tracing::debug!("Dropping {} from '{}' without target", kind.as_str(), user);
                    return;
                };
                let notification = Notification::Signal {
                    kind,
                    user,
                    target: target.clone(),
                    sdp,
                    candidate,
                };
                session.send_to_user(&target, notification).await;
            }
        }
    }
}
