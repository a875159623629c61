use uuid::Uuid;

use crate::{CommentId, PostId, Time, UserId};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NotificationId(pub Uuid);

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Someone commented on the recipient's post
    Comment,

    /// Someone replied to one of the recipient's comments
    Reply,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub actor_id: UserId,
    pub post_id: PostId,
    pub comment_id: CommentId,
    pub kind: NotificationKind,
    pub created_at: Time,
    #[serde(default)]
    pub read: bool,
}
