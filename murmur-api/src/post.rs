use uuid::Uuid;

use crate::{Comment, Time, UserId};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct PostId(pub Uuid);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub created_at: Time,
    #[serde(default)]
    pub caption: String,

    /// Root comments, oldest first, each carrying its replies
    #[serde(default)]
    pub comments: Vec<Comment>,
}
