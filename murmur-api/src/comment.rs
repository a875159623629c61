use uuid::Uuid;

use crate::{Error, PostId, Time, UserId};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentId(pub Uuid);

/// A comment as it is persisted in local storage.
///
/// Older records may lack `replies`, or carry a missing or `null` `parentId`.
/// Both deserialize to their empty value, so that consumers can rely on the
/// fields always being present.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub text: String,
    pub created_at: Time,

    /// `None` for root comments, the root's id for replies
    #[serde(default)]
    pub parent_id: Option<CommentId>,

    /// Replies in display order
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_comment_text(&self.text)?;
        for r in self.replies.iter() {
            r.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uuid;

    #[test]
    fn missing_fields_are_normalized() {
        let c: Comment = serde_json::from_str(
            r#"{
                "id": "00000000-0000-0000-0000-000000000001",
                "postId": "00000000-0000-0000-0000-0000000000aa",
                "authorId": "00000000-0000-0000-0000-0000000000bb",
                "text": "hello",
                "createdAt": "2023-01-01T12:00:00Z"
            }"#,
        )
        .expect("parsing comment without parentId nor replies");
        assert_eq!(c.parent_id, None);
        assert!(c.replies.is_empty());

        let c: Comment = serde_json::from_str(
            r#"{
                "id": "00000000-0000-0000-0000-000000000002",
                "postId": "00000000-0000-0000-0000-0000000000aa",
                "authorId": "00000000-0000-0000-0000-0000000000bb",
                "text": "hello",
                "createdAt": "2023-01-01T12:00:00Z",
                "parentId": null,
                "replies": [{
                    "id": "00000000-0000-0000-0000-000000000003",
                    "postId": "00000000-0000-0000-0000-0000000000aa",
                    "authorId": "00000000-0000-0000-0000-0000000000bb",
                    "text": "world",
                    "createdAt": "2023-01-01T12:01:00Z",
                    "parentId": "00000000-0000-0000-0000-000000000002"
                }]
            }"#,
        )
        .expect("parsing comment with a null parentId");
        assert_eq!(c.parent_id, None);
        assert_eq!(c.replies.len(), 1);
        assert_eq!(
            c.replies[0].parent_id,
            Some(CommentId(uuid!("00000000-0000-0000-0000-000000000002")))
        );
        assert!(c.replies[0].replies.is_empty());
    }

    #[test]
    fn blank_reply_fails_validation() {
        let c: Comment = serde_json::from_str(
            r#"{
                "id": "00000000-0000-0000-0000-000000000002",
                "postId": "00000000-0000-0000-0000-0000000000aa",
                "authorId": "00000000-0000-0000-0000-0000000000bb",
                "text": "hello",
                "createdAt": "2023-01-01T12:00:00Z",
                "replies": [{
                    "id": "00000000-0000-0000-0000-000000000003",
                    "postId": "00000000-0000-0000-0000-0000000000aa",
                    "authorId": "00000000-0000-0000-0000-0000000000bb",
                    "text": "   ",
                    "createdAt": "2023-01-01T12:01:00Z",
                    "parentId": "00000000-0000-0000-0000-000000000002"
                }]
            }"#,
        )
        .expect("parsing comment");
        assert_eq!(c.validate(), Err(Error::EmptyComment));
    }
}
