use uuid::Uuid;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Comment text is empty")]
    EmptyComment,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("No current user is stored")]
    NoCurrentUser,

    #[error("Unknown post {0}")]
    UnknownPost(Uuid),

    #[error("Comment {comment} belongs to post {found} but was found in the comments of post {expected}")]
    WrongPost {
        comment: Uuid,
        expected: Uuid,
        found: Uuid,
    },

    #[error("Top-level comment {0} has a parent")]
    OrphanReply(Uuid),

    #[error("Comment id {0} is used more than once")]
    DuplicateCommentId(Uuid),

    #[error("Reply {reply} is listed under root {root} but its parent is {parent:?}")]
    MisparentedReply {
        reply: Uuid,
        root: Uuid,
        parent: Option<Uuid>,
    },

    #[error("Reply {0} has replies of its own")]
    NestedReply(Uuid),
}
