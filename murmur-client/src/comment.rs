use crate::api::{self, CommentId, PostId, Time, UserId};

/// The ordered root comments of one post, each carrying its replies
///
/// Cloning is cheap and shares every subtree, so producing an updated forest
/// never deep-copies the comments it leaves untouched.
pub type Forest = im::Vector<Comment>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub text: String,
    pub created_at: Time,

    /// `None` for root comments. Replies always point to their root, never to
    /// the reply they answered.
    pub parent_id: Option<CommentId>,

    /// Replies in display order. Only ever non-empty on root comments.
    pub replies: Forest,
}

impl Comment {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Depth-first search for `id`, roots first in forest order
    ///
    /// This recurses into replies of replies too, even though well-formed
    /// forests never have any.
    pub fn find_in<'a>(comments: &'a Forest, id: &CommentId) -> Option<&'a Comment> {
        for c in comments.iter() {
            if c.id == *id {
                return Some(c);
            }
            if let Some(res) = Comment::find_in(&c.replies, id) {
                return Some(res);
            }
        }
        None
    }
}

impl From<api::Comment> for Comment {
    fn from(c: api::Comment) -> Comment {
        Comment {
            id: c.id,
            post_id: c.post_id,
            author_id: c.author_id,
            text: c.text,
            created_at: c.created_at,
            parent_id: c.parent_id,
            replies: c.replies.into_iter().map(Comment::from).collect(),
        }
    }
}

impl From<&Comment> for api::Comment {
    fn from(c: &Comment) -> api::Comment {
        api::Comment {
            id: c.id,
            post_id: c.post_id,
            author_id: c.author_id,
            text: c.text.clone(),
            created_at: c.created_at,
            parent_id: c.parent_id,
            replies: c.replies.iter().map(api::Comment::from).collect(),
        }
    }
}
