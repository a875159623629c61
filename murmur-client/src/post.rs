use crate::{
    api::{self, PostId, Time, UserId},
    Comment, Forest,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub created_at: Time,
    pub caption: String,

    /// Root comments in chronological order
    pub comments: Forest,
}

impl From<api::Post> for Post {
    fn from(p: api::Post) -> Post {
        Post {
            id: p.id,
            author_id: p.author_id,
            created_at: p.created_at,
            caption: p.caption,
            comments: p.comments.into_iter().map(Comment::from).collect(),
        }
    }
}

impl From<&Post> for api::Post {
    fn from(p: &Post) -> api::Post {
        api::Post {
            id: p.id,
            author_id: p.author_id,
            created_at: p.created_at,
            caption: p.caption.clone(),
            comments: p.comments.iter().map(api::Comment::from).collect(),
        }
    }
}
