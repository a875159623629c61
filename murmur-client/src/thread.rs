use std::collections::HashSet;

use crate::{
    api::{CommentId, Error, PostId, UserId},
    Comment, Forest,
};

/// Maximum number of parent links followed when resolving a root comment
///
/// Well-formed forests need at most two. The bound only matters for cyclic
/// or corrupted parent chains.
pub const MAX_ROOT_HOPS: usize = 100;

pub trait ForestExt {
    /// First comment with this id, searching depth-first in forest order
    fn find(&self, id: &CommentId) -> Option<&Comment>;

    /// Id of the root comment a reply to `id` must be attached to
    ///
    /// Never fails: an id that is not in the forest is returned as-is, and a
    /// parent chain that does not reach a root within [`MAX_ROOT_HOPS`] hops
    /// yields the last id reached.
    fn resolve_root(&self, id: CommentId) -> CommentId {
        self.resolve_root_bounded(id, MAX_ROOT_HOPS)
    }

    /// Same as `resolve_root`, giving up after `max_hops` parent lookups
    fn resolve_root_bounded(&self, id: CommentId, max_hops: usize) -> CommentId;

    /// New forest with `reply` appended to the replies of root `root_id`
    ///
    /// Other roots are shared with `self`. If `root_id` is not a root of this
    /// forest, the returned forest is identical to `self`.
    fn insert_reply(&self, root_id: &CommentId, reply: Comment) -> Forest;

    /// Number of comments in the forest, replies included
    fn count(&self) -> usize;

    /// Author of comment `id`, for displaying who a reply answers
    fn reply_target_author(&self, id: &CommentId) -> Option<UserId> {
        self.find(id).map(|c| c.author_id)
    }

    /// Checks that this is a well-formed, depth-2 comment forest of `post_id`
    fn validate(&self, post_id: &PostId) -> Result<(), Error>;
}

impl ForestExt for Forest {
    fn find(&self, id: &CommentId) -> Option<&Comment> {
        Comment::find_in(self, id)
    }

    fn resolve_root_bounded(&self, id: CommentId, max_hops: usize) -> CommentId {
        let comment = match self.find(&id) {
            Some(c) => c,
            None => return id,
        };
        let mut candidate = match comment.parent_id {
            Some(p) => p,
            None => return comment.id,
        };
        for _ in 0..max_hops {
            match self.find(&candidate).and_then(|c| c.parent_id) {
                Some(parent) => candidate = parent,
                None => return candidate,
            }
        }
        tracing::warn!(
            ?id,
            ?candidate,
            max_hops,
            "parent chain did not reach a root comment, it is either cyclic or too deep"
        );
        candidate
    }

    fn insert_reply(&self, root_id: &CommentId, reply: Comment) -> Forest {
        let mut res = self.clone();
        match res.iter_mut().find(|c| c.id == *root_id) {
            Some(root) => root.replies.push_back(reply),
            None => tracing::warn!(
                ?root_id,
                reply_id = ?reply.id,
                "dropping reply to a root comment that is not in the forest"
            ),
        }
        res
    }

    fn count(&self) -> usize {
        self.iter().map(|c| 1 + ForestExt::count(&c.replies)).sum()
    }

    fn validate(&self, post_id: &PostId) -> Result<(), Error> {
        let mut seen = HashSet::new();
        let mut check = |c: &Comment| {
            if c.post_id != *post_id {
                return Err(Error::WrongPost {
                    comment: c.id.0,
                    expected: post_id.0,
                    found: c.post_id.0,
                });
            }
            if !seen.insert(c.id) {
                return Err(Error::DuplicateCommentId(c.id.0));
            }
            Ok(())
        };
        for root in self.iter() {
            check(root)?;
            if !root.is_root() {
                return Err(Error::OrphanReply(root.id.0));
            }
            for reply in root.replies.iter() {
                check(reply)?;
                if reply.parent_id != Some(root.id) {
                    return Err(Error::MisparentedReply {
                        reply: reply.id.0,
                        root: root.id.0,
                        parent: reply.parent_id.map(|p| p.0),
                    });
                }
                if !reply.replies.is_empty() {
                    return Err(Error::NestedReply(reply.id.0));
                }
            }
        }
        Ok(())
    }
}
