use std::{cmp::Reverse, collections::HashMap, sync::Arc};

use anyhow::Context;
use chrono::Utc;

use crate::{
    api::{
        self, CommentId, Error, Notification, NotificationId, NotificationKind, PostId, Time,
        User, UserId, Uuid,
    },
    Comment, Forest, ForestExt, Post, Store,
};

/// Everything the current user can see, as loaded from local storage
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocalDb {
    pub owner: UserId,
    pub users: Arc<HashMap<UserId, User>>,
    pub posts: Arc<HashMap<PostId, Arc<Post>>>,
    pub notifications: Arc<Vec<Notification>>,

    /// Date of the last comment submitted during this session
    last_submission: Option<Time>,
}

impl LocalDb {
    pub fn new(owner: UserId) -> LocalDb {
        LocalDb {
            owner,
            users: Arc::new(HashMap::new()),
            posts: Arc::new(HashMap::new()),
            notifications: Arc::new(Vec::new()),
            last_submission: None,
        }
    }

    pub fn load<S: Store>(store: &S) -> anyhow::Result<LocalDb> {
        let owner = store
            .get::<UserId>(api::KEY_CURRENT_USER)
            .context("loading current user")?
            .ok_or(Error::NoCurrentUser)?;
        let mut db = LocalDb::new(owner);
        db.add_users(
            store
                .get(api::KEY_USERS)
                .context("loading users")?
                .unwrap_or_default(),
        );
        db.add_posts(
            store
                .get(api::KEY_POSTS)
                .context("loading posts")?
                .unwrap_or_default(),
        );
        db.add_notifications(
            store
                .get(api::KEY_NOTIFICATIONS)
                .context("loading notifications")?
                .unwrap_or_default(),
        );
        Ok(db)
    }

    pub fn save<S: Store>(&self, store: &mut S) -> anyhow::Result<()> {
        let mut users = self.users.values().cloned().collect::<Vec<_>>();
        users.sort_unstable_by(|a, b| (&a.name, a.id.0).cmp(&(&b.name, b.id.0)));
        let posts = self
            .feed()
            .iter()
            .map(|p| api::Post::from(&**p))
            .collect::<Vec<_>>();
        store
            .set(api::KEY_CURRENT_USER, &self.owner)
            .context("saving current user")?;
        store.set(api::KEY_USERS, &users).context("saving users")?;
        store.set(api::KEY_POSTS, &posts).context("saving posts")?;
        store
            .set(api::KEY_NOTIFICATIONS, &*self.notifications)
            .context("saving notifications")?;
        Ok(())
    }

    pub fn add_users(&mut self, users: Vec<User>) {
        Arc::make_mut(&mut self.users).extend(users.into_iter().map(|u| (u.id, u)));
    }

    pub fn add_posts(&mut self, posts: Vec<api::Post>) {
        let into = Arc::make_mut(&mut self.posts);
        for p in posts {
            if let Some(err) = p.comments.iter().find_map(|c| c.validate().err()) {
                tracing::warn!(post = ?p.id, %err, "loaded comment with invalid text");
            }
            let p = Post::from(p);
            if let Err(err) = p.comments.validate(&p.id) {
                // Keep going, the thread operations cope with malformed forests
                tracing::warn!(post = ?p.id, %err, "loaded malformed comment forest");
            }
            into.insert(p.id, Arc::new(p));
        }
    }

    pub fn add_notifications(&mut self, notifications: Vec<Notification>) {
        Arc::make_mut(&mut self.notifications).extend(notifications);
    }

    pub fn post(&self, id: &PostId) -> Option<&Post> {
        self.posts.get(id).map(|p| &**p)
    }

    pub fn user_name(&self, id: &UserId) -> Option<&str> {
        self.users.get(id).map(|u| &u.name as &str)
    }

    /// All posts, most recent first
    pub fn feed(&self) -> Vec<Arc<Post>> {
        let mut res = self.posts.values().cloned().collect::<Vec<_>>();
        res.sort_unstable_by_key(|p| (Reverse(p.created_at), p.id));
        res
    }

    /// The current user's unread notifications, oldest first
    pub fn unread_notifications(&self) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.recipient_id == self.owner && !n.read)
            .collect()
    }

    pub fn mark_notifications_read(&mut self) {
        let owner = self.owner;
        for n in Arc::make_mut(&mut self.notifications).iter_mut() {
            if n.recipient_id == owner {
                n.read = true;
            }
        }
    }

    pub fn create_post(&mut self, caption: String) -> Result<PostId, Error> {
        api::validate_string(&caption)?;
        let post = Post {
            id: PostId(Uuid::new_v4()),
            author_id: self.owner,
            created_at: self.next_timestamp(),
            caption,
            comments: Forest::new(),
        };
        let id = post.id;
        Arc::make_mut(&mut self.posts).insert(id, Arc::new(post));
        Ok(id)
    }

    /// Adds a root comment to post `post_id`
    pub fn submit_comment(&mut self, post_id: PostId, text: String) -> Result<CommentId, Error> {
        api::validate_comment_text(&text)?;
        self.post(&post_id).ok_or(Error::UnknownPost(post_id.0))?;
        let date = self.next_timestamp();
        let comment = self.new_comment(post_id, text, date, None);
        let id = comment.id;

        let post = self.post_mut(&post_id)?;
        post.comments.push_back(comment);
        let post_author = post.author_id;
        tracing::debug!(?post_id, comment_id = ?id, "submitted comment");

        self.notify(post_author, post_id, id, NotificationKind::Comment, date);
        Ok(id)
    }

    /// Replies to comment `target_id` of post `post_id`
    ///
    /// The reply is attached to the root comment of `target_id`'s thread, so
    /// that threads never grow deeper than one level of replies. Replying to a
    /// comment that is no longer there does not fail, but the reply is lost.
    pub fn submit_reply(
        &mut self,
        post_id: PostId,
        target_id: CommentId,
        text: String,
    ) -> Result<CommentId, Error> {
        api::validate_comment_text(&text)?;

        let (target_author, root_id, has_root) = {
            let comments = &self
                .post(&post_id)
                .ok_or(Error::UnknownPost(post_id.0))?
                .comments;
            let root_id = comments.resolve_root(target_id);
            (
                comments.reply_target_author(&target_id),
                root_id,
                comments.iter().any(|c| c.id == root_id),
            )
        };
        let date = self.next_timestamp();
        let reply = self.new_comment(post_id, text, date, Some(root_id));
        let id = reply.id;
        let post = self.post_mut(&post_id)?;
        post.comments = post.comments.insert_reply(&root_id, reply);

        if !has_root {
            return Ok(id);
        }
        tracing::debug!(?post_id, reply_id = ?id, ?target_id, ?root_id, "submitted reply");
        if let Some(author) = target_author {
            self.notify(author, post_id, id, NotificationKind::Reply, date);
        }
        Ok(id)
    }

    fn post_mut(&mut self, id: &PostId) -> Result<&mut Post, Error> {
        Arc::make_mut(&mut self.posts)
            .get_mut(id)
            .map(Arc::make_mut)
            .ok_or(Error::UnknownPost(id.0))
    }

    fn new_comment(
        &self,
        post_id: PostId,
        text: String,
        created_at: Time,
        parent_id: Option<CommentId>,
    ) -> Comment {
        Comment {
            id: CommentId(Uuid::new_v4()),
            post_id,
            author_id: self.owner,
            text,
            created_at,
            parent_id,
            replies: Forest::new(),
        }
    }

    // Clocks can go backwards, but comments submitted later must not sort
    // before earlier ones
    fn next_timestamp(&mut self) -> Time {
        let now = Utc::now();
        let date = match self.last_submission {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_submission = Some(date);
        date
    }

    fn notify(
        &mut self,
        recipient_id: UserId,
        post_id: PostId,
        comment_id: CommentId,
        kind: NotificationKind,
        created_at: Time,
    ) {
        if recipient_id == self.owner {
            return;
        }
        Arc::make_mut(&mut self.notifications).push(Notification {
            id: NotificationId(Uuid::new_v4()),
            recipient_id,
            actor_id: self.owner,
            post_id,
            comment_id,
            kind,
            created_at,
            read: false,
        });
    }
}
