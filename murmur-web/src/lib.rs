use std::fmt::Display;

use murmur_client::{
    api::{CommentId, PostId, Uuid},
    prelude::*,
    LocalDb,
};
use wasm_bindgen::prelude::*;

mod store;
pub use store::BrowserStore;

#[wasm_bindgen(start)]
pub fn start() {
    tracing_wasm::set_as_global_default();
}

fn js_err(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_uuid(what: &str, s: &str) -> Result<Uuid, JsValue> {
    Uuid::try_parse(s).map_err(|e| js_err(format!("parsing {what} id {s:?}: {e}")))
}

/// The comment-handling part of the page, backed by local storage
#[wasm_bindgen]
pub struct MurmurApp {
    db: LocalDb,
    store: BrowserStore,
}

impl MurmurApp {
    fn persist(&mut self) -> Result<(), JsValue> {
        self.db
            .save(&mut self.store)
            .map_err(|e| js_err(format!("{e:#}")))
    }

    fn comments(&self, post_id: &str) -> Result<&murmur_client::Forest, JsValue> {
        let id = PostId(parse_uuid("post", post_id)?);
        self.db
            .post(&id)
            .map(|p| &p.comments)
            .ok_or_else(|| js_err(format!("unknown post {post_id}")))
    }
}

#[wasm_bindgen]
impl MurmurApp {
    pub fn load() -> Result<MurmurApp, JsValue> {
        let store = BrowserStore;
        let db = LocalDb::load(&store).map_err(|e| js_err(format!("{e:#}")))?;
        tracing::info!(owner = ?db.owner, num_posts = db.posts.len(), "loaded local store");
        Ok(MurmurApp { db, store })
    }

    /// Returns the new comment's id
    pub fn submit_comment(&mut self, post_id: &str, text: String) -> Result<String, JsValue> {
        let post_id = PostId(parse_uuid("post", post_id)?);
        let id = self.db.submit_comment(post_id, text).map_err(js_err)?;
        self.persist()?;
        Ok(id.0.to_string())
    }

    /// Returns the new reply's id
    pub fn submit_reply(
        &mut self,
        post_id: &str,
        target_id: &str,
        text: String,
    ) -> Result<String, JsValue> {
        let post_id = PostId(parse_uuid("post", post_id)?);
        let target_id = CommentId(parse_uuid("comment", target_id)?);
        let id = self
            .db
            .submit_reply(post_id, target_id, text)
            .map_err(js_err)?;
        self.persist()?;
        Ok(id.0.to_string())
    }

    pub fn resolve_root(&self, post_id: &str, comment_id: &str) -> Result<String, JsValue> {
        let comment_id = CommentId(parse_uuid("comment", comment_id)?);
        Ok(self.comments(post_id)?.resolve_root(comment_id).0.to_string())
    }

    /// Name of the author of the comment being replied to, if known
    pub fn reply_target_author(
        &self,
        post_id: &str,
        comment_id: &str,
    ) -> Result<Option<String>, JsValue> {
        let comment_id = CommentId(parse_uuid("comment", comment_id)?);
        Ok(self
            .comments(post_id)?
            .reply_target_author(&comment_id)
            .and_then(|u| self.db.user_name(&u))
            .map(String::from))
    }

    /// The post's comment forest, in the same JSON shape as in local storage
    pub fn comments_json(&self, post_id: &str) -> Result<String, JsValue> {
        let comments = self
            .comments(post_id)?
            .iter()
            .map(murmur_client::api::Comment::from)
            .collect::<Vec<_>>();
        serde_json::to_string(&comments).map_err(js_err)
    }

    pub fn unread_notifications_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.db.unread_notifications()).map_err(js_err)
    }

    pub fn mark_notifications_read(&mut self) -> Result<(), JsValue> {
        self.db.mark_notifications_read();
        self.persist()
    }
}
