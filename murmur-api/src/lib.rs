use chrono::Utc;

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<Utc>;

mod comment;
pub use comment::{Comment, CommentId};

mod error;
pub use error::Error;

mod notification;
pub use notification::{Notification, NotificationId, NotificationKind};

mod post;
pub use post::{Post, PostId};

mod user;
pub use user::{User, UserId};

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

/// Storage key holding the current user's id
pub const KEY_CURRENT_USER: &str = "currentUser";
/// Storage key holding every known user
pub const KEY_USERS: &str = "users";
/// Storage key holding every post along with its comment forest
pub const KEY_POSTS: &str = "posts";
/// Storage key holding every notification, for all users
pub const KEY_NOTIFICATIONS: &str = "notifications";

// Strings end up in the browser's storage and in JS land, where NUL bytes
// tend to get truncated silently. Reject them up-front instead.
pub fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(String::from(s))),
        false => Ok(()),
    }
}

/// Comment text must be printable and must not be blank
pub fn validate_comment_text(s: &str) -> Result<(), Error> {
    validate_string(s)?;
    if s.trim().is_empty() {
        return Err(Error::EmptyComment);
    }
    Ok(())
}
