mod comment;
pub use comment::{Comment, Forest};

mod db;
pub use db::LocalDb;

mod post;
pub use post::Post;

mod store;
pub use store::{MemoryStore, Store};

mod thread;
pub use thread::{ForestExt, MAX_ROOT_HOPS};

mod fuzz;

pub mod api {
    pub use murmur_api::*;
}

pub mod prelude {
    pub use crate::{ForestExt, Store};
}
