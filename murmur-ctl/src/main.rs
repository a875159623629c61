use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use murmur_client::{
    api::{CommentId, NotificationKind, PostId, User, UserId, Uuid},
    prelude::*,
    Comment, LocalDb, MAX_ROOT_HOPS,
};

mod file_store;
use file_store::FileStore;

#[derive(structopt::StructOpt)]
struct Opt {
    /// JSON file holding the local store, defaults to $MURMUR_STORE
    #[structopt(short, long)]
    store: Option<PathBuf>,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Create a new store, whose current user is a freshly created user
    Init {
        /// Name of the current user
        name: String,
    },

    #[structopt(flatten)]
    Store(StoreCommand),
}

/// Commands running against an existing store
#[derive(structopt::StructOpt)]
enum StoreCommand {
    /// Publish a post as the current user
    Post { caption: String },

    /// Comment on a post
    Comment { post: Uuid, text: String },

    /// Reply to a comment, or to a reply
    Reply {
        post: Uuid,
        comment: Uuid,
        text: String,
    },

    /// Print a post and its comment threads
    Show { post: Uuid },

    /// Print the id of the root comment of a comment's thread
    ResolveRoot {
        post: Uuid,
        comment: Uuid,

        /// Give up following parent links after this many hops
        #[structopt(long)]
        max_hops: Option<usize>,
    },

    /// List the current user's unread notifications
    Notifications {
        /// Also mark them as read
        #[structopt(long)]
        mark_read: bool,
    },
}

fn store_path(opt: &Opt) -> anyhow::Result<PathBuf> {
    if let Some(p) = &opt.store {
        return Ok(p.clone());
    }
    let path = std::env::var("MURMUR_STORE")
        .context("retrieving MURMUR_STORE environment variable, as --store was not passed")?;
    Ok(PathBuf::from(path))
}

fn user_name(db: &LocalDb, id: &UserId) -> String {
    db.user_name(id)
        .map(String::from)
        .unwrap_or_else(|| format!("<unknown user {}>", id.0))
}

fn print_thread(db: &LocalDb, c: &Comment, depth: usize) {
    println!(
        "{:indent$}[{}] {}: {}",
        "",
        c.id.0,
        user_name(db, &c.author_id),
        c.text,
        indent = 2 + 2 * depth
    );
    for r in c.replies.iter() {
        print_thread(db, r, depth + 1);
    }
}

fn post<'a>(db: &'a LocalDb, id: Uuid) -> anyhow::Result<&'a murmur_client::Post> {
    db.post(&PostId(id))
        .ok_or_else(|| anyhow!("post {id} is not in the store"))
}

fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opt = <Opt as structopt::StructOpt>::from_args();
    let path = store_path(&opt)?;
    match opt.cmd {
        Command::Init { name } => init(&path, name),
        Command::Store(cmd) => run(&path, cmd),
    }
}

fn init(path: &Path, name: String) -> anyhow::Result<()> {
    let mut store = FileStore::create(path)?;
    let user = User {
        id: UserId(Uuid::new_v4()),
        name,
    };
    let mut db = LocalDb::new(user.id);
    db.add_users(vec![user]);
    db.save(&mut store).context("saving new store")?;
    tracing::info!(?path, owner = ?db.owner, "created store");
    println!("{}", db.owner.0);
    Ok(())
}

fn run(path: &Path, cmd: StoreCommand) -> anyhow::Result<()> {
    let mut store = FileStore::open(path)?;
    let mut db = LocalDb::load(&store).context("loading local store")?;

    match cmd {
        StoreCommand::Post { caption } => {
            let id = db.create_post(caption)?;
            db.save(&mut store)?;
            println!("{}", id.0);
        }
        StoreCommand::Comment { post, text } => {
            let id = db.submit_comment(PostId(post), text)?;
            db.save(&mut store)?;
            println!("{}", id.0);
        }
        StoreCommand::Reply {
            post,
            comment,
            text,
        } => {
            let id = db.submit_reply(PostId(post), CommentId(comment), text)?;
            db.save(&mut store)?;
            println!("{}", id.0);
        }
        StoreCommand::Show { post: id } => {
            let p = post(&db, id)?;
            println!(
                "{} by {} at {}: {}",
                p.id.0,
                user_name(&db, &p.author_id),
                p.created_at,
                p.caption
            );
            println!("{} comment(s)", p.comments.count());
            for c in p.comments.iter() {
                print_thread(&db, c, 0);
            }
        }
        StoreCommand::ResolveRoot {
            post: id,
            comment,
            max_hops,
        } => {
            let p = post(&db, id)?;
            let root = p.comments.resolve_root_bounded(
                CommentId(comment),
                max_hops.unwrap_or(MAX_ROOT_HOPS),
            );
            println!("{}", root.0);
        }
        StoreCommand::Notifications { mark_read } => {
            for n in db.unread_notifications() {
                let what = match n.kind {
                    NotificationKind::Comment => "comment",
                    NotificationKind::Reply => "reply",
                };
                println!(
                    "{}\t{}\t{}\tpost {}\tcomment {}",
                    n.created_at,
                    what,
                    user_name(&db, &n.actor_id),
                    n.post_id.0,
                    n.comment_id.0
                );
            }
            if mark_read {
                db.mark_notifications_read();
                db.save(&mut store)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use structopt::StructOpt;

    use super::*;

    #[test]
    fn store_commands_are_top_level() {
        let opt = Opt::from_iter_safe(["murmur-ctl", "init", "alice"]).unwrap();
        assert!(matches!(opt.cmd, Command::Init { name } if name == "alice"));

        let post = Uuid::from_u128(1);
        let (p, c) = (post.to_string(), Uuid::from_u128(2).to_string());
        let opt = Opt::from_iter_safe([
            "murmur-ctl",
            "--store",
            "db.json",
            "resolve-root",
            p.as_str(),
            c.as_str(),
            "--max-hops",
            "3",
        ])
        .unwrap();
        assert_eq!(opt.store, Some(PathBuf::from("db.json")));
        assert!(matches!(
            opt.cmd,
            Command::Store(StoreCommand::ResolveRoot { post: p, max_hops: Some(3), .. }) if p == post
        ));
    }
}
