use murmur_client::{
    api::{CommentId, PostId, User, UserId, Uuid},
    prelude::*,
    LocalDb, MemoryStore,
};
use rand::{seq::SliceRandom, Rng};

const NUM_USERS: usize = 5;
const USER_NAMES: [&str; NUM_USERS] = ["alice", "bob", "carol", "dave", "erin"];

const NUM_POSTS: usize = 20;
const CAPTION_WORDS: usize = 8;

const NUM_COMMENTS: usize = 150;
const COMMENT_MAX_WORDS: usize = 25;

// Out of 100 comments, how many are replies rather than new threads
const REPLY_PERCENT: u32 = 60;

fn gen_text(rng: &mut impl Rng, max_words: usize) -> String {
    lipsum::lipsum_words(rng.gen_range(1..=max_words))
}

fn pick<T: Copy>(rng: &mut impl Rng, items: &[T]) -> T {
    *items.choose(rng).expect("picking from an empty list")
}

fn main() -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    // Generate users
    let users = USER_NAMES
        .iter()
        .map(|name| User {
            id: UserId(Uuid::new_v4()),
            name: String::from(*name),
        })
        .collect::<Vec<_>>();
    let user_ids = users.iter().map(|u| u.id).collect::<Vec<_>>();
    let mut db = LocalDb::new(user_ids[0]);
    db.add_users(users);

    // Generate posts
    let mut posts = Vec::with_capacity(NUM_POSTS);
    for _ in 0..NUM_POSTS {
        db.owner = pick(&mut rng, &user_ids);
        posts.push(db.create_post(lipsum::lipsum_words(CAPTION_WORDS))?);
    }

    // Generate comments, replying to any comment of the post including replies
    let mut comments: Vec<(PostId, CommentId)> = Vec::with_capacity(NUM_COMMENTS);
    for _ in 0..NUM_COMMENTS {
        db.owner = pick(&mut rng, &user_ids);
        let text = gen_text(&mut rng, COMMENT_MAX_WORDS);
        let is_reply = !comments.is_empty() && rng.gen_ratio(REPLY_PERCENT, 100);
        let (post, id) = match is_reply {
            true => {
                let (post, target) = pick(&mut rng, &comments);
                (post, db.submit_reply(post, target, text)?)
            }
            false => {
                let post = pick(&mut rng, &posts);
                (post, db.submit_comment(post, text)?)
            }
        };
        comments.push((post, id));
    }

    for post in posts.iter() {
        let forest = &db.post(post).expect("generated post vanished").comments;
        forest.validate(post)?;
    }

    // The first user is the one browsing
    db.owner = user_ids[0];
    let mut store = MemoryStore::new();
    db.save(&mut store)?;
    println!("{}", serde_json::to_string_pretty(&store.to_json())?);
    Ok(())
}
