#![cfg(test)]

use std::collections::HashSet;

use chrono::{TimeZone, Utc};

use crate::{
    api::{CommentId, PostId, UserId, Uuid},
    Comment, Forest, ForestExt,
};

// Bounds the size of generated forests, to keep each iteration cheap
const MAX_ROOTS: usize = 32;
const MAX_REPLIES: u8 = 8;

const POST: u128 = u128::MAX;

fn comment(n: u128, parent_id: Option<CommentId>) -> Comment {
    Comment {
        id: CommentId(Uuid::from_u128(n)),
        post_id: PostId(Uuid::from_u128(POST)),
        author_id: UserId(Uuid::from_u128(n % 3)),
        text: format!("comment {n}"),
        created_at: Utc.timestamp_opt(1_600_000_000 + n as i64, 0).unwrap(),
        parent_id,
        replies: Forest::new(),
    }
}

/// Builds a well-formed forest, with one root per byte of `shape` and as
/// many replies under it as that byte says
fn well_formed(shape: &[u8]) -> Forest {
    let mut next = 0;
    let mut id = || {
        next += 1;
        next
    };
    shape
        .iter()
        .take(MAX_ROOTS)
        .map(|num_replies| {
            let mut root = comment(id(), None);
            for _ in 0..(num_replies % MAX_REPLIES) {
                root.replies.push_back(comment(id(), Some(root.id)));
            }
            root
        })
        .collect()
}

/// Builds a flat forest where each byte of `parents` gives the index of the
/// comment's parent, or no parent for indices past the end
fn arbitrary_links(parents: &[u8]) -> Forest {
    let parents = &parents[..parents.len().min(MAX_ROOTS)];
    parents
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let parent = match (*p as usize) < parents.len() {
                true => Some(CommentId(Uuid::from_u128(*p as u128))),
                false => None,
            };
            comment(i as u128, parent)
        })
        .collect()
}

fn all_comments(forest: &Forest) -> Vec<&Comment> {
    forest
        .iter()
        .flat_map(|r| std::iter::once(r).chain(r.replies.iter()))
        .collect()
}

#[test]
fn find_locates_every_comment() {
    bolero::check!()
        .with_type::<Vec<u8>>()
        .for_each(|shape| {
            let forest = well_formed(shape);
            for c in all_comments(&forest) {
                assert_eq!(forest.find(&c.id).map(|f| f.id), Some(c.id));
            }
        })
}

#[test]
fn roots_resolve_to_themselves_and_replies_to_their_root() {
    bolero::check!()
        .with_type::<Vec<u8>>()
        .for_each(|shape| {
            let forest = well_formed(shape);
            assert_eq!(forest.validate(&PostId(Uuid::from_u128(POST))), Ok(()));
            for root in forest.iter() {
                assert_eq!(forest.resolve_root(root.id), root.id);
                for reply in root.replies.iter() {
                    assert_eq!(forest.resolve_root(reply.id), root.id);
                    // well-formed forests never need more than one hop
                    assert_eq!(forest.resolve_root_bounded(reply.id, 1), root.id);
                }
            }
        })
}

#[test]
fn insertion_appends_and_preserves_other_roots() {
    bolero::check!()
        .with_type::<(Vec<u8>, u8)>()
        .for_each(|(shape, target)| {
            let forest = well_formed(shape);
            if forest.is_empty() {
                return;
            }
            let idx = *target as usize % forest.len();
            let root_id = forest[idx].id;
            let reply = comment(u128::MAX - 1, Some(root_id));

            let new = forest.insert_reply(&root_id, reply.clone());
            assert_eq!(new.len(), forest.len());
            for (i, (old, new)) in forest.iter().zip(new.iter()).enumerate() {
                if i != idx {
                    assert_eq!(old, new);
                    continue;
                }
                let mut expected = old.replies.clone();
                expected.push_back(reply.clone());
                assert_eq!(new.replies, expected);
                assert_eq!(new.id, old.id);
            }
            assert_eq!(new.count(), forest.count() + 1);
        })
}

#[test]
fn insertion_under_missing_root_is_a_noop() {
    bolero::check!()
        .with_type::<Vec<u8>>()
        .for_each(|shape| {
            let forest = well_formed(shape);
            let missing = CommentId(Uuid::from_u128(u128::MAX - 2));
            let reply = comment(u128::MAX - 1, Some(missing));
            assert_eq!(forest.insert_reply(&missing, reply), forest);
        })
}

#[test]
fn root_resolution_terminates_on_any_parent_links() {
    bolero::check!()
        .with_type::<(Vec<u8>, u8)>()
        .for_each(|(parents, target)| {
            let forest = arbitrary_links(parents);
            let ids = forest.iter().map(|c| c.id).collect::<HashSet<_>>();
            let target = CommentId(Uuid::from_u128(*target as u128));
            let res = forest.resolve_root(target);
            assert!(
                res == target || ids.contains(&res),
                "resolved {target:?} to unknown {res:?}"
            );
            if !ids.contains(&target) {
                assert_eq!(res, target);
            }
        })
}
