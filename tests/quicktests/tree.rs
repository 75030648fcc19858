use ordered_tree::{Error, Order, Tree};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use std::collections::HashSet;

fn tree_of(xs: &[i8]) -> Tree<i8, i8> {
    xs.iter().map(|&x| (x, x)).collect()
}

fn distinct(xs: Vec<i8>) -> Vec<i8> {
    let mut seen = HashSet::new();
    xs.into_iter().filter(|x| seen.insert(*x)).collect()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);

    xs.iter().all(|x| tree.find(x) == Ok(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x) == Err(Error::KeyNotFound))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = tree_of(&xs);
    for delete in &deletes {
        // We may have inserted the same key multiple times - delete each one.
        while tree.remove(delete).is_ok() {}
    }

    let mut still_present = xs;
    for delete in &deletes {
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.find(x) == Err(Error::KeyNotFound))
        && still_present.iter().all(|x| tree.find(x).is_ok())
        && tree.len() == still_present.len()
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i8>) -> bool {
    let mut sorted = xs.clone();
    sorted.sort_unstable();

    tree_of(&xs).keys().copied().eq(sorted)
}

#[quickcheck]
fn in_order_of_distinct_keys_is_strictly_increasing(xs: Vec<i8>) -> bool {
    let tree = tree_of(&distinct(xs));
    let keys: Vec<_> = tree.keys().collect();

    keys.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn remove_then_find_fails(xs: Vec<i8>, index: usize) -> TestResult {
    let xs = distinct(xs);
    if xs.is_empty() {
        return TestResult::discard();
    }
    let removed = xs[index % xs.len()];
    let mut tree = tree_of(&xs);
    let before: Vec<_> = tree.keys().copied().collect();

    let removed_ok = tree.remove(&removed) == Ok(removed);
    let after: Vec<_> = tree.keys().copied().collect();
    let expected: Vec<_> = before.into_iter().filter(|&k| k != removed).collect();

    TestResult::from_bool(
        removed_ok && tree.find(&removed) == Err(Error::KeyNotFound) && after == expected,
    )
}

#[quickcheck]
fn removing_missing_key_keeps_sequence(xs: Vec<i8>, missing: i8) -> TestResult {
    if xs.contains(&missing) {
        return TestResult::discard();
    }
    let mut tree = tree_of(&xs);
    let before: Vec<_> = tree.traverse(Order::PreOrder).map(|(k, _)| *k).collect();

    let failed = tree.remove(&missing) == Err(Error::KeyNotFound);
    let after: Vec<_> = tree.traverse(Order::PreOrder).map(|(k, _)| *k).collect();

    TestResult::from_bool(failed && before == after)
}

#[quickcheck]
fn ascending_inserts_build_a_chain(n: u8) -> bool {
    let tree: Tree<_, _> = (0..n).map(|x| (x, ())).collect();

    tree.height() == usize::from(n)
}

#[quickcheck]
fn height_is_bounded_by_len(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let height = tree.height();

    height <= tree.len() && (xs.is_empty() || height >= 1)
}

#[quickcheck]
fn traversals_visit_every_entry(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);

    [Order::PreOrder, Order::InOrder, Order::PostOrder]
        .into_iter()
        .all(|order| {
            let mut visited: Vec<_> = tree.traverse(order).map(|(k, _)| *k).collect();
            visited.sort_unstable();
            visited == tree.keys().copied().collect::<Vec<_>>()
        })
}
