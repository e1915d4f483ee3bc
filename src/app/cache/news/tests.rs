use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use super::*;

fn ids(items: &[NewsItem]) -> Vec<i64> {
    items.iter().map(|item| item.id).collect()
}

#[test]
fn test_new_cache_is_empty() {
    let cache = NewsCache::new();
    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
    assert!(cache.read(3).is_empty());
}

#[test]
fn test_read_zero_items() {
    let cache = NewsCache::new();
    cache.replace(vec![NewsItem::sample(1)]);
    assert!(cache.read(0).is_empty());
}

#[test]
fn test_read_returns_prefix() {
    let cache = NewsCache::new();
    cache.replace((1..=4).map(NewsItem::sample).collect());

    assert_eq!(ids(&cache.read(3)), vec![1, 2, 3]);
    assert_eq!(ids(&cache.read(1)), vec![1]);
    assert_eq!(cache.len(), 4);
}

#[test]
fn test_read_more_than_stored() {
    let cache = NewsCache::new();
    cache.replace(vec![NewsItem::sample(1), NewsItem::sample(2)]);
    assert_eq!(ids(&cache.read(5)), vec![1, 2]);
}

#[test]
fn test_replace_swaps_whole_list() {
    let cache = NewsCache::new();
    cache.replace((1..=4).map(NewsItem::sample).collect());
    cache.replace(vec![NewsItem::sample(9)]);

    assert_eq!(ids(&cache.read(3)), vec![9]);
}

#[test]
fn test_clones_share_snapshot() {
    let cache = NewsCache::new();
    let reader = cache.clone();
    cache.replace(vec![NewsItem::sample(1)]);

    assert!(Arc::ptr_eq(&cache.snapshot(), &reader.snapshot()));
    assert_eq!(ids(&reader.read(3)), vec![1]);
}

#[test]
fn test_old_snapshot_outlives_replace() {
    let cache = NewsCache::new();
    cache.replace(vec![NewsItem::sample(1)]);
    let held = cache.snapshot();
    cache.replace(vec![NewsItem::sample(2)]);

    assert_eq!(ids(&held), vec![1]);
    assert_eq!(ids(&cache.read(1)), vec![2]);
}

fn batch(number: i64) -> Vec<NewsItem> {
    (0..5)
        .map(|offset| NewsItem::sample(number * 10 + offset))
        .collect()
}

fn address(snapshot: &Arc<[NewsItem]>) -> usize {
    Arc::as_ptr(snapshot).cast::<NewsItem>() as usize
}

#[test]
fn test_readers_never_see_partial_lists() {
    const READERS: usize = 4;
    const MIN_REPLACES: i64 = 5000;

    let cache = NewsCache::new();
    cache.replace(batch(0));

    let start = Arc::new(Barrier::new(READERS + 1));
    let done = Arc::new(AtomicBool::new(false));
    let changes_seen = Arc::new(AtomicUsize::new(0));

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let cache = cache.clone();
            let start = start.clone();
            let done = done.clone();
            let changes_seen = changes_seen.clone();
            thread::spawn(move || {
                let mut observed: Vec<Arc<[NewsItem]>> = Vec::new();
                start.wait();
                while !done.load(Ordering::Acquire) {
                    let snapshot = cache.snapshot();
                    let seen = ids(&snapshot);
                    assert_eq!(seen.len(), 5);
                    let number = seen[0] / 10;
                    let expected: Vec<i64> = (0..5).map(|offset| number * 10 + offset).collect();
                    assert_eq!(seen, expected);

                    match observed.last() {
                        Some(last) if Arc::ptr_eq(last, &snapshot) => {}
                        Some(_) => {
                            changes_seen.fetch_add(1, Ordering::Release);
                            observed.push(snapshot);
                        }
                        None => observed.push(snapshot),
                    }
                }
                observed
            })
        })
        .collect();

    let mut installed = vec![cache.snapshot()];
    start.wait();
    let mut number = 1;
    while number <= MIN_REPLACES || changes_seen.load(Ordering::Acquire) == 0 {
        cache.replace(batch(number));
        installed.push(cache.snapshot());
        number += 1;
    }
    done.store(true, Ordering::Release);

    let by_address: HashMap<usize, usize> = installed
        .iter()
        .enumerate()
        .map(|(index, snapshot)| (address(snapshot), index))
        .collect();

    let mut distinct = HashSet::new();
    for reader in readers {
        for snapshot in reader.join().unwrap() {
            let index = by_address
                .get(&address(&snapshot))
                .copied()
                .expect("reader saw a snapshot that was never installed");
            assert!(Arc::ptr_eq(&snapshot, &installed[index]));
            distinct.insert(index);
        }
    }
    assert!(distinct.len() > 1, "readers only ever saw {} snapshot", distinct.len());
}

#[test]
fn test_poisoned_lock_is_recovered() {
    let cache = NewsCache::new();
    cache.replace(vec![NewsItem::sample(1)]);

    let poisoner = cache.clone();
    let _ = thread::spawn(move || {
        let _guard = poisoner.snapshot.write().unwrap();
        panic!("poison the lock");
    })
    .join();

    assert_eq!(ids(&cache.read(3)), vec![1]);
    cache.replace(vec![NewsItem::sample(2)]);
    assert_eq!(ids(&cache.read(3)), vec![2]);
}
