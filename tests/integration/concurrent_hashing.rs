//! Concurrent hashing produces the same results as sequential hashing

use prophash::hasher::{hash_entries, PropertiesAwareHasher, ResourceHasher};
use prophash::normalize::{FilterRule, PropertyFilter};
use prophash::resource::ArchiveEntry;
use std::sync::Arc;
use std::thread;

fn entries() -> Vec<ArchiveEntry> {
    (0..64)
        .map(|i| {
            let name = match i % 3 {
                0 => format!("dir{}/foo.properties", i),
                1 => format!("dir{}/bar.properties", i),
                _ => format!("dir{}/Data.class", i),
            };
            let content = format!("created-by=run{}\nindex={}\n", i, i % 5);
            ArchiveEntry::new("app.jar", name, content.into_bytes())
        })
        .collect()
}

fn hasher() -> PropertiesAwareHasher {
    PropertiesAwareHasher::from_rules(vec![
        FilterRule::new("**/*.properties", PropertyFilter::IgnoreNothing),
        FilterRule::new("**/foo.properties", PropertyFilter::ignoring(["created-by"])),
    ])
    .unwrap()
}

#[test]
fn test_threads_share_one_hasher() {
    let hasher = Arc::new(hasher());
    let entries = Arc::new(entries());

    let sequential: Vec<_> = entries
        .iter()
        .map(|entry| hasher.hash(entry).unwrap())
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let hasher = Arc::clone(&hasher);
            let entries = Arc::clone(&entries);
            thread::spawn(move || {
                // Each worker walks the entries in a different order
                let mut indices: Vec<usize> = (0..entries.len()).collect();
                indices.rotate_left(worker * 7);
                if worker % 2 == 1 {
                    indices.reverse();
                }
                indices
                    .into_iter()
                    .map(|i| (i, hasher.hash(&entries[i]).unwrap()))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for (index, hash) in handle.join().unwrap() {
            assert_eq!(hash, sequential[index]);
        }
    }
}

#[test]
fn test_parallel_hash_entries_matches_sequential() {
    let hasher = hasher();
    let entries = entries();

    let parallel = hash_entries(&entries, &hasher).unwrap();
    for fingerprint in &parallel {
        let entry = entries
            .iter()
            .find(|e| prophash::resource::ResourceEntry::relative_path(*e) == fingerprint.path)
            .unwrap();
        assert_eq!(fingerprint.hash, hasher.hash(entry).unwrap());
    }
    assert_eq!(parallel, hash_entries(&entries, &hasher).unwrap());
}
