//! Splitting records into a fixed number of buckets.
//!
//! [`partition`] is the classic `Partition` transform: a user function picks
//! the bucket of every element. [`partition_by_key`] buckets keyed records by
//! key hash, which is how the parallel runner assigns keys to workers: a key
//! always lands in exactly one bucket, so per-key window state is never shared.
//!
//! ```
//! use beamwindow::partition;
//!
//! // 80/20 split on an id
//! let ids: Vec<u32> = (0..10).collect();
//! let parts = partition(ids, 2, |id, _n| if id % 10 < 8 { 0 } else { 1 })?;
//! assert_eq!(parts[0].len(), 8);
//! assert_eq!(parts[1], vec![8, 9]);
//! # Ok::<(), beamwindow::WindowError>(())
//! ```

use crate::error::WindowError;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Split `items` into `n` buckets using `f(item, n)`.
///
/// Indices returned by `f` are taken modulo `n`. Element order is preserved
/// inside each bucket.
///
/// # Errors
/// [`WindowError::Config`] if `n == 0`.
pub fn partition<T, F>(items: impl IntoIterator<Item = T>, n: usize, f: F) -> Result<Vec<Vec<T>>, WindowError>
where
    F: Fn(&T, usize) -> usize,
{
    if n == 0 {
        return Err(WindowError::config("partition count must be > 0"));
    }
    let mut buckets: Vec<Vec<T>> = (0..n).map(|_| Vec::new()).collect();
    for item in items {
        let idx = f(&item, n) % n;
        buckets[idx].push(item);
    }
    Ok(buckets)
}

/// Bucket index of `key` among `n` buckets.
#[inline]
pub fn key_bucket<K: Hash + ?Sized>(key: &K, n: usize) -> usize {
    let mut h = DefaultHasher::new();
    key.hash(&mut h);
    (h.finish() % n.max(1) as u64) as usize
}

/// Split keyed records into `n` buckets by key hash.
///
/// # Errors
/// [`WindowError::Config`] if `n == 0`.
pub fn partition_by_key<K: Hash, V>(
    items: impl IntoIterator<Item = (K, V)>,
    n: usize,
) -> Result<Vec<Vec<(K, V)>>, WindowError> {
    partition(items, n, |kv, n| key_bucket(&kv.0, n))
}
