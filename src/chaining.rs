//! Separate-chaining hash map: one linked chain per bucket.

use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use std::collections::hash_map::RandomState;

use crate::chain::Chain;
use crate::prime::{is_prime, next_prime};

const DEFAULT_CAPACITY: usize = 11;

/// Load-factor threshold. Chains are unbounded, so the load may sit
/// well above 1.0; only once it exceeds 8.0 does `put` resize, and the
/// target is twice the entry count rather than twice the capacity.
const MAX_LOAD_FACTOR: f64 = 8.0;

/// A hash map resolving collisions with a per-bucket linked chain.
///
/// The capacity (bucket count) is always prime. Chains preserve
/// insertion order, which fixes the enumeration order of
/// [`get_keys_and_values`](Self::get_keys_and_values): buckets in index
/// order, each bucket's chain oldest-first.
///
/// A capacity of zero and hashers that are not total, deterministic
/// functions of the key are outside the contract; neither is checked.
pub struct ChainingMap<K, V, S = RandomState> {
    hasher: S,
    buckets: Vec<Chain<K, V>>,
    capacity: usize,
    size: usize,
}

impl<K, V> ChainingMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::default())
    }
}

impl<K, V> Default for ChainingMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let capacity = next_prime(capacity);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Chain::new);
        Self {
            hasher,
            buckets,
            capacity,
            size: 0,
        }
    }

    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(key) % self.capacity as u64) as usize
    }

    /// Number of entries across all chains.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current bucket count. Always prime.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `size / capacity`. May legitimately exceed 1.0.
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }

    /// Number of buckets whose chain is empty.
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Inserts or overwrites the pair, then resizes to twice the entry
    /// count (prime-normalized) if the load factor has climbed past
    /// 8.0.
    pub fn put(&mut self, key: K, value: V) {
        self.put_entry(key, value, true);
    }

    fn put_entry(&mut self, key: K, value: V, trigger_resize: bool) {
        let index = self.bucket_index(&key);
        if self.buckets[index].insert(key, value) {
            self.size += 1;
        }

        if trigger_resize && self.table_load() > MAX_LOAD_FACTOR {
            self.resize_table(self.size * 2);
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.buckets[self.bucket_index(key)].get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        if self.size == 0 {
            return false;
        }
        self.buckets[self.bucket_index(key)].contains(key)
    }

    /// Unlinks the entry for `key` from its chain. Absence is silent.
    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        let index = self.bucket_index(key);
        if self.buckets[index].remove(key) {
            self.size -= 1;
        }
    }

    /// Rebuilds the table with at least `new_capacity` buckets
    /// (normalized to a prime unless already prime). A target below 1
    /// is a silent no-op. Every node is rehashed in bucket-then-chain
    /// order, with the load-factor trigger suppressed so the rehash
    /// cannot recurse.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            return;
        }

        let capacity = if is_prime(new_capacity) {
            new_capacity
        } else {
            next_prime(new_capacity)
        };
        let mut fresh = Vec::with_capacity(capacity);
        fresh.resize_with(capacity, Chain::new);

        let old = mem::replace(&mut self.buckets, fresh);
        self.capacity = capacity;
        self.size = 0;

        for chain in old {
            for (key, value) in chain {
                self.put_entry(key, value, false);
            }
        }
    }

    /// Replaces every bucket with a fresh empty chain. Capacity is
    /// unchanged.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            *chain = Chain::new();
        }
        self.size = 0;
    }

    /// Snapshot of every pair, enumerating buckets in index order and
    /// each chain in insertion order. The snapshot is an independent
    /// copy; later mutation of the map does not affect it.
    pub fn get_keys_and_values(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let mut pairs = Vec::with_capacity(self.size);
        for chain in &self.buckets {
            for (key, value) in chain.iter() {
                pairs.push((key.clone(), value.clone()));
            }
        }
        pairs
    }
}
