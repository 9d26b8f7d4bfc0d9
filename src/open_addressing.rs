//! Open-addressing hash map: quadratic probing, tombstone deletion.

use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use std::collections::hash_map::RandomState;

use crate::prime::{is_prime, next_prime};

const DEFAULT_CAPACITY: usize = 11;

/// Load-factor ceiling. `put` resizes before inserting once the table
/// reaches it, which keeps fewer than half the slots live and makes the
/// probe sequence guaranteed to terminate.
const MAX_LOAD_FACTOR: f64 = 0.5;

/// One slot of the table. A tombstone carries no payload: a deleted
/// entry is gone, the marker only tells lookups to keep probing.
enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied { key: K, value: V },
}

/// Quadratic probe sequence `(home + j²) mod capacity` for
/// `j = 0, 1, …, capacity − 1`. The square is maintained incrementally
/// modulo the capacity, so it never overflows.
struct ProbeSeq {
    home: usize,
    capacity: usize,
    j: usize,
    sq: usize,
}

impl ProbeSeq {
    fn new(home: usize, capacity: usize) -> Self {
        Self {
            home,
            capacity,
            j: 0,
            sq: 0,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.j == self.capacity {
            return None;
        }
        let index = (self.home + self.sq) % self.capacity;
        // (j + 1)² = j² + 2j + 1
        self.sq = (self.sq + 2 * self.j + 1) % self.capacity;
        self.j += 1;
        Some(index)
    }
}

/// A hash map storing every entry directly in its slot array and
/// resolving collisions by quadratic probing.
///
/// The capacity is always prime; construction and every resize
/// normalize the requested capacity through [`next_prime`]. Deletion
/// marks the slot with a tombstone and only a resize reclaims
/// tombstoned slots.
///
/// A capacity of zero and hashers that are not total, deterministic
/// functions of the key are outside the contract; neither is checked.
pub struct OpenAddressingMap<K, V, S = RandomState> {
    hasher: S,
    slots: Vec<Slot<K, V>>,
    capacity: usize,
    size: usize,
}

impl<K, V> OpenAddressingMap<K, V>
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

impl<K, V> Default for OpenAddressingMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> OpenAddressingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let capacity = next_prime(capacity);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Empty);
        Self {
            hasher,
            slots,
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

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current slot count. Always prime.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `size / capacity`, the density of live entries. Tombstones do
    /// not count.
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }

    /// `capacity − size`. Note this counts tombstoned slots as empty:
    /// `remove` decrements `size` but leaves the marker behind.
    pub fn empty_buckets(&self) -> usize {
        self.capacity - self.size
    }

    /// Inserts or overwrites the pair. If the load factor has reached
    /// 0.5 the table first resizes to twice its capacity (normalized to
    /// a prime), then the insert probes from the key's home slot.
    ///
    /// The insert claims the first Empty or Tombstone slot it probes.
    /// If a tombstone on the path precedes a live entry for the same
    /// key, the key ends up in two live slots at once: lookups resolve
    /// to the first in probe order (the freshly written one), `remove`
    /// tombstones both, and `len` counts both until one of those
    /// happens. A resize collapses the pair too, but it reinserts in
    /// ascending slot order, so the stale value from the later slot is
    /// the survivor.
    pub fn put(&mut self, key: K, value: V) {
        if self.table_load() >= MAX_LOAD_FACTOR {
            self.resize_table(self.capacity * 2);
        }

        let home = self.bucket_index(&key);
        for index in ProbeSeq::new(home, self.capacity) {
            match &mut self.slots[index] {
                Slot::Occupied {
                    key: existing,
                    value: stored,
                } => {
                    if *existing == key {
                        *stored = value;
                        return;
                    }
                }
                slot => {
                    *slot = Slot::Occupied { key, value };
                    self.size += 1;
                    return;
                }
            }
        }
        // The pre-insert resize keeps live entries below capacity / 2,
        // and a prime-capacity quadratic probe visits at least
        // (capacity + 1) / 2 distinct slots, so one of them is free.
        unreachable!("probe sequence exhausted without a placeable slot");
    }

    /// Returns the value for `key`, or `None`. An Empty slot on the
    /// probe path proves absence; tombstones are probed past.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        let home = self.bucket_index(key);
        for index in ProbeSeq::new(home, self.capacity) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied { key: k, value } if k.borrow() == key => {
                    return Some(value)
                }
                _ => {}
            }
        }
        None
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.get(key).is_some()
    }

    /// Tombstones every live slot holding `key`. Absence is silent.
    /// The scan only stops early at an Empty slot, so when the
    /// duplicate-slot situation described on [`put`](Self::put) has
    /// occurred, a single `remove` clears all of the key's slots.
    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        let home = self.bucket_index(key);
        for index in ProbeSeq::new(home, self.capacity) {
            let slot = &mut self.slots[index];
            match &mut *slot {
                Slot::Empty => return,
                Slot::Tombstone => {}
                Slot::Occupied { key: k, .. } => {
                    if (*k).borrow() == key {
                        *slot = Slot::Tombstone;
                        self.size -= 1;
                    }
                }
            }
        }
    }

    /// Rebuilds the table with at least `new_capacity` slots
    /// (normalized to a prime unless already prime). Silently refuses
    /// a target smaller than the live-entry count. Live entries are
    /// reinserted in ascending old-slot order; tombstones are dropped,
    /// and a resize is the only mechanism that reclaims them.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            return;
        }

        let capacity = if is_prime(new_capacity) {
            new_capacity
        } else {
            next_prime(new_capacity)
        };
        let mut fresh = Vec::with_capacity(capacity);
        fresh.resize_with(capacity, || Slot::Empty);

        let old = mem::replace(&mut self.slots, fresh);
        self.capacity = capacity;
        self.size = 0;

        // Reinsert through put: a tight manual target can push the load
        // back over the ceiling mid-rehash, in which case put doubles
        // the table again on the fly.
        for slot in old {
            if let Slot::Occupied { key, value } = slot {
                self.put(key, value);
            }
        }
    }

    /// Resets every slot to Empty. Capacity is unchanged.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.size = 0;
    }

    /// Snapshot of every live pair in ascending slot order (not
    /// insertion order). The snapshot is an independent copy; later
    /// mutation of the map does not affect it.
    pub fn get_keys_and_values(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Occupied { key, value } => {
                    Some((key.clone(), value.clone()))
                }
                _ => None,
            })
            .collect()
    }
}
