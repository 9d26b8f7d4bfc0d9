//! prime-hashmap: single-threaded hash maps with prime-sized tables,
//! offered in two collision-resolution strategies plus a frequency
//! counter built on top of one of them.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build the table machinery itself (probing, tombstones,
//!   chains, load-factor resizing) in safe, verifiable layers, rather
//!   than delegating to an existing table crate.
//! - Layers:
//!   - prime: capacity normalization. Every table capacity is the next
//!     prime at or above the requested value, at construction and at
//!     every resize.
//!   - Chain<K, V>: a boxed singly-linked list owned by one bucket.
//!     Tail-append insert with overwrite-in-place on duplicate keys,
//!     so iteration order within a chain is insertion order.
//!   - OpenAddressingMap<K, V, S>: all entries live in the slot array.
//!     Collisions probe quadratically, `(home + j²) mod capacity`.
//!     Deletion leaves a tombstone; a resize is the only thing that
//!     reclaims tombstoned slots. Auto-resize keeps the load factor
//!     below 0.5.
//!   - ChainingMap<K, V, S>: one Chain per bucket, unbounded chain
//!     length, auto-resize only once the load factor exceeds 8.0.
//!   - find_mode: a pure client of ChainingMap's public API that counts
//!     element frequencies and extracts the maximum-frequency set.
//!
//! Constraints
//! - Single-threaded: every operation is a synchronous mutation through
//!   `&mut self`; snapshots are independent copies.
//! - Capacity is always prime (3 is the floor the normalizer produces),
//!   and bucket storage always holds exactly `capacity` slots/chains.
//! - A resize never rebuilds in place: it swaps in fresh storage and
//!   reinserts the live entries, dropping tombstones wholesale.
//! - Lookups and removals of absent keys are silent; out-of-range
//!   resize targets are silent no-ops.
//!
//! Hasher injection
//! - Both maps take an `S: BuildHasher` parameter (default
//!   `RandomState`), stored at construction and consulted through
//!   `hash_one`. Correctness does not depend on hash quality, only the
//!   probe/chain walk length does, which the test suites exploit by
//!   injecting constant and identity hashers.
//!
//! Tombstone semantics (open addressing)
//! - `put` claims the first Empty or Tombstone slot on the probe path,
//!   even if a live entry for the same key sits later on that path; the
//!   key then briefly occupies two live slots. `get` returns the first
//!   probe-order match, and `remove` keeps probing after a hit, so it
//!   tombstones every live slot for the key. This behavior is
//!   deliberate and pinned by tests; see `OpenAddressingMap::put`.
//!
//! Notes and non-goals
//! - No concurrency, no iterators over live maps beyond snapshots, no
//!   tombstone reclamation short of a full resize.
//! - Preconditions (a capacity of zero, a hasher that is not a total
//!   function) are documented on the constructors, not checked.

mod chain;
mod chaining;
mod find_mode;
mod map_proptest;
mod open_addressing;
pub mod prime;

// Public surface
pub use chaining::ChainingMap;
pub use find_mode::find_mode;
pub use open_addressing::OpenAddressingMap;
