// OpenAddressingMap integration suite.
//
// End-to-end sequences over the public API. The core invariants
// exercised:
// - Lookup: get(k) returns the value of the most recent put(k, v) not
//   followed by remove(k); absence is silent.
// - Sizing: capacity is prime after construction and every resize, and
//   an auto-resizing put leaves the load factor at or below 0.5.
// - Tombstones: removal never shrinks the table, and tombstoned slots
//   are only reclaimed by a resize.
use prime_hashmap::prime::is_prime;
use prime_hashmap::OpenAddressingMap;

// Deterministic stand-in for an injected hash function: sums the key's
// bytes, so bucket placement is reproducible across runs.
#[derive(Clone, Default)]
struct ByteSumBuildHasher;
struct ByteSumHasher(u64);
impl std::hash::BuildHasher for ByteSumBuildHasher {
    type Hasher = ByteSumHasher;
    fn build_hasher(&self) -> ByteSumHasher {
        ByteSumHasher(0)
    }
}
impl std::hash::Hasher for ByteSumHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.wrapping_add(u64::from(b));
        }
    }
    fn finish(&self) -> u64 {
        self.0
    }
}

fn byte_sum_map(capacity: usize) -> OpenAddressingMap<String, i64, ByteSumBuildHasher> {
    OpenAddressingMap::with_capacity_and_hasher(capacity, ByteSumBuildHasher)
}

// Test: insert two keys and overwrite one in a capacity-11 table.
// Verifies: the overwrite replaces the value without growing len.
#[test]
fn insert_and_overwrite() {
    let mut m: OpenAddressingMap<String, i32> = OpenAddressingMap::with_capacity(11);
    m.put("key1".to_string(), 10);
    m.put("key2".to_string(), 20);
    m.put("key1".to_string(), 30);
    assert_eq!(m.get("key1"), Some(&30));
    assert_eq!(m.get("key2"), Some(&20));
    assert_eq!(m.len(), 2);
}

// Test: insert then remove a key.
// Verifies: the key is gone by every observation, len drops to zero,
// and the vacated slot counts as empty again in the bucket metric.
#[test]
fn remove_makes_key_absent() {
    let mut m: OpenAddressingMap<String, i32> = OpenAddressingMap::with_capacity(11);
    m.put("key1".to_string(), 10);
    assert_eq!(m.empty_buckets(), 10);

    m.remove("key1");
    assert!(!m.contains_key("key1"));
    assert_eq!(m.get("key1"), None);
    assert_eq!(m.len(), 0);
    assert_eq!(m.empty_buckets(), 11);
}

// Test: 150 distinct inserts starting from capacity 53.
// Verifies: the table grows through several doublings, stays prime,
// keeps the load at or below 0.5 whenever a put resized, and every key
// still maps to its latest value.
#[test]
fn bulk_insert_grows_through_doublings() {
    let mut m = byte_sum_map(53);
    for i in 0..150i64 {
        m.put(format!("str{i}"), i * 100);
    }
    assert_eq!(m.len(), 150);
    assert!(is_prime(m.capacity()));
    assert!(m.table_load() <= 0.5 + 1.0 / m.capacity() as f64);
    for i in 0..150i64 {
        assert_eq!(m.get(&format!("str{i}")), Some(&(i * 100)));
    }
    assert_eq!(m.empty_buckets(), m.capacity() - 150);
}

// Test: 50 puts spread over 17 distinct keys (three puts per key).
// Verifies: len counts distinct keys and each key holds its last value.
#[test]
fn repeated_overwrites_count_distinct_keys() {
    let mut m = byte_sum_map(41);
    for i in 0..50i64 {
        m.put(format!("str{}", i / 3), i * 100);
    }
    assert_eq!(m.len(), 17);
    for k in 0..17i64 {
        let last = if k == 16 { 49 } else { k * 3 + 2 };
        assert_eq!(m.get(&format!("str{k}")), Some(&(last * 100)));
    }
}

// Test: a sweep of manual resizes, some with tight targets.
// Verifies: every accepted resize preserves the exact key set, the
// capacity stays prime, and rehash cascading keeps the load at or
// below 0.5.
#[test]
fn resize_sweep_preserves_entries() {
    let mut m = byte_sum_map(79);
    let keys: Vec<i64> = (1..1000).step_by(13).collect();
    for &k in &keys {
        m.put(k.to_string(), k * 42);
    }
    assert_eq!(m.len(), keys.len());

    let mut capacity = 111;
    while capacity < 1000 {
        m.resize_table(capacity);
        assert!(is_prime(m.capacity()));
        assert!(m.table_load() <= 0.5);

        m.put("some key".to_string(), -1);
        assert!(m.contains_key("some key"));
        m.remove("some key");

        for &k in &keys {
            assert_eq!(m.get(&k.to_string()), Some(&(k * 42)), "key {k}");
            assert!(!m.contains_key(&(k + 1).to_string()));
        }
        capacity += 117;
    }
}

// Test: a resize target below the live-entry count.
// Verifies: the call is a silent no-op; nothing about the table
// changes.
#[test]
fn undersized_resize_is_ignored() {
    let mut m = byte_sum_map(23);
    m.put("key1".to_string(), 10);
    m.put("key2".to_string(), 20);
    let capacity = m.capacity();

    m.resize_table(1);
    assert_eq!(m.capacity(), capacity);
    assert_eq!(m.get("key1"), Some(&10));
    assert_eq!(m.get("key2"), Some(&20));
}

// Test: interleaved put/remove churn on a small key set.
// Verifies: each key's visibility always reflects the latest operation,
// even as tombstones accumulate and resizes reclaim them.
#[test]
fn churn_keeps_latest_state_visible() {
    let mut m = byte_sum_map(11);
    for round in 0..10i64 {
        for k in 0..8 {
            m.put(format!("k{k}"), round * 10 + k);
        }
        for k in 0..8 {
            if (k + round) % 2 == 0 {
                m.remove(&format!("k{k}"));
            }
        }
        for k in 0..8 {
            let expect_present = (k + round) % 2 != 0;
            assert_eq!(m.contains_key(&format!("k{k}")), expect_present);
            if expect_present {
                assert_eq!(m.get(&format!("k{k}")), Some(&(round * 10 + k)));
            }
        }
    }
    assert!(is_prime(m.capacity()));
}

// Test: clear after growth.
// Verifies: capacity survives, contents do not, and the table accepts
// new entries afterwards.
#[test]
fn clear_after_growth() {
    let mut m = byte_sum_map(53);
    for i in 0..60i64 {
        m.put(format!("key{i}"), i);
    }
    let grown = m.capacity();
    assert!(grown > 53);

    m.clear();
    assert_eq!(m.len(), 0);
    assert_eq!(m.capacity(), grown);
    assert!(m.get_keys_and_values().is_empty());

    m.put("again".to_string(), 1);
    assert_eq!(m.get("again"), Some(&1));
}

// Test: snapshot round-trip through a grow-then-shrink resize pair.
// Verifies: resizing up and back down to a still-sufficient capacity
// preserves the exact key/value set (order aside).
#[test]
fn resize_round_trip_preserves_pairs() {
    let mut m = byte_sum_map(23);
    for i in 0..10i64 {
        m.put(format!("k{i}"), i);
    }
    let mut before = m.get_keys_and_values();
    before.sort();

    m.resize_table(211);
    m.resize_table(23);
    assert!(m.capacity() >= 23);

    let mut after = m.get_keys_and_values();
    after.sort();
    assert_eq!(before, after);
}
