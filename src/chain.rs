//! Singly-linked chain, one per bucket of `ChainingMap`.
//!
//! Each node is owned by its predecessor (the head by the chain), so a
//! chain is a straight line of `Box`es. Insertion appends at the tail,
//! which keeps iteration order equal to insertion order; the map's
//! snapshot contract depends on that.

use core::borrow::Borrow;

struct Node<K, V> {
    key: K,
    value: V,
    next: Option<Box<Node<K, V>>>,
}

pub(crate) struct Chain<K, V> {
    head: Option<Box<Node<K, V>>>,
}

impl<K, V> Chain<K, V> {
    pub(crate) fn new() -> Self {
        Self { head: None }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Walks the chain in insertion order, yielding `(&K, &V)`.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl<K, V> Chain<K, V>
where
    K: Eq,
{
    /// Inserts the pair, overwriting in place if the key is already
    /// present. Returns true if a new node was appended.
    pub(crate) fn insert(&mut self, key: K, value: V) -> bool {
        let mut cur = &mut self.head;
        while let Some(node) = cur {
            if node.key == key {
                node.value = value;
                return false;
            }
            cur = &mut node.next;
        }
        *cur = Some(Box::new(Node {
            key,
            value,
            next: None,
        }));
        true
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cur = self.head.as_deref();
        while let Some(node) = cur {
            if node.key.borrow() == key {
                return Some(&node.value);
            }
            cur = node.next.as_deref();
        }
        None
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.get(key).is_some()
    }

    /// Unlinks the node matching `key`, reporting whether one was found.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cur = &mut self.head;
        loop {
            let hit = match cur.as_deref() {
                Some(node) => node.key.borrow() == key,
                None => return false,
            };
            if hit {
                // Splice the matching node out and drop it.
                *cur = cur.take().and_then(|node| node.next);
                return true;
            }
            let Some(node) = cur else { return false };
            cur = &mut node.next;
        }
    }
}

impl<K, V> Drop for Chain<K, V> {
    fn drop(&mut self) {
        // Unlink iteratively; the default recursive drop of a long
        // boxed chain can overflow the stack.
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
    }
}

pub(crate) struct Iter<'a, K, V> {
    next: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            (&node.key, &node.value)
        })
    }
}

/// Owning iterator used to drain a chain during a rehash. Yields pairs
/// in insertion order.
pub(crate) struct IntoIter<K, V> {
    next: Option<Box<Node<K, V>>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next;
            (node.key, node.value)
        })
    }
}

impl<K, V> IntoIterator for Chain<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            next: self.head.take(),
        }
    }
}
