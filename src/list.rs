//! Fixed-capacity doubly linked list over an index-addressed node arena, used as
//! the recency order of [`LruCache`](crate::lru::LruCache).

use alloc::fmt;
use alloc::vec::Vec;
use core::num::NonZeroUsize;

/// Index of the sigil (sentinel) node. It is never handed out as a [`Handle`]
/// and doubles as the "no node" marker in the free chain.
const SIGIL: usize = 0;

/// A stable reference to an entry in a [`List`].
///
/// A handle stays valid until its entry is removed from the list. After that
/// the slot may be recycled for a new entry, so callers must drop handles of
/// removed entries (the cache does this by keeping handles only in its index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

/// A slot of the node arena.
///
/// Occupied slots hold `Some(val)` and are threaded into the ring through
/// `prev`/`next`. Vacant slots hold `None` and use `next` to chain the free
/// list. The sigil slot is always `None`.
struct Node<T> {
    val: Option<T>,
    prev: usize,
    next: usize,
}

impl<T> Node<T> {
    fn new_sigil() -> Self {
        Node {
            val: None,
            prev: SIGIL,
            next: SIGIL,
        }
    }
}

/// A doubly linked list with fixed capacity, stored in an index-addressed arena.
///
/// Nodes live in one `Vec` and link to each other by position. A sigil node at
/// index 0 closes the ring, so the front is `nodes[0].next` and the back is
/// `nodes[0].prev`, and neither attach nor detach needs an empty-list special
/// case. Removed slots go on a free chain and are reused by later insertions.
///
/// All operations are O(1) given a [`Handle`].
pub struct List<T> {
    /// Maximum number of items the list can hold.
    cap: NonZeroUsize,
    /// Current number of items in the list.
    len: usize,
    /// Node arena; `nodes[SIGIL]` is the sentinel.
    nodes: Vec<Node<T>>,
    /// Head of the free-slot chain, `SIGIL` when there is none.
    free: usize,
}

impl<T> List<T> {
    /// Creates a new List that holds at most `cap` items.
    pub fn new(cap: NonZeroUsize) -> List<T> {
        let mut nodes = Vec::new();
        nodes.push(Node::new_sigil());
        List {
            cap,
            len: 0,
            nodes,
            free: SIGIL,
        }
    }

    /// Returns the current number of items in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the list is at capacity.
    pub fn is_full(&self) -> bool {
        self.len == self.cap.get()
    }

    fn is_occupied(&self, index: usize) -> bool {
        index != SIGIL && self.nodes.get(index).is_some_and(|node| node.val.is_some())
    }

    /// Links an occupied, unlinked slot right after the sigil.
    fn attach(&mut self, index: usize) {
        let first = self.nodes[SIGIL].next;
        self.nodes[index].prev = SIGIL;
        self.nodes[index].next = first;
        self.nodes[first].prev = index;
        self.nodes[SIGIL].next = index;
    }

    /// Unlinks a slot from the ring without touching its value.
    fn detach(&mut self, index: usize) {
        let (prev, next) = (self.nodes[index].prev, self.nodes[index].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    /// Adds a value to the front of the list.
    ///
    /// Returns the handle of the new entry, or `None` if the list is full, in
    /// which case `v` is dropped.
    pub fn add(&mut self, v: T) -> Option<Handle> {
        if self.is_full() {
            return None;
        }

        let index = if self.free != SIGIL {
            let index = self.free;
            self.free = self.nodes[index].next;
            self.nodes[index].val = Some(v);
            index
        } else {
            self.nodes.push(Node {
                val: Some(v),
                prev: SIGIL,
                next: SIGIL,
            });
            self.nodes.len() - 1
        };

        self.attach(index);
        self.len += 1;
        Some(Handle(index))
    }

    /// Detaches the entry behind `handle` and returns its value.
    ///
    /// Returns `None` if the handle does not refer to a live entry.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let index = handle.0;
        if !self.is_occupied(index) {
            return None;
        }

        self.detach(index);
        let val = self.nodes[index].val.take();
        self.nodes[index].prev = SIGIL;
        self.nodes[index].next = self.free;
        self.free = index;
        self.len -= 1;
        val
    }

    /// Removes the last (least recently added or moved) item from the list.
    pub fn remove_last(&mut self) -> Option<T> {
        let last = self.nodes[SIGIL].prev;
        self.remove(Handle(last))
    }

    /// Moves an entry to the front of the list. Stale handles are ignored.
    pub fn move_to_front(&mut self, handle: Handle) {
        let index = handle.0;
        if !self.is_occupied(index) || self.nodes[SIGIL].next == index {
            return;
        }
        self.detach(index);
        self.attach(index);
    }

    /// Replaces the value of an entry, returning the old one.
    ///
    /// Returns `None` and drops `v` if the handle does not refer to a live entry.
    pub fn update(&mut self, handle: Handle, v: T) -> Option<T> {
        if !self.is_occupied(handle.0) {
            return None;
        }
        self.nodes[handle.0].val.replace(v)
    }

    /// Gets a reference to the value of an entry.
    pub fn get_value(&self, handle: Handle) -> Option<&T> {
        self.nodes.get(handle.0)?.val.as_ref()
    }

    /// Gets a mutable reference to the value of an entry.
    pub fn get_value_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.nodes.get_mut(handle.0)?.val.as_mut()
    }

    /// Returns an iterator from the front (most recent) to the back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.nodes[SIGIL].next,
            remaining: self.len,
        }
    }

    /// Clears the list, dropping all entries and releasing their slots.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[SIGIL] = Node::new_sigil();
        self.free = SIGIL;
        self.len = 0;
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("capacity", &self.cap)
            .field("length", &self.len)
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub struct Iter<'a, T> {
    list: &'a List<T>,
    next: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.next];
        self.next = node.next;
        self.remaining -= 1;
        node.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn collect<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_construct() {
        let list = List::<u32>::new(NonZeroUsize::new(3).unwrap());
        assert_eq!(list.cap.get(), 3);
        assert_eq!(list.len, 0);
        assert_eq!(list.nodes.len(), 1);
        assert_eq!(list.iter().next(), None);
    }

    #[test]
    fn test_add_update_promote_and_evict() {
        let mut list = List::new(NonZeroUsize::new(3).unwrap());

        let node1 = list.add(10).unwrap();
        list.add(20).unwrap();

        assert_eq!(list.update(node1, 15), Some(10));
        list.move_to_front(node1);
        assert_eq!(list.remove_last(), Some(20));
        assert_eq!(collect(&list), [15]);
    }

    #[test]
    fn test_add_items() {
        let mut list = List::<u32>::new(NonZeroUsize::new(2).unwrap());
        let node1 = list.add(10).unwrap();
        let node2 = list.add(20).unwrap();
        assert_eq!(list.len, 2);
        assert_ne!(node1, node2);
        // Should fail to add when at capacity
        assert!(list.add(30).is_none());
        assert_eq!(list.len, 2);
        assert_eq!(collect(&list), [20, 10]);
    }

    #[test]
    fn test_update_item() {
        let mut list = List::<u32>::new(NonZeroUsize::new(2).unwrap());
        let node = list.add(10).unwrap();
        assert_eq!(list.update(node, 99), Some(10));
        assert_eq!(list.update(node, 123), Some(99));
        assert_eq!(list.get_value(node), Some(&123));
    }

    #[test]
    fn test_get_value() {
        let mut list = List::<String>::new(NonZeroUsize::new(3).unwrap());
        let node = list.add(String::from("test")).unwrap();

        assert_eq!(list.get_value(node).unwrap(), "test");

        list.get_value_mut(node).unwrap().push_str("_modified");
        assert_eq!(list.get_value(node).unwrap(), "test_modified");

        *list.get_value_mut(node).unwrap() = String::from("new_value");
        assert_eq!(list.get_value(node).unwrap(), "new_value");
    }

    #[test]
    fn test_sigil_is_not_a_value() {
        let mut list = List::<u32>::new(NonZeroUsize::new(2).unwrap());
        list.add(1).unwrap();
        assert_eq!(list.get_value(Handle(SIGIL)), None);
        assert_eq!(list.remove(Handle(SIGIL)), None);
        assert_eq!(list.update(Handle(SIGIL), 5), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_last_in_insertion_order() {
        let mut list = List::<u32>::new(NonZeroUsize::new(3).unwrap());

        assert!(list.remove_last().is_none());

        list.add(10).unwrap();
        list.add(20).unwrap();
        list.add(30).unwrap();
        assert_eq!(list.len(), 3);

        // Newest entries sit at the front, so the oldest leaves first
        assert_eq!(list.remove_last(), Some(10));
        assert_eq!(list.len(), 2);
        assert_eq!(list.remove_last(), Some(20));
        assert_eq!(list.len(), 1);
        assert_eq!(list.remove_last(), Some(30));
        assert!(list.is_empty());
        assert!(list.remove_last().is_none());
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::<u32>::new(NonZeroUsize::new(3).unwrap());

        // front->30->20->10->back
        let node1 = list.add(10).unwrap();
        list.add(20).unwrap();
        list.add(30).unwrap();

        // front->10->30->20->back
        list.move_to_front(node1);
        assert_eq!(collect(&list), [10, 30, 20]);
        assert_eq!(list.iter().last(), Some(&20));

        // Already at the front
        list.move_to_front(node1);
        assert_eq!(collect(&list), [10, 30, 20]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_remove_by_handle_and_reuse_slot() {
        let mut list = List::<u32>::new(NonZeroUsize::new(3).unwrap());
        list.add(10).unwrap();
        let node2 = list.add(20).unwrap();
        list.add(30).unwrap();

        assert_eq!(list.remove(node2), Some(20));
        assert_eq!(list.remove(node2), None);
        assert_eq!(collect(&list), [30, 10]);

        // The freed slot is recycled instead of growing the arena
        let arena_len = list.nodes.len();
        let node4 = list.add(40).unwrap();
        assert_eq!(node4, node2);
        assert_eq!(list.nodes.len(), arena_len);
        assert_eq!(collect(&list), [40, 30, 10]);
    }

    #[test]
    fn test_stale_handle_is_ignored_by_move_to_front() {
        let mut list = List::<u32>::new(NonZeroUsize::new(2).unwrap());
        let node1 = list.add(1).unwrap();
        list.add(2).unwrap();
        list.remove(node1);
        list.move_to_front(node1);
        assert_eq!(collect(&list), [2]);
    }

    #[test]
    fn test_clear() {
        let mut list = List::<u32>::new(NonZeroUsize::new(3).unwrap());
        list.add(10).unwrap();
        list.add(20).unwrap();
        list.add(30).unwrap();
        assert_eq!(list.len(), 3);

        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);

        list.add(40).unwrap();
        assert_eq!(collect(&list), [40]);
    }

    #[test]
    fn test_is_empty_and_is_full() {
        let mut list = List::<u32>::new(NonZeroUsize::new(2).unwrap());

        assert!(list.is_empty());
        assert!(!list.is_full());

        list.add(10).unwrap();
        assert!(!list.is_empty());
        assert!(!list.is_full());

        list.add(20).unwrap();
        assert!(list.is_full());

        list.remove_last();
        assert!(!list.is_full());

        list.remove_last();
        assert!(list.is_empty());
    }

    #[test]
    fn test_length_consistency_after_complex_operations() {
        let mut list = List::<u32>::new(NonZeroUsize::new(4).unwrap());

        let node1 = list.add(10).unwrap();
        let node2 = list.add(20).unwrap();
        let node3 = list.add(30).unwrap();

        list.move_to_front(node1);
        list.move_to_front(node3);
        assert_eq!(list.len(), 3, "Length unchanged after move_to_front");

        let node4 = list.add(40).unwrap();
        assert!(list.is_full());
        assert_eq!(collect(&list), [40, 30, 10, 20]);

        assert_eq!(list.remove(node2), Some(20));
        assert_eq!(list.remove(node4), Some(40));
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().len(), 2);

        list.clear();
        assert!(list.is_empty());
        list.add(100).unwrap();
        assert_eq!(list.len(), 1);
    }
}
