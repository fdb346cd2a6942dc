use proptest::prelude::*;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use tiny_containers::{LruCache, TinyVec, TinyVecError};

#[derive(Debug, Clone)]
enum VecOp {
    Push(u16),
    RemoveLast,
    Resize(u8),
    Clear,
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put(u8, u16),
    Get(u8),
    Remove(u8),
    PopLru,
}

/// Reference LRU: a deque ordered from most to least recently used.
struct NaiveLru {
    cap: usize,
    entries: VecDeque<(u8, u16)>,
}

impl NaiveLru {
    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    fn get(&mut self, key: u8) -> Option<u16> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos)?;
        self.entries.push_front(entry);
        Some(entry.1)
    }

    fn put(&mut self, key: u8, value: u16) -> Option<(u8, u16)> {
        if let Some(pos) = self.position(key) {
            self.entries.remove(pos);
            self.entries.push_front((key, value));
            return None;
        }
        let evicted = if self.entries.len() == self.cap {
            self.entries.pop_back()
        } else {
            None
        };
        self.entries.push_front((key, value));
        evicted
    }

    fn remove(&mut self, key: u8) -> Option<u16> {
        let pos = self.position(key)?;
        self.entries.remove(pos).map(|(_, v)| v)
    }
}

proptest! {
    #[test]
    fn test_vector_matches_std_vec(ops in proptest::collection::vec(
        prop_oneof![
            4 => any::<u16>().prop_map(VecOp::Push),
            3 => Just(VecOp::RemoveLast),
            1 => any::<u8>().prop_map(VecOp::Resize),
            1 => Just(VecOp::Clear),
        ],
        1..300
    )) {
        let mut model: Vec<u16> = Vec::new();
        let mut v = TinyVec::new();

        for op in ops {
            match op {
                VecOp::Push(x) => {
                    model.push(x);
                    v.push(x);
                }
                VecOp::RemoveLast => {
                    let expected = model.pop().ok_or(TinyVecError::Underflow);
                    prop_assert_eq!(v.remove_last(), expected);
                }
                VecOp::Resize(cap) => {
                    let cap = usize::from(cap);
                    let before = v.capacity();
                    match v.resize(cap) {
                        Ok(()) => {
                            prop_assert!(cap >= model.len());
                            prop_assert_eq!(v.capacity(), cap);
                        }
                        Err(err) => {
                            prop_assert_eq!(
                                err,
                                TinyVecError::InvalidArgument { requested: cap, len: model.len() }
                            );
                            prop_assert_eq!(v.capacity(), before);
                        }
                    }
                }
                VecOp::Clear => {
                    model.clear();
                    v.clear();
                }
            }

            prop_assert_eq!(v.len(), model.len());
            prop_assert!(v.len() <= v.capacity());
            prop_assert_eq!(v.as_slice(), model.as_slice());
        }
    }

    #[test]
    fn test_vector_len_counts_successful_operations(pushes in 0usize..500, pops in 0usize..600) {
        let mut v = TinyVec::new();
        for i in 0..pushes {
            v.push(i);
        }
        let removed = (0..pops).filter(|_| v.remove_last().is_ok()).count();
        prop_assert_eq!(removed, pops.min(pushes));
        prop_assert_eq!(v.len(), pushes - removed);
    }

    #[test]
    fn test_vector_clone_and_take(items in proptest::collection::vec(any::<i32>(), 0..64)) {
        let mut v: TinyVec<i32> = items.iter().copied().collect();
        let copy = v.clone();
        prop_assert_eq!(copy.capacity(), v.capacity());
        prop_assert_eq!(&copy, &v);

        let moved = v.take();
        prop_assert_eq!(v.capacity(), 0);
        prop_assert!(v.is_empty());
        prop_assert_eq!(moved.as_slice(), items.as_slice());
        prop_assert_eq!(copy.as_slice(), items.as_slice());
    }

    #[test]
    fn test_lru_matches_naive_model(
        cap in 1usize..8,
        ops in proptest::collection::vec(
            prop_oneof![
                4 => (0u8..16, any::<u16>()).prop_map(|(k, v)| CacheOp::Put(k, v)),
                4 => (0u8..16).prop_map(CacheOp::Get),
                1 => (0u8..16).prop_map(CacheOp::Remove),
                1 => Just(CacheOp::PopLru),
            ],
            1..200
        )
    ) {
        let mut model = NaiveLru { cap, entries: VecDeque::new() };
        let mut cache = LruCache::new(NonZeroUsize::new(cap).unwrap());

        for op in ops {
            match op {
                CacheOp::Put(k, v) => {
                    prop_assert_eq!(cache.put(k, v), model.put(k, v), "put {}", k);
                }
                CacheOp::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.get(k), "get {}", k);
                }
                CacheOp::Remove(k) => {
                    prop_assert_eq!(cache.remove(&k), model.remove(k), "remove {}", k);
                }
                CacheOp::PopLru => {
                    prop_assert_eq!(cache.pop_lru(), model.entries.pop_back());
                }
            }

            prop_assert!(cache.len() <= cap);
            let order: Vec<(u8, u16)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            let expected: Vec<(u8, u16)> = model.entries.iter().copied().collect();
            prop_assert_eq!(order, expected);
        }
    }
}
