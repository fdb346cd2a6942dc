// Exercises every unsafe path of TinyVec so Miri can check it for undefined
// behavior: out-of-bounds access, use of uninitialized slots, double drops,
// leaks and Stacked Borrows aliasing violations.
//
// The workloads are kept small so the interpreter finishes quickly.
//
// Run with: cargo +nightly miri test --test test_miri_stacked_borrows

#![cfg(test)]

use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use tiny_containers::{tiny_vec, TinyVec};

/// Heap-owning element whose drops are counted, so a double drop or a leak
/// shows up both to Miri and to the assertions.
#[derive(Debug)]
struct Counted {
    id: usize,
    payload: Box<usize>,
    drops: Rc<Cell<usize>>,
}

impl Counted {
    fn new(id: usize, drops: &Rc<Cell<usize>>) -> Self {
        Counted {
            id,
            payload: Box::new(id),
            drops: Rc::clone(drops),
        }
    }
}

impl Clone for Counted {
    fn clone(&self) -> Self {
        if self.id == 3 {
            panic!("clone of element 3 failed");
        }
        Counted::new(self.id, &self.drops)
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

/// Repeated doubling moves every element through several regions. Each old
/// region must be released without dropping the elements it held.
#[test]
fn test_grow_relocates_owned_values() {
    let drops = Rc::new(Cell::new(0));
    let mut v = TinyVec::new();
    for i in 0..17 {
        v.push(Counted::new(i, &drops));
    }
    assert_eq!(v.capacity(), 32);
    assert_eq!(drops.get(), 0);
    assert!(v.iter().enumerate().all(|(i, c)| c.id == i && *c.payload == i));

    drop(v);
    assert_eq!(drops.get(), 17);
}

/// References taken after a reallocation must point into the new region.
#[test]
fn test_borrows_after_reallocation() {
    let mut v = tiny_vec![String::from("a")];
    v.push(String::from("b"));
    v.push(String::from("c"));
    {
        let slice = v.as_mut_slice();
        slice[0].push('!');
        let (left, right) = slice.split_at_mut(1);
        left[0].push_str(&right[1]);
    }
    // SAFETY: index 2 is below len 3.
    let last = unsafe { v.get_unchecked_mut(2) };
    last.push('?');
    assert_eq!(v.as_slice(), &["a!c", "b", "c?"]);
}

/// Exact-capacity resize up and down, then pushes into the fresh region.
#[test]
fn test_resize_moves_into_exact_region() {
    let drops = Rc::new(Cell::new(0));
    let mut v = TinyVec::new();
    for i in 0..5 {
        v.push(Counted::new(i, &drops));
    }
    v.resize(20).unwrap();
    assert_eq!(v.capacity(), 20);
    v.resize(5).unwrap();
    assert_eq!(v.capacity(), 5);
    assert!(v.resize(4).is_err());
    v.push(Counted::new(5, &drops));
    assert_eq!(v.capacity(), 10);
    assert_eq!(drops.get(), 0);

    let removed = v.remove_last().unwrap();
    assert_eq!(removed.id, 5);
    drop(removed);
    drop(v);
    assert_eq!(drops.get(), 6);
}

/// The vector left behind by `take` owns no region; using and dropping it
/// must not touch the region that moved out.
#[test]
fn test_take_and_reuse_source() {
    let drops = Rc::new(Cell::new(0));
    let mut a = TinyVec::new();
    for i in 0..4 {
        a.push(Counted::new(i, &drops));
    }
    let b = a.take();
    assert_eq!(a.capacity(), 0);
    assert!(a.remove_last().is_err());

    a.push(Counted::new(10, &drops));
    assert_eq!(a.capacity(), 1);
    drop(a);
    assert_eq!(drops.get(), 1);

    assert_eq!(b.len(), 4);
    drop(b);
    assert_eq!(drops.get(), 5);
}

/// Swapping exchanges regions without constructing or dropping elements.
#[test]
fn test_swap_exchanges_regions() {
    let mut a = tiny_vec![Box::new(1), Box::new(2)];
    let mut b = TinyVec::with_capacity(8);
    b.push(Box::new(3));
    a.swap(&mut b);
    assert_eq!(*a[0], 3);
    assert_eq!(b.iter().map(|x| **x).collect::<Vec<_>>(), [1, 2]);
}

/// Yielded elements are read out exactly once; the rest are dropped with the
/// iterator together with the region.
#[test]
fn test_partial_into_iter() {
    let drops = Rc::new(Cell::new(0));
    let mut v = TinyVec::new();
    for i in 0..6 {
        v.push(Counted::new(i, &drops));
    }
    let mut it = v.into_iter();
    let front = it.next().unwrap();
    let back = it.next_back().unwrap();
    assert_eq!((front.id, back.id), (0, 5));
    assert_eq!(it.as_slice().len(), 4);
    drop(it);
    assert_eq!(drops.get(), 4);

    drop(front);
    drop(back);
    assert_eq!(drops.get(), 6);
}

/// A clone that panics midway must drop the partial copy and leave the
/// source intact.
#[test]
fn test_panicking_clone() {
    let drops = Rc::new(Cell::new(0));
    let mut source = TinyVec::new();
    for i in 0..6 {
        source.push(Counted::new(i, &drops));
    }

    let result = catch_unwind(AssertUnwindSafe(|| source.clone()));
    assert!(result.is_err());
    assert_eq!(drops.get(), 3);
    assert_eq!(source.len(), 6);

    let mut target = TinyVec::new();
    let result = catch_unwind(AssertUnwindSafe(|| {
        target.extend_from_slice(source.as_slice());
    }));
    assert!(result.is_err());
    assert_eq!(target.len(), 3);

    drop(target);
    drop(source);
    assert_eq!(drops.get(), 12);
}

/// Zero-sized elements never allocate, yet pointer arithmetic, reads and
/// drops on them must still be well formed.
#[test]
fn test_zero_sized_elements() {
    #[derive(Debug, Clone, PartialEq)]
    struct Unit;

    let mut v = TinyVec::new();
    for _ in 0..9 {
        v.push(Unit);
    }
    assert_eq!(v.capacity(), 16);
    v.resize(9).unwrap();
    let copy = v.clone();
    assert_eq!(copy.len(), 9);
    assert_eq!(v.remove_last(), Ok(Unit));

    let mut it = v.into_iter();
    assert_eq!(it.next(), Some(Unit));
    assert_eq!(it.next_back(), Some(Unit));
    assert_eq!(it.len(), 6);
}
