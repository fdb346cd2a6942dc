//! Growable Contiguous Array Implementation
//!
//! This module provides [`TinyVec`], an owning, contiguous, growable sequence whose
//! storage is managed by hand: the region is obtained from the global allocator,
//! elements are constructed into it one slot at a time, and the boundary between
//! constructed and raw slots is tracked as a single length index.
//!
//! # Memory Model
//!
//! ```text
//!   ptr ──▶ ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┐
//!           │  a  │  b  │  c  │  d  │  e  │  ?  │  ?  │  ?  │
//!           └─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┘
//!           0                             len               capacity
//!           ◀──────── constructed ───────▶◀──── raw memory ───▶
//! ```
//!
//! - Slots `[0, len)` hold live values and are dropped by the vector.
//! - Slots `[len, capacity)` are uninitialized and are never read or dropped.
//! - The region is released exactly once, when the vector (or the owning
//!   iterator it was turned into) is dropped, or when it is replaced by
//!   growth or [`TinyVec::resize`].
//!
//! # Growth Policy
//!
//! A fresh vector has capacity 1. When a push finds the vector full, a region
//! of `max(1, capacity * 2)` slots is allocated, every live element is moved into
//! it in order, and the old region is released. Appending N elements therefore
//! performs O(log N) allocations and O(N) element moves in total.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Push: amortized O(1)
//!   - Remove last: O(1)
//!   - Indexed access: O(1)
//!   - Resize: O(n)
//!   - Swap / take: O(1)
//!
//! # Thread Safety
//!
//! `TinyVec<T>` is `Send` and `Sync` exactly when `T` is. It performs no
//! internal synchronization; wrap it in a `Mutex` to share it mutably.

use crate::error::TinyVecError;
use alloc::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::ptr::{self, NonNull};
use core::slice::{self, SliceIndex};

/// Capacity of a newly constructed vector.
const INITIAL_CAPACITY: usize = 1;

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

/// An owned, uninitialized storage region of `cap` slots of `T`.
///
/// The region only knows how to allocate and release memory. It never reads,
/// writes or drops elements; that is the job of its owner.
struct RawRegion<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: RawRegion uniquely owns its allocation, so it can move between threads
// whenever the values it may hold can.
unsafe impl<T: Send> Send for RawRegion<T> {}

// SAFETY: RawRegion exposes no interior mutability; shared access only hands out
// shared access to `T`.
unsafe impl<T: Sync> Sync for RawRegion<T> {}

impl<T> RawRegion<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// A region with no capacity and no allocation.
    const fn unallocated() -> Self {
        RawRegion {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates a region of exactly `cap` slots.
    ///
    /// Zero-sized element types and zero capacity never touch the allocator.
    fn allocate(cap: usize) -> Self {
        if cap == 0 || Self::IS_ZST {
            return RawRegion {
                ptr: NonNull::dangling(),
                cap,
                _marker: PhantomData,
            };
        }

        let layout = Self::layout(cap);
        // SAFETY: `layout` has a non-zero size since `cap > 0` and `T` is not zero-sized.
        let raw = unsafe { alloc(layout) }.cast::<T>();
        let ptr = match NonNull::new(raw) {
            Some(ptr) => ptr,
            None => handle_alloc_error(layout),
        };

        RawRegion {
            ptr,
            cap,
            _marker: PhantomData,
        }
    }

    fn layout(cap: usize) -> Layout {
        Layout::array::<T>(cap).unwrap_or_else(|_| capacity_overflow())
    }

    #[inline]
    fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.cap);
        // SAFETY: callers only ask for slots within (or one past) the allocation,
        // and offsets of zero-sized values are always in bounds.
        unsafe { self.ptr.as_ptr().add(index) }
    }
}

impl<T> Drop for RawRegion<T> {
    fn drop(&mut self) {
        if self.cap != 0 && !Self::IS_ZST {
            // SAFETY: `ptr` was returned by `alloc` for exactly this layout and has
            // not been released yet; the region is dropped only once.
            unsafe { dealloc(self.ptr.as_ptr().cast(), Self::layout(self.cap)) }
        }
    }
}

/// A contiguous growable array with manually managed storage.
///
/// See the [module documentation](self) for the memory model and growth policy.
///
/// # Examples
///
/// ```
/// use tiny_containers::{TinyVec, TinyVecError};
///
/// let mut v = TinyVec::new();
/// assert_eq!(v.capacity(), 1);
///
/// v.push(10);
/// v.push(20);
/// v.push(30);
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.capacity(), 4);
///
/// assert_eq!(v.at(1), Ok(&20));
/// assert_eq!(v.at(3), Err(TinyVecError::OutOfRange { index: 3, len: 3 }));
///
/// assert_eq!(v.remove_last(), Ok(30));
/// assert_eq!(v.as_slice(), &[10, 20]);
/// ```
pub struct TinyVec<T> {
    buf: RawRegion<T>,
    len: usize,
}

impl<T> TinyVec<T> {
    /// Creates an empty vector with capacity for one element.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty vector with room for at least `capacity` elements.
    ///
    /// A request for zero slots still allocates one, so that every constructed
    /// vector owns a region.
    pub fn with_capacity(capacity: usize) -> Self {
        TinyVec {
            buf: RawRegion::allocate(capacity.max(INITIAL_CAPACITY)),
            len: 0,
        }
    }

    /// The state left behind by [`take`](Self::take): no region, no elements.
    const fn unallocated() -> Self {
        TinyVec {
            buf: RawRegion::unallocated(),
            len: 0,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the storage region.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.cap
    }

    /// Appends `value`, growing the storage region first if it is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny_containers::TinyVec;
    ///
    /// let mut v = TinyVec::new();
    /// v.push(String::from("moved in"));
    /// assert_eq!(v[0], "moved in");
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        self.reserve_slot();
        // SAFETY: `reserve_slot` guarantees `len < capacity`, so slot `len` is raw memory.
        unsafe { self.buf.slot(self.len).write(value) };
        self.len += 1;
    }

    /// Appends an element built by `make`, constructing it after any growth has
    /// happened.
    ///
    /// If `make` panics the vector keeps its previous contents (its capacity may
    /// already have grown).
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny_containers::TinyVec;
    ///
    /// let mut v: TinyVec<(u32, String)> = TinyVec::new();
    /// v.push_with(|| (7, "seven".repeat(2)));
    /// assert_eq!(v.back(), Some(&(7, String::from("sevenseven"))));
    /// ```
    #[inline]
    pub fn push_with<F>(&mut self, make: F)
    where
        F: FnOnce() -> T,
    {
        self.reserve_slot();
        let value = make();
        // SAFETY: capacity did not change while `make` ran, so slot `len` is still raw.
        unsafe { self.buf.slot(self.len).write(value) };
        self.len += 1;
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TinyVecError::Underflow`] if the vector is empty.
    pub fn remove_last(&mut self) -> Result<T, TinyVecError> {
        if self.len == 0 {
            return Err(TinyVecError::Underflow);
        }
        self.len -= 1;
        // SAFETY: slot `len` was constructed and is now outside the live range, so
        // it is read exactly once.
        Ok(unsafe { ptr::read(self.buf.slot(self.len)) })
    }

    /// Reallocates the storage region to exactly `new_capacity` slots.
    ///
    /// This never truncates: live elements are moved into the new region in
    /// order and the length is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TinyVecError::InvalidArgument`] if `new_capacity` is smaller than
    /// the current length. The vector is left untouched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny_containers::{tiny_vec, TinyVecError};
    ///
    /// let mut v = tiny_vec![1, 2];
    /// v.resize(16).unwrap();
    /// assert_eq!(v.capacity(), 16);
    ///
    /// assert_eq!(
    ///     v.resize(1),
    ///     Err(TinyVecError::InvalidArgument { requested: 1, len: 2 })
    /// );
    /// assert_eq!(v.as_slice(), &[1, 2]);
    /// ```
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), TinyVecError> {
        if new_capacity < self.len {
            return Err(TinyVecError::InvalidArgument {
                requested: new_capacity,
                len: self.len,
            });
        }
        self.relocate(new_capacity);
        Ok(())
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TinyVecError::OutOfRange`] if `index >= len`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, TinyVecError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(TinyVecError::OutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TinyVecError::OutOfRange`] if `index >= len`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, TinyVecError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(TinyVecError::OutOfRange { index, len })
    }

    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        // SAFETY: the caller guarantees `index < len`, so the slot is constructed.
        unsafe { &*self.buf.slot(index) }
    }

    /// Returns a mutable reference to the element at `index` without bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        // SAFETY: the caller guarantees `index < len`, and `&mut self` makes the
        // reference unique.
        unsafe { &mut *self.buf.slot(index) }
    }

    /// Returns the first element, or `None` if the vector is empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the first element mutably, or `None` if the vector is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element, or `None` if the vector is empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the last element mutably, or `None` if the vector is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Drops every live element in index order. Capacity is unchanged.
    pub fn clear(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.buf.ptr.as_ptr(), self.len);
        // Length goes to zero first so a panicking destructor cannot lead to a
        // second drop of the same slots.
        self.len = 0;
        // SAFETY: the slots in `live` were constructed and are no longer reachable
        // through `self`.
        unsafe { ptr::drop_in_place(live) };
    }

    /// Exchanges storage regions, lengths and capacities with `other`.
    ///
    /// No element is constructed, moved or dropped.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Transfers the contents out, leaving `self` with no elements and no
    /// storage region (capacity 0).
    ///
    /// The vector left behind is fully usable: the next push allocates a
    /// single-slot region, and dropping it releases nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny_containers::tiny_vec;
    ///
    /// let mut a = tiny_vec![1, 2, 3];
    /// let b = a.take();
    /// assert_eq!(b.as_slice(), &[1, 2, 3]);
    /// assert!(a.is_empty());
    /// assert_eq!(a.capacity(), 0);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::unallocated())
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `ptr` is non-null and aligned, and slots `[0, len)` are constructed.
        unsafe { slice::from_raw_parts(self.buf.ptr.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr.as_ptr(), self.len) }
    }

    /// Returns a raw pointer to the start of the storage region.
    ///
    /// The pointer is invalidated by any operation that reallocates.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr.as_ptr()
    }

    /// Makes sure slot `len` is available, doubling the region if needed.
    #[inline]
    fn reserve_slot(&mut self) {
        if self.len == self.buf.cap {
            self.grow();
        }
    }

    #[cold]
    fn grow(&mut self) {
        let new_cap = self
            .buf
            .cap
            .checked_mul(2)
            .unwrap_or_else(|| capacity_overflow())
            .max(INITIAL_CAPACITY);
        self.relocate(new_cap);
    }

    /// Moves every live element into a fresh region of `new_cap` slots and
    /// releases the old region.
    fn relocate(&mut self, new_cap: usize) {
        debug_assert!(new_cap >= self.len);
        let fresh = RawRegion::allocate(new_cap);
        // SAFETY: both regions have at least `len` slots and are distinct
        // allocations. The old slots are treated as raw from here on, so every
        // element ends up owned by exactly one region.
        unsafe { ptr::copy_nonoverlapping(self.buf.ptr.as_ptr(), fresh.ptr.as_ptr(), self.len) };
        let stale = mem::replace(&mut self.buf, fresh);
        drop(stale);
    }
}

impl<T: Clone> TinyVec<T> {
    /// Appends a clone of `value`.
    #[inline]
    pub fn push_cloned(&mut self, value: &T) {
        self.push_with(|| value.clone());
    }

    /// Appends clones of every element of `items`, in order.
    pub fn extend_from_slice(&mut self, items: &[T]) {
        for item in items {
            self.push_cloned(item);
        }
    }
}

impl<T> Drop for TinyVec<T> {
    fn drop(&mut self) {
        self.clear();
        // `buf` releases the region after this.
    }
}

impl<T> Default for TinyVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy that reproduces the source's capacity exactly, not a minimal fit.
impl<T: Clone> Clone for TinyVec<T> {
    fn clone(&self) -> Self {
        let mut copy: TinyVec<T> = TinyVec {
            buf: RawRegion::allocate(self.buf.cap),
            len: 0,
        };
        for item in self.as_slice() {
            let value = item.clone();
            // SAFETY: `copy` has the same capacity as `self` and never more
            // elements, so slot `copy.len` is raw memory inside the region.
            unsafe { copy.buf.slot(copy.len).write(value) };
            copy.len += 1;
        }
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        *self = source.clone();
    }
}

impl<T> Deref for TinyVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for TinyVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for TinyVec<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for TinyVec<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T> AsRef<[T]> for TinyVec<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for TinyVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for TinyVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq<U>, U> PartialEq<TinyVec<U>> for TinyVec<T> {
    fn eq(&self, other: &TinyVec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for TinyVec<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for TinyVec<T> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: Eq> Eq for TinyVec<T> {}

impl<T: Hash> Hash for TinyVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: Clone> From<&[T]> for TinyVec<T> {
    fn from(items: &[T]) -> Self {
        let mut v = TinyVec::new();
        v.extend_from_slice(items);
        v
    }
}

impl<T> Extend<T> for TinyVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for TinyVec<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push(*item);
        }
    }
}

impl<T> FromIterator<T> for TinyVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = TinyVec::new();
        v.extend(iter);
        v
    }
}

impl<'a, T> IntoIterator for &'a TinyVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut TinyVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> IntoIterator for TinyVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Moves every element out of the vector, front to back.
    fn into_iter(mut self) -> Self::IntoIter {
        let end = self.len;
        // The vector keeps nothing, so its own drop is a no-op.
        let buf = mem::replace(&mut self.buf, RawRegion::unallocated());
        self.len = 0;
        IntoIter { buf, start: 0, end }
    }
}

/// An iterator that moves elements out of a [`TinyVec`].
///
/// Elements that are never yielded are dropped together with the iterator,
/// which also releases the storage region.
pub struct IntoIter<T> {
    buf: RawRegion<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// Returns the elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[start, end)` are still constructed and owned by the iterator.
        unsafe { slice::from_raw_parts(self.buf.slot(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let index = self.start;
        self.start += 1;
        // SAFETY: `index` was inside the remaining range and is now excluded from it.
        Some(unsafe { ptr::read(self.buf.slot(index)) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slot `end` was inside the remaining range and is now excluded from it.
        Some(unsafe { ptr::read(self.buf.slot(self.end)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let rest = ptr::slice_from_raw_parts_mut(self.buf.slot(self.start), self.end - self.start);
        self.start = self.end;
        // SAFETY: the remaining slots are constructed and will not be yielded again.
        unsafe { ptr::drop_in_place(rest) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

/// Creates a [`TinyVec`] containing the given elements.
///
/// ```
/// use tiny_containers::tiny_vec;
///
/// let v = tiny_vec![1, 2, 3];
/// assert_eq!(v, [1, 2, 3]);
/// assert_eq!(v.capacity(), 4);
/// ```
#[macro_export]
macro_rules! tiny_vec {
    () => {
        $crate::TinyVec::new()
    };
    ($($item:expr),+ $(,)?) => {{
        let mut v = $crate::TinyVec::new();
        $(v.push($item);)+
        v
    }};
}
