//! Growable contiguous array with optional arena backing.
//!
//! [`DynArray`] keeps its live elements in `[0, len)` of its buffer and
//! treats `[len, capacity)` as uninitialised. Elements are placed with
//! `ptr::write`, destroyed with `ptr::drop_in_place`, and moved between
//! buffers as bitwise copies, so no operation ever reads a slot that does
//! not hold a live value.
//!
//! Storage comes from one of three places, fixed at construction:
//!
//! ```text
//! arena: None                       → global allocator, freed on drop/regrow
//! arena: Some(Borrowed(&LinearArena)) → arena bytes, reclaimed by the arena
//! arena: Some(Owned(LinearArena))     → arena bytes, arena dropped with the array
//! ```

#![allow(unsafe_code)]

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice;

use linmem_arena::LinearArena;

use crate::config::ArrayConfig;
use crate::error::ArrayError;
use crate::handle::ArenaHandle;
use crate::raw::RawBuf;

/// A growable array that can draw its storage from a [`LinearArena`].
///
/// Fallible operations return [`ArrayError`] instead of panicking; the only
/// panicking accessor is the `array[i]` operator, reserved for indices the
/// caller already knows are valid. A failed allocation never changes the
/// array.
///
/// ```
/// use linmem_arena::LinearArena;
/// use linmem_array::{ArenaHandle, DynArray};
///
/// let mut buf = [0u8; 256];
/// let arena = LinearArena::new(&mut buf);
/// let mut numbers = DynArray::with_capacity_in(3, ArenaHandle::Borrowed(&arena)).unwrap();
/// for n in [10, 20, 30, 40] {
///     numbers.push_back(n).unwrap();
/// }
/// assert_eq!(numbers.capacity(), 5);
/// assert_eq!(numbers.as_slice(), &[10, 20, 30, 40]);
/// ```
pub struct DynArray<'a, T> {
    buf: RawBuf<T>,
    len: usize,
    config: ArrayConfig,
    arena: Option<ArenaHandle<'a>>,
}

/// Panic for the infallible convenience constructors, mirroring how std
/// collections treat allocation failure.
fn expect_alloc<V>(result: Result<V, ArrayError>) -> V {
    match result {
        Ok(value) => value,
        Err(err) => panic!("DynArray allocation failed: {err}"),
    }
}

impl<'a, T> DynArray<'a, T> {
    /// An empty heap-backed array with the default capacity (8).
    ///
    /// # Panics
    ///
    /// Panics if the global allocator cannot provide the initial storage.
    pub fn new() -> Self {
        Self::with_config(ArrayConfig::default())
    }

    /// An empty heap-backed array with `config.initial_capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if the global allocator cannot provide the initial storage.
    pub fn with_config(config: ArrayConfig) -> Self {
        expect_alloc(Self::try_with_config(config.initial_capacity, config, None))
    }

    /// An empty heap-backed array with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        expect_alloc(Self::try_with_capacity(capacity))
    }

    /// Fallible form of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        Self::try_with_config(capacity, ArrayConfig::default(), None)
    }

    /// An empty arena-backed array with the default capacity.
    pub fn new_in(arena: ArenaHandle<'a>) -> Result<Self, ArrayError> {
        Self::try_with_config(ArrayConfig::DEFAULT_INITIAL_CAPACITY, ArrayConfig::default(), Some(arena))
    }

    /// An empty arena-backed array with exactly `capacity` slots.
    pub fn with_capacity_in(capacity: usize, arena: ArenaHandle<'a>) -> Result<Self, ArrayError> {
        Self::try_with_config(capacity, ArrayConfig::default(), Some(arena))
    }

    /// An empty array with an explicit policy and optional arena.
    pub fn try_with_config(
        capacity: usize,
        config: ArrayConfig,
        arena: Option<ArenaHandle<'a>>,
    ) -> Result<Self, ArrayError> {
        let mut array = Self::unallocated(config, arena);
        array.reserve(capacity)?;
        Ok(array)
    }

    /// A heap-backed array holding the elements of `elements`, in order.
    ///
    /// Capacity starts at the iterator's lower size bound.
    pub fn from_elements<I>(elements: I) -> Result<Self, ArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        Self::collect_into(elements, None)
    }

    /// An arena-backed array holding the elements of `elements`, in order.
    pub fn from_elements_in<I>(elements: I, arena: ArenaHandle<'a>) -> Result<Self, ArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        Self::collect_into(elements, Some(arena))
    }

    fn collect_into<I>(elements: I, arena: Option<ArenaHandle<'a>>) -> Result<Self, ArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = elements.into_iter();
        let mut array = Self::try_with_config(iter.size_hint().0, ArrayConfig::default(), arena)?;
        for item in iter {
            array.push_back(item)?;
        }
        Ok(array)
    }

    /// No storage, no elements, no arena. Nothing is allocated.
    fn unallocated(config: ArrayConfig, arena: Option<ArenaHandle<'a>>) -> Self {
        Self {
            buf: RawBuf::dangling(),
            len: 0,
            config,
            arena,
        }
    }

    // ── Introspection ──────────────────────────────────────────────

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.buf.cap()
    }

    /// Bytes of element storage currently held (`capacity * size_of::<T>()`).
    pub fn memory_bytes(&self) -> usize {
        self.buf.cap().saturating_mul(mem::size_of::<T>())
    }

    /// The growth policy.
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// The arena storage is drawn from, if any.
    pub fn arena(&self) -> Option<&LinearArena<'a>> {
        self.arena.as_ref().map(ArenaHandle::arena)
    }

    /// Whether storage comes from an arena rather than the heap.
    pub fn is_arena_backed(&self) -> bool {
        self.arena.is_some()
    }

    /// Whether dropping the array also drops its arena.
    pub fn owns_arena(&self) -> bool {
        self.arena.as_ref().is_some_and(ArenaHandle::is_owned)
    }

    /// Pointer to the first slot. Dangling (but aligned) when there is no storage.
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Mutable pointer to the first slot.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// The live elements.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) are initialised and the pointer is non-null and
        // aligned even when there is no storage.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// The live elements, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    // ── Checked access ─────────────────────────────────────────────

    /// The element at `index`, or `OutOfRange`.
    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// The element at `index` mutably, or `OutOfRange`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// The first element, or `EmptyArray`.
    pub fn front(&self) -> Result<&T, ArrayError> {
        self.as_slice().first().ok_or(ArrayError::EmptyArray)
    }

    /// The first element mutably, or `EmptyArray`.
    pub fn front_mut(&mut self) -> Result<&mut T, ArrayError> {
        self.as_mut_slice().first_mut().ok_or(ArrayError::EmptyArray)
    }

    /// The last element, or `EmptyArray`.
    pub fn back(&self) -> Result<&T, ArrayError> {
        self.as_slice().last().ok_or(ArrayError::EmptyArray)
    }

    /// The last element mutably, or `EmptyArray`.
    pub fn back_mut(&mut self) -> Result<&mut T, ArrayError> {
        self.as_mut_slice().last_mut().ok_or(ArrayError::EmptyArray)
    }

    // ── Capacity management ────────────────────────────────────────

    /// Ensure room for at least `new_capacity` elements.
    ///
    /// Does nothing if the capacity is already large enough. Otherwise
    /// allocates exactly `new_capacity` slots, moves the live elements
    /// across in index order and releases the old heap buffer (arena
    /// storage is left to the arena). On failure the array is unchanged.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        if new_capacity <= self.buf.cap() {
            return Ok(());
        }
        self.reallocate(new_capacity)
    }

    /// Reallocate to exactly `new_capacity >= len` slots.
    fn reallocate(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        debug_assert!(new_capacity >= self.len);
        let fresh = RawBuf::allocate(new_capacity, self.arena())?;
        // SAFETY: both buffers hold at least `len` slots and are distinct
        // allocations. After the copy the old slots are treated as
        // uninitialised, so each element has exactly one owner.
        unsafe { ptr::copy_nonoverlapping(self.buf.ptr(), fresh.ptr(), self.len) };
        let mut old = mem::replace(&mut self.buf, fresh);
        self.release(&mut old);
        Ok(())
    }

    /// Give `buf` back to wherever it came from.
    fn release(&self, buf: &mut RawBuf<T>) {
        match self.arena {
            // SAFETY: heap arrays only ever hold heap storage, and callers
            // have moved or dropped every element out of `buf`.
            None => unsafe { buf.release_heap() },
            // Arena storage is reclaimed in bulk by the arena.
            Some(ArenaHandle::Borrowed(_)) | Some(ArenaHandle::Owned(_)) => {
                *buf = RawBuf::dangling();
            }
        }
    }

    /// Grow so that at least `min_capacity` slots exist, following the
    /// configured growth policy.
    fn grow(&mut self, min_capacity: usize) -> Result<(), ArrayError> {
        let target = self.config.next_capacity(self.buf.cap(), min_capacity);
        self.reserve(target)
    }

    /// Reduce capacity to exactly `len`. An empty array gives up its storage
    /// entirely.
    pub fn shrink_to_fit(&mut self) -> Result<(), ArrayError> {
        if self.buf.cap() == self.len {
            return Ok(());
        }
        if self.len == 0 {
            let mut old = mem::replace(&mut self.buf, RawBuf::dangling());
            self.release(&mut old);
            return Ok(());
        }
        self.reallocate(self.len)
    }

    // ── Size changes ───────────────────────────────────────────────

    /// Resize to `count` elements, filling new slots with clones of `value`.
    ///
    /// Capacity grows to exactly `count` when it is too small; surplus
    /// trailing elements are dropped. Fails with `InvalidSize` if `count`
    /// elements could never fit in memory.
    pub fn resize(&mut self, count: usize, value: T) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.resize_with(count, || value.clone())
    }

    /// Resize to `count` elements, filling new slots with `T::default()`.
    pub fn resize_default(&mut self, count: usize) -> Result<(), ArrayError>
    where
        T: Default,
    {
        self.resize_with(count, T::default)
    }

    /// Resize to `count` elements, filling new slots with values from `fill`.
    pub fn resize_with<F>(&mut self, count: usize, mut fill: F) -> Result<(), ArrayError>
    where
        F: FnMut() -> T,
    {
        if count <= self.len {
            self.truncate(count);
            return Ok(());
        }
        if count > self.buf.cap() {
            match self.reserve(count) {
                Err(ArrayError::InvalidCapacity { requested }) => {
                    return Err(ArrayError::InvalidSize { requested });
                }
                other => other?,
            }
        }
        while self.len < count {
            // SAFETY: len < count <= capacity, so the slot is allocated and
            // uninitialised. `len` is bumped after each write, so a panic in
            // `fill` leaves only constructed elements in the live range.
            unsafe { ptr::write(self.buf.ptr().add(self.len), fill()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Drop every element past the first `len`. No effect if there are
    /// already `len` or fewer. Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = self.len - len;
        // Shorten first so a panicking destructor cannot cause a double drop.
        self.len = len;
        // SAFETY: [len, len + tail) were live and are now outside the live range.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr().add(len), tail));
        }
    }

    /// Drop every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Append `value`, growing if the array is full.
    ///
    /// On allocation failure the array is unchanged and `value` is dropped.
    pub fn push_back(&mut self, value: T) -> Result<(), ArrayError> {
        if self.len == self.buf.cap() {
            let needed = self
                .len
                .checked_add(1)
                .ok_or(ArrayError::InvalidCapacity { requested: usize::MAX })?;
            self.grow(needed)?;
        }
        // SAFETY: len < capacity after growth; the slot is uninitialised.
        unsafe { ptr::write(self.buf.ptr().add(self.len), value) };
        self.len += 1;
        Ok(())
    }

    /// Append a clone of `value`.
    pub fn push_back_cloned(&mut self, value: &T) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        if self.len == self.buf.cap() {
            let needed = self
                .len
                .checked_add(1)
                .ok_or(ArrayError::InvalidCapacity { requested: usize::MAX })?;
            self.grow(needed)?;
        }
        self.push_back(value.clone())
    }

    /// Remove and return the last element, or `EmptyArray`.
    pub fn pop_back(&mut self) -> Result<T, ArrayError> {
        if self.len == 0 {
            return Err(ArrayError::EmptyArray);
        }
        self.len -= 1;
        // SAFETY: the slot was live; shrinking `len` transfers ownership out.
        Ok(unsafe { ptr::read(self.buf.ptr().add(self.len)) })
    }

    /// Insert `value` at `position`, shifting later elements one slot right.
    ///
    /// `position == len` appends. Fails with `OutOfRange` past the end.
    pub fn insert(&mut self, position: usize, value: T) -> Result<(), ArrayError> {
        if position > self.len {
            return Err(ArrayError::OutOfRange {
                index: position,
                len: self.len,
            });
        }
        if self.len == self.buf.cap() {
            let needed = self
                .len
                .checked_add(1)
                .ok_or(ArrayError::InvalidCapacity { requested: usize::MAX })?;
            self.grow(needed)?;
        }
        // SAFETY: position <= len < capacity. The overlapping copy moves
        // [position, len) up by one (memmove semantics, so nothing is
        // clobbered before it is moved); the vacated slot is then written.
        unsafe {
            let slot = self.buf.ptr().add(position);
            ptr::copy(slot, slot.add(1), self.len - position);
            ptr::write(slot, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Remove the element at `position`, shifting later elements left.
    pub fn erase(&mut self, position: usize) -> Result<(), ArrayError> {
        self.erase_range(position, position.saturating_add(1))
    }

    /// Remove the elements in `[first, last)`, shifting later elements left.
    ///
    /// Fails with `OutOfRange` if `first >= len`, `last > len` or
    /// `first > last`.
    pub fn erase_range(&mut self, first: usize, last: usize) -> Result<(), ArrayError> {
        let len = self.len;
        if first >= len || first > last {
            return Err(ArrayError::OutOfRange { index: first, len });
        }
        if last > len {
            return Err(ArrayError::OutOfRange { index: last, len });
        }

        let tail = len - last;
        // Elements past `first` leave the live range before any destructor
        // runs; if one panics the tail is leaked rather than double-dropped.
        self.len = first;
        // SAFETY: [first, last) are live and dropped exactly once; the tail
        // [last, len) is then moved down into the gap with memmove semantics.
        unsafe {
            let base = self.buf.ptr();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(first), last - first));
            ptr::copy(base.add(last), base.add(first), tail);
        }
        self.len = first + tail;
        Ok(())
    }

    // ── Copy / move ────────────────────────────────────────────────

    /// Deep copy with the same capacity as `self`.
    ///
    /// A borrowed arena is shared with the copy. An owned arena cannot be
    /// duplicated, so the copy of an arena-owning array lives on the heap.
    pub fn try_clone(&self) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        let arena = self.arena.as_ref().and_then(ArenaHandle::share);
        let mut copy = Self::unallocated(self.config, arena);
        copy.reserve(self.capacity())?;
        for item in self.as_slice() {
            // SAFETY: copy has capacity >= self.len; `len` tracks exactly the
            // slots written so far, so a panicking clone drops only those.
            unsafe { ptr::write(copy.buf.ptr().add(copy.len), item.clone()) };
            copy.len += 1;
        }
        Ok(copy)
    }

    /// Move everything out, leaving `self` empty, unallocated and detached
    /// from any arena.
    pub fn take(&mut self) -> Self {
        let config = self.config;
        mem::replace(self, Self::unallocated(config, None))
    }

    /// Release `self`'s elements, storage and arena, then take over
    /// `other`'s, leaving `other` as [`take`](Self::take) does.
    pub fn assign_from(&mut self, other: &mut Self) {
        *self = Self::unallocated(other.config, None);
        mem::swap(self, other);
    }

    /// Iterator over the live elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Mutable iterator over the live elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<'a, T: Clone> DynArray<'a, T> {
    /// A heap-backed copy of `elements`.
    pub fn try_from_slice(elements: &[T]) -> Result<Self, ArrayError> {
        Self::from_elements(elements.iter().cloned())
    }
}

impl<T> Drop for DynArray<'_, T> {
    fn drop(&mut self) {
        // SAFETY: [0, len) are live and are dropped exactly once here.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) };
        let mut buf = mem::replace(&mut self.buf, RawBuf::dangling());
        self.release(&mut buf);
        // An owned arena is dropped with the remaining fields; its buffer
        // belongs to the caller.
    }
}

impl<T> Default for DynArray<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<'_, T> {
    /// # Panics
    ///
    /// Panics if the copy's storage cannot be allocated; use
    /// [`DynArray::try_clone`] to handle that case.
    fn clone(&self) -> Self {
        expect_alloc(self.try_clone())
    }
}

impl<T> Deref for DynArray<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for DynArray<'_, T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn index(&self, index: usize) -> &T {
        let len = self.len;
        match self.as_slice().get(index) {
            Some(item) => item,
            None => panic!("DynArray index {index} out of range for length {len}"),
        }
    }
}

impl<T> IndexMut<usize> for DynArray<'_, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.as_mut_slice().get_mut(index) {
            Some(item) => item,
            None => panic!("DynArray index {index} out of range for length {len}"),
        }
    }
}

impl<'b, T> IntoIterator for &'b DynArray<'_, T> {
    type Item = &'b T;
    type IntoIter = slice::Iter<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'b, T> IntoIterator for &'b mut DynArray<'_, T> {
    type Item = &'b mut T;
    type IntoIter = slice::IterMut<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for DynArray<'_, T> {
    /// # Panics
    ///
    /// Panics if storage cannot be allocated; use
    /// [`DynArray::from_elements`] to handle that case.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        expect_alloc(Self::from_elements(iter))
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<'_, T> {
    fn from(elements: [T; N]) -> Self {
        expect_alloc(Self::from_elements(elements))
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynArray<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<'_, T> {}

impl<T: PartialEq> PartialEq<[T]> for DynArray<'_, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynArray<'_, T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}
