#![allow(missing_docs)]

//! First-in, first-out queues.
//!
//! Two variants are provided:
//!
//! - [`Queue`] removes elements from the front of its buffer directly, so every
//!   [`dequeue()`] shifts the remaining elements and costs O(n).
//! - [`CompactingQueue`] leaves a tombstone behind each dequeued element and only advances a
//!   head index. The consumed prefix is dropped in one go once it grows past the limits of the
//!   queue's [`CompactionPolicy`], which makes both operations amortized O(1).
//!
//! [`Queue`]: ./struct.Queue.html
//! [`dequeue()`]: ./struct.Queue.html#method.dequeue
//! [`CompactingQueue`]: ./struct.CompactingQueue.html
//! [`CompactionPolicy`]: ./struct.CompactionPolicy.html

use alloc::{
    alloc::{Allocator, Global},
    vec::Vec,
};
use core::{fmt, iter::FusedIterator, slice};
#[cfg(feature = "serde")]
use serde_core::{Serialize, Serializer};

/// A FIFO queue which removes from the front of its buffer on every dequeue.
pub struct Queue<T, A: Allocator = Global> {
    items: Vec<T, A>,
}

impl<T> Queue<T> {
    /// Create an empty `Queue` backed by the global allocator.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<T, A: Allocator> Queue<T, A> {
    /// Create an empty `Queue` allocated with `alloc`.
    #[must_use]
    #[inline]
    pub fn new_in(alloc: A) -> Self {
        Self {
            items: Vec::new_in(alloc),
        }
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    #[inline]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn enqueue(&mut self, element: T) {
        self.items.push(element);
    }

    /// Removes the element at the front of the queue.
    ///
    /// The remaining elements are shifted down, so this is O(n). Returns `None` if the queue is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cairn::queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.enqueue(1);
    /// queue.enqueue(2);
    ///
    /// assert_eq!(queue.dequeue(), Some(1));
    /// assert_eq!(queue.dequeue(), Some(2));
    /// assert_eq!(queue.dequeue(), None);
    /// ```
    #[inline]
    pub fn dequeue(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    #[must_use]
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.items.first()
    }

    /// Returns an iterator over the queued elements, front first.
    #[must_use]
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Queue<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Queue<T, A> {
    #[inline]
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.debug_list().entries(self.iter()).finish()
    }
}

impl<T, A: Allocator> Extend<T> for Queue<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for Queue<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

#[cfg(feature = "serde")]
impl<T: Serialize, A: Allocator> Serialize for Queue<T, A> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Decides when a [`CompactingQueue`] drops the tombstones in front of its head.
///
/// A queue compacts right after a dequeue if it still holds more than [`min_count()`]
/// elements and the fraction of its buffer taken up by tombstones is greater than
/// [`waste_ratio()`].
///
/// # Examples
///
/// ```
/// use cairn::queue::{CompactingQueue, CompactionPolicy};
///
/// let policy = CompactionPolicy::new()
///     .with_min_count(4)
///     .with_waste_ratio(0.5);
///
/// let mut queue = CompactingQueue::with_policy(policy);
/// queue.extend(0..12);
///
/// for _ in 0..7 {
///     queue.dequeue();
/// }
///
/// assert_eq!(queue.tombstones(), 0);
/// assert_eq!(queue.slot_count(), 5);
/// ```
///
/// [`CompactingQueue`]: ./struct.CompactingQueue.html
/// [`min_count()`]: #method.min_count
/// [`waste_ratio()`]: #method.waste_ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactionPolicy {
    min_count: usize,
    waste_ratio: f64,
}

impl CompactionPolicy {
    /// The default minimum number of live elements before compaction is considered.
    pub const DEFAULT_MIN_COUNT: usize = 50;

    /// The default fraction of tombstoned slots which triggers compaction.
    pub const DEFAULT_WASTE_RATIO: f64 = 0.25;

    /// Create a policy with the default thresholds.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            min_count: Self::DEFAULT_MIN_COUNT,
            waste_ratio: Self::DEFAULT_WASTE_RATIO,
        }
    }

    /// Sets the number of live elements the queue must exceed before it compacts.
    #[must_use]
    #[inline]
    pub const fn with_min_count(self, min_count: usize) -> Self {
        Self { min_count, ..self }
    }

    /// Sets the fraction of tombstoned slots the buffer must exceed before it compacts.
    ///
    /// A ratio of `1.0` or more disables compaction entirely.
    #[must_use]
    #[inline]
    pub const fn with_waste_ratio(self, waste_ratio: f64) -> Self {
        Self {
            waste_ratio,
            ..self
        }
    }

    #[must_use]
    #[inline]
    pub const fn min_count(&self) -> usize {
        self.min_count
    }

    #[must_use]
    #[inline]
    pub const fn waste_ratio(&self) -> f64 {
        self.waste_ratio
    }

    /// Returns `true` if a buffer of `len` slots whose first `head` slots are tombstones
    /// should be compacted.
    #[must_use]
    #[inline]
    pub fn should_compact(&self, head: usize, len: usize) -> bool {
        if len == 0 {
            return false;
        }

        let count = len - head;
        let waste = head as f64 / len as f64;
        count > self.min_count && waste > self.waste_ratio
    }
}

impl Default for CompactionPolicy {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// A FIFO queue with amortized O(1) dequeue.
///
/// Dequeuing takes the element out of its slot and advances a head index instead of shifting
/// the buffer. The consumed slots are reclaimed in bulk according to the queue's
/// [`CompactionPolicy`].
///
/// # Examples
///
/// ```
/// use cairn::queue::CompactingQueue;
///
/// let mut queue = CompactingQueue::new();
/// queue.extend(0..80);
///
/// for expected in 0..21 {
///     assert_eq!(queue.dequeue(), Some(expected));
/// }
///
/// // 59 live elements remain and 21 of 80 slots were tombstones, so the buffer was compacted.
/// assert_eq!(queue.count(), 59);
/// assert_eq!(queue.slot_count(), 59);
/// assert_eq!(queue.front(), Some(&21));
/// ```
///
/// [`CompactionPolicy`]: ./struct.CompactionPolicy.html
pub struct CompactingQueue<T, A: Allocator = Global> {
    buffer: Vec<Option<T>, A>,
    head: usize,
    policy: CompactionPolicy,
}

/// The name the compacting queue goes by next to the naive [`Queue`].
///
/// [`Queue`]: ./struct.Queue.html
pub type Queue2<T, A = Global> = CompactingQueue<T, A>;

impl<T> CompactingQueue<T> {
    /// Create an empty `CompactingQueue` with the default policy, backed by the global
    /// allocator.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::with_policy(CompactionPolicy::new())
    }

    /// Create an empty `CompactingQueue` which compacts according to `policy`.
    #[must_use]
    #[inline]
    pub fn with_policy(policy: CompactionPolicy) -> Self {
        Self::with_policy_in(policy, Global)
    }
}

impl<T, A: Allocator> CompactingQueue<T, A> {
    /// Create an empty `CompactingQueue` with the default policy, allocated with `alloc`.
    #[must_use]
    #[inline]
    pub fn new_in(alloc: A) -> Self {
        Self::with_policy_in(CompactionPolicy::new(), alloc)
    }

    #[must_use]
    #[inline]
    pub fn with_policy_in(policy: CompactionPolicy, alloc: A) -> Self {
        Self {
            buffer: Vec::new_in(alloc),
            head: 0,
            policy,
        }
    }

    #[must_use]
    #[inline]
    pub fn policy(&self) -> &CompactionPolicy {
        &self.policy
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns the number of elements waiting in the queue.
    #[must_use]
    #[inline]
    pub fn count(&self) -> usize {
        self.buffer.len() - self.head
    }

    /// Returns the physical length of the buffer, tombstones included.
    #[must_use]
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of tombstoned slots in front of the head.
    #[must_use]
    #[inline]
    pub fn tombstones(&self) -> usize {
        self.head
    }

    #[inline]
    pub fn enqueue(&mut self, element: T) {
        self.buffer.push(Some(element));
    }

    /// Removes the element at the front of the queue, or returns `None` if the queue is empty.
    ///
    /// The buffer is compacted afterwards if the queue's policy asks for it.
    pub fn dequeue(&mut self) -> Option<T> {
        let element = self.buffer.get_mut(self.head)?.take()?;
        self.head += 1;

        if self.policy.should_compact(self.head, self.buffer.len()) {
            tracing::trace!(
                tombstones = self.head,
                slots = self.buffer.len(),
                "compacting queue buffer"
            );
            self.buffer.drain(..self.head);
            self.head = 0;
        }

        Some(element)
    }

    #[must_use]
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.buffer.get(self.head)?.as_ref()
    }

    /// Returns an iterator over the queued elements, front first.
    #[must_use]
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.buffer[self.head..].iter(),
        }
    }
}

impl<T> Default for CompactingQueue<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for CompactingQueue<T, A> {
    #[inline]
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.debug_list().entries(self.iter()).finish()
    }
}

impl<T, A: Allocator> Extend<T> for CompactingQueue<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.buffer.extend(iter.into_iter().map(Some));
    }
}

impl<T> FromIterator<T> for CompactingQueue<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a CompactingQueue<T, A> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<T: Serialize, A: Allocator> Serialize for CompactingQueue<T, A> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// An iterator over the live elements of a [`CompactingQueue`].
///
/// [`CompactingQueue`]: ./struct.CompactingQueue.html
pub struct Iter<'a, T> {
    slots: slice::Iter<'a, Option<T>>,
}

impl<'a, T> Clone for Iter<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots.next().and_then(Option::as_ref)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.slots.len()
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.slots.next_back().and_then(Option::as_ref)
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Iter<'a, T> {
    #[inline]
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.debug_list().entries(self.clone()).finish()
    }
}
