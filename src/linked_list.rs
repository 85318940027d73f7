//! A doubly-linked list of nodes which callers address through handles.
//!
//! Every node of a [`LinkedList`] lives in a pool owned by the list. Nodes are linked to their
//! neighbours by slot index: the `next` link is the forward chain starting at the head, and the
//! `previous` link is a back-reference used only to walk the chain in reverse. Neither link
//! owns anything, so there are no reference cycles to break when the list is dropped.
//!
//! Callers refer to individual nodes with a [`NodeHandle`]. A handle remembers which list
//! created it and which generation of its slot it points at, so using a handle after its node
//! has been removed, or with a list that did not create it, is reported as an [`Error`] rather
//! than corrupting the chain.
//!
//! The list caches neither its tail nor its length: [`last()`] and [`count()`] walk the chain
//! from the head.
//!
//! [`LinkedList`]: ./struct.LinkedList.html
//! [`NodeHandle`]: ./struct.NodeHandle.html
//! [`Error`]: ../enum.Error.html
//! [`last()`]: ./struct.LinkedList.html#method.last
//! [`count()`]: ./struct.LinkedList.html#method.count

use crate::{Error, Result};
use alloc::{
    alloc::{Allocator, Global},
    vec::Vec,
};
use core::{
    fmt,
    iter::{DoubleEndedIterator, FusedIterator, Iterator},
    mem,
    sync::atomic::{AtomicUsize, Ordering},
};
#[cfg(feature = "serde")]
use serde_core::{Serialize, Serializer};

static NEXT_LIST_ID: AtomicUsize = AtomicUsize::new(0);

/// An opaque reference to a node owned by a [`LinkedList`].
///
/// Handles are cheap to copy and never keep a node alive. Once the node is removed, every
/// handle to it is stale, and list operations given a stale handle return
/// [`Error::StaleNode`].
///
/// [`LinkedList`]: ./struct.LinkedList.html
/// [`Error::StaleNode`]: ../enum.Error.html#variant.StaleNode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    list: usize,
    index: usize,
    generation: u32,
}

impl fmt::Display for NodeHandle {
    #[inline]
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmtr,
            "node {}v{} of list {}",
            self.index, self.generation, self.list
        )
    }
}

/// A doubly-linked list whose nodes are addressable through [`NodeHandle`]s.
///
/// See the [module documentation] for more info.
///
/// [`NodeHandle`]: ./struct.NodeHandle.html
/// [module documentation]: ./index.html
pub struct LinkedList<T, A: Allocator = Global> {
    slots: Vec<Slot<T>, A>,
    head: Option<usize>,
    free: Option<usize>,
    id: usize,
}

impl<T> LinkedList<T> {
    /// Create an empty `LinkedList` backed by the global allocator.
    ///
    /// # Examples
    ///
    /// ```
    /// use cairn::linked_list::LinkedList;
    ///
    /// let list = LinkedList::<i32>::new();
    /// assert!(list.is_empty());
    /// ```
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<T, A: Allocator> LinkedList<T, A> {
    /// Create an empty `LinkedList` whose node pool is allocated with `alloc`.
    #[must_use]
    #[inline]
    pub fn new_in(alloc: A) -> Self {
        Self {
            slots: Vec::new_in(alloc),
            head: None,
            free: None,
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Create a `LinkedList` in `alloc` holding the items of `iter` in order.
    #[must_use]
    #[inline]
    pub fn from_iter_in<I: IntoIterator<Item = T>>(iter: I, alloc: A) -> Self {
        let mut list = Self::new_in(alloc);
        list.extend(iter);
        list
    }

    /// Returns `true` if no node is linked into the list.
    ///
    /// Detached nodes created with [`create_node()`] do not count.
    ///
    /// [`create_node()`]: #method.create_node
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns a handle to the head node, or `None` if the list is empty.
    #[must_use]
    #[inline]
    pub fn first(&self) -> Option<NodeHandle> {
        self.head.map(|index| self.handle_at(index))
    }

    /// Returns a handle to the last node, or `None` if the list is empty.
    ///
    /// The tail is not cached, so this walks the whole chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use cairn::linked_list::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// assert_eq!(list.last(), None);
    ///
    /// list.append("a");
    /// list.append("b");
    ///
    /// let last = list.last().unwrap();
    /// assert_eq!(list.value(last), Ok(&"b"));
    /// ```
    #[must_use]
    #[inline]
    pub fn last(&self) -> Option<NodeHandle> {
        self.last_index().map(|index| self.handle_at(index))
    }

    /// Returns the number of nodes linked into the list.
    ///
    /// The length is not cached, so this walks the whole chain.
    #[must_use]
    #[inline]
    pub fn count(&self) -> usize {
        self.chain().count()
    }

    /// Appends `value` to the end of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use cairn::linked_list::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// list.append(1);
    /// list.append(2);
    /// list.append(3);
    ///
    /// assert_eq!(list, [1, 2, 3]);
    /// ```
    #[inline]
    pub fn append(&mut self, value: T) {
        let tail = self.last_index();
        let _ = self.push_after(tail, value);
    }

    /// Returns a handle to the node at position `index`, counting from the head.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index` is not less than [`count()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cairn::{Error, linked_list::LinkedList};
    ///
    /// let list = LinkedList::from_iter([10, 20, 30]);
    ///
    /// let node = list.node(1)?;
    /// assert_eq!(list.value(node), Ok(&20));
    /// assert_eq!(
    ///     list.node(3),
    ///     Err(Error::IndexOutOfBounds { index: 3, len: 3 })
    /// );
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// [`Error::IndexOutOfBounds`]: ../enum.Error.html#variant.IndexOutOfBounds
    /// [`count()`]: #method.count
    #[inline]
    pub fn node(&self, index: usize) -> Result<NodeHandle> {
        match self.chain().nth(index) {
            Some(slot) => Ok(self.handle_at(slot)),
            None => Err(self.out_of_bounds(index)),
        }
    }

    /// Allocates a new node holding `value` without linking it into the list.
    ///
    /// The returned handle can be passed to [`insert()`] to splice the node in at any position.
    /// A detached node is dropped with the list if it is never inserted.
    ///
    /// [`insert()`]: #method.insert
    #[must_use]
    #[inline]
    pub fn create_node(&mut self, value: T) -> NodeHandle {
        let index = self.alloc_node(value);
        self.handle_at(index)
    }

    /// Links the detached node `handle` into the list so that it ends up at position `index`.
    ///
    /// Inserting at `0` makes the node the new head, and inserting at [`count()`] appends it.
    /// The list is left unchanged if an error is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::ForeignNode`] or [`Error::StaleNode`] if `handle` does not refer to a live
    ///   node of this list.
    /// - [`Error::NodeAlreadyLinked`] if the node is already part of the chain.
    /// - [`Error::IndexOutOfBounds`] if `index` is greater than [`count()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cairn::{Error, linked_list::LinkedList};
    ///
    /// let mut list = LinkedList::from_iter([1, 3]);
    ///
    /// let two = list.create_node(2);
    /// list.insert(two, 1)?;
    /// assert_eq!(list, [1, 2, 3]);
    ///
    /// assert_eq!(list.insert(two, 0), Err(Error::NodeAlreadyLinked(two)));
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// [`count()`]: #method.count
    /// [`Error::ForeignNode`]: ../enum.Error.html#variant.ForeignNode
    /// [`Error::StaleNode`]: ../enum.Error.html#variant.StaleNode
    /// [`Error::NodeAlreadyLinked`]: ../enum.Error.html#variant.NodeAlreadyLinked
    /// [`Error::IndexOutOfBounds`]: ../enum.Error.html#variant.IndexOutOfBounds
    pub fn insert(&mut self, handle: NodeHandle, index: usize) -> Result<()> {
        let new = self.resolve(handle)?;
        if self.node_at(new).linked {
            return Err(reject(Error::NodeAlreadyLinked(handle)));
        }

        if index == 0 {
            let old_head = self.head;

            let node = self.node_at_mut(new);
            node.next = old_head;
            node.prev = None;
            node.linked = true;

            if let Some(old_head) = old_head {
                self.node_at_mut(old_head).prev = Some(new);
            }

            self.head = Some(new);
            return Ok(());
        }

        let Some(prev) = self.chain().nth(index - 1) else {
            return Err(self.out_of_bounds(index));
        };
        self.link_after(prev, new);

        Ok(())
    }

    /// Unlinks the node `handle` from the list, frees it and returns its value.
    ///
    /// The neighbours of the node are linked to each other, and every handle to the node
    /// becomes stale. Removing a detached node simply frees it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignNode`] or [`Error::StaleNode`] if `handle` does not refer to a
    /// live node of this list. The list is left unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use cairn::{Error, linked_list::LinkedList};
    ///
    /// let mut list = LinkedList::from_iter(["a", "b", "c"]);
    ///
    /// let b = list.node(1)?;
    /// assert_eq!(list.remove(b), Ok("b"));
    /// assert_eq!(list, ["a", "c"]);
    ///
    /// assert_eq!(list.remove(b), Err(Error::StaleNode(b)));
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// [`Error::ForeignNode`]: ../enum.Error.html#variant.ForeignNode
    /// [`Error::StaleNode`]: ../enum.Error.html#variant.StaleNode
    #[inline]
    pub fn remove(&mut self, handle: NodeHandle) -> Result<T> {
        let index = self.resolve(handle)?;
        self.unlink(index);
        Ok(self.free_slot(index))
    }

    /// Unlinks the node `handle` from the list but keeps it alive, so that it can be
    /// [inserted] again.
    ///
    /// Detaching a node which is already detached does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignNode`] or [`Error::StaleNode`] if `handle` does not refer to a
    /// live node of this list.
    ///
    /// [inserted]: #method.insert
    /// [`Error::ForeignNode`]: ../enum.Error.html#variant.ForeignNode
    /// [`Error::StaleNode`]: ../enum.Error.html#variant.StaleNode
    #[inline]
    pub fn detach(&mut self, handle: NodeHandle) -> Result<()> {
        let index = self.resolve(handle)?;
        self.unlink(index);
        Ok(())
    }

    /// Removes and drops every node, including detached ones.
    ///
    /// All handles previously returned by this list become stale.
    pub fn remove_all(&mut self) {
        let mut free = None;

        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if matches!(slot.entry, Entry::Occupied(_)) {
                slot.generation = slot.generation.wrapping_add(1);
            }

            slot.entry = Entry::Vacant { next_free: free };
            free = Some(index);
        }

        self.head = None;
        self.free = free;
    }

    /// Reverses the order of the list in place.
    ///
    /// This is a single pass from the head which swaps the `next` and `previous` links of every
    /// node, so the former last node becomes the head.
    ///
    /// # Examples
    ///
    /// ```
    /// use cairn::linked_list::LinkedList;
    ///
    /// let mut list = LinkedList::from_iter([1, 2, 3, 4]);
    /// list.reverse();
    ///
    /// assert_eq!(list, [4, 3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        let mut cursor = self.head;

        while let Some(index) = cursor {
            let node = self.node_at_mut(index);
            cursor = node.next;
            mem::swap(&mut node.next, &mut node.prev);
            self.head = Some(index);
        }
    }

    /// Returns a reference to the value of the node `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignNode`] or [`Error::StaleNode`] if `handle` does not refer to a
    /// live node of this list.
    ///
    /// [`Error::ForeignNode`]: ../enum.Error.html#variant.ForeignNode
    /// [`Error::StaleNode`]: ../enum.Error.html#variant.StaleNode
    #[inline]
    pub fn value(&self, handle: NodeHandle) -> Result<&T> {
        let index = self.resolve(handle)?;
        Ok(&self.node_at(index).value)
    }

    /// Returns a mutable reference to the value of the node `handle`.
    ///
    /// # Errors
    ///
    /// See [`value()`].
    ///
    /// [`value()`]: #method.value
    #[inline]
    pub fn value_mut(&mut self, handle: NodeHandle) -> Result<&mut T> {
        let index = self.resolve(handle)?;
        Ok(&mut self.node_at_mut(index).value)
    }

    /// Returns the node following `handle`, or `None` if it is the last node or detached.
    ///
    /// # Errors
    ///
    /// See [`value()`].
    ///
    /// [`value()`]: #method.value
    #[inline]
    pub fn next(&self, handle: NodeHandle) -> Result<Option<NodeHandle>> {
        let index = self.resolve(handle)?;
        Ok(self.node_at(index).next.map(|next| self.handle_at(next)))
    }

    /// Returns the node preceding `handle`, or `None` if it is the head or detached.
    ///
    /// # Errors
    ///
    /// See [`value()`].
    ///
    /// [`value()`]: #method.value
    #[inline]
    pub fn previous(&self, handle: NodeHandle) -> Result<Option<NodeHandle>> {
        let index = self.resolve(handle)?;
        Ok(self.node_at(index).prev.map(|prev| self.handle_at(prev)))
    }

    /// Returns `true` if the node `handle` is part of the chain, and `false` if it is detached.
    ///
    /// # Errors
    ///
    /// See [`value()`].
    ///
    /// [`value()`]: #method.value
    #[inline]
    pub fn is_linked(&self, handle: NodeHandle) -> Result<bool> {
        let index = self.resolve(handle)?;
        Ok(self.node_at(index).linked)
    }

    /// Returns the value of the head node.
    #[must_use]
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.head.map(|index| &self.node_at(index).value)
    }

    /// Returns the value of the last node. This walks the whole chain.
    #[must_use]
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.last_index().map(|index| &self.node_at(index).value)
    }

    /// Returns the value at position `index`, or `None` if it is out of range.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.chain()
            .nth(index)
            .map(|index| &self.node_at(index).value)
    }

    /// Returns an iterator over the values of the list, from head to tail.
    ///
    /// Creating the iterator walks the chain once to find its tail.
    #[must_use]
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        let (back, len) = self
            .chain()
            .fold((None, 0), |(_, len), index| (Some(index), len + 1));

        Iter {
            slots: &self.slots,
            front: self.head,
            back,
            len,
        }
    }

    #[must_use]
    #[inline]
    fn chain(&self) -> Chain<'_, T> {
        Chain {
            slots: &self.slots,
            next: self.head,
        }
    }

    #[must_use]
    #[inline]
    fn last_index(&self) -> Option<usize> {
        self.chain().last()
    }

    #[must_use]
    #[inline]
    fn handle_at(&self, index: usize) -> NodeHandle {
        NodeHandle {
            list: self.id,
            index,
            generation: self.slots[index].generation,
        }
    }

    #[must_use]
    #[inline]
    fn node_at(&self, index: usize) -> &Node<T> {
        self.slots[index].node()
    }

    #[must_use]
    #[inline]
    fn node_at_mut(&mut self, index: usize) -> &mut Node<T> {
        self.slots[index].node_mut()
    }

    #[must_use]
    fn out_of_bounds(&self, index: usize) -> Error {
        reject(Error::IndexOutOfBounds {
            index,
            len: self.count(),
        })
    }

    fn resolve(&self, handle: NodeHandle) -> Result<usize> {
        if handle.list != self.id {
            return Err(reject(Error::ForeignNode(handle)));
        }

        match self.slots.get(handle.index) {
            Some(Slot {
                generation,
                entry: Entry::Occupied(_),
            }) if *generation == handle.generation => Ok(handle.index),
            _ => Err(reject(Error::StaleNode(handle))),
        }
    }

    fn alloc_node(&mut self, value: T) -> usize {
        let node = Node {
            value,
            next: None,
            prev: None,
            linked: false,
        };

        match self.free {
            Some(index) => {
                let slot = &mut self.slots[index];
                self.free = match slot.entry {
                    Entry::Vacant { next_free } => next_free,
                    Entry::Occupied(_) => unreachable!("occupied slot on the free list"),
                };
                slot.entry = Entry::Occupied(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Entry::Occupied(node),
                });
                self.slots.len() - 1
            }
        }
    }

    // Vacates the slot of a node which is no longer linked, bumping its generation.
    fn free_slot(&mut self, index: usize) -> T {
        let next_free = self.free;
        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        self.free = Some(index);

        match mem::replace(&mut slot.entry, Entry::Vacant { next_free }) {
            Entry::Occupied(node) => {
                debug_assert!(!node.linked, "freed a node that is still linked");
                node.value
            }
            Entry::Vacant { .. } => unreachable!("freed a vacant slot"),
        }
    }

    // Appends a fresh node after `tail`, which must be the current last node (or `None`).
    fn push_after(&mut self, tail: Option<usize>, value: T) -> usize {
        let new = self.alloc_node(value);

        match tail {
            Some(tail) => self.link_after(tail, new),
            None => {
                debug_assert!(self.head.is_none());
                self.node_at_mut(new).linked = true;
                self.head = Some(new);
            }
        }

        new
    }

    fn link_after(&mut self, prev: usize, new: usize) {
        let next = self.node_at(prev).next;
        self.node_at_mut(prev).next = Some(new);

        let node = self.node_at_mut(new);
        node.prev = Some(prev);
        node.next = next;
        node.linked = true;

        if let Some(next) = next {
            self.node_at_mut(next).prev = Some(new);
        }
    }

    fn unlink(&mut self, index: usize) {
        let node = self.node_at_mut(index);
        if !node.linked {
            return;
        }

        node.linked = false;
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev {
            Some(prev) => self.node_at_mut(prev).next = next,
            None => {
                debug_assert_eq!(self.head, Some(index), "unlinked node without a predecessor");
                self.head = next;
            }
        }

        if let Some(next) = next {
            self.node_at_mut(next).prev = prev;
        }
    }
}

#[inline]
fn reject(error: Error) -> Error {
    tracing::debug!(%error, "linked list operation rejected");
    error
}

impl<T> Default for LinkedList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for LinkedList<T, A> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            head: self.head,
            free: self.free,
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for LinkedList<T, A> {
    #[inline]
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for LinkedList<T, A> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator> Eq for LinkedList<T, A> {}

impl<T: PartialEq, A: Allocator> PartialEq<[T]> for LinkedList<T, A> {
    #[inline]
    fn eq(&self, other: &[T]) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<'s, T: PartialEq, A: Allocator> PartialEq<&'s [T]> for LinkedList<T, A> {
    #[inline]
    fn eq(&self, other: &&'s [T]) -> bool {
        PartialEq::eq(self, &other[..])
    }
}

impl<T: PartialEq, A: Allocator, const N: usize> PartialEq<[T; N]> for LinkedList<T, A> {
    #[inline]
    fn eq(&self, other: &[T; N]) -> bool {
        PartialEq::eq(self, &other[..])
    }
}

impl<'s, T: PartialEq, A: Allocator, const N: usize> PartialEq<&'s [T; N]> for LinkedList<T, A> {
    #[inline]
    fn eq(&self, other: &&'s [T; N]) -> bool {
        PartialEq::eq(self, &other[..])
    }
}

impl<T, A: Allocator> Extend<T> for LinkedList<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut tail = self.last_index();
        for item in iter {
            tail = Some(self.push_after(tail, item));
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, Global)
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a LinkedList<T, A> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, A: Allocator> IntoIterator for LinkedList<T, A> {
    type IntoIter = IntoIter<T, A>;
    type Item = T;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let len = self.count();
        IntoIter { list: self, len }
    }
}

#[cfg(feature = "serde")]
impl<T: Serialize, A: Allocator> Serialize for LinkedList<T, A> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// An iterator over the values of a [`LinkedList`].
///
/// [`LinkedList`]: ./struct.LinkedList.html
pub struct Iter<'a, T> {
    slots: &'a [Slot<T>],
    front: Option<usize>,
    back: Option<usize>,
    len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let slots = self.slots;
        let node = slots[self.front?].node();
        self.front = node.next;
        self.len -= 1;

        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let slots = self.slots;
        let node = slots[self.back?].node();
        self.back = node.prev;
        self.len -= 1;

        Some(&node.value)
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Iter<'a, T> {
    #[inline]
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the values of a [`LinkedList`].
///
/// Detached nodes are not yielded; they are dropped with the iterator.
///
/// [`LinkedList`]: ./struct.LinkedList.html
pub struct IntoIter<T, A: Allocator = Global> {
    list: LinkedList<T, A>,
    len: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
    /// Returns the remaining values as a `LinkedList`.
    #[must_use]
    #[inline]
    pub fn into_list(self) -> LinkedList<T, A> {
        self.list
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    #[inline]
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.list, fmtr)
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let head = self.list.head?;
        self.list.unlink(head);
        self.len -= 1;
        Some(self.list.free_slot(head))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let tail = self.list.last_index()?;
        self.list.unlink(tail);
        self.len -= 1;
        Some(self.list.free_slot(tail))
    }
}

struct Chain<'a, T> {
    slots: &'a [Slot<T>],
    next: Option<usize>,
}

impl<'a, T> Iterator for Chain<'a, T> {
    type Item = usize;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        self.next = self.slots[index].node().next;
        Some(index)
    }
}

#[derive(Clone)]
struct Slot<T> {
    generation: u32,
    entry: Entry<T>,
}

impl<T> Slot<T> {
    #[must_use]
    #[inline]
    fn node(&self) -> &Node<T> {
        match self.entry {
            Entry::Occupied(ref node) => node,
            Entry::Vacant { .. } => unreachable!("link to a vacant slot"),
        }
    }

    #[must_use]
    #[inline]
    fn node_mut(&mut self) -> &mut Node<T> {
        match self.entry {
            Entry::Occupied(ref mut node) => node,
            Entry::Vacant { .. } => unreachable!("link to a vacant slot"),
        }
    }
}

#[derive(Clone)]
enum Entry<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

#[derive(Clone)]
struct Node<T> {
    value: T,
    next: Option<usize>,
    prev: Option<usize>,
    linked: bool,
}
