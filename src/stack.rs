#![allow(missing_docs)]

//! A last-in, first-out stack over a growable buffer.

use alloc::{
    alloc::{Allocator, Global},
    vec::Vec,
};
use core::{fmt, slice};
#[cfg(feature = "serde")]
use serde_core::{Serialize, Serializer};

/// A LIFO stack. Pushing and popping both work on the end of the buffer.
///
/// # Examples
///
/// ```
/// use cairn::stack::Stack;
///
/// let mut stack = Stack::new();
/// stack.push("a");
/// stack.push("b");
///
/// assert_eq!(stack.top(), Some(&"b"));
/// assert_eq!(stack.pop(), Some("b"));
/// assert_eq!(stack.pop(), Some("a"));
/// assert_eq!(stack.pop(), None);
/// ```
pub struct Stack<T, A: Allocator = Global> {
    items: Vec<T, A>,
}

impl<T> Stack<T> {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<T, A: Allocator> Stack<T, A> {
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
    pub fn push(&mut self, element: T) {
        self.items.push(element);
    }

    /// Removes the most recently pushed element, or returns `None` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    #[must_use]
    #[inline]
    pub fn top(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns an iterator from the bottom of the stack to the top.
    #[must_use]
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Stack<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Stack<T, A> {
    #[inline]
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.debug_list().entries(self.iter()).finish()
    }
}

impl<T, A: Allocator> Extend<T> for Stack<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for Stack<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}

#[cfg(feature = "serde")]
impl<T: Serialize, A: Allocator> Serialize for Stack<T, A> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
