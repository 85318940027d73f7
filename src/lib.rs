// SPDX-License-Identifier: MIT OR Apache-2.0

#![no_std]
#![cfg_attr(feature = "nightly", feature(allocator_api))]
#![warn(
    missing_docs,
    clippy::empty_line_after_doc_comments,
    clippy::missing_safety_doc
)]
#![deny(unsafe_attr_outside_unsafe, unsafe_op_in_unsafe_fn)]

//! Small generic containers and the algorithms that go with them.
//!
//! The two interesting types are the [`LinkedList`], a doubly-linked list whose nodes are
//! addressed through [`NodeHandle`]s, and the [`CompactingQueue`], a FIFO queue which defers
//! front removal and reclaims the consumed prefix of its buffer in bulk. Alongside them live a
//! [`Stack`], a naive [`Queue`], a recursive [`binary_search`] and the double-scan
//! [`insertion_sort`].
//!
#![doc = include_str!("../Readme.md")]
//!
//! [`LinkedList`]: ./linked_list/struct.LinkedList.html
//! [`NodeHandle`]: ./linked_list/struct.NodeHandle.html
//! [`CompactingQueue`]: ./queue/struct.CompactingQueue.html
//! [`Stack`]: ./stack/struct.Stack.html
//! [`Queue`]: ./queue/struct.Queue.html
//! [`binary_search`]: ./search/fn.binary_search.html
//! [`insertion_sort`]: ./sort/fn.insertion_sort.html

#[cfg(not(any(feature = "allocator-api2", feature = "nightly")))]
compile_error!("An allocator must be provided, either through `nightly` or `allocator-api2`");

#[cfg(feature = "nightly")]
extern crate alloc;

#[cfg(all(feature = "allocator-api2", not(feature = "nightly")))]
extern crate allocator_api2 as alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

use crate::linked_list::NodeHandle;
use core::{error::Error as ErrorTrait, fmt};

pub mod linked_list;
pub mod queue;
pub mod search;
pub mod sort;
pub mod stack;

#[cfg(test)]
mod tests;

pub use crate::{
    linked_list::LinkedList,
    queue::{CompactingQueue, CompactionPolicy, Queue, Queue2},
    search::{binary_search, binary_search_range},
    sort::{insertion_sort, insertion_sorted},
    stack::Stack,
};

/// A specialised `Result` type for fallible container operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Represents error types which may be returned by the containers in this crate.
///
/// Running out of elements is not an error: operations such as [`Stack::pop()`] or
/// [`CompactingQueue::dequeue()`] return `None` instead.
///
/// [`Stack::pop()`]: ./stack/struct.Stack.html#method.pop
/// [`CompactingQueue::dequeue()`]: ./queue/struct.CompactingQueue.html#method.dequeue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The index does not address a node in a list of length `len`.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The length of the list at the time of the request.
        len: usize,
    },
    /// The handle was created by a different list.
    ForeignNode(NodeHandle),
    /// The node behind the handle has already been removed.
    StaleNode(NodeHandle),
    /// The node is already part of the list, and must be detached before it can be inserted.
    NodeAlreadyLinked(NodeHandle),
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::IndexOutOfBounds { index, len } => write!(
                fmtr,
                "index {} is out of range for a list of length {}",
                index, len
            ),
            Self::ForeignNode(handle) => {
                write!(fmtr, "{} does not belong to this list", handle)
            }
            Self::StaleNode(handle) => write!(fmtr, "{} has already been removed", handle),
            Self::NodeAlreadyLinked(handle) => {
                write!(fmtr, "{} is already linked into the list", handle)
            }
        }
    }
}

impl ErrorTrait for Error {}
