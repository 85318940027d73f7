//! The double-scan exchange sort historically shipped as "insertion sort".
//!
//! Despite the name this is not an insertion sort: there is no shifting pass and no early exit
//! on sorted input. Every element is compared against every element from index `1` onwards,
//! swapping whenever the outer one is greater. The effect on distinct values is that the
//! minimum ends up first and the rest end up in *descending* order:
//!
//! ```
//! use cairn::insertion_sort;
//!
//! let mut items = [5, 2, 9, 1, 7];
//! insertion_sort(&mut items);
//!
//! assert_eq!(items, [1, 9, 7, 5, 2]);
//! ```
//!
//! Callers which rely on this ordering keep working; callers wanting an ascending sort should
//! use [`slice::sort`].
//!
//! [`slice::sort`]: https://doc.rust-lang.org/std/primitive.slice.html#method.sort

use alloc::vec::Vec;

/// Runs the double scan over `items` in place. O(n²) comparisons for every input.
#[inline]
pub fn insertion_sort<T: PartialOrd>(items: &mut [T]) {
    let len = items.len();

    for i in 0..len {
        for j in 1..len {
            if items[i] > items[j] {
                items.swap(i, j);
            }
        }
    }
}

/// Returns a copy of `items` after running [`insertion_sort()`] over it.
///
/// [`insertion_sort()`]: ./fn.insertion_sort.html
#[must_use]
#[inline]
pub fn insertion_sorted<T: PartialOrd + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = Vec::new();
    sorted.extend_from_slice(items);
    insertion_sort(&mut sorted);
    sorted
}
