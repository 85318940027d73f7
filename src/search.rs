//! Binary search over sorted slices.

use core::{cmp::Ordering, ops::Range};

/// Searches the whole of the ascending slice `items` for `key`.
///
/// See [`binary_search_range()`] for details.
///
/// # Examples
///
/// ```
/// use cairn::binary_search;
///
/// let items = [1, 3, 5, 7, 9];
///
/// assert_eq!(binary_search(&items, &7), Some(3));
/// assert_eq!(binary_search(&items, &4), None);
/// ```
///
/// [`binary_search_range()`]: ./fn.binary_search_range.html
#[must_use]
#[inline]
pub fn binary_search<T: Ord>(items: &[T], key: &T) -> Option<usize> {
    binary_search_range(items, key, 0..items.len())
}

/// Searches the half-open `range` of the ascending slice `items` for `key`, returning the
/// index of a matching element.
///
/// The range is halved on every call, comparing against its midpoint. If `items` holds
/// several elements equal to `key`, any one of their indices may be returned. An end bound past
/// the end of `items` is clamped to `items.len()`.
///
/// If `items` is not sorted in ascending order the result is unspecified.
#[must_use]
pub fn binary_search_range<T: Ord>(items: &[T], key: &T, range: Range<usize>) -> Option<usize> {
    let (low, high) = (range.start, range.end.min(items.len()));
    if low >= high {
        return None;
    }

    let mid = low + (high - low) / 2;

    match items[mid].cmp(key) {
        Ordering::Greater => binary_search_range(items, key, low..mid),
        Ordering::Less => binary_search_range(items, key, mid + 1..high),
        Ordering::Equal => Some(mid),
    }
}
