use crate::{
    Error, binary_search, binary_search_range, insertion_sort, insertion_sorted,
    linked_list::{LinkedList, NodeHandle},
    queue::{CompactingQueue, CompactionPolicy, Queue, Queue2},
    stack::Stack,
};
use core::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
use std::{string::String, vec, vec::Vec};

fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn forward<T: Clone>(list: &LinkedList<T>) -> Vec<T> {
    let mut values = Vec::new();
    let mut cursor = list.first();
    while let Some(node) = cursor {
        values.push(list.value(node).unwrap().clone());
        cursor = list.next(node).unwrap();
    }
    values
}

fn backward<T: Clone>(list: &LinkedList<T>) -> Vec<T> {
    let mut values = Vec::new();
    let mut cursor = list.last();
    while let Some(node) = cursor {
        values.push(list.value(node).unwrap().clone());
        cursor = list.previous(node).unwrap();
    }
    values
}

#[test]
fn test_stack() {
    let mut stack = Stack::new();
    assert!(stack.is_empty());
    assert_eq!(stack.top(), None);
    assert_eq!(stack.pop(), None::<i32>);

    stack.push(1);
    stack.push(2);
    stack.push(3);

    assert_eq!(stack.count(), 3);
    assert_eq!(stack.top(), Some(&3));
    assert_eq!(stack.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);

    assert_eq!(stack.pop(), Some(3));
    assert_eq!(stack.pop(), Some(2));
    stack.push(4);
    assert_eq!(stack.pop(), Some(4));
    assert_eq!(stack.pop(), Some(1));
    assert_eq!(stack.pop(), None);
    assert!(stack.is_empty());

    let stack = Stack::from_iter(["x", "y"]);
    assert_eq!(std::format!("{:?}", stack), r#"["x", "y"]"#);
}

#[test]
fn test_queue() {
    let mut queue = Queue::new();
    assert!(queue.is_empty());
    assert_eq!(queue.front(), None);
    assert_eq!(queue.dequeue(), None::<String>);

    queue.enqueue(String::from("first"));
    queue.enqueue(String::from("second"));
    assert_eq!(queue.count(), 2);
    assert_eq!(queue.front().map(String::as_str), Some("first"));

    assert_eq!(queue.dequeue().as_deref(), Some("first"));
    queue.enqueue(String::from("third"));
    assert_eq!(queue.dequeue().as_deref(), Some("second"));
    assert_eq!(queue.dequeue().as_deref(), Some("third"));
    assert_eq!(queue.dequeue(), None);
    assert!(queue.is_empty());
}

#[test]
fn test_compacting_queue_fifo() {
    let mut queue = Queue2::new();
    assert!(queue.is_empty());
    assert_eq!(queue.front(), None);
    assert_eq!(queue.dequeue(), None::<usize>);

    queue.extend(0..10);
    assert_eq!(queue.count(), 10);

    for expected in 0..4 {
        assert_eq!(queue.front(), Some(&expected));
        assert_eq!(queue.dequeue(), Some(expected));
    }

    queue.enqueue(10);
    assert_eq!(queue.count(), 7);
    assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [4, 5, 6, 7, 8, 9, 10]);

    // Too small to ever compact under the default policy.
    assert_eq!(queue.tombstones(), 4);
    assert_eq!(queue.slot_count(), 11);

    while queue.dequeue().is_some() {}
    assert!(queue.is_empty());
    assert_eq!(queue.front(), None);
    assert_eq!(queue.dequeue(), None);
}

#[test]
fn test_compacting_queue_compaction() {
    trace_init();

    let mut queue = CompactingQueue::new();
    queue.extend(0..80);

    for expected in 0..20 {
        assert_eq!(queue.dequeue(), Some(expected));
    }

    // 20 of 80 slots is exactly a quarter, which is not enough.
    assert_eq!(queue.tombstones(), 20);
    assert_eq!(queue.slot_count(), 80);

    assert_eq!(queue.dequeue(), Some(20));
    assert_eq!(queue.tombstones(), 0);
    assert_eq!(queue.slot_count(), 59);
    assert_eq!(queue.count(), 59);

    // The queue behaves as before the compaction.
    assert_eq!(queue.front(), Some(&21));
    queue.enqueue(80);
    let rest = core::iter::from_fn(|| queue.dequeue()).collect::<Vec<_>>();
    assert_eq!(rest, (21..=80).collect::<Vec<_>>());
    assert!(queue.is_empty());
}

#[test]
fn test_compacting_queue_min_count() {
    let mut queue = CompactingQueue::new();
    queue.extend(0..60);

    // Once fewer than 51 elements remain the waste ratio no longer matters.
    for expected in 0..16 {
        assert_eq!(queue.dequeue(), Some(expected));
    }

    assert_eq!(queue.count(), 44);
    assert_eq!(queue.tombstones(), 16);
    assert_eq!(queue.slot_count(), 60);
}

#[test]
fn test_compaction_policy() {
    let policy = CompactionPolicy::default();
    assert_eq!(policy, CompactionPolicy::new());
    assert_eq!(policy.min_count(), 50);
    assert_eq!(policy.waste_ratio(), 0.25);

    assert!(!policy.should_compact(0, 0));
    assert!(!policy.should_compact(20, 80));
    assert!(policy.should_compact(21, 80));
    assert!(!policy.should_compact(30, 80));

    let never = policy.with_waste_ratio(1.0);
    assert!(!never.should_compact(99, 200));

    let eager = CompactionPolicy::new().with_min_count(0).with_waste_ratio(0.0);
    let mut queue = CompactingQueue::with_policy(eager);
    assert_eq!(queue.policy(), &eager);

    queue.extend([1, 2, 3]);
    assert_eq!(queue.dequeue(), Some(1));
    assert_eq!(queue.slot_count(), 2);
    assert_eq!(queue.dequeue(), Some(2));
    assert_eq!(queue.slot_count(), 1);

    // With nothing left `count > 0` no longer holds, so the last tombstone stays.
    assert_eq!(queue.dequeue(), Some(3));
    assert_eq!(queue.slot_count(), 1);
    assert_eq!(queue.tombstones(), 1);
    assert!(queue.is_empty());
}

#[test]
fn test_compacting_queue_drops() {
    static DROP_COUNT: AtomicU32 = AtomicU32::new(0);

    struct CountDrops;

    impl Drop for CountDrops {
        fn drop(&mut self) {
            DROP_COUNT.fetch_add(1, AtomicOrdering::SeqCst);
        }
    }

    {
        let mut queue = CompactingQueue::new();
        for _ in 0..100 {
            queue.enqueue(CountDrops);
        }

        for _ in 0..40 {
            drop(queue.dequeue());
        }

        assert_eq!(DROP_COUNT.load(AtomicOrdering::SeqCst), 40);
    }

    assert_eq!(DROP_COUNT.load(AtomicOrdering::SeqCst), 100);
}

#[test]
fn test_list_append() {
    let mut list = LinkedList::new();
    assert!(list.is_empty());
    assert_eq!(list.count(), 0);
    assert_eq!(list.first(), None);
    assert_eq!(list.last(), None);
    assert_eq!(list.front(), None);
    assert_eq!(list.back(), None);

    for value in 1..=5 {
        list.append(value);
    }

    assert!(!list.is_empty());
    assert_eq!(list.count(), 5);
    assert_eq!(list.front(), Some(&1));
    assert_eq!(list.back(), Some(&5));
    assert_eq!(forward(&list), [1, 2, 3, 4, 5]);
    assert_eq!(backward(&list), [5, 4, 3, 2, 1]);

    let first = list.first().unwrap();
    let last = list.last().unwrap();
    assert_eq!(list.previous(first), Ok(None));
    assert_eq!(list.next(last), Ok(None));
    assert_eq!(list.node(0), Ok(first));
    assert_eq!(list.node(4), Ok(last));
}

#[test]
fn test_list_node() {
    let list = LinkedList::from_iter(['a', 'b', 'c']);

    for (index, expected) in ['a', 'b', 'c'].iter().enumerate() {
        let node = list.node(index).unwrap();
        assert_eq!(list.value(node), Ok(expected));
        assert_eq!(list.get(index), Some(expected));
    }

    assert_eq!(list.node(3), Err(Error::IndexOutOfBounds { index: 3, len: 3 }));
    assert_eq!(
        list.node(usize::MAX),
        Err(Error::IndexOutOfBounds {
            index: usize::MAX,
            len: 3,
        })
    );
    assert_eq!(list.get(3), None);

    let empty = LinkedList::<char>::new();
    assert_eq!(empty.node(0), Err(Error::IndexOutOfBounds { index: 0, len: 0 }));
}

#[test]
fn test_list_insert() {
    let mut list = LinkedList::from_iter([2, 4]);

    let one = list.create_node(1);
    assert_eq!(list.is_linked(one), Ok(false));
    assert_eq!(list.count(), 2);

    list.insert(one, 0).unwrap();
    assert_eq!(list.is_linked(one), Ok(true));
    assert_eq!(list.first(), Some(one));
    assert_eq!(list, [1, 2, 4]);

    let three = list.create_node(3);
    list.insert(three, 2).unwrap();
    assert_eq!(list, [1, 2, 3, 4]);

    let five = list.create_node(5);
    list.insert(five, 4).unwrap();
    assert_eq!(list, [1, 2, 3, 4, 5]);
    assert_eq!(list.last(), Some(five));

    assert_eq!(forward(&list), [1, 2, 3, 4, 5]);
    assert_eq!(backward(&list), [5, 4, 3, 2, 1]);

    let six = list.create_node(6);
    assert_eq!(
        list.insert(six, 7),
        Err(Error::IndexOutOfBounds { index: 7, len: 5 })
    );
    assert_eq!(list.is_linked(six), Ok(false));
    assert_eq!(list, [1, 2, 3, 4, 5]);

    assert_eq!(list.insert(three, 0), Err(Error::NodeAlreadyLinked(three)));
    assert_eq!(list, [1, 2, 3, 4, 5]);

    let mut empty = LinkedList::new();
    let only = empty.create_node("only");
    assert_eq!(
        empty.insert(only, 1),
        Err(Error::IndexOutOfBounds { index: 1, len: 0 })
    );
    empty.insert(only, 0).unwrap();
    assert_eq!(empty, ["only"]);
    assert_eq!(empty.last(), Some(only));
}

#[test]
fn test_list_remove() {
    let mut list = LinkedList::from_iter([1, 2, 3, 4, 5]);

    let middle = list.node(2).unwrap();
    assert_eq!(list.remove(middle), Ok(3));
    assert_eq!(list, [1, 2, 4, 5]);
    assert_eq!(backward(&list), [5, 4, 2, 1]);

    let head = list.first().unwrap();
    assert_eq!(list.remove(head), Ok(1));
    assert_eq!(list, [2, 4, 5]);
    assert_eq!(list.previous(list.first().unwrap()), Ok(None));

    let tail = list.last().unwrap();
    assert_eq!(list.remove(tail), Ok(5));
    assert_eq!(list, [2, 4]);
    assert_eq!(list.next(list.last().unwrap()), Ok(None));

    assert_eq!(list.remove(middle), Err(Error::StaleNode(middle)));
    assert_eq!(list.value(head), Err(Error::StaleNode(head)));

    let rest = [list.node(0).unwrap(), list.node(1).unwrap()];
    assert_eq!(list.remove(rest[0]), Ok(2));
    assert_eq!(list.remove(rest[1]), Ok(4));
    assert!(list.is_empty());
    assert_eq!(list.first(), None);

    let detached = list.create_node(9);
    assert_eq!(list.remove(detached), Ok(9));
    assert!(list.is_empty());
}

#[test]
fn test_list_insert_remove_inverse() {
    let original = [10, 20, 30, 40];

    for index in 0..=original.len() {
        let mut list = LinkedList::from_iter(original);
        let node = list.create_node(99);
        list.insert(node, index).unwrap();
        assert_eq!(list.get(index), Some(&99));
        assert_eq!(list.count(), original.len() + 1);

        assert_eq!(list.remove(node), Ok(99));
        assert_eq!(list, original);
        assert_eq!(backward(&list), [40, 30, 20, 10]);
    }
}

#[test]
fn test_list_detach() {
    let mut list = LinkedList::from_iter(["a", "b", "c"]);

    let b = list.node(1).unwrap();
    list.detach(b).unwrap();
    assert_eq!(list, ["a", "c"]);
    assert_eq!(list.is_linked(b), Ok(false));
    assert_eq!(list.next(b), Ok(None));
    assert_eq!(list.previous(b), Ok(None));
    assert_eq!(list.value(b), Ok(&"b"));

    // Detaching twice is a no-op.
    list.detach(b).unwrap();
    assert_eq!(list, ["a", "c"]);

    *list.value_mut(b).unwrap() = "B";
    list.insert(b, 2).unwrap();
    assert_eq!(list, ["a", "c", "B"]);
    assert_eq!(backward(&list), ["B", "c", "a"]);
}

#[test]
fn test_list_foreign_handles() {
    let mut ours = LinkedList::from_iter([1, 2, 3]);
    let mut theirs = LinkedList::from_iter([1, 2, 3]);

    let foreign = theirs.node(1).unwrap();
    assert_eq!(ours.value(foreign), Err(Error::ForeignNode(foreign)));
    assert_eq!(ours.remove(foreign), Err(Error::ForeignNode(foreign)));
    assert_eq!(ours.insert(foreign, 0), Err(Error::ForeignNode(foreign)));
    assert_eq!(ours.detach(foreign), Err(Error::ForeignNode(foreign)));
    assert_eq!(ours, [1, 2, 3]);

    let cloned = ours.clone();
    let node = ours.node(0).unwrap();
    assert_eq!(cloned, ours);
    assert_eq!(cloned.value(node), Err(Error::ForeignNode(node)));

    assert_eq!(theirs.remove(foreign), Ok(2));
}

#[test]
fn test_list_slot_reuse() {
    let mut list = LinkedList::from_iter([1, 2, 3]);

    let old = list.node(1).unwrap();
    assert_eq!(list.remove(old), Ok(2));

    // The freed slot is reused, but the old handle stays stale.
    let new = list.create_node(4);
    assert_ne!(old, new);
    assert_eq!(list.value(old), Err(Error::StaleNode(old)));
    assert_eq!(list.value(new), Ok(&4));

    list.insert(new, 1).unwrap();
    assert_eq!(list, [1, 4, 3]);
}

#[test]
fn test_list_remove_all() {
    static DROP_COUNT: AtomicU32 = AtomicU32::new(0);

    #[derive(Debug, PartialEq)]
    struct CountDrops(u32);

    impl Drop for CountDrops {
        fn drop(&mut self) {
            DROP_COUNT.fetch_add(1, AtomicOrdering::SeqCst);
        }
    }

    let mut list = LinkedList::new();
    list.extend((0..4).map(CountDrops));
    let detached = list.create_node(CountDrops(4));
    let first = list.first().unwrap();

    list.remove_all();
    assert_eq!(DROP_COUNT.load(AtomicOrdering::SeqCst), 5);
    assert!(list.is_empty());
    assert_eq!(list.count(), 0);
    assert_eq!(list.value(first), Err(Error::StaleNode(first)));
    assert_eq!(list.value(detached), Err(Error::StaleNode(detached)));

    list.append(CountDrops(5));
    list.append(CountDrops(6));
    assert_eq!(list.iter().map(|item| item.0).collect::<Vec<_>>(), [5, 6]);
    assert_eq!(list.value(first), Err(Error::StaleNode(first)));

    drop(list);
    assert_eq!(DROP_COUNT.load(AtomicOrdering::SeqCst), 7);
}

#[test]
fn test_list_reverse() {
    let mut list = LinkedList::<i32>::new();
    list.reverse();
    assert!(list.is_empty());

    list.append(1);
    list.reverse();
    assert_eq!(list, [1]);

    list.extend([2, 3, 4, 5]);
    let old_last = list.last().unwrap();
    let old_first = list.first().unwrap();

    list.reverse();
    assert_eq!(list, [5, 4, 3, 2, 1]);
    assert_eq!(list.first(), Some(old_last));
    assert_eq!(list.last(), Some(old_first));
    assert_eq!(forward(&list), [5, 4, 3, 2, 1]);
    assert_eq!(backward(&list), [1, 2, 3, 4, 5]);

    list.reverse();
    assert_eq!(list, [1, 2, 3, 4, 5]);

    // Handles survive a reversal and still splice correctly.
    let node = list.create_node(0);
    list.reverse();
    list.insert(node, 5).unwrap();
    assert_eq!(list, [5, 4, 3, 2, 1, 0]);
    assert_eq!(backward(&list), [0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_list_iter() {
    const NUM: usize = 15;

    let mut list = LinkedList::new();
    let mut data = (0usize..=NUM).collect::<Vec<_>>();
    list.extend(data.iter().cloned());

    let iter = list.iter();
    assert_eq!(iter.len(), NUM + 1);
    assert_eq!(list.iter().next_back(), list.back());
    assert_eq!(list.iter().rev().nth(NUM), list.front());

    for (x, y) in list.iter().rev().zip(data.iter().rev()) {
        assert_eq!(x, y);
    }

    let mut iter = list.iter();
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&NUM));
    assert_eq!(iter.len(), NUM - 1);
    assert_eq!(iter.by_ref().count(), NUM - 1);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);

    list.reverse();
    data.reverse();
    assert_eq!(&list, &data[..]);
    assert_eq!(list.get(NUM - 1), Some(&1));

    let mut into_iter = list.into_iter();
    assert_eq!(into_iter.len(), NUM + 1);
    assert_eq!(into_iter.next(), Some(NUM));
    assert_eq!(into_iter.next_back(), Some(0));
    let rest = into_iter.into_list();
    assert_eq!(rest.count(), NUM - 1);
    assert_eq!(rest.into_iter().collect::<Vec<_>>(), (1..NUM).rev().collect::<Vec<_>>());
}

#[test]
fn test_list_debug() {
    let list = LinkedList::from_iter([1, 2, 3]);
    assert_eq!(std::format!("{:?}", list), "[1, 2, 3]");
    assert_eq!(std::format!("{:?}", list.iter()), "[1, 2, 3]");

    let node = list.first().unwrap();
    let message = std::format!("{}", Error::StaleNode(node));
    assert!(message.ends_with("has already been removed"));
}

#[test]
fn test_error_display() {
    let handle: NodeHandle = LinkedList::from_iter([()]).first().unwrap();

    assert_eq!(
        std::format!("{}", Error::IndexOutOfBounds { index: 4, len: 2 }),
        "index 4 is out of range for a list of length 2"
    );
    assert_eq!(
        std::format!("{}", Error::ForeignNode(handle)),
        std::format!("{} does not belong to this list", handle)
    );
    assert_eq!(
        std::format!("{}", Error::NodeAlreadyLinked(handle)),
        std::format!("{} is already linked into the list", handle)
    );
}

#[test]
fn test_binary_search() {
    let items = [1, 3, 5, 7, 9];

    assert_eq!(binary_search(&items, &7), Some(3));
    assert_eq!(binary_search(&items, &4), None);
    assert_eq!(binary_search(&items, &0), None);
    assert_eq!(binary_search(&items, &10), None);

    for (index, item) in items.iter().enumerate() {
        assert_eq!(binary_search(&items, item), Some(index));
    }

    assert_eq!(binary_search::<i32>(&[], &1), None);
    assert_eq!(binary_search_range(&items, &7, 0..3), None);
    assert_eq!(binary_search_range(&items, &7, 3..4), Some(3));
    assert_eq!(binary_search_range(&items, &1, 2..2), None);
    assert_eq!(binary_search_range(&items, &9, 4..100), Some(4));

    let words = ["apple", "kiwi", "mango", "pear"];
    assert_eq!(binary_search(&words, &"mango"), Some(2));
}

#[test]
fn test_insertion_sort() {
    let cases: &[(&[i32], &[i32])] = &[
        (&[], &[]),
        (&[1], &[1]),
        (&[2, 1], &[1, 2]),
        (&[3, 1, 2], &[1, 3, 2]),
        (&[2, 2, 1], &[1, 2, 2]),
        (&[1, 2, 3, 4], &[1, 4, 3, 2]),
        (&[4, 3, 2, 1], &[1, 4, 3, 2]),
        (&[5, 2, 9, 1, 7], &[1, 9, 7, 5, 2]),
        (&[9, 3, 7, 3, 1, 8], &[1, 9, 8, 7, 3, 3]),
    ];

    for &(input, expected) in cases {
        assert_eq!(insertion_sorted(input).as_slice(), expected, "input: {:?}", input);

        let mut items = vec![0; input.len()];
        items.copy_from_slice(input);
        insertion_sort(&mut items);
        assert_eq!(items.as_slice(), expected);
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_serialize() {
    let list = LinkedList::from_iter([3, 1, 2]);
    assert_eq!(serde_json::to_string(&list).unwrap(), "[3,1,2]");

    let mut queue = CompactingQueue::new();
    queue.extend([1, 2, 3]);
    queue.dequeue();
    assert_eq!(serde_json::to_string(&queue).unwrap(), "[2,3]");

    let stack = Stack::from_iter(["a", "b"]);
    assert_eq!(serde_json::to_string(&stack).unwrap(), r#"["a","b"]"#);

    let naive = Queue::from_iter([true]);
    assert_eq!(serde_json::to_string(&naive).unwrap(), "[true]");
}
