#![cfg(test)]

use std::hash::{BuildHasher, RandomState};
use std::iter;

use quickcheck::quickcheck;

use super::*;
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::panic::assert_panics;

#[test]
fn test_pop_order() {
    let mut stack = Stack::new();
    stack.push(1);
    stack.push(34);
    stack.push(18);

    assert_eq!(stack.pop_or_default(), (18, true));
    assert_eq!(stack.pop_or_default(), (34, true));
    assert!(!stack.is_empty(), "One element should remain after two pops.");
    assert_eq!(stack.pop_or_default(), (1, true));
    assert!(stack.is_empty(), "Stack should be empty after popping every element.");
    assert_eq!(
        stack.pop_or_default(),
        (0, false),
        "Popping an empty Stack should produce the default value and a false flag."
    );
}

#[test]
fn test_empty_pop() {
    let mut stack: Stack<String> = Stack::new();
    assert!(stack.is_empty(), "A new Stack should be empty.");
    assert_eq!(stack.pop(), None);
    assert_eq!(stack.pop_or_default(), (String::new(), false));
    assert_eq!(stack.len(), 0, "Popping an empty Stack shouldn't change its length.");

    stack.push(String::from("🎃"));
    assert!(!stack.is_empty(), "A Stack shouldn't be empty after a push.");
}

#[test]
fn test_peek() {
    let mut stack = Stack::from(['a', 'b']);
    assert_eq!(stack.peek(), Some(&'b'));

    *stack.peek_mut().expect("Stack has elements") = 'z';
    assert_eq!(stack.pop(), Some('z'), "Mutating through peek_mut should change the top element.");
    assert_eq!(stack.peek(), Some(&'a'));

    stack.clear();
    assert_eq!(stack.peek(), None);
    assert_eq!(stack.peek_mut(), None);
}

#[test]
fn test_enumeration() {
    let mut stack = Stack::from(["a", "b", "c"]);

    assert_eq!(
        stack.iter().copied().collect::<Vec<_>>(),
        ["a", "b", "c"],
        "Iteration should go from bottom to top."
    );
    assert_eq!(
        (&stack).into_iter().count(),
        3,
        "Iterating a second time should see every element again."
    );
    assert_eq!(stack.len(), 3, "Iterating shouldn't change the length.");
    assert_eq!(stack.pop(), Some("c"), "Iterating shouldn't change the pop order.");

    for item in &mut stack {
        *item = "x";
    }
    assert_eq!(stack.as_slice(), &["x", "x"]);
}

#[test]
fn test_display() {
    let mut stack = Stack::new();
    assert_eq!(stack.to_string(), "The stack is empty");

    stack.extend(["🍁", "🕯️", "☕"]);
    assert_eq!(stack.to_string(), "Stack Elements: 🍁 🕯️ ☕");

    stack.pop();
    assert_eq!(stack.to_string(), "Stack Elements: 🍁 🕯️");
}

#[test]
fn test_growth_and_capacity() {
    let mut stack: Stack<u32> = Stack::new();
    assert_eq!(stack.cap(), 0, "A new Stack shouldn't allocate.");

    stack.push(0);
    assert_eq!(stack.cap(), 2, "The first growth should use the minimum capacity.");

    stack.push(1);
    stack.push(2);
    assert_eq!(stack.cap(), 4, "Capacity should double when full.");

    stack.reserve(10);
    assert_eq!(stack.cap(), 13, "Reserve should provide exactly len + extra capacity.");
    stack.reserve(1);
    assert_eq!(stack.cap(), 13, "Reserve shouldn't shrink the Stack.");

    stack.shrink_to_fit();
    assert_eq!(stack.cap(), 3);
    assert_eq!(stack.as_slice(), &[0, 1, 2], "Reallocation should keep every element.");

    stack.clear();
    assert_eq!(stack.cap(), 3, "Clearing shouldn't change the capacity.");
    stack.shrink_to_fit();
    assert_eq!(stack.cap(), 0);
}

#[test]
fn test_capacity_overflow() {
    let mut stack: Stack<u64> = Stack::new();
    assert_eq!(stack.try_reserve(usize::MAX), Err(CapacityOverflow));
    assert_eq!(stack.try_reserve(isize::MAX as usize / 8 + 1), Err(CapacityOverflow));
    assert_eq!(stack.cap(), 0, "A failed reserve shouldn't change the capacity.");

    assert_panics!({
        let _ = Stack::<u8>::with_cap(isize::MAX as usize + 1);
    });

    assert_panics!({
        let mut stack = Stack::from([1_u16, 2]);
        stack.reserve(usize::MAX);
    });
}

#[test]
fn test_try_push_returns_value() {
    // A full Stack of ZSTs at the maximum capacity can't grow any further.
    let mut stack = Stack::<ZeroSizedType> {
        ptr: std::ptr::NonNull::dangling(),
        cap: usize::MAX,
        len: usize::MAX,
        _phantom: std::marker::PhantomData,
    };

    let error = stack.try_push(ZeroSizedType).expect_err("Stack is at its maximum capacity");
    assert_eq!(error.cause(), CapacityOverflow);
    assert_eq!(error.into_value(), ZeroSizedType, "The rejected value should be handed back.");

    // ZSTs don't need to be dropped, so forgetting the length is fine.
    stack.len = 0;
}

#[test]
fn test_zst_support() {
    let mut stack = Stack::new();
    for _ in 0..100 {
        stack.push(ZeroSizedType);
    }
    assert_eq!(stack.len(), 100);
    assert_eq!(
        stack.ptr,
        std::ptr::NonNull::dangling(),
        "A Stack of ZSTs should never allocate."
    );

    assert_eq!(stack.pop(), Some(ZeroSizedType));
    assert_eq!(stack.iter().count(), 99);
    assert_eq!(stack.into_iter().count(), 99);
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let mut stack: Stack<_> = iter::repeat_with(|| counter.clone()).take(10).collect();

    drop(stack.pop());
    assert_eq!(counter.count(), 1, "A popped element should be dropped by its new owner.");

    stack.truncate(6);
    assert_eq!(counter.count(), 4, "Truncating should drop the elements above the new length.");

    stack.truncate(8);
    assert_eq!(counter.count(), 4, "Truncating to a larger length should do nothing.");

    drop(stack);
    assert_eq!(counter.count(), 10, "Every element should be dropped exactly once.");
}

#[test]
fn test_clear_drops() {
    let counter = CountedDrop::new(0);
    let mut stack: Stack<_> = iter::repeat_with(|| counter.clone()).take(10).collect();
    let cap = stack.cap();

    stack.clear();
    assert_eq!(counter.count(), 10, "Clearing should drop every element.");
    assert!(stack.is_empty());
    assert_eq!(stack.cap(), cap, "Clearing shouldn't change the capacity.");

    drop(stack);
    assert_eq!(counter.count(), 10, "Dropping a cleared Stack shouldn't drop anything again.");
}

#[test]
fn test_element_without_debug() {
    // Deliberately implements nothing, not even Debug or PartialEq.
    struct Opaque(u32);

    let mut stack = Stack::new();
    for i in 0..5 {
        stack.push(Opaque(i));
    }
    stack.extend([Opaque(5), Opaque(6)]);

    let mut other = Stack::from([Opaque(0)]);
    other.push(Opaque(1));
    assert_eq!(other.len(), 2);

    assert!(
        stack.drain().map(|item| item.0).eq((0..7).rev()),
        "A Stack should accept element types with no trait implementations."
    );
    assert!(stack.pop().is_none());
}

#[test]
fn test_into_iter() {
    let mut iter = Stack::from([0, 1, 2, 3, 4]).into_iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.as_slice(), &[1, 2, 3]);
    assert_eq!(iter.next_back(), Some(3));
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);

    assert_eq!(
        Stack::from([1, 2, 3]).into_iter().rev().collect::<Vec<_>>(),
        [3, 2, 1],
        "Reversed owned iteration should follow pop order."
    );

    let counter = CountedDrop::new(0);
    let stack: Stack<_> = iter::repeat_with(|| counter.clone()).take(10).collect();
    let mut iter = stack.into_iter();
    drop(iter.next());
    drop(iter.next_back());
    drop(iter);
    assert_eq!(
        counter.count(),
        10,
        "Dropping a partially consumed iterator should drop the remaining elements."
    );
}

#[test]
fn test_drain() {
    let mut stack = Stack::from([1, 2, 3, 4]);
    let cap = stack.cap();

    let mut drain = stack.drain();
    assert_eq!(drain.len(), 4);
    assert_eq!(drain.next(), Some(4), "Drain should start from the top.");
    assert_eq!(drain.next_back(), Some(1));
    drop(drain);

    assert!(stack.is_empty(), "The Stack should be empty after draining.");
    assert_eq!(stack.cap(), cap, "Draining shouldn't change the capacity.");

    stack.push(5);
    assert_eq!(stack.pop(), Some(5), "The Stack should be usable after draining.");

    let counter = CountedDrop::new(0);
    let mut stack: Stack<_> = iter::repeat_with(|| counter.clone()).take(10).collect();
    drop(stack.drain().take(3).collect::<Vec<_>>());
    assert_eq!(
        counter.count(),
        10,
        "Elements left in a dropped Drain should be dropped too."
    );

    let mut stack: Stack<_> = iter::repeat_with(|| counter.clone()).take(5).collect();
    std::mem::forget(stack.drain());
    drop(stack);
    assert_eq!(
        counter.count(),
        10,
        "Leaking a Drain should leak its elements rather than double drop them."
    );
}

#[test]
fn test_conversions() {
    let stack: Stack<_> = (0..5).collect();
    let vec = Vec::from(stack);
    assert_eq!(vec, [0, 1, 2, 3, 4]);

    let mut stack = Stack::from(vec);
    assert_eq!(stack.pop(), Some(4), "The end of a Vec should become the top of the Stack.");
    stack.push(10);
    assert_eq!(stack.as_slice(), &[0, 1, 2, 3, 10]);

    let mut stack = Stack::from([1_u8]);
    stack.extend(&[2, 3]);
    assert_eq!(stack.as_slice(), &[1, 2, 3]);

    let zsts = Stack::from(vec![ZeroSizedType; 3]);
    assert_eq!(Vec::from(zsts).len(), 3);
}

#[test]
fn test_equality_and_hash() {
    let stack = Stack::from([0_usize, 1, 2]);
    let mut other = Stack::with_cap(10);
    other.extend(0_usize..3);

    assert_eq!(stack, other, "Equality shouldn't depend on capacity.");
    assert_eq!(stack.clone(), stack, "Clones should be equal.");
    assert_ne!(stack, Stack::from([2, 1, 0]), "Order should matter for equality.");

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&stack),
        state.hash_one(&other),
        "Equal Stacks should produce the same hash."
    );
    assert_eq!(
        state.hash_one(&stack),
        state.hash_one([0_usize, 1, 2].as_slice()),
        "Borrow hash equality should be upheld."
    );
}

#[test]
fn test_pops_reverse_pushes() {
    fn prop(values: Vec<i32>) -> bool {
        let mut stack = Stack::new();
        for value in values.iter() {
            stack.push(*value);
        }

        let popped: Vec<_> = iter::from_fn(|| match stack.pop_or_default() {
            (value, true) => Some(value),
            (_, false) => None,
        }).collect();

        popped.into_iter().eq(values.into_iter().rev()) && stack.is_empty()
    }

    quickcheck(prop as fn(Vec<i32>) -> bool);
}

#[test]
fn test_push_pop_is_neutral() {
    fn prop(values: Vec<u8>, extra: u8) -> bool {
        let mut stack: Stack<u8> = values.iter().copied().collect();
        let len = stack.len();

        stack.push(extra);
        let popped = stack.pop();

        popped == Some(extra) && stack.len() == len && stack.as_slice() == values.as_slice()
    }

    quickcheck(prop as fn(Vec<u8>, u8) -> bool);
}

#[test]
fn test_enumeration_matches_pushes() {
    fn prop(values: Vec<String>) -> bool {
        let stack: Stack<String> = values.iter().cloned().collect();

        stack.iter().eq(values.iter())
            && stack.iter().eq(values.iter())
            && stack.into_iter().rev().eq(values.into_iter().rev())
    }

    quickcheck(prop as fn(Vec<String>) -> bool);
}
