use std::fmt::{self, Debug, Formatter};

use parking_lot::Mutex;

use crate::collections::stack::Stack;

/// A [`Stack`] that can be shared between threads, with every operation serialized behind a
/// single lock.
///
/// Enumeration can't hold the lock across calls, so it is done either through a copy of the
/// contents ([`snapshot`](SyncStack::snapshot)) or inside a closure that runs while the lock is
/// held ([`with_stack`](SyncStack::with_stack)).
///
/// # Examples
/// ```
/// # use std::sync::Arc;
/// # use std::thread;
/// # use stack_lib::collections::SyncStack;
/// let stack = Arc::new(SyncStack::new());
///
/// let handles: Vec<_> = (0..4).map(|i| {
///     let stack = Arc::clone(&stack);
///     thread::spawn(move || stack.push(i))
/// }).collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(stack.len(), 4);
/// ```
pub struct SyncStack<T> {
    pub(crate) inner: Mutex<Stack<T>>,
}

impl<T> SyncStack<T> {
    /// Creates a new, empty SyncStack.
    pub fn new() -> SyncStack<T> {
        SyncStack {
            inner: Mutex::new(Stack::new()),
        }
    }

    /// Wraps an existing [`Stack`], keeping its contents and order.
    pub fn from_stack(stack: Stack<T>) -> SyncStack<T> {
        SyncStack {
            inner: Mutex::new(stack),
        }
    }

    /// Consumes the SyncStack, returning the underlying [`Stack`].
    pub fn into_inner(self) -> Stack<T> {
        self.inner.into_inner()
    }

    /// Pushes `value` onto the top of the Stack.
    ///
    /// # Panics
    /// Panics if the memory layout of the Stack would have a size that exceeds [`isize::MAX`].
    pub fn push(&self, value: T) {
        self.inner.lock().push(value);
    }

    /// Removes the top element and returns it, or [`None`] if the Stack is empty.
    pub fn pop(&self) -> Option<T> {
        self.inner.lock().pop()
    }

    /// Removes the top element, returning it with a flag of `true`, or the default value of `T`
    /// with a flag of `false` if the Stack is empty.
    pub fn pop_or_default(&self) -> (T, bool)
    where
        T: Default,
    {
        self.inner.lock().pop_or_default()
    }

    /// Returns a clone of the top element, if there is one.
    pub fn peek_cloned(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().peek().cloned()
    }

    /// Returns true if the Stack contains no elements at the time of the call.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the number of elements at the time of the call.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Drops every element in the Stack.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Copies the current contents into a new [`Stack`], which can then be enumerated without
    /// holding the lock. Later changes to self aren't reflected in the copy.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::SyncStack;
    /// let stack = SyncStack::from(stack_lib::collections::Stack::from([1, 2, 3]));
    /// let snapshot = stack.snapshot();
    /// stack.pop();
    /// assert_eq!(snapshot.as_slice(), &[1, 2, 3]);
    /// ```
    pub fn snapshot(&self) -> Stack<T>
    where
        T: Clone,
    {
        self.inner.lock().clone()
    }

    /// Runs `f` with read-only access to the underlying [`Stack`], holding the lock for the whole
    /// call.
    pub fn with_stack<R>(&self, f: impl FnOnce(&Stack<T>) -> R) -> R {
        f(&self.inner.lock())
    }
}

impl<T> Default for SyncStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Stack<T>> for SyncStack<T> {
    fn from(value: Stack<T>) -> Self {
        SyncStack::from_stack(value)
    }
}

impl<T: Debug> Debug for SyncStack<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(stack) => f.debug_struct("SyncStack").field("contents", &stack.as_slice()).finish(),
            None => f.debug_struct("SyncStack").field("contents", &"<locked>").finish(),
        }
    }
}
