use std::alloc::{self, Layout};
use std::borrow::Borrow;
use std::cmp;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::Deref;
use std::ptr::{self, NonNull};
use std::slice;

use log::{debug, trace};

#[doc(inline)]
pub use crate::util::error::CapacityOverflow;
use crate::util::result::ResultExtension;

const MIN_CAP: usize = 2;
const MAX_SIZE: usize = isize::MAX as usize;

const GROWTH_FACTOR: usize = 2;

/// A last-in-first-out collection of elements of a single type, stored contiguously from the bottom
/// of the stack to the top.
///
/// Popping an empty Stack isn't an error. [`pop`](Stack::pop) returns [`None`] and
/// [`pop_or_default`](Stack::pop_or_default) returns the default value alongside a `false` flag,
/// leaving the Stack untouched in both cases.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Stack.
/// - `k`: The number of items removed.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `is_empty` | `O(1)` |
/// | `peek` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `truncate` | `O(k)` |
/// | `clear` | `O(n)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `iter` | `O(1)`, `O(n)` to exhaust |
///
/// \* If the Stack doesn't have enough capacity for the new element, `push` will take `O(n)`.
///
/// \** If the Stack has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct Stack<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<T>,
}

/// The error returned by [`Stack::try_push`]. Holds onto the value that couldn't be pushed so
/// that it isn't lost.
#[derive(Debug, PartialEq, Eq)]
pub struct PushError<T> {
    pub(crate) value: T,
    pub(crate) cause: CapacityOverflow,
}

impl<T> PushError<T> {
    /// Returns the value that failed to be pushed.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns the reason that the push failed.
    pub const fn cause(&self) -> CapacityOverflow {
        self.cause
    }
}

impl<T> Display for PushError<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to push onto the Stack: {}", self.cause)
    }
}

impl<T: Debug> Error for PushError<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

impl<T> Stack<T> {
    /// Creates a new, empty Stack with capacity 0. Memory will be allocated when the first element
    /// is pushed.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let stack: Stack<u8> = Stack::new();
    /// assert!(stack.is_empty());
    /// assert_eq!(stack.cap(), 0);
    /// ```
    pub const fn new() -> Stack<T> {
        Stack {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            _phantom: PhantomData,
        }
    }

    /// Creates a new Stack with capacity exactly equal to `cap`, allowing that many elements to be
    /// pushed without reallocation.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack: Stack<u8> = Stack::with_cap(3);
    /// assert_eq!(stack.cap(), 3);
    /// stack.extend([1, 2, 3]);
    /// assert_eq!(stack.cap(), 3);
    /// ```
    pub fn with_cap(cap: usize) -> Stack<T> {
        let mut stack = Stack::new();
        stack.try_realloc(cap).throw();
        stack
    }

    /// Returns the number of elements in the Stack.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::from([1, 2, 3]);
    /// assert_eq!(stack.len(), 3);
    /// stack.pop();
    /// assert_eq!(stack.len(), 2);
    /// ```
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Stack contains no elements.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::new();
    /// assert!(stack.is_empty());
    /// stack.push('a');
    /// assert!(!stack.is_empty());
    /// stack.pop();
    /// assert!(stack.is_empty());
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Stack. Capacity changes are exact, so after `with_cap`,
    /// `reserve` or `shrink_to_fit` this is precisely the capacity that was required.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack: Stack<u8> = Stack::with_cap(5);
    /// assert_eq!(stack.cap(), 5);
    /// stack.push(1);
    /// stack.shrink_to_fit();
    /// assert_eq!(stack.cap(), 1);
    /// ```
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Pushes `value` onto the top of the Stack, growing the capacity if required.
    ///
    /// # Panics
    /// Panics if the memory layout of the Stack would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::new();
    /// for i in 0..4 {
    ///     stack.push(i);
    /// }
    /// assert_eq!(stack.peek(), Some(&3));
    /// assert_eq!(stack.len(), 4);
    /// ```
    pub fn push(&mut self, value: T) {
        // Only the cause is thrown, so T doesn't need to implement Debug.
        self.try_push(value).map_err(|error| error.cause).throw()
    }

    /// Pushes `value` onto the top of the Stack, returning an [`Err`] containing the value rather
    /// than panicking if the Stack can't grow any further.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::new();
    /// assert!(stack.try_push("☕").is_ok());
    /// assert_eq!(stack.peek(), Some(&"☕"));
    /// ```
    pub fn try_push(&mut self, value: T) -> Result<(), PushError<T>> {
        if self.len == self.cap {
            if let Err(cause) = self.try_grow() {
                debug!("Rejected push onto Stack with {} elements: {}", self.len, cause);
                return Err(PushError { value, cause });
            }
        }

        // SAFETY: The capacity has just been checked or adjusted to fit another element.
        unsafe { self.push_unchecked(value); }
        Ok(())
    }

    /// Pushes `value` onto the top of the Stack, assuming that there is enough capacity to do so.
    ///
    /// # Safety
    /// The caller must ensure that `len < cap`, using [`reserve`](Stack::reserve) or
    /// [`with_cap`](Stack::with_cap). Pushing onto a full Stack with this method is undefined
    /// behavior.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: The caller guarantees that len is within the allocated capacity.
        unsafe { self.ptr.add(self.len).write(value); }
        self.len += 1;
    }

    /// Removes the top element of the Stack and returns it, or [`None`] if the Stack is empty.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::from([1, 34, 18]);
    /// assert_eq!(stack.pop(), Some(18));
    /// assert_eq!(stack.pop(), Some(34));
    /// assert_eq!(stack.pop(), Some(1));
    /// assert_eq!(stack.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before reading, so the value is no longer considered owned by the
            // Stack.
            self.len -= 1;

            // SAFETY: len has just been decremented and refers to the last initialized value.
            // Reading moves the value out, and the Stack will never touch that slot again
            // without writing first.
            Some(unsafe { self.ptr.add(self.len).read() })
        }
    }

    /// Removes the top element of the Stack, returning it with a flag of `true`. If the Stack is
    /// empty, returns the default value of `T` with a flag of `false` instead and leaves the Stack
    /// unchanged.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::from([1, 34, 18]);
    /// assert_eq!(stack.pop_or_default(), (18, true));
    /// assert_eq!(stack.pop_or_default(), (34, true));
    /// assert!(!stack.is_empty());
    /// assert_eq!(stack.pop_or_default(), (1, true));
    /// assert!(stack.is_empty());
    /// assert_eq!(stack.pop_or_default(), (0, false));
    /// ```
    pub fn pop_or_default(&mut self) -> (T, bool)
    where
        T: Default,
    {
        match self.pop() {
            Some(value) => (value, true),
            None => (T::default(), false),
        }
    }

    /// Returns a reference to the top element, if there is one.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::new();
    /// assert_eq!(stack.peek(), None);
    /// stack.push(7);
    /// assert_eq!(stack.peek(), Some(&7));
    /// assert_eq!(stack.len(), 1);
    /// ```
    pub fn peek(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns a mutable reference to the top element, if there is one.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::from([1, 2]);
    /// if let Some(top) = stack.peek_mut() {
    ///     *top *= 10;
    /// }
    /// assert_eq!(stack.pop(), Some(20));
    /// ```
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Drops every element above the first `len`, from the bottom up. Does nothing if the Stack
    /// already has `len` or fewer elements. The capacity is unaffected.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::from(['a', 'b', 'c', 'd']);
    /// stack.truncate(2);
    /// assert_eq!(stack.as_slice(), &['a', 'b']);
    /// ```
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        // SAFETY: len < self.len, so the range [len, self.len) is within the initialized values.
        let tail = unsafe {
            ptr::slice_from_raw_parts_mut(self.ptr.add(len).as_ptr(), self.len - len)
        };

        // Shorten first, so a panicking drop can't lead to a double drop.
        self.len = len;

        // SAFETY: The values in tail are initialized and no longer considered part of the Stack.
        unsafe { ptr::drop_in_place(tail); }
    }

    /// Drops all elements in the Stack. The capacity is unaffected.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::from([1, 2, 3]);
    /// let cap = stack.cap();
    /// stack.clear();
    /// assert!(stack.is_empty());
    /// assert_eq!(stack.cap(), cap);
    /// ```
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Ensures that the Stack has capacity to hold an additional `extra` elements. After invoking
    /// this method, the capacity will be >= len + extra.
    ///
    /// # Panics
    /// Panics if the memory layout of the Stack would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::from([1_u8, 2]);
    /// stack.reserve(8);
    /// assert!(stack.cap() >= 10);
    /// ```
    pub fn reserve(&mut self, extra: usize) {
        self.try_reserve(extra).throw()
    }

    /// Ensures that the Stack has capacity to hold an additional `extra` elements, returning an
    /// [`Err`] instead of panicking on overflow.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack: Stack<u64> = Stack::new();
    /// assert!(stack.try_reserve(usize::MAX).is_err());
    /// assert!(stack.try_reserve(10).is_ok());
    /// assert_eq!(stack.cap(), 10);
    /// ```
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), CapacityOverflow> {
        let new_cap = self.len.checked_add(extra).ok_or(CapacityOverflow)?;

        if new_cap <= self.cap { return Ok(()); }

        self.try_realloc(new_cap).inspect_err(|cause| {
            debug!("Rejected reserve of {} extra elements: {}", extra, cause);
        })
    }

    /// Shrinks the Stack so that its capacity is equal to its length.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack: Stack<char> = Stack::with_cap(10);
    /// stack.extend(['a', 'b']);
    /// stack.shrink_to_fit();
    /// assert_eq!(stack.cap(), 2);
    /// assert_eq!(stack.as_slice(), &['a', 'b']);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        // Shrinking can't overflow because the current capacity is already valid.
        self.try_realloc(self.len).throw();
    }

    /// Returns the elements of the Stack as a slice, ordered from bottom to top.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::new();
    /// stack.push(1);
    /// stack.push(34);
    /// stack.push(18);
    /// assert_eq!(stack.as_slice(), &[1, 34, 18]);
    /// ```
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: The Stack is valid as a slice for len values, which are all initialized. The
        // pointer is nonnull, properly aligned and the range entirely contained within the
        // allocation. The total size is <= isize::MAX as the result of being a valid layout.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the elements of the Stack as a mutable slice, ordered from bottom to top.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: See as_slice. The mutable borrow of self prevents any other access for the
        // lifetime of the slice.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Writes the display form of the Stack to standard output, followed by a newline.
    ///
    /// See the [`Display`] implementation for the format.
    pub fn print_all(&self)
    where
        T: Display,
    {
        println!("{}", self);
    }

    /// Grows the Stack to allow at least one more element to be pushed.
    pub(crate) fn try_grow(&mut self) -> Result<(), CapacityOverflow> {
        let max_cap = Self::max_cap();
        let new_cap = cmp::min(
            cmp::max(self.cap.saturating_mul(GROWTH_FACTOR), MIN_CAP),
            max_cap,
        );

        // We can't grow past the maximum, so any capacity that isn't larger is a failure.
        if new_cap <= self.cap {
            return Err(CapacityOverflow);
        }

        self.try_realloc(new_cap)
    }

    /// Reallocates the underlying buffer to hold exactly `new_cap` elements. `new_cap` must be at
    /// least len.
    pub(crate) fn try_realloc(&mut self, new_cap: usize) -> Result<(), CapacityOverflow> {
        debug_assert!(new_cap >= self.len);

        if new_cap == self.cap {
            return Ok(());
        }

        let new_layout = Self::make_layout(new_cap)?;

        trace!(
            "Reallocating Stack<{}> from capacity {} to {}",
            std::any::type_name::<T>(),
            self.cap,
            new_cap,
        );

        let new_ptr = match (self.cap, new_cap) {
            // Zero-sized types never allocate, the dangling pointer is valid for any number of
            // them.
            _ if size_of::<T>() == 0 => self.ptr,
            (0, _) => {
                // SAFETY: new_cap is non-zero and so is the size of T, so the layout isn't empty.
                let raw_ptr: *mut T = unsafe { alloc::alloc(new_layout).cast() };

                NonNull::new(raw_ptr).unwrap_or_else(|| alloc::handle_alloc_error(new_layout))
            },
            (_, 0) => {
                // SAFETY: The buffer was allocated with the current layout in the global
                // allocator, and holds no initialized values since len <= new_cap == 0.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), self.current_layout()); }
                NonNull::dangling()
            },
            (_, _) => {
                // SAFETY: The same layout and allocator are used for the allocation, and the new
                // layout size is > 0 and <= isize::MAX.
                let raw_ptr: *mut T = unsafe {
                    alloc::realloc(
                        self.ptr.as_ptr().cast(),
                        self.current_layout(),
                        new_layout.size(),
                    ).cast()
                };

                NonNull::new(raw_ptr).unwrap_or_else(|| alloc::handle_alloc_error(new_layout))
            },
        };

        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    /// A helper function to create a [`Layout`] for `cap` elements of type `T`.
    pub(crate) fn make_layout(cap: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(cap).map_err(|_| CapacityOverflow)
    }

    /// The layout of the currently allocated buffer.
    pub(crate) const fn current_layout(&self) -> Layout {
        // SAFETY: The current capacity was accepted by Layout::array when it was allocated, so
        // the size can't overflow and the alignment is that of T.
        unsafe {
            Layout::from_size_align_unchecked(self.cap * size_of::<T>(), align_of::<T>())
        }
    }

    /// The largest capacity with a valid layout.
    pub(crate) const fn max_cap() -> usize {
        match size_of::<T>() {
            0 => usize::MAX,
            size => MAX_SIZE / size,
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        // Drop all initialized values in place, bottom to top.
        // SAFETY: All values below len are initialized and will never be used again.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
        }

        let layout = self.current_layout();
        if layout.size() != 0 {
            // SAFETY: ptr is always allocated in the global allocator and layout is the same as
            // when allocated. Zero-sized layouts aren't allocated and are guarded against
            // deallocation.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout); }
        }
    }
}

impl<T> Deref for Stack<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> AsRef<[T]> for Stack<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Borrow<[T]> for Stack<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Stack<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Stack::new();
        stack.extend(iter);
        stack
    }
}

impl<T, const N: usize> From<[T; N]> for Stack<T> {
    /// Creates a Stack by pushing each element of the array in order, so the last element is on
    /// top.
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for Stack<T> {
    fn from(value: Vec<T>) -> Self {
        let mut value = ManuallyDrop::new(value);
        let (len, cap) = (value.len(), value.capacity());

        Stack {
            // SAFETY: Vec's pointer is never null, even when nothing is allocated.
            ptr: unsafe { NonNull::new_unchecked(value.as_mut_ptr()) },
            // A Vec of zero-sized types reports a capacity of usize::MAX, which is still valid.
            cap,
            len,
            _phantom: PhantomData,
        }
    }
}

impl<T> From<Stack<T>> for Vec<T> {
    fn from(value: Stack<T>) -> Self {
        let value = ManuallyDrop::new(value);

        // SAFETY: The buffer was allocated by the global allocator with Layout::array::<T>(cap),
        // which is the layout Vec uses, and the first len values are initialized. For zero-sized
        // types, the pointer is dangling and Vec won't deallocate it.
        unsafe { Vec::from_raw_parts(value.ptr.as_ptr(), value.len, value.cap) }
    }
}

// SAFETY: Stacks uniquely own their elements, so sending a Stack only sends the Ts.
unsafe impl<T: Send> Send for Stack<T> {}
// SAFETY: Stack's safe API obeys all rules of the borrow checker, so no interior mutability
// occurs. This means that Stack<T> can safely implement Sync when T: Sync.
unsafe impl<T: Sync> Sync for Stack<T> {}

impl<T: Clone> Clone for Stack<T> {
    fn clone(&self) -> Self {
        let mut stack = Stack::with_cap(self.len);

        for value in self.iter() {
            // SAFETY: stack has been created with enough capacity for every element of self.
            unsafe { stack.push_unchecked(value.clone()); }
        }

        stack
    }
}

impl<T: PartialEq> PartialEq for Stack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Stack<T> {}

impl<T: Hash> Hash for Stack<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: Debug> Debug for Stack<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("contents", &self.as_slice())
            .field("len", &self.len)
            .field("cap", &self.cap)
            .finish()
    }
}

impl<T: Display> Display for Stack<T> {
    /// Lists the elements from bottom to top, separated by spaces.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// assert_eq!(Stack::from([1, 34, 18]).to_string(), "Stack Elements: 1 34 18");
    /// assert_eq!(Stack::<u8>::new().to_string(), "The stack is empty");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.split_first() else {
            return write!(f, "The stack is empty");
        };

        write!(f, "Stack Elements: {}", first)?;
        for item in rest {
            write!(f, " {}", item)?;
        }
        Ok(())
    }
}
