use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use super::Stack;
#[doc(inline)]
pub use std::slice::{Iter, IterMut};

impl<T> Stack<T> {
    /// Returns an iterator over mutable references to the elements, from bottom to top.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Removes every element from the Stack, returning an iterator that yields them in the order
    /// they would be popped (top to bottom). The capacity of the Stack is unaffected.
    ///
    /// Elements which aren't yielded before the iterator is dropped are dropped with it. If the
    /// iterator is leaked, so are the remaining elements, but the Stack is still left empty.
    ///
    /// # Examples
    /// ```
    /// # use stack_lib::collections::Stack;
    /// let mut stack = Stack::from([1, 2, 3]);
    /// let popped: Vec<_> = stack.drain().collect();
    /// assert_eq!(popped, [3, 2, 1]);
    /// assert!(stack.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        let back = self.len;
        // The Stack gives up ownership of all elements up front, so leaking the Drain can't lead
        // to a double drop.
        self.len = 0;

        Drain {
            ptr: self.ptr,
            front: 0,
            back,
            _phantom: PhantomData,
        }
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Stack<T> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for Stack<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    /// Creates an owned iterator over the elements from bottom to top. Use
    /// [`rev`](Iterator::rev) to take them in the order they would be popped.
    fn into_iter(mut self) -> Self::IntoIter {
        let back = self.len;
        // The buffer stays with the inner Stack for deallocation, but the elements belong to the
        // iterator now.
        self.len = 0;

        IntoIter {
            buf: self,
            front: 0,
            back,
        }
    }
}

/// An owned iterator over the elements of a [`Stack`], from bottom to top.
pub struct IntoIter<T> {
    // Holds no elements (len 0), only the allocation. The live elements are in [front, back).
    pub(crate) buf: Stack<T>,
    pub(crate) front: usize,
    pub(crate) back: usize,
}

impl<T> IntoIter<T> {
    /// Returns the remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: All values in [front, back) are initialized and owned by the iterator.
        unsafe {
            std::slice::from_raw_parts(self.buf.ptr.add(self.front).as_ptr(), self.len())
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        // SAFETY: front < back, so it refers to an initialized value that hasn't been yielded.
        let value = unsafe { self.buf.ptr.add(self.front).read() };
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        // SAFETY: back has just been decremented and still refers to an unyielded value.
        Some(unsafe { self.buf.ptr.add(self.back).read() })
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.back - self.front
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: The values in [front, back) are initialized and haven't been yielded.
        unsafe { drop_range(self.buf.ptr, self.front, self.back); }
        // buf deallocates itself afterwards, with no elements left to drop.
    }
}

/// A draining iterator over the elements of a [`Stack`], in pop order. See [`Stack::drain`].
pub struct Drain<'a, T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) front: usize,
    pub(crate) back: usize,
    pub(crate) _phantom: PhantomData<&'a mut Stack<T>>,
}

impl<'a, T> Iterator for Drain<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        // SAFETY: back has just been decremented and refers to the highest unyielded value.
        Some(unsafe { self.ptr.add(self.back).read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<'a, T> DoubleEndedIterator for Drain<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        // SAFETY: front < back, so it refers to the lowest unyielded value.
        let value = unsafe { self.ptr.add(self.front).read() };
        self.front += 1;
        Some(value)
    }
}

impl<'a, T> FusedIterator for Drain<'a, T> {}

impl<'a, T> ExactSizeIterator for Drain<'a, T> {
    fn len(&self) -> usize {
        self.back - self.front
    }
}

impl<'a, T> Drop for Drain<'a, T> {
    fn drop(&mut self) {
        // SAFETY: The values in [front, back) are initialized, unyielded and no longer counted by
        // the Stack.
        unsafe { drop_range(self.ptr, self.front, self.back); }
    }
}

/// Drops the values in `[front, back)` in place.
///
/// # Safety
/// All values in the range must be initialized, within the allocation behind `ptr` and never used
/// again.
unsafe fn drop_range<T>(ptr: NonNull<T>, front: usize, back: usize) {
    // SAFETY: The caller guarantees that the range is initialized and in bounds.
    unsafe {
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.add(front).as_ptr(), back - front));
    }
}
