//! A module containing [`Stack`] and associated types.
//!
//! Borrowed iteration uses [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from
//! [`std::slice`], going from the bottom of the Stack to the top. Owned iteration is provided by
//! [`IntoIter`] (bottom to top) and [`Drain`] (top to bottom, emptying the Stack).
//!
//! [`Stack`] is also re-exported under the parent module.

mod iter;
mod stack;
mod tests;

pub use iter::*;
pub use stack::*;
