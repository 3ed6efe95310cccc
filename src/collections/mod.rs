//! Last-in-first-out collection types.
//!
//! # Method
//! [`Stack`] manages its own allocation rather than wrapping [`Vec`], and implements
//! [`Deref<Target = [T]>`](std::ops::Deref) so that read-only slice functionality, including
//! bottom-to-top iteration, doesn't need to be rewritten. [`SyncStack`] adds a lock on top for
//! sharing between threads.

#[cfg(feature = "stack")]
pub mod stack;
#[cfg(feature = "sync")]
pub mod sync;

#[cfg(feature = "stack")]
#[doc(inline)]
pub use stack::Stack;
#[cfg(feature = "sync")]
#[doc(inline)]
pub use sync::SyncStack;
