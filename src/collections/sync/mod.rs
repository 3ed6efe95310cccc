//! Thread-safe collection types. Currently just [`SyncStack`], a [`Stack`](super::Stack) behind a
//! single mutex.

mod sync_stack;

pub use sync_stack::*;
