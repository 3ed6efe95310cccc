//! A generic last-in-first-out container, written from scratch on top of the global allocator.
//!
//! # Purpose
//! [`Stack<T>`](collections::Stack) holds elements of one type `T`, fixed at compile time, and
//! gives access to them in last-in-first-out order: push onto the top, pop off the top, check
//! whether anything is left and enumerate everything from the bottom up.
//!
//! # Error Handling
//! Popping an empty Stack isn't treated as an error at all. It is an expected outcome, reported
//! through the return value: [`pop`](collections::Stack::pop) returns an [`Option`], and
//! [`pop_or_default`](collections::Stack::pop_or_default) returns the default value of `T` with a
//! `false` flag.
//!
//! The only real failure is a capacity overflow, where the memory layout of a Stack would exceed
//! [`isize::MAX`] bytes. Methods like [`push`](collections::Stack::push) panic in this case,
//! because nobody wants to handle an error on every push for a condition that can't realistically
//! happen. Each of them has a `try_` counterpart returning a [`Result`] for when it matters. The
//! errors themselves are small structs implementing [`Error`](std::error::Error).
//!
//! # Logging
//! Reallocations are logged at the trace level and rejected capacity requests at the debug level,
//! through the [`log`] facade. Nothing is logged on the ordinary push and pop paths.
//!
//! # Features
//! - `stack`: [`Stack`](collections::Stack) and its iterators.
//! - `sync`: [`SyncStack`](collections::SyncStack), a Stack behind a
//!   [`parking_lot`](https://docs.rs/parking_lot) mutex for sharing between threads.
//!
//! Both are enabled by default, through `collections-all`.

// #![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;
