// src/schedule/mod.rs

//! Date edits on task values.
//!
//! These are the only operations in the crate that produce new task dates;
//! everything else only reads them.

pub mod mutation;

pub use mutation::{resize_due, resize_start, shift, validate};
