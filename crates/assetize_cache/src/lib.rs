//! Per-run fetch cache.
//!
//! Guarantees at most one network fetch per unique reference within a run,
//! even when the same reference is requested concurrently.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;

pub use cache::{FetchCache, FetchOutcome};
