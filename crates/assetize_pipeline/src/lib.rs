//! Attachment migration for assetize.
//!
//! A [`MigrationPipeline`] takes a document, finds every embedded image or
//! attachment reference, and moves each unique URL into the destination
//! namespace exactly once per run:
//!
//! 1. fetch through a [`Fetcher`]
//! 2. look for an earlier publication of the same URL
//! 3. normalize and compress on the blocking pool
//! 4. publish under a content-addressed path
//!
//! The result carries a rendered table of the migrated files and the input
//! text rewritten to point at the published URLs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fetch;
mod pipeline;

pub use fetch::{Fetcher, HttpFetcher, TOKEN_HOST};
pub use pipeline::{MigrationOutcome, MigrationPipeline};
