//! Text handling for the assetize pipeline.
//!
//! - [`ReferenceExtractor`] finds embedded media references in comment text.
//! - [`render`] produces the migration summary posted back to the issue.
//! - [`rewrite`] points the references of a document at their published URLs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extract;
mod render;

pub use extract::{ReferenceExtractor, ReferenceMatch};
pub use render::{render, rewrite};
