//! Core data types for the assetize attachment migration pipeline.
//!
//! Every stage of the pipeline passes these values by value: a transform
//! returns a new [`Payload`] rather than mutating one in place.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod file_type;
mod namespace;
mod payload;
mod published;
mod reference;

pub use file_type::FileType;
pub use namespace::{Committer, DestinationNamespace};
pub use payload::Payload;
pub use published::{PublishedObject, ReplacementMapping};
pub use reference::Reference;
