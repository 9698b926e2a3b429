//! Configuration for assetize.
//!
//! Settings come from TOML files and the environment, merged by the `config`
//! crate. See [`AssetizeConfig::load`] for the precedence order.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::{
    AssetizeConfig, DestinationConfig, GitHubConfig, MediaConfig, PublishConfig, SourceConfig,
};
