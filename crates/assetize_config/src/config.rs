//! Layered configuration for a migration run.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (`assetize.toml` shipped with the crate)
//! 2. `~/.config/assetize/assetize.toml`
//! 3. `./assetize.toml`
//! 4. `ASSETIZE_<SECTION>__<KEY>` environment variables
//! 5. The action-style variables (`ASSETS_REPO`, `DRY_RUN`, ...)

use assetize_core::{Committer, DestinationNamespace};
use assetize_error::{AssetizeError, AssetizeResult, ConfigError};
use assetize_media::{
    CompressionSettings, Compressor, FormatNormalizer, MediaProcessor, ResizeBounds,
};
use assetize_storage::RetryPolicy;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../assetize.toml");

/// Where published files go.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DestinationConfig {
    /// Owner of the destination repository
    pub owner: String,
    /// Name of the destination repository
    pub repo: String,
    /// Directory inside the repository
    pub directory: String,
    /// Public URL prefix; GitHub Pages of the repository when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// The issue whose comments are migrated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SourceConfig {
    /// `owner/repo` holding the issue
    pub repository: String,
    /// Issue number
    pub issue_number: u64,
    /// Delete the comments once the body is replaced
    pub delete_after: bool,
}

/// Media transforms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MediaConfig {
    /// Convert WebP to JPEG
    pub normalize: bool,
    /// Run the compressor
    pub compress: bool,
    /// Byte budget for compression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_threshold: Option<u64>,
    /// Maximum width before compression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_width: Option<u32>,
    /// Maximum height before compression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_height: Option<u32>,
}

/// Publishing behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Write locally instead of committing
    pub dry_run: bool,
    /// Local directory receiving dry-run writes
    pub dry_run_directory: String,
    /// Committer and author name
    pub committer_name: String,
    /// Committer and author email
    pub committer_email: String,
    /// Upload retry policy
    pub retry: RetryPolicy,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            dry_run_directory: ".".to_string(),
            committer_name: String::new(),
            committer_email: String::new(),
            retry: RetryPolicy::default(),
        }
    }
}

/// GitHub access.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Name of the environment variable holding the token
    pub token_var: String,
    /// REST API base URL
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token_var: "GITHUB_TOKEN".to_string(),
            api_url: "https://api.github.com".to_string(),
        }
    }
}

/// Complete configuration of a run.
///
/// # Example
///
/// ```
/// use assetize_config::AssetizeConfig;
/// use std::collections::HashMap;
///
/// let env: HashMap<String, String> = [
///     ("ASSETS_REPO", "octo/assets"),
///     ("ASSETS_DIRECTORY", "img"),
///     ("DRY_RUN", "true"),
/// ]
/// .into_iter()
/// .map(|(k, v)| (k.to_string(), v.to_string()))
/// .collect();
///
/// let config = AssetizeConfig::from_sources(None, &env).unwrap();
/// assert_eq!(config.destination.owner, "octo");
/// assert!(config.publish.dry_run);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AssetizeConfig {
    /// Destination repository
    pub destination: DestinationConfig,
    /// Source issue
    pub source: SourceConfig,
    /// Media transforms
    pub media: MediaConfig,
    /// Publishing
    pub publish: PublishConfig,
    /// GitHub access
    pub github: GitHubConfig,
}

/// Action-style variables that hold plain strings.
const LEGACY_STRINGS: &[(&str, &str)] = &[
    ("ASSETS_DIRECTORY", "destination.directory"),
    ("ISSUE_REPO", "source.repository"),
    ("COMMITTER_NAME", "publish.committer_name"),
    ("COMMITTER_EMAIL", "publish.committer_email"),
    ("PERSONAL_ACCESS_TOKEN", "github.token_var"),
];

/// Action-style flags; only the exact value `true` enables them.
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("DRY_RUN", "publish.dry_run"),
    ("DELETE_AFTER", "source.delete_after"),
    ("WITH_COMPATIBLE_FORMAT", "media.normalize"),
    ("WITH_ASSETS_COMPRESSION", "media.compress"),
];

/// Action-style numeric variables.
const LEGACY_NUMBERS: &[(&str, &str)] = &[
    ("ISSUE_NUMBER", "source.issue_number"),
    ("COMPRESSION_THRESHOLD", "media.compression_threshold"),
    ("RESIZE_WIDTH", "media.resize_width"),
    ("RESIZE_HEIGHT", "media.resize_height"),
];

fn config_error(message: String) -> AssetizeError {
    AssetizeError::from(ConfigError::new(message))
}

impl AssetizeConfig {
    /// Load configuration from every source, reading the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed or a variable holds an
    /// invalid value.
    #[instrument]
    pub fn load() -> AssetizeResult<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        let home = dirs::home_dir().map(|home| home.join(".config/assetize/assetize.toml"));
        Self::from_sources(home.as_deref(), &env)
    }

    /// Load configuration from the bundled defaults, an optional home config
    /// file, `./assetize.toml`, and the given environment.
    #[instrument(skip(env), fields(vars = env.len()))]
    pub fn from_sources(
        home_config: Option<&std::path::Path>,
        env: &HashMap<String, String>,
    ) -> AssetizeResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(path) = home_config {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(File::with_name("assetize").required(false));
        builder = builder.add_source(
            Environment::with_prefix("ASSETIZE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        Self::build(Self::apply_legacy(builder, env)?)
    }

    /// Load configuration from a single file, without other layers.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> AssetizeResult<Self> {
        debug!("Loading configuration from file");
        Self::build(Config::builder().add_source(File::from(path.as_ref())))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> AssetizeResult<Self> {
        builder
            .build()
            .map_err(|e| config_error(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| config_error(format!("Failed to parse configuration: {}", e)))
    }

    fn apply_legacy(
        mut builder: ConfigBuilder<DefaultState>,
        env: &HashMap<String, String>,
    ) -> AssetizeResult<ConfigBuilder<DefaultState>> {
        let set = |builder: ConfigBuilder<DefaultState>, key: &str, value: config::Value| {
            builder
                .set_override(key, value)
                .map_err(|e| config_error(format!("Failed to set {}: {}", key, e)))
        };
        // Unset action inputs arrive as empty strings.
        let lookup = |name: &str| {
            env.get(name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        if let Some(slug) = lookup("ASSETS_REPO") {
            let (owner, repo) = slug
                .split_once('/')
                .filter(|(o, r)| !o.is_empty() && !r.is_empty() && !r.contains('/'))
                .ok_or_else(|| {
                    config_error(format!("ASSETS_REPO must be owner/repo, got {}", slug))
                })?;
            builder = set(builder, "destination.owner", owner.into())?;
            builder = set(builder, "destination.repo", repo.into())?;
        }

        for &(name, key) in LEGACY_STRINGS {
            if let Some(value) = lookup(name) {
                builder = set(builder, key, value.into())?;
            }
        }

        for &(name, key) in LEGACY_FLAGS {
            if let Some(value) = lookup(name) {
                builder = set(builder, key, (value == "true").into())?;
            }
        }

        for &(name, key) in LEGACY_NUMBERS {
            if let Some(value) = lookup(name) {
                let number: u64 = value.parse().map_err(|_| {
                    config_error(format!("{} must be a non-negative integer, got {}", name, value))
                })?;
                builder = set(builder, key, number.into())?;
            }
        }

        Ok(builder)
    }

    /// Check that a run can start with this configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first problem found.
    pub fn validate(&self) -> AssetizeResult<()> {
        let destination = &self.destination;
        for (field, value) in [
            ("destination.owner", &destination.owner),
            ("destination.repo", &destination.repo),
            ("destination.directory", &destination.directory),
        ] {
            if value.trim().is_empty() {
                return Err(config_error(format!("{} is not set", field)));
            }
        }

        if self.media.compress && self.media.compression_threshold.is_none() {
            return Err(config_error(
                "media.compress is enabled but media.compression_threshold is not set"
                    .to_string(),
            ));
        }

        if !self.publish.dry_run {
            for (field, value) in [
                ("publish.committer_name", &self.publish.committer_name),
                ("publish.committer_email", &self.publish.committer_email),
            ] {
                if value.trim().is_empty() {
                    return Err(config_error(format!("{} is not set", field)));
                }
            }
        }

        Ok(())
    }

    /// Check that the source issue is configured.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the repository or issue number is missing.
    pub fn validate_source(&self) -> AssetizeResult<()> {
        if self.source.repository.trim().is_empty() {
            return Err(config_error("source.repository is not set".to_string()));
        }
        if self.source.issue_number == 0 {
            return Err(config_error("source.issue_number is not set".to_string()));
        }
        Ok(())
    }

    /// Destination namespace.
    pub fn namespace(&self) -> DestinationNamespace {
        let destination = &self.destination;
        let namespace = DestinationNamespace::new(
            destination.owner.clone(),
            destination.repo.clone(),
            &destination.directory,
        );
        match &destination.base_url {
            Some(base_url) if !base_url.trim().is_empty() => namespace.with_base_url(base_url),
            _ => namespace,
        }
    }

    /// Committer and author identity.
    pub fn committer(&self) -> Committer {
        Committer::new(
            self.publish.committer_name.clone(),
            self.publish.committer_email.clone(),
        )
    }

    /// Compression settings; disabled when no threshold is configured.
    pub fn compression(&self) -> CompressionSettings {
        let media = &self.media;
        match media.compression_threshold {
            Some(threshold) if media.compress => {
                CompressionSettings::with_threshold(usize::try_from(threshold).unwrap_or(usize::MAX))
                    .with_resize(ResizeBounds::new(media.resize_width, media.resize_height))
            }
            _ => CompressionSettings::default(),
        }
    }

    /// Media processor built from the `[media]` section.
    pub fn processor(&self) -> MediaProcessor {
        MediaProcessor::new(
            FormatNormalizer::new(self.media.normalize),
            Compressor::new(self.compression()),
        )
    }

    /// Upload retry policy.
    pub fn retry(&self) -> RetryPolicy {
        self.publish.retry
    }
}
