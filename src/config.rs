//! Pipeline configuration.
//!
//! One immutable [`Config`] record carries every knob the pipeline reads,
//! assembled in `main` from defaults, an optional TOML file, and CLI
//! flags; the pipeline itself never consults the environment. A missing
//! config file yields the built-in defaults; unknown keys are accepted
//! with a logged warning.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds the maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// The configured site base URL does not parse as an absolute URL.
    #[error("Invalid site base URL '{url}': {source}")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },

    /// The feed's self link could not be resolved against the base URL.
    #[error("Cannot resolve feed self link for output '{0}'")]
    SelfLink(String),
}

// ============================================================================
// Configuration
// ============================================================================

/// Immutable pipeline configuration.
///
/// All fields use `#[serde(default)]` so a TOML file can specify any
/// subset of keys; missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the JSON feed-data file to read.
    pub input: PathBuf,

    /// Path of the RSS XML file to write.
    pub output: PathBuf,

    /// Base URL of the published site; the channel `<link>` and the base
    /// the self link is resolved against.
    pub site_url: String,

    /// Channel title.
    pub feed_title: String,

    /// Channel description.
    pub feed_description: String,

    /// Channel language code.
    pub feed_language: String,

    /// Channel time-to-live in minutes.
    pub ttl_minutes: u32,

    /// Maximum number of items in the generated feed.
    pub max_items: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("./feed-data.json"),
            output: PathBuf::from("./feed.xml"),
            site_url: "https://example.org/".to_string(),
            feed_title: "Planet Feed".to_string(),
            feed_description: "Latest posts from around the community".to_string(),
            feed_language: "en".to_string(),
            ttl_minutes: 60,
            max_items: 100,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as a warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse as a raw table first to warn about probable typos.
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "input",
                "output",
                "site_url",
                "feed_title",
                "feed_description",
                "feed_language",
                "ttl_minutes",
                "max_items",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Resolves the feed's self-referencing URL: the output file's base
    /// name joined onto the site base URL (with a trailing slash ensured,
    /// so the last path segment of the base is kept). An output whose
    /// name does not end in `.xml` publishes as `feed.xml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BaseUrl`] when `site_url` does not parse,
    /// and [`ConfigError::SelfLink`] when the output name cannot be
    /// joined onto it. Both are fatal configuration errors; a feed
    /// without a valid self link is never silently published.
    pub fn self_link(&self) -> Result<Url, ConfigError> {
        let mut base = self.site_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|source| ConfigError::BaseUrl {
            url: self.site_url.clone(),
            source,
        })?;

        let name = if self.output.extension().is_some_and(|ext| ext == "xml") {
            self.output
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| ConfigError::SelfLink(self.output.display().to_string()))?
        } else {
            "feed.xml"
        };

        base.join(name)
            .map_err(|_| ConfigError::SelfLink(self.output.display().to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
