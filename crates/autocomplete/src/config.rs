//! Widget configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! debounce-ms = 300
//! min-query-chars = 3
//! country = "us"
//! fallback-country = "US"
//! detail-fields = ["formatted_address", "address_components", "geometry"]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use locus_places::{DEFAULT_DETAIL_FIELDS, DEFAULT_FALLBACK_COUNTRY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quiet period before a lookup is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Minimum trimmed query length that triggers a lookup.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 3;

/// Country filter applied to every lookup.
pub const DEFAULT_COUNTRY: &str = "us";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A value parsed but is out of range.
	#[error("invalid configuration: {0}")]
	Invalid(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Tunables for one autocomplete widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AutocompleteConfig {
	/// Quiet period in milliseconds.
	pub debounce_ms: u64,
	/// Minimum trimmed characters before looking anything up.
	pub min_query_chars: usize,
	/// Country filter sent with each lookup.
	pub country: String,
	/// Country reported when a resolved place has none.
	pub fallback_country: String,
	/// Fields requested from detail fetches.
	pub detail_fields: Vec<String>,
}

impl Default for AutocompleteConfig {
	fn default() -> Self {
		Self {
			debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
			min_query_chars: DEFAULT_MIN_QUERY_CHARS,
			country: DEFAULT_COUNTRY.to_string(),
			fallback_country: DEFAULT_FALLBACK_COUNTRY.to_string(),
			detail_fields: DEFAULT_DETAIL_FIELDS.iter().map(|f| f.to_string()).collect(),
		}
	}
}

impl AutocompleteConfig {
	/// Quiet period as a [`Duration`].
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()
	}

	/// Reads, parses, and validates a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	fn validate(self) -> Result<Self> {
		if self.min_query_chars == 0 {
			return Err(ConfigError::Invalid("min-query-chars must be at least 1".into()));
		}
		if self.country.trim().is_empty() {
			return Err(ConfigError::Invalid("country must not be empty".into()));
		}
		Ok(self)
	}
}
