//! Service configuration.
//!
//! This is loaded from a TOML file on startup. Every section has sensible
//! defaults, so an empty file (or no file at all) is a valid configuration.
//! See `lotac-api.example.toml` in the root of the repository.

use std::path::Path;
use std::time::Duration;
use std::{env, fs, io};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

mod geocode;
mod http;
mod runtime;
mod staticmap;
mod tracing;
mod upstream;

pub use self::geocode::GeocodeConfig;
pub use self::http::HttpConfig;
pub use self::runtime::RuntimeConfig;
pub use self::staticmap::StaticMapConfig;
pub use self::tracing::TracingConfig;
pub use self::upstream::UpstreamConfig;

/// Environment variable holding the Google Static Maps API key.
///
/// Takes precedence over `staticmap.google-maps-key`.
pub const GOOGLE_MAPS_KEY_VAR: &str = "GOOGLE_MAPS_KEY";

/// The global configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config
{
	pub runtime: RuntimeConfig,
	pub http: HttpConfig,
	pub tracing: TracingConfig,
	pub upstream: UpstreamConfig,
	pub geocode: GeocodeConfig,
	pub staticmap: StaticMapConfig,
}

/// Errors that can occur while loading the configuration file.
#[derive(Debug, Error)]
pub enum LoadFromFileError
{
	/// The file could not be read.
	#[error("failed to read configuration file at {path:?}: {source}")]
	Read
	{
		path: Box<Path>,

		#[source]
		source: io::Error,
	},

	/// The file is not valid TOML, or does not match the expected shape.
	#[error("failed to parse configuration file: {0}")]
	Parse(#[from] toml::de::Error),
}

impl Config
{
	/// Reads and parses the configuration file at `path`.
	pub fn load_from_file(path: &Path) -> Result<Self, LoadFromFileError>
	{
		let file = fs::read_to_string(path)
			.map_err(|source| LoadFromFileError::Read { path: Box::from(path), source })?;

		Self::parse(&file)
	}

	/// Parses a configuration from TOML.
	pub fn parse(toml: &str) -> Result<Self, LoadFromFileError>
	{
		toml::from_str(toml).map_err(LoadFromFileError::Parse)
	}

	/// Applies overrides coming from environment variables.
	pub fn apply_environment(&mut self)
	{
		if let Ok(key) = env::var(GOOGLE_MAPS_KEY_VAR) {
			self.staticmap.google_maps_key = Some(key.into_boxed_str());
		}
	}
}

/// Deserializes a [`Duration`] from a (possibly fractional) number of
/// seconds.
fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
	D: Deserializer<'de>,
{
	let secs = f64::deserialize(deserializer)?;

	Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}
