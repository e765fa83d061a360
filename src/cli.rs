//! CLI argument handling.

use std::net::IpAddr;
use std::path::Path;

use clap::Parser;

use crate::config::{Config, LoadFromFileError};

/// The configuration file we look for when `--config` is not specified.
const DEFAULT_CONFIG_PATH: &str = "./lotac-api.toml";

/// This is the HTTP server serving the LOTAC API.
///
/// It proxies geocoding and static map requests for the LOTAC itinerary app.
#[derive(Debug, Parser)]
pub(crate) struct Args
{
	/// Path to the configuration file.
	///
	/// Defaults to `./lotac-api.toml` if that file exists, and to the
	/// built-in defaults otherwise.
	#[arg(long = "config")]
	pub config_path: Option<Box<Path>>,

	/// The IP address to listen on.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long)]
	pub ip: Option<IpAddr>,

	/// The port to listen on.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long)]
	pub port: Option<u16>,
}

impl Args
{
	/// Loads the configuration file these arguments point at.
	///
	/// An explicitly passed `--config` must exist; the default path is
	/// optional.
	pub(crate) fn load_config(&self) -> Result<Config, LoadFromFileError>
	{
		if let Some(path) = self.config_path.as_deref() {
			return Config::load_from_file(path);
		}

		let default_path = Path::new(DEFAULT_CONFIG_PATH);

		if default_path.exists() {
			Config::load_from_file(default_path)
		} else {
			Ok(Config::default())
		}
	}

	/// Applies any relevant config overrides specified as CLI flags in the
	/// given `config` object.
	pub(crate) fn apply_to_config(&self, config: &mut Config)
	{
		if let Some(ip) = self.ip {
			config.http.ip = ip;
		}

		if let Some(port) = self.port {
			config.http.port = port;
		}
	}
}
