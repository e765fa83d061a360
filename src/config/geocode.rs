use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::services::geocode::GeocodeMode;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct GeocodeConfig
{
	/// Which kind of query `/api/geocode` accepts.
	pub mode: GeocodeMode,

	/// Nominatim's `/search` endpoint.
	#[serde(default = "GeocodeConfig::default_nominatim_url")]
	pub nominatim_url: Url,

	/// Value of the `Accept-Language` header sent to Nominatim.
	///
	/// This controls the language of the returned city names.
	#[serde(default = "GeocodeConfig::default_accept_language")]
	pub accept_language: Box<str>,

	/// Upper bound on the upstream call, in seconds.
	#[serde(
		default = "GeocodeConfig::default_timeout",
		deserialize_with = "super::deserialize_duration"
	)]
	pub timeout: Duration,
}

impl GeocodeConfig
{
	fn default_nominatim_url() -> Url
	{
		Url::parse("https://nominatim.openstreetmap.org/search")
			.unwrap_or_else(|err| panic!("failed to parse hard-coded URL: {err}"))
	}

	fn default_accept_language() -> Box<str>
	{
		Box::from("fr")
	}

	fn default_timeout() -> Duration
	{
		Duration::from_secs(8)
	}
}

impl Default for GeocodeConfig
{
	fn default() -> Self
	{
		Self {
			mode: GeocodeMode::default(),
			nominatim_url: Self::default_nominatim_url(),
			accept_language: Self::default_accept_language(),
			timeout: Self::default_timeout(),
		}
	}
}
