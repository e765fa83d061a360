use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct StaticMapConfig
{
	/// Google Static Maps API key.
	///
	/// When set, Google is tried before the free providers. The
	/// `GOOGLE_MAPS_KEY` environment variable overrides this value.
	pub google_maps_key: Option<Box<str>>,

	/// Google's Static Maps endpoint.
	#[serde(default = "StaticMapConfig::default_google_url")]
	pub google_url: Url,

	/// The OpenStreetMap static map renderer.
	#[serde(default = "StaticMapConfig::default_osm_url")]
	pub osm_url: Url,

	/// The images.weserv.nl image proxy, used to reach the OSM renderer when
	/// it is rate-limiting or blocking us.
	#[serde(default = "StaticMapConfig::default_weserv_url")]
	pub weserv_url: Url,

	/// Upper bound on each provider call, in seconds.
	#[serde(
		default = "StaticMapConfig::default_timeout",
		deserialize_with = "super::deserialize_duration"
	)]
	pub timeout: Duration,
}

impl StaticMapConfig
{
	/// Returns the Google API key, if one is configured.
	///
	/// Empty values count as "not configured".
	pub fn google_maps_key(&self) -> Option<&str>
	{
		self.google_maps_key
			.as_deref()
			.map(str::trim)
			.filter(|key| !key.is_empty())
	}

	fn default_google_url() -> Url
	{
		parse_static_url("https://maps.googleapis.com/maps/api/staticmap")
	}

	fn default_osm_url() -> Url
	{
		parse_static_url("https://staticmap.openstreetmap.de/staticmap.php")
	}

	fn default_weserv_url() -> Url
	{
		parse_static_url("https://images.weserv.nl/")
	}

	fn default_timeout() -> Duration
	{
		Duration::from_secs(8)
	}
}

impl Default for StaticMapConfig
{
	fn default() -> Self
	{
		Self {
			google_maps_key: None,
			google_url: Self::default_google_url(),
			osm_url: Self::default_osm_url(),
			weserv_url: Self::default_weserv_url(),
			timeout: Self::default_timeout(),
		}
	}
}

impl fmt::Debug for StaticMapConfig
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("StaticMapConfig")
			.field("google_maps_key", &self.google_maps_key().map(|_| "<redacted>"))
			.field("google_url", &format_args!("{:?}", self.google_url.as_str()))
			.field("osm_url", &format_args!("{:?}", self.osm_url.as_str()))
			.field("weserv_url", &format_args!("{:?}", self.weserv_url.as_str()))
			.field("timeout", &self.timeout)
			.finish()
	}
}

fn parse_static_url(url: &str) -> Url
{
	Url::parse(url).unwrap_or_else(|err| panic!("failed to parse hard-coded URL: {err}"))
}
