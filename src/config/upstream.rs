use serde::Deserialize;

/// Settings shared by every outbound HTTP call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct UpstreamConfig
{
	/// `User-Agent` sent to every upstream.
	///
	/// Nominatim and the OSM static map renderer both require an agent that
	/// identifies the application and a way to contact its operators.
	#[serde(default = "UpstreamConfig::default_user_agent")]
	pub user_agent: Box<str>,
}

impl UpstreamConfig
{
	fn default_user_agent() -> Box<str>
	{
		Box::from("LOTAC/1.0 (+https://lotac.vercel.app; contact: contact@lotac.vercel.app)")
	}
}

impl Default for UpstreamConfig
{
	fn default() -> Self
	{
		Self { user_agent: Self::default_user_agent() }
	}
}
