use url::Url;

use super::WorkerConfig;

/// Which caching strategy applies to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route
{
	/// Same-origin app shell (root document, manifest, icons).
	///
	/// Cache-first against the static partition.
	Shell,

	/// Anything under the API prefix.
	///
	/// Network-first, falling back to the runtime partition.
	Api,

	/// Everything else.
	///
	/// Cache-first against the runtime partition.
	Other,
}

impl Route
{
	pub fn classify(config: &WorkerConfig, url: &Url) -> Self
	{
		let path = url.path();
		let same_origin = url.origin() == config.origin.origin();
		let is_shell = path == "/" || path == "/manifest.json" || path.starts_with("/icons");

		if same_origin && is_shell {
			Self::Shell
		} else if path.starts_with(&*config.api_prefix) {
			Self::Api
		} else {
			Self::Other
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	#[test]
	fn classifies_requests() -> testing::Result
	{
		let config = WorkerConfig::new("v1", Url::parse("https://lotac.vercel.app")?);
		let classify = |url: &str| -> testing::Result<Route> {
			Ok(Route::classify(&config, &Url::parse(url)?))
		};

		testing::assert_eq!(classify("https://lotac.vercel.app/")?, Route::Shell);
		testing::assert_eq!(classify("https://lotac.vercel.app/manifest.json")?, Route::Shell);
		testing::assert_eq!(classify("https://lotac.vercel.app/icons/icon-192.png")?, Route::Shell);
		testing::assert_eq!(classify("https://lotac.vercel.app/api/geocode?q=Paris")?, Route::Api);
		testing::assert_eq!(classify("https://lotac.vercel.app/app.js")?, Route::Other);
		testing::assert_eq!(classify("https://cdn.jsdelivr.net/")?, Route::Other);
		testing::assert_eq!(classify("https://cdn.jsdelivr.net/icons/x.png")?, Route::Other);

		Ok(())
	}
}
