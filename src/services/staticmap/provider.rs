//! Map providers and the order in which they are tried.

use std::fmt;

use url::Url;

use super::{FetchError, FetchedImage, ImageFormat, MapImage, MapRequest, MapSource};
use crate::config::StaticMapConfig;

/// Google refuses sizes above this without a premium plan.
pub const GOOGLE_MAX_SIZE: u32 = 640;

/// A single candidate in the provider queue.
pub struct Provider
{
	pub source: MapSource,

	/// Fully built request URL. May contain an API key.
	pub url: Url,

	decode: fn(FetchedImage) -> Result<MapImage, FetchError>,
}

impl fmt::Debug for Provider
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("Provider")
			.field("source", &self.source)
			.field("host", &self.url.host_str())
			.finish_non_exhaustive()
	}
}

impl Provider
{
	pub fn google(base: &Url, key: &str, request: &MapRequest) -> Self
	{
		let center = request.center();
		let width = request.width.min(GOOGLE_MAX_SIZE);
		let height = request.height.min(GOOGLE_MAX_SIZE);
		let mut url = base.clone();

		// `scale=2` doubles the pixel density to make up for the size limit.
		url.query_pairs_mut()
			.append_pair("center", &center)
			.append_pair("zoom", &request.zoom.to_string())
			.append_pair("size", &format!("{width}x{height}"))
			.append_pair("scale", "2")
			.append_pair("markers", &format!("color:red|{center}"))
			.append_pair("key", key);

		Self { source: MapSource::Google, url, decode: decode_raster }
	}

	pub fn osm(base: &Url, request: &MapRequest) -> Self
	{
		Self { source: MapSource::Osm, url: osm_url(base, request), decode: decode_raster }
	}

	/// The OSM renderer, fetched through the images.weserv.nl proxy.
	pub fn weserv(base: &Url, osm_base: &Url, request: &MapRequest) -> Self
	{
		let osm = osm_url(osm_base, request);
		let mut url = base.clone();

		// weserv wants the target without its scheme.
		url.query_pairs_mut()
			.append_pair("url", &osm[url::Position::BeforeHost..]);

		Self { source: MapSource::Weserv, url, decode: decode_raster }
	}

	/// Turns a successful fetch into an image.
	pub fn decode(&self, fetched: FetchedImage) -> Result<MapImage, FetchError>
	{
		(self.decode)(fetched)
	}
}

fn osm_url(base: &Url, request: &MapRequest) -> Url
{
	let center = request.center();
	let mut url = base.clone();

	url.query_pairs_mut()
		.append_pair("center", &center)
		.append_pair("zoom", &request.zoom.to_string())
		.append_pair("size", &format!("{}x{}", request.width, request.height))
		.append_pair("markers", &format!("{center},red-pushpin"));

	url
}

fn decode_raster(fetched: FetchedImage) -> Result<MapImage, FetchError>
{
	if fetched.bytes.is_empty() {
		return Err(FetchError::EmptyBody);
	}

	let format = ImageFormat::sniff(fetched.content_type.as_deref());

	Ok(MapImage::new(format, fetched.bytes))
}

/// The ordered list of providers for one request.
#[derive(Debug)]
pub struct ProviderQueue
{
	providers: Vec<Provider>,
}

impl ProviderQueue
{
	/// Google first if a key is configured, then OSM, then weserv.
	pub fn build(config: &StaticMapConfig, request: &MapRequest) -> Self
	{
		let google = config
			.google_maps_key()
			.map(|key| Provider::google(&config.google_url, key, request));

		let providers = google
			.into_iter()
			.chain([
				Provider::osm(&config.osm_url, request),
				Provider::weserv(&config.weserv_url, &config.osm_url, request),
			])
			.collect();

		Self { providers }
	}

	pub fn providers(&self) -> &[Provider]
	{
		&self.providers
	}

	pub fn sources(&self) -> impl Iterator<Item = MapSource> + '_
	{
		self.providers.iter().map(|provider| provider.source)
	}
}
