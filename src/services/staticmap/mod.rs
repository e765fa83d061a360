//! Static map images.
//!
//! Renders a map centred on a pair of coordinates by asking a queue of
//! providers in order: Google Static Maps (only when a key is configured),
//! then the OpenStreetMap renderer, then the same renderer through the
//! images.weserv.nl proxy. If every provider fails, a generated SVG
//! placeholder is returned instead, so a structurally valid request always
//! yields an image.

use std::sync::Arc;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::config::StaticMapConfig;

mod error;
pub use error::{Error, Result};

mod image;
pub use image::{ImageFormat, MapImage};

pub mod provider;
pub use provider::{Provider, ProviderQueue};

pub mod fallback;
pub use fallback::{FetchError, FetchImage, FetchedImage};

mod fetcher;
pub use fetcher::HttpFetcher;

pub mod placeholder;

mod http;

/// Who produced a map image.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MapSource
{
	#[display("google")]
	Google,

	#[display("osm")]
	Osm,

	#[display("weserv")]
	Weserv,

	/// The generated placeholder.
	#[display("fallback")]
	Fallback,
}

impl MapSource
{
	pub const fn as_str(self) -> &'static str
	{
		match self {
			Self::Google => "google",
			Self::Osm => "osm",
			Self::Weserv => "weserv",
			Self::Fallback => "fallback",
		}
	}
}

/// Raw query parameters of a map request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MapParams
{
	pub lat: Option<String>,
	pub lon: Option<String>,
	pub zoom: Option<String>,
	pub w: Option<String>,
	pub h: Option<String>,
}

/// A validated map request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRequest
{
	pub lat: f64,
	pub lon: f64,
	pub zoom: u8,
	pub width: u32,
	pub height: u32,
}

impl MapRequest
{
	pub const DEFAULT_ZOOM: u8 = 15;
	pub const MAX_ZOOM: u8 = 20;
	pub const DEFAULT_WIDTH: u32 = 1100;
	pub const DEFAULT_HEIGHT: u32 = 650;

	/// Validates raw query parameters.
	///
	/// Only the coordinates can make a request invalid. Anything wrong with
	/// `zoom`, `w` or `h` silently falls back to the defaults.
	pub fn from_params(params: &MapParams) -> Result<Self>
	{
		let (Some(lat), Some(lon)) = (non_blank(params.lat.as_deref()), non_blank(params.lon.as_deref()))
		else {
			return Err(Error::MissingCoordinates);
		};

		let lat = parse_coordinate(lat, 90.0)?;
		let lon = parse_coordinate(lon, 180.0)?;

		let zoom = non_blank(params.zoom.as_deref())
			.and_then(|zoom| zoom.parse::<u8>().ok())
			.filter(|&zoom| zoom <= Self::MAX_ZOOM)
			.unwrap_or(Self::DEFAULT_ZOOM);

		let width = parse_dimension(params.w.as_deref()).unwrap_or(Self::DEFAULT_WIDTH);
		let height = parse_dimension(params.h.as_deref()).unwrap_or(Self::DEFAULT_HEIGHT);

		Ok(Self { lat, lon, zoom, width, height })
	}

	/// `<lat>,<lon>`, as every provider expects it.
	pub fn center(&self) -> String
	{
		format!("{},{}", self.lat, self.lon)
	}
}

fn non_blank(value: Option<&str>) -> Option<&str>
{
	value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_coordinate(value: &str, bound: f64) -> Result<f64>
{
	value
		.parse::<f64>()
		.ok()
		.filter(|coordinate| coordinate.is_finite() && coordinate.abs() <= bound)
		.ok_or(Error::InvalidCoordinates)
}

fn parse_dimension(value: Option<&str>) -> Option<u32>
{
	non_blank(value)?
		.parse::<u32>()
		.ok()
		.filter(|&dimension| dimension > 0)
}

/// A map image and who produced it.
#[derive(Debug, Clone)]
pub struct RenderedMap
{
	pub source: MapSource,
	pub image: MapImage,
}

impl RenderedMap
{
	/// The placeholder shown when no provider could deliver.
	pub fn fallback(width: u32, height: u32) -> Self
	{
		Self { source: MapSource::Fallback, image: placeholder::render(width, height) }
	}
}

/// A service for rendering static maps.
///
/// Generic over how images are fetched so the provider queue can be
/// exercised without a network.
#[derive(Debug, Clone)]
pub struct StaticMapService<F = HttpFetcher>
{
	fetcher: F,
	config: Arc<StaticMapConfig>,
}

impl StaticMapService
{
	/// Create a new [`StaticMapService`] fetching images over HTTP.
	pub fn new(http_client: reqwest::Client, config: StaticMapConfig) -> Self
	{
		Self::with_fetcher(HttpFetcher::new(http_client), config)
	}
}

impl<F> StaticMapService<F>
where
	F: FetchImage,
{
	pub fn with_fetcher(fetcher: F, config: StaticMapConfig) -> Self
	{
		Self { fetcher, config: Arc::new(config) }
	}

	/// Renders the map for `request`.
	///
	/// This never fails; see [`RenderedMap::fallback()`].
	#[tracing::instrument(level = "debug", skip(self), fields(source = tracing::field::Empty))]
	pub async fn render(&self, request: &MapRequest) -> RenderedMap
	{
		let queue = ProviderQueue::build(&self.config, request);
		let rendered = match fallback::first_success(&self.fetcher, queue.providers(), self.config.timeout).await {
			Some((source, image)) => RenderedMap { source, image },
			None => {
				warn!(providers = queue.providers().len(), "every map provider failed; serving placeholder");
				RenderedMap::fallback(request.width, request.height)
			}
		};

		tracing::Span::current().record("source", tracing::field::display(rendered.source));

		rendered
	}
}
