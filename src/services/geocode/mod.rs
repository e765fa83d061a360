//! Address geocoding.
//!
//! Turns an address into coordinates and a city name by asking OpenStreetMap's
//! [Nominatim] for its best match. There is exactly one upstream call per
//! request; no retries, no fallback provider.
//!
//! [Nominatim]: https://nominatim.org/release-docs/develop/api/Search/

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::GeocodeConfig;

mod error;
pub use error::{Error, Result};

pub mod city;
pub use city::CityResolver;

mod nominatim;
pub use nominatim::Place;

mod http;

/// The kind of query accepted by `/api/geocode`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodeMode
{
	/// A single free-text `q` parameter.
	#[default]
	FreeText,

	/// Separate `street`, `postalcode`, `city` and `country` parameters.
	Structured,
}

/// Raw query parameters of a geocode request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct GeocodeParams
{
	pub q: Option<String>,
	pub street: Option<String>,
	pub postalcode: Option<String>,
	pub city: Option<String>,
	pub country: Option<String>,
}

/// A validated geocode query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeQuery
{
	FreeText(Box<str>),
	Structured(StructuredAddress),
}

/// An address split into its parts.
///
/// `city` and `country` are always present; the rest is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredAddress
{
	pub street: Option<Box<str>>,
	pub postalcode: Option<Box<str>>,
	pub city: Box<str>,
	pub country: Box<str>,
}

impl GeocodeQuery
{
	/// Validates raw query parameters according to `mode`.
	///
	/// Parameters that don't belong to `mode` are ignored.
	pub fn from_params(mode: GeocodeMode, params: GeocodeParams) -> Result<Self>
	{
		match mode {
			GeocodeMode::FreeText => non_blank(params.q)
				.map(Self::FreeText)
				.ok_or(Error::MissingQuery),

			GeocodeMode::Structured => {
				let (Some(city), Some(country)) = (non_blank(params.city), non_blank(params.country))
				else {
					return Err(Error::MissingCityOrCountry);
				};

				Ok(Self::Structured(StructuredAddress {
					street: non_blank(params.street),
					postalcode: non_blank(params.postalcode),
					city,
					country,
				}))
			}
		}
	}
}

fn non_blank(value: Option<String>) -> Option<Box<str>>
{
	value
		.as_deref()
		.map(str::trim)
		.filter(|value| !value.is_empty())
		.map(Box::from)
}

/// The best match for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult
{
	pub lat: f64,
	pub lon: f64,

	/// Best-effort city name; empty if none could be determined.
	pub city: String,

	/// Nominatim's human-readable label. Only set for structured queries.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
}

/// A service for resolving addresses.
#[derive(Debug, Clone)]
pub struct GeocodeService
{
	http_client: reqwest::Client,
	config: Arc<GeocodeConfig>,
	resolver: Arc<dyn CityResolver>,
}

impl GeocodeService
{
	/// Create a new [`GeocodeService`].
	///
	/// The city resolver is picked according to the configured mode; see
	/// [`city::for_mode()`].
	pub fn new(http_client: reqwest::Client, config: GeocodeConfig) -> Self
	{
		let resolver = city::for_mode(config.mode);

		Self { http_client, config: Arc::new(config), resolver }
	}

	/// Replaces the city resolver.
	pub fn with_resolver(self, resolver: impl CityResolver + 'static) -> Self
	{
		Self { resolver: Arc::new(resolver), ..self }
	}

	/// The kind of query this service accepts.
	pub fn mode(&self) -> GeocodeMode
	{
		self.config.mode
	}

	/// Asks Nominatim for the best match for `query`.
	#[tracing::instrument(level = "debug", skip(self), err(level = "debug"))]
	pub async fn geocode(&self, query: &GeocodeQuery) -> Result<GeocodeResult>
	{
		let url = nominatim::search_url(&self.config.nominatim_url, query);
		let response = self
			.http_client
			.get(url)
			.header(reqwest::header::ACCEPT_LANGUAGE, &*self.config.accept_language)
			.header(reqwest::header::CACHE_CONTROL, "no-cache")
			.timeout(self.config.timeout)
			.send()
			.await?;

		let status = response.status();

		if !status.is_success() {
			return Err(Error::Upstream { status });
		}

		let body = response.json::<serde_json::Value>().await?;
		let place = nominatim::first_place(body)?;
		let lat = nominatim::parse_coordinate(&place.lat).ok_or(Error::InvalidCoordinates)?;
		let lon = nominatim::parse_coordinate(&place.lon).ok_or(Error::InvalidCoordinates)?;
		let city = self.resolver.resolve(&place).unwrap_or_default();
		let display_name = match query {
			GeocodeQuery::FreeText(_) => None,
			GeocodeQuery::Structured(_) => Some(place.display_name.unwrap_or_default()),
		};

		debug!(lat, lon, %city, "resolved address");

		Ok(GeocodeResult { lat, lon, city, display_name })
	}
}
