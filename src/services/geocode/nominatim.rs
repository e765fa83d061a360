//! Nominatim's `/search` API.

use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

use super::{Error, GeocodeQuery, Result};

/// A single search result.
///
/// Only the fields we care about are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct Place
{
	/// Usually a string, e.g. `"48.8566"`.
	pub lat: serde_json::Value,
	pub lon: serde_json::Value,

	#[serde(default)]
	pub display_name: Option<String>,

	/// `addressdetails=1` breakdown, e.g. `{"city": "Paris", "country": "France"}`.
	#[serde(default)]
	pub address: Option<HashMap<String, serde_json::Value>>,
}

/// Builds the search URL for `query`.
pub(super) fn search_url(base: &Url, query: &GeocodeQuery) -> Url
{
	let mut url = base.clone();

	{
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("format", "json");

		match query {
			GeocodeQuery::FreeText(q) => {
				pairs.append_pair("q", q);
			}
			GeocodeQuery::Structured(address) => {
				if let Some(street) = address.street.as_deref() {
					pairs.append_pair("street", street);
				}

				if let Some(postalcode) = address.postalcode.as_deref() {
					pairs.append_pair("postalcode", postalcode);
				}

				pairs.append_pair("city", &address.city);
				pairs.append_pair("country", &address.country);
			}
		}

		pairs.append_pair("addressdetails", "1");
		pairs.append_pair("limit", "1");
	}

	url
}

/// Extracts the first result of a search response.
///
/// Anything but a non-empty array counts as "no match".
pub(super) fn first_place(body: serde_json::Value) -> Result<Place>
{
	let serde_json::Value::Array(places) = body else {
		return Err(Error::NotFound);
	};

	let first = places.into_iter().next().ok_or(Error::NotFound)?;
	let place = serde_json::from_value(first)?;

	Ok(place)
}

/// Parses a coordinate that may be encoded as a string or a number.
pub(super) fn parse_coordinate(value: &serde_json::Value) -> Option<f64>
{
	let coordinate = match value {
		serde_json::Value::Number(number) => number.as_f64()?,
		serde_json::Value::String(string) => string.trim().parse::<f64>().ok()?,
		_ => return None,
	};

	coordinate.is_finite().then_some(coordinate)
}
