//! City name resolution.
//!
//! Nominatim's schema for localities is loose: depending on the place, the
//! city may live under `city`, `town`, `village`, and so on, or not be broken
//! out at all. Resolution is therefore pluggable.

use std::fmt;
use std::sync::Arc;

use super::{GeocodeMode, Place};

/// Derives a city name from a search result.
pub trait CityResolver: fmt::Debug + Send + Sync
{
	/// Returns `None` if this strategy can't tell.
	fn resolve(&self, place: &Place) -> Option<String>;
}

/// Returns the resolver used for queries of the given mode.
///
/// Structured queries fall back to [`DisplayNameSplit`] because their
/// results are often buildings with sparse address details.
pub fn for_mode(mode: GeocodeMode) -> Arc<dyn CityResolver>
{
	match mode {
		GeocodeMode::FreeText => Arc::new(AddressFields),
		GeocodeMode::Structured => {
			Arc::new(Chain::new(vec![Box::new(AddressFields), Box::new(DisplayNameSplit)]))
		}
	}
}

/// Picks the first non-empty locality-like field of `address`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddressFields;

impl AddressFields
{
	/// In order of preference.
	pub const FIELDS: [&'static str; 5] = ["city", "town", "village", "municipality", "county"];
}

impl CityResolver for AddressFields
{
	fn resolve(&self, place: &Place) -> Option<String>
	{
		let address = place.address.as_ref()?;

		Self::FIELDS
			.iter()
			.filter_map(|&field| address.get(field)?.as_str())
			.map(str::trim)
			.find(|name| !name.is_empty())
			.map(str::to_owned)
	}
}

/// Picks the first segment of `display_name` that contains no digits.
///
/// House numbers and postal codes are skipped this way.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisplayNameSplit;

impl CityResolver for DisplayNameSplit
{
	fn resolve(&self, place: &Place) -> Option<String>
	{
		place
			.display_name
			.as_deref()?
			.split(',')
			.map(str::trim)
			.find(|segment| !segment.is_empty() && !segment.chars().any(|c| c.is_ascii_digit()))
			.map(str::to_owned)
	}
}

/// Tries multiple resolvers in order.
#[derive(Debug, Default)]
pub struct Chain
{
	resolvers: Vec<Box<dyn CityResolver>>,
}

impl Chain
{
	pub fn new(resolvers: Vec<Box<dyn CityResolver>>) -> Self
	{
		Self { resolvers }
	}
}

impl CityResolver for Chain
{
	fn resolve(&self, place: &Place) -> Option<String>
	{
		self.resolvers
			.iter()
			.find_map(|resolver| resolver.resolve(place))
	}
}
