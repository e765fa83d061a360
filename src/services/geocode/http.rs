//! HTTP handlers for this service.

use axum::extract::{Query, State};
use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use axum::{Json, Router, routing};
use tower_http::set_header::SetResponseHeaderLayer;

use super::{GeocodeParams, GeocodeQuery, GeocodeResult, GeocodeService, Result};

impl From<GeocodeService> for Router
{
	fn from(svc: GeocodeService) -> Self
	{
		// Coordinates must never be served stale, errors included.
		let no_store =
			SetResponseHeaderLayer::overriding(CACHE_CONTROL, HeaderValue::from_static("no-store"));

		Router::new()
			.route("/api/geocode", routing::get(get))
			.layer(no_store)
			.with_state(svc)
	}
}

/// Resolves an address to coordinates.
async fn get(
	State(svc): State<GeocodeService>,
	Query(params): Query<GeocodeParams>,
) -> Result<Json<GeocodeResult>>
{
	let query = GeocodeQuery::from_params(svc.mode(), params)?;
	let result = svc.geocode(&query).await?;

	Ok(Json(result))
}
