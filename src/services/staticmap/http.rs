//! HTTP handlers for this service.

use std::any::Any;

use axum::extract::{Query, State};
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Serialize;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use super::{FetchImage, MapParams, MapRequest, MapSource, RenderedMap, Result, StaticMapService};
use crate::middleware::panic_handler::panic_message;

/// Names the provider on the raw route, where there is no JSON to carry it.
pub(crate) const X_MAP_SOURCE: HeaderName = HeaderName::from_static("x-map-source");

impl<F> From<StaticMapService<F>> for Router
where
	F: FetchImage + Clone + 'static,
{
	fn from(svc: StaticMapService<F>) -> Self
	{
		Router::new()
			.route(
				"/api/staticmap",
				routing::get(get_data_url::<F>).layer(CatchPanicLayer::custom(PlaceholderOnPanic::DataUrl)),
			)
			.route(
				"/api/staticmap/raw",
				routing::get(get_raw::<F>).layer(CatchPanicLayer::custom(PlaceholderOnPanic::Raw)),
			)
			.with_state(svc)
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DataUrlBody
{
	data_url: String,
	source: MapSource,

	#[serde(skip_serializing_if = "Option::is_none")]
	note: Option<String>,
}

fn data_url_response(map: &RenderedMap, note: Option<String>) -> Response
{
	let body = DataUrlBody { data_url: map.image.to_data_url(), source: map.source, note };
	let headers = [(CACHE_CONTROL, "no-store"), (ACCESS_CONTROL_ALLOW_ORIGIN, "*")];

	(StatusCode::OK, headers, Json(body)).into_response()
}

fn raw_response(map: RenderedMap) -> Response
{
	let headers = [
		(CONTENT_TYPE, map.image.format().mime()),
		(CACHE_CONTROL, "public, max-age=600"),
		(ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
		(X_MAP_SOURCE, map.source.as_str()),
	];

	(StatusCode::OK, headers, map.image.into_bytes()).into_response()
}

/// Renders a map as a `data:` URI.
async fn get_data_url<F>(
	State(svc): State<StaticMapService<F>>,
	Query(params): Query<MapParams>,
) -> Result<Response>
where
	F: FetchImage,
{
	let request = MapRequest::from_params(&params)?;
	let map = svc.render(&request).await;

	Ok(data_url_response(&map, None))
}

/// Renders a map as raw image bytes.
async fn get_raw<F>(
	State(svc): State<StaticMapService<F>>,
	Query(params): Query<MapParams>,
) -> Result<Response>
where
	F: FetchImage,
{
	let request = MapRequest::from_params(&params)?;
	let map = svc.render(&request).await;

	Ok(raw_response(map))
}

/// Turns a panic on a map route into a placeholder map.
#[derive(Debug, Clone, Copy)]
enum PlaceholderOnPanic
{
	DataUrl,
	Raw,
}

impl ResponseForPanic for PlaceholderOnPanic
{
	type ResponseBody = axum::body::Body;

	fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response
	{
		let note = panic_message(&*err).unwrap_or("map handler panicked").to_owned();

		error!(target: "lotac_api::runtime::errors", %note, "map handler panicked; serving placeholder");

		let map = RenderedMap::fallback(MapRequest::DEFAULT_WIDTH, MapRequest::DEFAULT_HEIGHT);

		match self {
			Self::DataUrl => data_url_response(&map, Some(note)),
			Self::Raw => raw_response(map),
		}
	}
}
