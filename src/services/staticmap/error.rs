//! The errors that can occur when interacting with this service.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response::ErrorBody;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the static map service.
///
/// Only bad input is an error; provider failures degrade to the placeholder.
#[derive(Debug, Error)]
pub enum Error
{
	#[error("missing `lat` or `lon` parameter")]
	MissingCoordinates,

	#[error("`lat` or `lon` is not a valid coordinate")]
	InvalidCoordinates,
}

impl IntoResponse for Error
{
	fn into_response(self) -> Response
	{
		debug!(target: "lotac_api::runtime::errors", error = %self, "rejecting map request");

		let body = match self {
			Self::MissingCoordinates => ErrorBody::new("Missing lat/lon"),
			Self::InvalidCoordinates => ErrorBody::new("Invalid lat/lon"),
		};

		(StatusCode::BAD_REQUEST, Json(body)).into_response()
	}
}
