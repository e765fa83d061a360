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

/// The errors that can occur when interacting with the geocode service.
#[derive(Debug, Error)]
pub enum Error
{
	#[error("missing `q` parameter")]
	MissingQuery,

	#[error("missing `city` or `country` parameter")]
	MissingCityOrCountry,

	/// Nominatim answered with a non-2xx status.
	#[error("nominatim responded with {status}")]
	Upstream
	{
		status: StatusCode,
	},

	/// Nominatim had no match for the query.
	#[error("no match")]
	NotFound,

	/// We couldn't talk to Nominatim (connection, timeout, or body decoding).
	#[error(transparent)]
	Transport(#[from] reqwest::Error),

	#[error(transparent)]
	MalformedResponse(#[from] serde_json::Error),

	#[error("nominatim returned non-numeric coordinates")]
	InvalidCoordinates,
}

impl Error
{
	fn status(&self) -> StatusCode
	{
		match self {
			Self::MissingQuery | Self::MissingCityOrCountry => StatusCode::BAD_REQUEST,
			Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
			Self::NotFound => StatusCode::NOT_FOUND,
			Self::Transport(_) | Self::MalformedResponse(_) | Self::InvalidCoordinates => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	fn body(&self) -> ErrorBody
	{
		match self {
			Self::MissingQuery => ErrorBody::new("Missing q"),
			Self::MissingCityOrCountry => ErrorBody::new("Missing city/country"),
			Self::Upstream { status } => ErrorBody::new("Upstream error").upstream_status(*status),
			Self::NotFound => ErrorBody::new("Not found"),
			Self::Transport(_) | Self::MalformedResponse(_) | Self::InvalidCoordinates => {
				ErrorBody::new("Server error").message(self)
			}
		}
	}
}

impl IntoResponse for Error
{
	fn into_response(self) -> Response
	{
		let status = self.status();

		if status.is_server_error() {
			error!(target: "lotac_api::runtime::errors", error = %self, "geocode failed");
		} else {
			debug!(target: "lotac_api::runtime::errors", error = %self, "geocode failed");
		}

		(status, Json(self.body())).into_response()
	}
}
