//! Shared HTTP response types.

use http::StatusCode;
use serde::Serialize;

/// JSON body of every error response.
///
/// `error` is a short, stable summary clients can match on; `message` and
/// `status` carry details when there are any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ErrorBody
{
	error: &'static str,

	#[serde(skip_serializing_if = "Option::is_none")]
	message: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	status: Option<u16>,
}

impl ErrorBody
{
	pub(crate) fn new(error: &'static str) -> Self
	{
		Self { error, message: None, status: None }
	}

	pub(crate) fn message(self, message: impl ToString) -> Self
	{
		Self { message: Some(message.to_string()), ..self }
	}

	/// Attaches the status code an upstream responded with.
	pub(crate) fn upstream_status(self, status: StatusCode) -> Self
	{
		Self { status: Some(status.as_u16()), ..self }
	}
}
