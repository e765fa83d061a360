//! A middleware for catching panics.
//!
//! Normally, if an HTTP handler panics, the connection will simply be closed.
//! This middleware will catch panics and return a proper HTTP response.

use std::any::Any;

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::response::ErrorBody;

/// Creates a middleware layer for catching panics and turning them into
/// responses.
pub(crate) fn layer() -> CatchPanicLayer<PanicHandler>
{
	CatchPanicLayer::custom(PanicHandler)
}

/// A custom panic handler for [`CatchPanicLayer`].
///
/// Responds with a generic `500` JSON body.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PanicHandler;

impl ResponseForPanic for PanicHandler
{
	type ResponseBody = axum::body::Body;

	fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response
	{
		error!(
			target: "lotac_api::runtime::errors",
			message = ?panic_message(&*err),
			"handler panicked",
		);

		(StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new("Server error"))).into_response()
	}
}

/// Extracts the message out of a panic payload, if it has one.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> Option<&str>
{
	payload
		.downcast_ref::<&'static str>()
		.copied()
		.or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

#[cfg(test)]
mod tests
{
	use axum::body::Body;
	use axum::{Router, routing};
	use http::Request;
	use tower::ServiceExt;

	use super::*;
	use crate::testing;

	#[tokio::test]
	async fn panics_become_server_errors() -> testing::Result
	{
		async fn boom() -> &'static str
		{
			panic!("boom")
		}

		let router = Router::new()
			.route("/boom", routing::get(boom))
			.layer(layer());

		let response = router
			.oneshot(Request::get("/boom").body(Body::empty())?)
			.await?;

		testing::assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

		let body: serde_json::Value = serde_json::from_str(&testing::collect_body(response).await?)?;

		testing::assert_eq!(body, serde_json::json!({ "error": "Server error" }));

		Ok(())
	}

	#[test]
	fn extracts_panic_messages() -> testing::Result
	{
		let literal: Box<dyn Any + Send> = Box::new("static message");
		let formatted: Box<dyn Any + Send> = Box::new(String::from("formatted message"));
		let opaque: Box<dyn Any + Send> = Box::new(42_u8);

		testing::assert_eq!(panic_message(&*literal), Some("static message"));
		testing::assert_eq!(panic_message(&*formatted), Some("formatted message"));
		testing::assert_eq!(panic_message(&*opaque), None);

		Ok(())
	}
}
