//! Request tracing.
//!
//! Every request gets its own span, and failures are logged with a severity
//! depending on who is at fault.

use std::time::Duration;

use axum::body::Body;
use http::{Request, Response};
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::trace::{DefaultOnBodyChunk, DefaultOnEos, DefaultOnRequest, HttpMakeClassifier};

type MakeSpan = fn(&Request<Body>) -> tracing::Span;
type OnResponse = fn(&Response<Body>, Duration, &tracing::Span);
type OnFailure = fn(ServerErrorsFailureClass, Duration, &tracing::Span);

/// The concrete tracing layer applied to the top-level router.
pub(crate) type TraceLayer = tower_http::trace::TraceLayer<
	HttpMakeClassifier,
	MakeSpan,
	DefaultOnRequest,
	OnResponse,
	DefaultOnBodyChunk,
	DefaultOnEos,
	OnFailure,
>;

pub(crate) fn layer() -> TraceLayer
{
	tower_http::trace::TraceLayer::new_for_http()
		.make_span_with(make_span as MakeSpan)
		.on_response(on_response as OnResponse)
		.on_failure(on_failure as OnFailure)
}

fn make_span(request: &Request<Body>) -> tracing::Span
{
	info_span! {
		target: "lotac_api::http",
		"request",
		request.method = %request.method(),
		request.uri = %request.uri(),
		response.status = tracing::field::Empty,
		latency = tracing::field::Empty,
	}
}

fn on_response(response: &Response<Body>, latency: Duration, span: &tracing::Span)
{
	span.record("response.status", response.status().as_u16())
		.record("latency", tracing::field::debug(latency));

	debug!(target: "lotac_api::http", "finished processing request");
}

fn on_failure(failure: ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span)
{
	match failure {
		ServerErrorsFailureClass::Error(error) => {
			error!(target: "lotac_api::runtime::errors", %error, ?latency, "error occurred during request");
		}
		ServerErrorsFailureClass::StatusCode(status) if status.is_server_error() => {
			error!(target: "lotac_api::runtime::errors", %status, ?latency, "error occurred during request");
		}
		ServerErrorsFailureClass::StatusCode(status) => {
			warn!(target: "lotac_api::runtime::errors", %status, ?latency, "error occurred during request");
		}
	}
}
