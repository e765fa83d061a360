//! Utilities for unit & integration tests.

use std::net::{Ipv4Addr, SocketAddr};

use axum::Router;
use axum::response::Response;
use http_body_util::BodyExt;
use tokio::net::TcpListener;
use url::Url;

mod macros;

#[allow(unused_imports)]
pub(crate) use macros::*;

pub type Error = anyhow::Error;
pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Collects a response body into a string.
pub async fn collect_body(response: Response) -> Result<String>
{
	let bytes = collect_bytes(response).await?;
	let body = String::from_utf8(bytes.to_vec())?;

	Ok(body)
}

/// Collects a response body into raw bytes.
pub async fn collect_bytes(response: Response) -> Result<bytes::Bytes>
{
	let collected = response.into_body().collect().await?;

	Ok(collected.to_bytes())
}

/// Serves `router` on an ephemeral local port and returns its base URL.
///
/// The server runs until the test's runtime shuts down.
pub async fn spawn_upstream(router: Router) -> Result<Url>
{
	let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).await?;
	let addr = listener.local_addr()?;

	tokio::spawn(async move {
		if let Err(error) = axum::serve(listener, router).await {
			error!(%error, "stub upstream failed");
		}
	});

	Ok(Url::parse(&format!("http://{addr}/"))?)
}
