use thiserror::Error;

use super::{Request, Response};

/// Why a network fetch failed.
///
/// HTTP error statuses are not failures; they come back as a [`Response`].
#[derive(Debug, Error)]
pub enum NetworkError
{
	#[error(transparent)]
	Http(#[from] reqwest::Error),

	#[error("network unavailable")]
	Unavailable,
}

/// The network, as seen by the worker.
pub trait Network: Send + Sync
{
	async fn fetch(&self, request: &Request) -> Result<Response, NetworkError>;
}

/// [`Network`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpNetwork
{
	http_client: reqwest::Client,
}

impl HttpNetwork
{
	pub fn new(http_client: reqwest::Client) -> Self
	{
		Self { http_client }
	}
}

impl Network for HttpNetwork
{
	async fn fetch(&self, request: &Request) -> Result<Response, NetworkError>
	{
		let response = self
			.http_client
			.request(request.method.clone(), request.url.clone())
			.send()
			.await?;

		let status = response.status();
		let headers = response.headers().clone();
		let body = response.bytes().await?;

		Ok(Response { status, headers, body })
	}
}
