use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use url::Url;

use super::{FetchError, FetchImage, FetchedImage};

/// Fetches map images with the shared HTTP client.
#[derive(Debug, Clone)]
pub struct HttpFetcher
{
	http_client: reqwest::Client,
}

impl HttpFetcher
{
	pub fn new(http_client: reqwest::Client) -> Self
	{
		Self { http_client }
	}
}

impl FetchImage for HttpFetcher
{
	async fn fetch(&self, url: &Url) -> Result<FetchedImage, FetchError>
	{
		let response = self
			.http_client
			.get(url.clone())
			.header(ACCEPT, "image/*,*/*;q=0.8")
			.header(CACHE_CONTROL, "no-cache")
			.send()
			.await?;

		let status = response.status();

		if !status.is_success() {
			return Err(FetchError::Status(status));
		}

		let content_type = response
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.map(str::to_owned);

		let bytes = response.bytes().await?;

		Ok(FetchedImage { content_type, bytes })
	}
}
