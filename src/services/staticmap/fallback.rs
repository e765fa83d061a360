//! Trying providers in order until one delivers.

use std::future::Future;
use std::time::Duration;

use axum::http::StatusCode;
use bytes::Bytes;
use thiserror::Error;
use url::Url;

use super::{MapImage, MapSource, Provider};

/// A provider's raw response.
#[derive(Debug, Clone)]
pub struct FetchedImage
{
	/// The declared `Content-Type`, if any.
	pub content_type: Option<String>,
	pub bytes: Bytes,
}

/// Why a provider didn't deliver.
#[derive(Debug, Error)]
pub enum FetchError
{
	#[error("provider responded with {0}")]
	Status(StatusCode),

	#[error(transparent)]
	Transport(#[from] reqwest::Error),

	#[error("provider did not respond within {0:?}")]
	Timeout(Duration),

	#[error("provider responded with an empty body")]
	EmptyBody,
}

/// Fetches map images.
pub trait FetchImage: Send + Sync
{
	/// Fetches `url`.
	///
	/// Non-2xx responses must be reported as [`FetchError::Status`].
	fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedImage, FetchError>> + Send;
}

/// Returns the first image any of `providers` delivers.
///
/// Providers are tried one after the other, each bounded by `timeout`, and
/// never retried. Returns `None` if all of them failed.
pub async fn first_success<F>(
	fetcher: &F,
	providers: &[Provider],
	timeout: Duration,
) -> Option<(MapSource, MapImage)>
where
	F: FetchImage,
{
	for provider in providers {
		let fetched = tokio::time::timeout(timeout, fetcher.fetch(&provider.url))
			.await
			.unwrap_or(Err(FetchError::Timeout(timeout)));

		match fetched.and_then(|fetched| provider.decode(fetched)) {
			Ok(image) => {
				debug!(source = %provider.source, format = ?image.format(), "fetched map");
				return Some((provider.source, image));
			}
			Err(error) => {
				warn!(source = %provider.source, %error, "map provider failed");
			}
		}
	}

	None
}
