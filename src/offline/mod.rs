//! Offline cache engine.
//!
//! This is the caching logic of the web app's service worker, expressed over
//! two traits: [`CacheStorage`] (named partitions of stored responses) and
//! [`Network`]. The worker goes through the same lifecycle as a browser
//! service worker:
//!
//! 1. [`OfflineWorker::install()`] seeds the static partition from a fixed
//!    manifest of shell assets.
//! 2. [`OfflineWorker::activate()`] drops every partition that doesn't belong
//!    to the current version and takes control.
//! 3. [`OfflineWorker::handle_fetch()`] answers intercepted requests using a
//!    per-route strategy (see [`Route`]).
//!
//! Partitions are named `static-<version>` and `runtime-<version>`. Bumping
//! the version is the only way entries ever get evicted.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use url::Url;

mod config;
pub use config::WorkerConfig;

mod storage;
pub use storage::{CacheStorage, MemoryCacheStorage};

mod network;
pub use network::{HttpNetwork, Network, NetworkError};

mod route;
pub use route::Route;

mod worker;
pub use worker::{
	ActivateError,
	FetchError,
	FetchEvent,
	InstallError,
	OfflineWorker,
	ServedFrom,
	WorkerState,
};

/// An intercepted request.
///
/// Only the method and URL matter for caching; together they form the cache
/// key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Request
{
	pub method: Method,
	pub url: Url,
}

impl Request
{
	pub fn new(method: Method, url: Url) -> Self
	{
		Self { method, url }
	}

	pub fn get(url: Url) -> Self
	{
		Self::new(Method::GET, url)
	}
}

/// A response, either from the network or from a partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response
{
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response
{
	pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self
	{
		Self { status, headers: HeaderMap::new(), body: body.into() }
	}

	/// Only successful responses are ever stored.
	pub fn is_success(&self) -> bool
	{
		self.status.is_success()
	}
}

#[cfg(test)]
mod tests;
