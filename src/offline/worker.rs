use http::{Method, StatusCode};
use thiserror::Error;
use url::Url;

use super::{CacheStorage, Network, NetworkError, Request, Response, Route, WorkerConfig};

/// Where the worker is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState
{
	/// Created, but nothing has been cached yet.
	Parsed,

	/// The static partition is seeded. Installation skips the waiting phase,
	/// so an installed worker can be activated right away.
	Installed,

	/// Stale partitions are gone and the worker controls its clients.
	Activated,
}

#[derive(Debug, Error)]
pub enum InstallError
{
	#[error("invalid manifest entry: {0}")]
	InvalidManifest(#[from] url::ParseError),

	#[error("failed to fetch `{url}`: {source}")]
	Fetch
	{
		url: Url,

		#[source]
		source: NetworkError,
	},

	#[error("`{url}` responded with {status}")]
	Status
	{
		url: Url,
		status: StatusCode,
	},
}

#[derive(Debug, Error)]
pub enum ActivateError
{
	#[error("cannot activate a worker that has not been installed")]
	NotInstalled,
}

#[derive(Debug, Error)]
pub enum FetchError
{
	/// Neither the network nor the cache could answer.
	#[error("offline and no cached copy of `{url}`")]
	Offline
	{
		url: Url,

		#[source]
		source: NetworkError,
	},
}

/// Where a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServedFrom
{
	Cache,
	Network,
}

/// What the worker did with an intercepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent
{
	/// The worker stayed out of it; the browser handles the request as if
	/// there were no worker.
	Passthrough,

	Respond
	{
		response: Response,
		from: ServedFrom,
	},
}

/// The offline cache worker.
///
/// See the [module-level documentation](super) for an overview.
#[derive(Debug)]
pub struct OfflineWorker<S, N>
{
	config: WorkerConfig,
	static_partition: String,
	runtime_partition: String,
	storage: S,
	network: N,
	state: WorkerState,
}

impl<S, N> OfflineWorker<S, N>
where
	S: CacheStorage,
	N: Network,
{
	pub fn new(config: WorkerConfig, storage: S, network: N) -> Self
	{
		Self {
			static_partition: config.static_partition(),
			runtime_partition: config.runtime_partition(),
			config,
			storage,
			network,
			state: WorkerState::Parsed,
		}
	}

	pub fn config(&self) -> &WorkerConfig
	{
		&self.config
	}

	pub fn state(&self) -> WorkerState
	{
		self.state
	}

	/// Whether intercepted requests are handled by this worker.
	pub fn is_controlling(&self) -> bool
	{
		self.state == WorkerState::Activated
	}

	/// Seeds the static partition from the install manifest.
	///
	/// Every manifest entry must be fetched successfully; otherwise nothing
	/// is stored and the worker stays uninstalled.
	#[tracing::instrument(level = "debug", skip(self), fields(version = %self.config.version), err(level = "debug"))]
	pub async fn install(&mut self) -> Result<(), InstallError>
	{
		let urls = self.config.manifest_urls()?;
		let mut fetched = Vec::with_capacity(urls.len());

		for url in urls {
			let request = Request::get(url);
			let result = self.network.fetch(&request).await;
			let response = match result {
				Ok(response) => response,
				Err(source) => return Err(InstallError::Fetch { url: request.url, source }),
			};

			if !response.is_success() {
				return Err(InstallError::Status { url: request.url, status: response.status });
			}

			fetched.push((request, response));
		}

		for (request, response) in fetched {
			self.storage
				.put(&self.static_partition, &request, response)
				.await;
		}

		self.state = WorkerState::Installed;

		info!(partition = %self.static_partition, entries = self.config.manifest.len(), "installed");

		Ok(())
	}

	/// Deletes every partition that doesn't belong to this version, then takes
	/// control of the clients.
	///
	/// Returns the names of the deleted partitions.
	#[tracing::instrument(level = "debug", skip(self), fields(version = %self.config.version), err(level = "debug"))]
	pub async fn activate(&mut self) -> Result<Vec<String>, ActivateError>
	{
		if self.state == WorkerState::Parsed {
			return Err(ActivateError::NotInstalled);
		}

		let mut deleted = Vec::new();

		for name in self.storage.names().await {
			if name == self.static_partition || name == self.runtime_partition {
				continue;
			}

			if self.storage.delete(&name).await {
				deleted.push(name);
			}
		}

		self.state = WorkerState::Activated;

		info!(?deleted, "activated");

		Ok(deleted)
	}

	/// Answers an intercepted request.
	#[tracing::instrument(level = "debug", skip(self), fields(route = tracing::field::Empty))]
	pub async fn handle_fetch(&self, request: &Request) -> Result<FetchEvent, FetchError>
	{
		if !self.is_controlling() || request.method != Method::GET {
			return Ok(FetchEvent::Passthrough);
		}

		let route = Route::classify(&self.config, &request.url);

		tracing::Span::current().record("route", tracing::field::debug(route));

		match route {
			Route::Shell => self.cache_first(&self.static_partition, request).await,
			Route::Api => self.network_first(&self.runtime_partition, request).await,
			Route::Other => self.cache_first(&self.runtime_partition, request).await,
		}
	}

	async fn cache_first(&self, partition: &str, request: &Request) -> Result<FetchEvent, FetchError>
	{
		if let Some(response) = self.storage.match_in(partition, request).await {
			return Ok(FetchEvent::Respond { response, from: ServedFrom::Cache });
		}

		match self.network.fetch(request).await {
			Ok(response) => {
				self.store(partition, request, &response).await;
				Ok(FetchEvent::Respond { response, from: ServedFrom::Network })
			}
			Err(source) => {
				debug!(%source, "cache miss while offline");
				Err(FetchError::Offline { url: request.url.clone(), source })
			}
		}
	}

	async fn network_first(&self, partition: &str, request: &Request) -> Result<FetchEvent, FetchError>
	{
		let source = match self.network.fetch(request).await {
			Ok(response) => {
				self.store(partition, request, &response).await;
				return Ok(FetchEvent::Respond { response, from: ServedFrom::Network });
			}
			Err(source) => source,
		};

		debug!(%source, "network failed; trying cache");

		match self.storage.match_in(partition, request).await {
			Some(response) => Ok(FetchEvent::Respond { response, from: ServedFrom::Cache }),
			None => Err(FetchError::Offline { url: request.url.clone(), source }),
		}
	}

	async fn store(&self, partition: &str, request: &Request, response: &Response)
	{
		if response.is_success() {
			self.storage
				.put(partition, request, response.clone())
				.await;
		} else {
			trace!(status = %response.status, "not caching unsuccessful response");
		}
	}
}
