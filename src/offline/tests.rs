use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use http::{Method, StatusCode};
use url::Url;

use super::*;
use crate::testing;

const ORIGIN: &str = "https://lotac.vercel.app";

/// A network that knows a fixed set of URLs and can be unplugged.
#[derive(Debug, Clone)]
struct StubNetwork
{
	pages: Arc<HashMap<String, (StatusCode, &'static str)>>,
	online: Arc<AtomicBool>,
	calls: Arc<AtomicUsize>,
}

impl StubNetwork
{
	fn new(pages: impl IntoIterator<Item = (&'static str, StatusCode, &'static str)>) -> Self
	{
		let pages = pages
			.into_iter()
			.map(|(url, status, body)| (url.to_owned(), (status, body)))
			.collect();

		Self {
			pages: Arc::new(pages),
			online: Arc::new(AtomicBool::new(true)),
			calls: Arc::default(),
		}
	}

	/// Serves the whole default manifest.
	fn with_shell() -> Self
	{
		Self::new([
			("https://lotac.vercel.app/", StatusCode::OK, "<!doctype html>"),
			("https://lotac.vercel.app/manifest.json", StatusCode::OK, "{}"),
			("https://lotac.vercel.app/icons/icon-192.png", StatusCode::OK, "icon-192"),
			("https://lotac.vercel.app/icons/icon-512.png", StatusCode::OK, "icon-512"),
			("https://lotac.vercel.app/icons/maskable-512.png", StatusCode::OK, "maskable-512"),
			("https://lotac.vercel.app/api/geocode?q=Paris", StatusCode::OK, r#"{"city":"Paris"}"#),
			("https://lotac.vercel.app/api/geocode?q=Busy", StatusCode::BAD_GATEWAY, r#"{"error":"Upstream error"}"#),
			("https://cdn.jsdelivr.net/npm/flatpickr", StatusCode::OK, "flatpickr"),
		])
	}

	fn go_offline(&self)
	{
		self.online.store(false, Ordering::SeqCst);
	}

	fn calls(&self) -> usize
	{
		self.calls.load(Ordering::SeqCst)
	}
}

impl Network for StubNetwork
{
	async fn fetch(&self, request: &Request) -> Result<Response, NetworkError>
	{
		self.calls.fetch_add(1, Ordering::SeqCst);

		if !self.online.load(Ordering::SeqCst) {
			return Err(NetworkError::Unavailable);
		}

		let response = match self.pages.get(request.url.as_str()) {
			Some(&(status, body)) => Response::new(status, body),
			None => Response::new(StatusCode::NOT_FOUND, "not found"),
		};

		Ok(response)
	}
}

fn config(version: &str) -> testing::Result<WorkerConfig>
{
	Ok(WorkerConfig::new(version, Url::parse(ORIGIN)?))
}

fn get(url: &str) -> testing::Result<Request>
{
	Ok(Request::get(Url::parse(url)?))
}

async fn activated(
	version: &str,
	storage: &MemoryCacheStorage,
	network: &StubNetwork,
) -> testing::Result<OfflineWorker<MemoryCacheStorage, StubNetwork>>
{
	let mut worker = OfflineWorker::new(config(version)?, storage.clone(), network.clone());

	worker.install().await?;
	worker.activate().await?;

	Ok(worker)
}

#[tokio::test]
async fn install_seeds_static_partition() -> testing::Result
{
	let storage = MemoryCacheStorage::new();
	let network = StubNetwork::with_shell();
	let mut worker = OfflineWorker::new(config("v1")?, storage.clone(), network.clone());

	worker.install().await?;

	testing::assert_eq!(worker.state(), WorkerState::Installed);
	testing::assert!(!worker.is_controlling());
	testing::assert_eq!(storage.names().await, ["static-v1"]);
	testing::assert_eq!(storage.len("static-v1"), 5);
	testing::assert_eq!(network.calls(), 5);

	Ok(())
}

#[tokio::test]
async fn install_is_all_or_nothing() -> testing::Result
{
	let storage = MemoryCacheStorage::new();
	let network = StubNetwork::with_shell();
	let mut worker = OfflineWorker::new(config("v1")?.with_cdn_assets(), storage.clone(), network);

	// Only one of the CDN assets is known to the stub network.
	testing::assert_matches!(worker.install().await, Err(InstallError::Status { status, .. }) if *status == StatusCode::NOT_FOUND);
	testing::assert_eq!(worker.state(), WorkerState::Parsed);
	testing::assert!(storage.names().await.is_empty());

	Ok(())
}

#[tokio::test]
async fn install_fails_offline() -> testing::Result
{
	let storage = MemoryCacheStorage::new();
	let network = StubNetwork::with_shell();
	let mut worker = OfflineWorker::new(config("v1")?, storage.clone(), network.clone());

	network.go_offline();

	testing::assert_matches!(worker.install().await, Err(InstallError::Fetch { .. }));
	testing::assert!(storage.names().await.is_empty());
	testing::assert_matches!(worker.activate().await, Err(ActivateError::NotInstalled));

	Ok(())
}

#[tokio::test]
async fn offline_icon_comes_from_static_partition() -> testing::Result
{
	let storage = MemoryCacheStorage::new();
	let network = StubNetwork::with_shell();
	let worker = activated("v1", &storage, &network).await?;

	network.go_offline();

	let calls_before = network.calls();
	let event = worker.handle_fetch(&get("https://lotac.vercel.app/icons/icon-192.png")?).await?;

	testing::assert_eq!(event, FetchEvent::Respond {
		response: Response::new(StatusCode::OK, "icon-192"),
		from: ServedFrom::Cache,
	});

	testing::assert_eq!(network.calls(), calls_before, "no network attempt");

	Ok(())
}

#[tokio::test]
async fn version_bump_drops_old_partitions() -> testing::Result
{
	let storage = MemoryCacheStorage::new();
	let network = StubNetwork::with_shell();
	let old = activated("v1", &storage, &network).await?;

	// Populates `runtime-v1`.
	old.handle_fetch(&get("https://cdn.jsdelivr.net/npm/flatpickr")?).await?;
	storage
		.put("legacy", &get(ORIGIN)?, Response::new(StatusCode::OK, "old shell"))
		.await;

	testing::assert_eq!(storage.names().await, ["legacy", "runtime-v1", "static-v1"]);

	let mut new = OfflineWorker::new(config("v2")?, storage.clone(), network.clone());

	new.install().await?;

	let deleted = new.activate().await?;

	testing::assert_eq!(deleted, ["legacy", "runtime-v1", "static-v1"]);
	testing::assert_eq!(storage.names().await, ["static-v2"]);
	testing::assert!(new.is_controlling());

	Ok(())
}

#[tokio::test]
async fn reactivating_the_same_version_keeps_partitions() -> testing::Result
{
	let storage = MemoryCacheStorage::new();
	let network = StubNetwork::with_shell();
	let mut worker = activated("v1", &storage, &network).await?;

	worker.handle_fetch(&get("https://lotac.vercel.app/api/geocode?q=Paris")?).await?;

	testing::assert!(worker.activate().await?.is_empty());
	testing::assert_eq!(storage.names().await, ["runtime-v1", "static-v1"]);

	Ok(())
}

#[tokio::test]
async fn passthrough_until_activated_and_for_non_get() -> testing::Result
{
	let storage = MemoryCacheStorage::new();
	let network = StubNetwork::with_shell();
	let mut worker = OfflineWorker::new(config("v1")?, storage.clone(), network.clone());
	let shell = get(ORIGIN)?;

	testing::assert_eq!(worker.handle_fetch(&shell).await?, FetchEvent::Passthrough);

	worker.install().await?;

	testing::assert_eq!(worker.handle_fetch(&shell).await?, FetchEvent::Passthrough);

	worker.activate().await?;

	let calls_before = network.calls();
	let post = Request::new(Method::POST, Url::parse("https://lotac.vercel.app/api/geocode")?);

	testing::assert_eq!(worker.handle_fetch(&post).await?, FetchEvent::Passthrough);
	testing::assert_eq!(network.calls(), calls_before);

	Ok(())
}

#[tokio::test]
async fn api_is_network_first() -> testing::Result
{
	let storage = MemoryCacheStorage::new();
	let network = StubNetwork::with_shell();
	let worker = activated("v1", &storage, &network).await?;
	let paris = get("https://lotac.vercel.app/api/geocode?q=Paris")?;

	let online = worker.handle_fetch(&paris).await?;
	let again = worker.handle_fetch(&paris).await?;

	testing::assert_matches!(online, FetchEvent::Respond { from: ServedFrom::Network, .. });
	testing::assert_matches!(again, FetchEvent::Respond { from: ServedFrom::Network, .. }, "api always goes to the network first");
	testing::assert_eq!(storage.len("runtime-v1"), 1);

	network.go_offline();

	testing::assert_matches!(worker.handle_fetch(&paris).await?, FetchEvent::Respond { from: ServedFrom::Cache, .. });

	let lyon = get("https://lotac.vercel.app/api/geocode?q=Lyon")?;

	testing::assert_matches!(worker.handle_fetch(&lyon).await, Err(FetchError::Offline { .. }));

	Ok(())
}

#[tokio::test]
async fn unsuccessful_responses_are_not_cached() -> testing::Result
{
	let storage = MemoryCacheStorage::new();
	let network = StubNetwork::with_shell();
	let worker = activated("v1", &storage, &network).await?;
	let busy = get("https://lotac.vercel.app/api/geocode?q=Busy")?;

	let event = worker.handle_fetch(&busy).await?;

	testing::assert_matches!(
		event,
		FetchEvent::Respond { response, from: ServedFrom::Network } if response.status == StatusCode::BAD_GATEWAY
	);

	testing::assert_eq!(storage.len("runtime-v1"), 0);

	network.go_offline();

	testing::assert_matches!(worker.handle_fetch(&busy).await, Err(FetchError::Offline { .. }));

	Ok(())
}

#[tokio::test]
async fn other_requests_are_cache_first() -> testing::Result
{
	let storage = MemoryCacheStorage::new();
	let network = StubNetwork::with_shell();
	let worker = activated("v1", &storage, &network).await?;
	let script = get("https://cdn.jsdelivr.net/npm/flatpickr")?;

	testing::assert_matches!(worker.handle_fetch(&script).await?, FetchEvent::Respond { from: ServedFrom::Network, .. });

	let calls_before = network.calls();

	testing::assert_matches!(worker.handle_fetch(&script).await?, FetchEvent::Respond { from: ServedFrom::Cache, .. });
	testing::assert_eq!(network.calls(), calls_before);
	testing::assert!(storage.match_in("static-v1", &script).await.is_none());

	network.go_offline();

	let unknown = get("https://cdn.jsdelivr.net/npm/html2pdf.js")?;

	testing::assert_matches!(worker.handle_fetch(&unknown).await, Err(FetchError::Offline { .. }));

	Ok(())
}

#[tokio::test]
async fn shell_miss_is_stored_in_static_partition() -> testing::Result
{
	let storage = MemoryCacheStorage::new();
	let network = StubNetwork::with_shell();
	let mut config = config("v1")?;

	config.manifest = vec![Box::from("/")];

	let mut worker = OfflineWorker::new(config, storage.clone(), network.clone());

	worker.install().await?;
	worker.activate().await?;

	let icon = get("https://lotac.vercel.app/icons/icon-512.png")?;

	testing::assert_matches!(worker.handle_fetch(&icon).await?, FetchEvent::Respond { from: ServedFrom::Network, .. });
	testing::assert!(storage.match_in("static-v1", &icon).await.is_some());
	testing::assert!(storage.match_in("runtime-v1", &icon).await.is_none());

	Ok(())
}
