use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use super::{Request, Response};

/// Named partitions of stored responses, keyed by request.
///
/// Mirrors the browser's `CacheStorage`; a partition springs into existence
/// the first time something is stored in it.
pub trait CacheStorage: Send + Sync
{
	/// Stores `response` for `request` in `partition`, replacing any
	/// previous entry.
	async fn put(&self, partition: &str, request: &Request, response: Response);

	/// Looks `request` up in `partition` only.
	async fn match_in(&self, partition: &str, request: &Request) -> Option<Response>;

	/// The names of every existing partition.
	async fn names(&self) -> Vec<String>;

	/// Drops a whole partition. Returns whether it existed.
	async fn delete(&self, partition: &str) -> bool;
}

type Partition = HashMap<Request, Response>;

/// In-memory [`CacheStorage`].
///
/// Clones share the same underlying partitions.
#[derive(Debug, Default, Clone)]
pub struct MemoryCacheStorage
{
	partitions: Arc<RwLock<BTreeMap<String, Partition>>>,
}

impl MemoryCacheStorage
{
	pub fn new() -> Self
	{
		Self::default()
	}

	/// Number of entries in `partition`.
	pub fn len(&self, partition: &str) -> usize
	{
		self.partitions
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(partition)
			.map_or(0, HashMap::len)
	}
}

impl CacheStorage for MemoryCacheStorage
{
	async fn put(&self, partition: &str, request: &Request, response: Response)
	{
		self.partitions
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.entry(partition.to_owned())
			.or_default()
			.insert(request.clone(), response);
	}

	async fn match_in(&self, partition: &str, request: &Request) -> Option<Response>
	{
		self.partitions
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(partition)?
			.get(request)
			.cloned()
	}

	async fn names(&self) -> Vec<String>
	{
		self.partitions
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.keys()
			.cloned()
			.collect()
	}

	async fn delete(&self, partition: &str) -> bool
	{
		self.partitions
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.remove(partition)
			.is_some()
	}
}
