//! Thread-safe in-memory [`CacheStore`] implementation for single-process deployments and tests.

// self
use crate::{
	_prelude::*,
	cache::{CacheFuture, CacheStore},
};

type Clock = Arc<dyn Fn() -> OffsetDateTime + Send + Sync>;

#[derive(Clone, Debug)]
struct CacheEntry {
	value: Value,
	expires_at: OffsetDateTime,
}

/// In-memory cache keyed by string, expiring entries lazily on read.
#[derive(Clone)]
pub struct MemoryCache {
	entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
	clock: Clock,
}
impl MemoryCache {
	/// Creates a cache that reads time from `clock` instead of the system clock.
	pub fn with_clock<F>(clock: F) -> Self
	where
		F: 'static + Fn() -> OffsetDateTime + Send + Sync,
	{
		Self { entries: Default::default(), clock: Arc::new(clock) }
	}

	/// Number of stored entries, expired ones included until the next write.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Returns `true` when no entries are stored.
	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	fn get_now(&self, key: &str) -> Option<Value> {
		let now = (self.clock)();

		self.entries
			.read()
			.get(key)
			.filter(|entry| entry.expires_at > now)
			.map(|entry| entry.value.clone())
	}

	fn set_now(&self, key: &str, value: Value, ttl: Duration) {
		let now = (self.clock)();
		let mut entries = self.entries.write();

		entries.retain(|_, entry| entry.expires_at > now);

		if ttl.is_positive() {
			entries.insert(key.to_owned(), CacheEntry { value, expires_at: now + ttl });
		} else {
			entries.remove(key);
		}
	}
}
impl Default for MemoryCache {
	fn default() -> Self {
		Self::with_clock(OffsetDateTime::now_utc)
	}
}
impl Debug for MemoryCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MemoryCache").field("entries", &self.len()).finish()
	}
}
impl CacheStore for MemoryCache {
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Value>> {
		Box::pin(async move { Ok(self.get_now(key)) })
	}

	fn set<'a>(&'a self, key: &'a str, value: Value, ttl: Duration) -> CacheFuture<'a, ()> {
		Box::pin(async move {
			self.set_now(key, value, ttl);

			Ok(())
		})
	}
}
