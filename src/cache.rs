//! Cache contracts and the built-in in-memory store for short-lived GET responses.

pub mod memory;

pub use memory::MemoryCache;

// crates.io
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

/// Lifetime of every cached response.
pub const CACHE_TTL: Duration = Duration::seconds(60);

const KEY_PREFIX: &str = "jira-server:";

/// Boxed future returned by [`CacheStore`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + 'a + Send>>;

/// Process-wide key/value store with per-entry expiry.
///
/// Implementations must be safe for concurrent use; the clients never coordinate writes.
pub trait CacheStore
where
	Self: Send + Sync,
{
	/// Returns the live value stored under `key`, if any.
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Value>>;

	/// Stores `value` under `key` for `ttl`.
	fn set<'a>(&'a self, key: &'a str, value: Value, ttl: Duration) -> CacheFuture<'a, ()>;
}

/// Error type produced by [`CacheStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Backend-level failure for the cache engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Derives the cache key for a request path on a given deployment.
///
/// The base URL participates so two installations sharing one cache never collide.
pub fn cache_key(full_url: &str, base_url: &str) -> String {
	let mut hasher = Sha256::new();

	hasher.update(full_url.as_bytes());
	hasher.update(b":");
	hasher.update(base_url.as_bytes());

	format!("{KEY_PREFIX}{}", hex::encode(hasher.finalize()))
}

/// Mirrors the truthiness test used when reading the cache: `null`, `false`, `0`, `""`, `[]`,
/// and `{}` count as absent.
pub fn is_falsy(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(flag) => !flag,
		Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
		Value::String(text) => text.is_empty(),
		Value::Array(items) => items.is_empty(),
		Value::Object(fields) => fields.is_empty(),
	}
}
