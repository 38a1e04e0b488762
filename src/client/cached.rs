// self
use crate::{
	_prelude::*,
	cache::{self, CACHE_TTL},
	client::JiraServerClient,
	http::HttpTransport,
	obs::{self, CacheOutcome},
	request::ApiCall,
};

impl<C> JiraServerClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Cache-aside GET of `full_url` (path plus any query string).
	///
	/// Falsy cached values (`null`, `false`, `0`, `""`, `[]`, `{}`) count as misses and are
	/// fetched again. Concurrent misses may both fetch and both write.
	pub async fn get_cached(&self, full_url: &str) -> Result<Value> {
		let key = cache::cache_key(full_url, self.metadata.base_url.as_str());

		if let Some(value) = self.cache.get(&key).await?.filter(|value| !cache::is_falsy(value)) {
			obs::record_cache_lookup(CacheOutcome::Hit);

			return Ok(value);
		}

		obs::record_cache_lookup(CacheOutcome::Miss);

		let value = self.get(ApiCall::get(full_url)).await?;

		self.cache.set(&key, value.clone(), CACHE_TTL).await?;

		Ok(value)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::RecordingTransport, client::tests::client_with, http::ApiResponse};

	#[tokio::test]
	async fn second_lookup_within_ttl_is_served_from_cache() {
		let transport = RecordingTransport::default();
		let (client, _) = client_with(&transport);

		transport.respond_with(ApiResponse::new(200, b"[{\"id\":\"1\"}]".to_vec()));

		let first = client.get_priorities().await.expect("First lookup should succeed.");
		let second = client.get_priorities().await.expect("Second lookup should succeed.");

		assert_eq!(first, second);
		assert_eq!(transport.requests().len(), 1);
	}

	#[tokio::test]
	async fn falsy_values_are_refetched() {
		let transport = RecordingTransport::default();
		let (client, _) = client_with(&transport);

		transport.respond_with(ApiResponse::new(200, b"[]".to_vec()));
		transport.respond_with(ApiResponse::new(200, b"[]".to_vec()));

		client.get_versions(42).await.expect("First lookup should succeed.");
		client.get_versions(42).await.expect("Second lookup should succeed.");

		let requests = transport.requests();

		assert_eq!(requests.len(), 2);
		assert_eq!(requests[1].url.path(), "/jira/rest/api/2/project/42/versions");
	}

	#[tokio::test]
	async fn failed_fetch_is_not_cached() {
		let transport = RecordingTransport::default();
		let (client, _) = client_with(&transport);

		transport.respond_with(ApiResponse::new(503, b"maintenance".to_vec()));

		assert!(matches!(client.get_priorities().await, Err(Error::Api(_))));

		client.get_priorities().await.expect("Retry should reach the server.");

		assert_eq!(transport.requests().len(), 2);
	}
}
