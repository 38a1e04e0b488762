// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use parking_lot::Mutex;
use time::{Duration, OffsetDateTime, macros::datetime};
// self
use jira_server_oauth1::{
	auth::{ConsumerCredentials, InstallationCredentials, TokenSecret},
	cache::MemoryCache,
	client::ReqwestJiraServerClient,
	installation::{IdentityData, InstallationMetadata, MemoryIdentity},
	request::BaseUrl,
};

const PRIVATE_KEY_PEM: &str = include_str!("fixtures/rsa_private_key.pem");

fn identity_data(access_token: &str) -> IdentityData {
	IdentityData::from(InstallationCredentials::new(
		ConsumerCredentials::new("jira-consumer", PRIVATE_KEY_PEM),
		access_token,
		TokenSecret::new("access-secret"),
	))
}

fn build_client(server: &MockServer, cache: Arc<MemoryCache>) -> ReqwestJiraServerClient {
	let base_url =
		BaseUrl::parse(server.base_url()).expect("Mock server base URL should parse successfully.");
	let identity = Arc::new(MemoryIdentity::new(identity_data("access-token-1")));

	ReqwestJiraServerClient::new(InstallationMetadata::new(base_url), identity, cache)
		.expect("Authenticated client should build successfully.")
}

fn manual_cache() -> (Arc<MemoryCache>, Arc<Mutex<OffsetDateTime>>) {
	let now = Arc::new(Mutex::new(datetime!(2024-01-01 00:00 UTC)));
	let clock = now.clone();

	(Arc::new(MemoryCache::with_clock(move || *clock.lock())), now)
}

#[tokio::test]
async fn priorities_are_cached_until_ttl_expires() {
	let server = MockServer::start_async().await;
	let (cache, now) = manual_cache();
	let client = build_client(&server, cache);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/rest/api/2/priority").header_exists("authorization");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"id\":\"1\",\"name\":\"Blocker\"}]");
		})
		.await;
	let first = client.get_priorities().await.expect("First lookup should succeed.");
	let second = client.get_priorities().await.expect("Cached lookup should succeed.");

	assert_eq!(first, second);
	assert_eq!(first[0]["name"], "Blocker");

	mock.assert_calls_async(1).await;

	*now.lock() += Duration::seconds(61);

	client.get_priorities().await.expect("Lookup after expiry should succeed.");

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn empty_version_lists_are_refetched() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Arc::new(MemoryCache::default()));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/rest/api/2/project/42/versions");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;

	client.get_versions(42).await.expect("First lookup should succeed.");
	client.get_versions(42).await.expect("Second lookup should succeed.");

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn search_and_metadata_requests_carry_expected_parameters() {
	let server = MockServer::start_async().await;
	let client = build_client(&server, Arc::new(MemoryCache::default()));
	let search_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/rest/api/2/search/")
				.query_param("jql", "text ~ \"foo \\\"bar\\\"\"");
			then.status(200).header("content-type", "application/json").body("{\"issues\":[]}");
		})
		.await;
	let meta_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/rest/api/2/issue/createmeta")
				.query_param("expand", "projects.issuetypes.fields")
				.query_param("projectIds", "10000");
			then.status(200).header("content-type", "application/json").body("{\"projects\":[]}");
		})
		.await;
	let issue_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/rest/api/2/issue/ABC-123");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"key\":\"ABC-123\"}");
		})
		.await;

	client.search_issues("foo \"bar\"").await.expect("Search should succeed.");
	client.get_create_meta(Some(10000)).await.expect("Createmeta should succeed.");

	let issue = client.get_issue("ABC-123").await.expect("Issue fetch should succeed.");

	assert_eq!(issue["key"], "ABC-123");

	search_mock.assert_calls_async(1).await;
	meta_mock.assert_calls_async(1).await;
	issue_mock.assert_calls_async(1).await;
}
