//! Walks through the Jira Server installation flow against a mock server: the three-legged
//! OAuth1 handshake, webhook registration, and a cached authenticated lookup.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use jira_server_oauth1::{
	auth::{ExternalId, InstallationCredentials},
	cache::MemoryCache,
	client::ReqwestJiraServerClient,
	installation::{IdentityData, InstallationMetadata, MemoryIdentity},
	setup::{ReqwestSetupClient, SetupConfig},
	webhook::WebhookCallback,
};

const PRIVATE_KEY_PEM: &str = include_str!("../tests/fixtures/rsa_private_key.pem");

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/plugins/servlet/oauth/request-token");
			then.status(200).body("oauth_token=demo-request&oauth_token_secret=demo-request-secret");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/plugins/servlet/oauth/access-token");
			then.status(200).body("oauth_token=demo-access&oauth_token_secret=demo-access-secret");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/rest/webhooks/1.0/webhook");
			then.status(201)
				.header("content-type", "application/json")
				.body("{\"name\":\"Issue Sync\"}");
		})
		.await;

	let priorities = server
		.mock_async(|when, then| {
			when.method(GET).path("/rest/api/2/priority");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"id\":\"1\",\"name\":\"Highest\"}]");
		})
		.await;
	let config = SetupConfig::builder(server.base_url())
		.consumer_key("demo-consumer")
		.private_key(PRIVATE_KEY_PEM)
		.callback(WebhookCallback::parse("https://integrations.example.com")?)
		.build()?;
	let setup = ReqwestSetupClient::new(config)?;
	let request_token = setup.get_request_token().await?;

	println!("Authorize at {}.", setup.get_authorize_url(&request_token));

	let access_token = setup.get_access_token(&request_token, Some("demo-verifier")).await?;
	let credentials =
		InstallationCredentials::from_access_token(setup.config.consumer.clone(), &access_token);
	let registration = setup
		.create_issue_webhook(&ExternalId::new("install-1")?, "webhook-secret", &credentials)
		.await?;

	println!("Registered webhook: {registration}.");

	let client = ReqwestJiraServerClient::new(
		InstallationMetadata::new(setup.base_url().clone()),
		Arc::new(MemoryIdentity::new(IdentityData::from(credentials))),
		Arc::new(MemoryCache::default()),
	)?;

	client.get_priorities().await?;

	let cached = client.get_priorities().await?;

	println!("Priorities: {cached}.");

	priorities.assert_calls_async(1).await;

	Ok(())
}
