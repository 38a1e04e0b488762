// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use jira_server_oauth1::{
	auth::{ExternalId, InstallationCredentials, RequestToken},
	error::Error,
	setup::{ReqwestSetupClient, SetupConfig},
	webhook::{self, WebhookCallback},
};

const CONSUMER_KEY: &str = "jira-consumer";
const PRIVATE_KEY_PEM: &str = include_str!("fixtures/rsa_private_key.pem");
const CALLBACK_BASE: &str = "https://integrations.example.com";

fn build_setup_client(server: &MockServer) -> ReqwestSetupClient {
	let config = SetupConfig::builder(server.base_url())
		.consumer_key(CONSUMER_KEY)
		.private_key(PRIVATE_KEY_PEM)
		.callback(
			WebhookCallback::parse(CALLBACK_BASE).expect("Callback base should parse successfully."),
		)
		.build()
		.expect("Setup configuration should build successfully.");

	ReqwestSetupClient::new(config).expect("Setup client should build successfully.")
}

#[tokio::test]
async fn three_legged_handshake_yields_access_token() {
	let server = MockServer::start_async().await;
	let client = build_setup_client(&server);
	let request_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/plugins/servlet/oauth/request-token")
				.header_exists("authorization");
			then.status(200)
				.header("content-type", "text/plain")
				.body("oauth_token=req-token&oauth_token_secret=req-secret");
		})
		.await;
	let access_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/plugins/servlet/oauth/access-token")
				.header_exists("authorization");
			then.status(200)
				.header("content-type", "text/plain")
				.body("oauth_token=acc-token&oauth_token_secret=acc-secret");
		})
		.await;
	let request_token =
		client.get_request_token().await.expect("Request token step should succeed.");

	assert_eq!(request_token.oauth_token, "req-token");
	assert_eq!(request_token.oauth_token_secret.expose(), "req-secret");
	assert_eq!(
		client.get_authorize_url(&request_token),
		format!("{}/plugins/servlet/oauth/authorize?oauth_token=req-token", server.base_url())
	);

	let access_token = client
		.get_access_token(&request_token, Some("verifier-1"))
		.await
		.expect("Access token step should succeed.");

	assert_eq!(access_token.oauth_token, "acc-token");
	assert_eq!(access_token.oauth_token_secret.expose(), "acc-secret");

	request_mock.assert_calls_async(1).await;
	access_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn empty_verifier_never_reaches_the_server() {
	let server = MockServer::start_async().await;
	let client = build_setup_client(&server);
	let access_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/plugins/servlet/oauth/access-token");
			then.status(200).body("oauth_token=acc-token&oauth_token_secret=acc-secret");
		})
		.await;
	let request_token = RequestToken::new("req-token", "req-secret");
	let err = client
		.get_access_token(&request_token, Some(""))
		.await
		.expect_err("Empty verifier should be rejected.");

	assert!(matches!(err, Error::MissingVerifier));

	access_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn rejected_request_token_surfaces_status() {
	let server = MockServer::start_async().await;
	let client = build_setup_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/plugins/servlet/oauth/request-token");
			then.status(401).body("oauth_problem=consumer_key_unknown");
		})
		.await;
	let err = client.get_request_token().await.expect_err("401 should fail the first step.");

	match err {
		Error::Api(api) => {
			assert_eq!(api.status, 401);
			assert_eq!(api.body_preview, "oauth_problem=consumer_key_unknown");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn webhook_registration_posts_token_url() {
	let server = MockServer::start_async().await;
	let client = build_setup_client(&server);
	let external_id = ExternalId::new("install-42").expect("External identifier should be valid.");
	let token =
		webhook::encode_token(&external_id, "shared-secret").expect("Webhook token should encode.");
	let expected_url = format!("{CALLBACK_BASE}/extensions/jira-server/issue-updated/{token}/");
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/rest/webhooks/1.0/webhook")
				.header("content-type", "application/json")
				.header_exists("authorization")
				.json_body(json!({
					"name": "Issue Sync",
					"url": expected_url,
					"events": ["jira:issue_created", "jira:issue_updated"],
				}));
			then.status(201)
				.header("content-type", "application/json")
				.body("{\"self\":\"https://jira.example.com/rest/webhooks/1.0/webhook/7\"}");
		})
		.await;
	let credentials = InstallationCredentials::new(
		client.config.consumer.clone(),
		"acc-token",
		"acc-secret".into(),
	);
	let registration = client
		.create_issue_webhook(&external_id, "shared-secret", &credentials)
		.await
		.expect("Webhook registration should succeed.");

	assert_eq!(registration["self"], "https://jira.example.com/rest/webhooks/1.0/webhook/7");
	assert_eq!(
		webhook::verify_token(&token, "shared-secret").expect("Token should verify.").id,
		"install-42"
	);

	mock.assert_calls_async(1).await;
}
