//! Installation-time client that drives the three-legged OAuth1 handshake and registers the
//! issue webhook.
//!
//! The handshake is a strict linear sequence: [`SetupClient::get_request_token`], then the user
//! visits [`SetupClient::get_authorize_url`] on the Jira side, then
//! [`SetupClient::get_access_token`] exchanges the verifier for the durable token pair. The
//! caller persists the result; this client keeps no state between steps.

pub mod builder;

mod handshake;
mod registration;

pub use builder::*;
pub use handshake::{ACCESS_TOKEN_PATH, AUTHORIZE_PATH, REQUEST_TOKEN_PATH};
pub use registration::WEBHOOK_PATH;

// self
use crate::{
	_prelude::*,
	auth::ConsumerCredentials,
	http::{ApiResponse, HttpTransport},
	oauth1::OAuth1Signer,
	request::{self, ApiCall, BaseUrl},
	webhook::WebhookCallback,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Setup client specialized for the crate's default reqwest transport.
pub type ReqwestSetupClient = SetupClient<ReqwestHttpClient>;

/// Validated configuration for [`SetupClient`]; build it with [`SetupConfig::builder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupConfig {
	/// Jira Server base URL.
	pub base_url: BaseUrl,
	/// Consumer identity registered as the application link.
	pub consumer: ConsumerCredentials,
	/// Whether TLS certificates are verified.
	pub verify_ssl: bool,
	/// Name given to registered webhooks.
	pub webhook_name: String,
	/// Public base URL receiving webhook deliveries.
	pub callback: Option<WebhookCallback>,
}
impl SetupConfig {
	/// Starts a builder for the deployment at `base_url`.
	pub fn builder(base_url: impl Into<String>) -> SetupConfigBuilder {
		SetupConfigBuilder::new(base_url)
	}
}

/// Client used while installing the integration against one Jira Server deployment.
pub struct SetupClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Validated configuration.
	pub config: SetupConfig,
	transport: Arc<C>,
}
impl<C> SetupClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client that reuses a caller-provided transport.
	pub fn with_transport(config: SetupConfig, transport: impl Into<Arc<C>>) -> Self {
		Self { config, transport: transport.into() }
	}

	/// Jira Server base URL.
	pub fn base_url(&self) -> &BaseUrl {
		&self.config.base_url
	}

	/// Sends `call`, signing with `signer` or, when none is given, with the consumer identity
	/// alone.
	pub async fn request(
		&self,
		call: ApiCall,
		signer: Option<&OAuth1Signer>,
	) -> Result<ApiResponse> {
		match signer {
			Some(signer) =>
				request::execute(self.transport.as_ref(), &self.config.base_url, call, signer).await,
			None => {
				let baseline = self.consumer_signer()?;

				request::execute(self.transport.as_ref(), &self.config.base_url, call, &baseline)
					.await
			},
		}
	}

	fn consumer_signer(&self) -> Result<OAuth1Signer> {
		Ok(OAuth1Signer::consumer_only(&self.config.consumer)?)
	}
}
#[cfg(feature = "reqwest")]
impl SetupClient<ReqwestHttpClient> {
	/// Creates a client backed by a reqwest transport honoring `config.verify_ssl`.
	pub fn new(config: SetupConfig) -> Result<Self> {
		let transport = ReqwestHttpClient::new(config.verify_ssl)?;

		Ok(Self::with_transport(config, transport))
	}
}
impl<C> Clone for SetupClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { config: self.config.clone(), transport: self.transport.clone() }
	}
}
impl<C> Debug for SetupClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SetupClient").field("config", &self.config).finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::{RecordingTransport, test_setup_config};

	#[tokio::test]
	async fn requests_without_signer_use_consumer_identity_only() {
		let transport = RecordingTransport::default();
		let client = SetupClient::<RecordingTransport>::with_transport(
			test_setup_config("https://jira.example.com"),
			transport.clone(),
		);

		client
			.request(ApiCall::get("/rest/api/2/serverInfo"), None)
			.await
			.expect("Call should succeed.");

		let requests = transport.requests();
		let header = requests
			.first()
			.and_then(|request| request.header("Authorization"))
			.expect("Request should carry an Authorization header.");

		assert!(header.contains("oauth_consumer_key=\"jira-consumer\""));
		assert!(!header.contains("oauth_token="));
	}

	#[tokio::test]
	async fn explicit_signer_wins_over_baseline() {
		let transport = RecordingTransport::default();
		let client = SetupClient::<RecordingTransport>::with_transport(
			test_setup_config("https://jira.example.com"),
			transport.clone(),
		);
		let signer = OAuth1Signer::consumer_only(&client.config.consumer)
			.expect("Signer should build.")
			.with_token("explicit-token");

		client
			.request(ApiCall::get("/rest/api/2/serverInfo"), Some(&signer))
			.await
			.expect("Call should succeed.");

		assert!(
			transport.requests()[0]
				.header("Authorization")
				.is_some_and(|header| header.contains("oauth_token=\"explicit-token\""))
		);
	}
}
