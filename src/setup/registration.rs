// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	auth::{ExternalId, InstallationCredentials},
	error::ConfigError,
	http::HttpTransport,
	obs::{self, CallKind},
	oauth1::OAuth1Signer,
	request::ApiCall,
	setup::SetupClient,
	webhook::{self, ISSUE_EVENTS},
};

/// Jira Server webhook registration endpoint.
pub const WEBHOOK_PATH: &str = "/rest/webhooks/1.0/webhook";

impl<C> SetupClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Registers an issue created/updated webhook pointing back at the configured callback.
	///
	/// Signs with the final installation credentials. The callback URL embeds an HS256 token
	/// carrying `external_id`, signed with `secret`. Returns Jira's response body verbatim.
	pub async fn create_issue_webhook(
		&self,
		external_id: &ExternalId,
		secret: &str,
		credentials: &InstallationCredentials,
	) -> Result<Value> {
		let callback = self.config.callback.as_ref().ok_or(ConfigError::MissingCallback)?;

		obs::observed(CallKind::Webhook, "create_issue_webhook", async {
			let token = webhook::encode_token(external_id, secret)?;
			let body = json!({
				"name": self.config.webhook_name,
				"url": callback.issue_updated_url(&token),
				"events": ISSUE_EVENTS,
			});
			let signer = OAuth1Signer::for_installation(credentials)?;
			let response =
				self.request(ApiCall::post(WEBHOOK_PATH).json(body), Some(&signer)).await?;

			Ok(response.json()?)
		})
		.await
	}
}
