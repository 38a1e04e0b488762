// self
use crate::{
	_prelude::*,
	auth::{AccessToken, OAuthTokenPair, RequestToken},
	http::HttpTransport,
	obs::{self, CallKind},
	oauth1::percent_encode,
	request::ApiCall,
	setup::SetupClient,
};

/// Servlet issuing temporary request tokens.
pub const REQUEST_TOKEN_PATH: &str = "/plugins/servlet/oauth/request-token";
/// Servlet exchanging an authorized request token for an access token.
pub const ACCESS_TOKEN_PATH: &str = "/plugins/servlet/oauth/access-token";
/// Page where the user approves the request token.
pub const AUTHORIZE_PATH: &str = "/plugins/servlet/oauth/authorize";

impl<C> SetupClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Step 1: obtains a temporary request token signed with the consumer identity alone.
	pub async fn get_request_token(&self) -> Result<RequestToken> {
		obs::observed(CallKind::RequestToken, "get_request_token", async {
			let response = self.request(ApiCall::post(REQUEST_TOKEN_PATH), None).await?;

			Ok(OAuthTokenPair::from_form(&response.text())?)
		})
		.await
	}

	/// Step 2: URL the user visits to approve `request_token`.
	///
	/// The token is percent-encoded; Jira-issued tokens are unreserved ASCII and pass through
	/// unchanged.
	pub fn get_authorize_url(&self, request_token: &RequestToken) -> String {
		format!(
			"{}{AUTHORIZE_PATH}?oauth_token={}",
			self.config.base_url,
			percent_encode(&request_token.oauth_token)
		)
	}

	/// Step 3: exchanges the approved request token and its verifier for the durable access
	/// token pair.
	///
	/// An absent or empty verifier means the user never finished authorizing; that fails with
	/// [`Error::MissingVerifier`] before anything is sent.
	pub async fn get_access_token(
		&self,
		request_token: &RequestToken,
		verifier: Option<&str>,
	) -> Result<AccessToken> {
		let verifier =
			verifier.filter(|value| !value.is_empty()).ok_or(Error::MissingVerifier)?;

		obs::observed(CallKind::AccessToken, "get_access_token", async {
			let signer = self
				.consumer_signer()?
				.with_token(request_token.oauth_token.clone())
				.with_verifier(verifier);
			let response = self.request(ApiCall::post(ACCESS_TOKEN_PATH), Some(&signer)).await?;

			Ok(OAuthTokenPair::from_form(&response.text())?)
		})
		.await
	}
}
