//! Consumer and installation credential sets.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenSecret},
};

/// Consumer identity registered as an application link on the Jira side.
///
/// Signs the two form-token steps of the handshake, before any resource-owner token exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerCredentials {
	/// OAuth consumer key.
	pub consumer_key: String,
	/// PEM-encoded RSA private key (PKCS#1 or PKCS#8).
	pub private_key: TokenSecret,
}
impl ConsumerCredentials {
	/// Creates consumer credentials from a key and PEM payload.
	pub fn new(consumer_key: impl Into<String>, private_key: impl Into<TokenSecret>) -> Self {
		Self { consumer_key: consumer_key.into(), private_key: private_key.into() }
	}
}

/// The four values required to sign calls on behalf of an installed tenant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationCredentials {
	/// OAuth consumer key.
	pub consumer_key: String,
	/// PEM-encoded RSA private key.
	pub private_key: TokenSecret,
	/// Durable access token from step 3 of the handshake.
	pub access_token: String,
	/// Secret paired with the access token.
	pub access_token_secret: TokenSecret,
}
impl InstallationCredentials {
	/// Combines consumer credentials with an access token pair.
	pub fn new(
		consumer: ConsumerCredentials,
		access_token: impl Into<String>,
		access_token_secret: TokenSecret,
	) -> Self {
		let ConsumerCredentials { consumer_key, private_key } = consumer;

		Self { consumer_key, private_key, access_token: access_token.into(), access_token_secret }
	}

	/// Builds credentials straight from the handshake's final step.
	pub fn from_access_token(consumer: ConsumerCredentials, token: &AccessToken) -> Self {
		Self::new(consumer, token.oauth_token.clone(), token.oauth_token_secret.clone())
	}

	/// Returns the consumer half of the credentials.
	pub fn consumer(&self) -> ConsumerCredentials {
		ConsumerCredentials::new(self.consumer_key.clone(), self.private_key.clone())
	}
}
