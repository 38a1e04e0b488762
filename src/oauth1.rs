//! OAuth 1.0a request signing with RSA-SHA1 (RFC 5849 §3.4.3).
//!
//! Two signing strategies cover every call the clients make:
//!
//! - [`OAuth1Signer::consumer_only`] signs with the consumer key alone. The request-token step
//!   uses it, and [`OAuth1Signer::with_token`] plus [`OAuth1Signer::with_verifier`] extend it for
//!   the access-token step.
//! - [`OAuth1Signer::for_installation`] signs with the consumer key and the durable access token.
//!
//! Signatures travel in the `Authorization` header. Query parameters are part of the signature
//! base string; JSON bodies are not.

pub mod key;
pub mod signature;

pub use key::parse_private_key;
pub use signature::{percent_encode, signature_base_string};

// crates.io
use rand::{Rng, distr::Alphanumeric};
use rsa::RsaPrivateKey;
// self
use crate::{
	_prelude::*,
	auth::{ConsumerCredentials, InstallationCredentials},
	error::SigningError,
	http::HttpMethod,
};

/// Value of `oauth_signature_method` for every signed request.
pub const SIGNATURE_METHOD: &str = "RSA-SHA1";
/// Value of `oauth_version` for every signed request.
pub const OAUTH_VERSION: &str = "1.0";

const NONCE_LEN: usize = 32;

/// Produces `Authorization` headers for one signing identity.
///
/// RSA-SHA1 signs with the consumer's private key only, so token secrets never enter the
/// signature and the signer does not hold them.
#[derive(Clone)]
pub struct OAuth1Signer {
	consumer_key: String,
	private_key: RsaPrivateKey,
	token: Option<String>,
	verifier: Option<String>,
}
impl OAuth1Signer {
	/// Signs with the consumer identity alone (no resource-owner token).
	pub fn consumer_only(consumer: &ConsumerCredentials) -> Result<Self, SigningError> {
		let private_key = parse_private_key(consumer.private_key.expose())?;

		Ok(Self {
			consumer_key: consumer.consumer_key.clone(),
			private_key,
			token: None,
			verifier: None,
		})
	}

	/// Signs with the installation's consumer identity and durable access token.
	pub fn for_installation(credentials: &InstallationCredentials) -> Result<Self, SigningError> {
		Ok(Self::consumer_only(&credentials.consumer())?
			.with_token(credentials.access_token.clone()))
	}

	/// Adds a resource-owner token (`oauth_token`).
	pub fn with_token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());

		self
	}

	/// Adds the user-supplied verifier (`oauth_verifier`).
	pub fn with_verifier(mut self, verifier: impl Into<String>) -> Self {
		self.verifier = Some(verifier.into());

		self
	}

	/// Consumer key carried in `oauth_consumer_key`.
	pub fn consumer_key(&self) -> &str {
		&self.consumer_key
	}

	/// Resource-owner token carried in `oauth_token`, if any.
	pub fn token(&self) -> Option<&str> {
		self.token.as_deref()
	}

	/// Builds the `Authorization` header for `method` + `url` with a fresh nonce and timestamp.
	pub fn authorization_header(
		&self,
		method: HttpMethod,
		url: &Url,
	) -> Result<String, SigningError> {
		let nonce = random_nonce();
		let timestamp = OffsetDateTime::now_utc().unix_timestamp();

		self.authorization_header_at(method, url, &nonce, timestamp)
	}

	/// Builds the `Authorization` header with a caller-supplied nonce and timestamp.
	pub fn authorization_header_at(
		&self,
		method: HttpMethod,
		url: &Url,
		nonce: &str,
		timestamp: i64,
	) -> Result<String, SigningError> {
		let mut params = self.protocol_params(nonce, timestamp);
		let base_string = signature_base_string(method.as_str(), url, &params);
		let signature = signature::sign_rsa_sha1(&self.private_key, &base_string)?;

		params.push(("oauth_signature".into(), signature));

		Ok(signature::authorization_header(&params))
	}

	fn protocol_params(&self, nonce: &str, timestamp: i64) -> Vec<(String, String)> {
		let mut params = vec![
			("oauth_nonce".to_owned(), nonce.to_owned()),
			("oauth_timestamp".to_owned(), timestamp.to_string()),
			("oauth_version".to_owned(), OAUTH_VERSION.to_owned()),
			("oauth_signature_method".to_owned(), SIGNATURE_METHOD.to_owned()),
			("oauth_consumer_key".to_owned(), self.consumer_key.clone()),
		];

		if let Some(token) = &self.token {
			params.push(("oauth_token".into(), token.clone()));
		}
		if let Some(verifier) = &self.verifier {
			params.push(("oauth_verifier".into(), verifier.clone()));
		}

		params
	}
}
impl Debug for OAuth1Signer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth1Signer")
			.field("consumer_key", &self.consumer_key)
			.field("private_key", &"<redacted>")
			.field("token", &self.token)
			.field("verifier_set", &self.verifier.is_some())
			.finish()
	}
}

fn random_nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}
