//! Installation records and the identity accessor the authenticated client reads per call.

pub mod memory;

pub use memory::MemoryIdentity;

// self
use crate::{
	_prelude::*,
	auth::{InstallationCredentials, TokenSecret},
	request::BaseUrl,
};

/// Boxed future returned by [`IdentityProvider::identity`].
pub type IdentityFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, IdentityError>> + 'a + Send>>;

/// Read access to the externally owned identity of one installation.
///
/// The client calls [`IdentityProvider::identity`] before every signed request so rotated
/// credentials take effect without rebuilding the client.
pub trait IdentityProvider
where
	Self: Send + Sync,
{
	/// Loads the current identity payload.
	fn identity(&self) -> IdentityFuture<'_, IdentityData>;
}

/// Error type produced by [`IdentityProvider`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum IdentityError {
	/// The installation has no default identity.
	#[error("Installation has no identity.")]
	NotFound,
	/// Backend-level failure for the identity store.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Identity payload as persisted by the host; every field is optional until validated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityData {
	/// OAuth consumer key.
	#[serde(default)]
	pub consumer_key: Option<String>,
	/// PEM-encoded RSA private key.
	#[serde(default)]
	pub private_key: Option<TokenSecret>,
	/// Durable access token.
	#[serde(default)]
	pub access_token: Option<String>,
	/// Secret paired with the access token.
	#[serde(default)]
	pub access_token_secret: Option<TokenSecret>,
}
impl IdentityData {
	/// Validates that all four credentials are present and non-blank.
	pub fn credentials(&self) -> Result<InstallationCredentials> {
		Ok(InstallationCredentials {
			consumer_key: required_text(self.consumer_key.as_deref(), "consumer_key")?.to_owned(),
			private_key: required_secret(self.private_key.as_ref(), "private_key")?.clone(),
			access_token: required_text(self.access_token.as_deref(), "access_token")?.to_owned(),
			access_token_secret: required_secret(
				self.access_token_secret.as_ref(),
				"access_token_secret",
			)?
			.clone(),
		})
	}
}
impl From<InstallationCredentials> for IdentityData {
	fn from(credentials: InstallationCredentials) -> Self {
		let InstallationCredentials { consumer_key, private_key, access_token, access_token_secret } =
			credentials;

		Self {
			consumer_key: Some(consumer_key),
			private_key: Some(private_key),
			access_token: Some(access_token),
			access_token_secret: Some(access_token_secret),
		}
	}
}

/// Connection settings recorded on the installation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationMetadata {
	/// Jira Server base URL.
	pub base_url: BaseUrl,
	/// Whether TLS certificates are verified.
	#[serde(default = "verify_ssl_default")]
	pub verify_ssl: bool,
}
impl InstallationMetadata {
	/// Creates metadata with certificate verification enabled.
	pub fn new(base_url: BaseUrl) -> Self {
		Self { base_url, verify_ssl: true }
	}

	/// Overrides certificate verification.
	pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
		self.verify_ssl = verify_ssl;

		self
	}
}

fn verify_ssl_default() -> bool {
	true
}

fn required_text<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str> {
	value.filter(|text| !text.trim().is_empty()).ok_or(Error::MissingCredential { field })
}

fn required_secret<'a>(value: Option<&'a TokenSecret>, field: &'static str) -> Result<&'a TokenSecret> {
	value.filter(|secret| !secret.is_blank()).ok_or(Error::MissingCredential { field })
}
