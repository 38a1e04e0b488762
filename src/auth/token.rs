//! OAuth1 token pairs returned by the form-encoded handshake endpoints.

// self
use crate::{_prelude::*, auth::TokenSecret, error::DecodeError};

/// Token/secret pair issued by a Jira Server OAuth servlet.
///
/// Any parameters beyond the pair (for example `oauth_callback_confirmed`) are kept in `extra`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthTokenPair {
	/// Value of `oauth_token`.
	pub oauth_token: String,
	/// Value of `oauth_token_secret`.
	pub oauth_token_secret: TokenSecret,
	/// Remaining form parameters, verbatim.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub extra: BTreeMap<String, String>,
}
impl OAuthTokenPair {
	/// Creates a pair without extra parameters.
	pub fn new(oauth_token: impl Into<String>, oauth_token_secret: impl Into<TokenSecret>) -> Self {
		Self {
			oauth_token: oauth_token.into(),
			oauth_token_secret: oauth_token_secret.into(),
			extra: BTreeMap::new(),
		}
	}

	/// Parses a URL-encoded token response body.
	pub fn from_form(body: &str) -> Result<Self, DecodeError> {
		let mut fields = parse_form(body);
		let oauth_token = fields
			.remove("oauth_token")
			.ok_or(DecodeError::MissingTokenField { field: "oauth_token" })?;
		let oauth_token_secret = fields
			.remove("oauth_token_secret")
			.ok_or(DecodeError::MissingTokenField { field: "oauth_token_secret" })?;

		Ok(Self { oauth_token, oauth_token_secret: oauth_token_secret.into(), extra: fields })
	}
}

/// Short-lived pair from step 1, held by the caller until step 3.
pub type RequestToken = OAuthTokenPair;
/// Durable pair from step 3, persisted by the installation store.
pub type AccessToken = OAuthTokenPair;

/// Decodes an `application/x-www-form-urlencoded` body into key/value pairs.
///
/// Later duplicates win.
pub fn parse_form(body: &str) -> BTreeMap<String, String> {
	url::form_urlencoded::parse(body.trim().as_bytes()).into_owned().collect()
}
