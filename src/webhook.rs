//! Issue webhook payloads and the signed correlation token embedded in callback URLs.
//!
//! Jira Server delivers issue events to
//! `{callback_base}/extensions/jira-server/issue-updated/{token}/`. The token is an HS256 JWT
//! whose only claim is the external installation identifier, so the receiving endpoint can
//! route a delivery back to its tenant without trusting anything else in the request.

// crates.io
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
// self
use crate::{_prelude::*, auth::ExternalId, error::ConfigError};

/// Issue events every registered webhook subscribes to.
pub const ISSUE_EVENTS: [&str; 2] = ["jira:issue_created", "jira:issue_updated"];
/// Name given to the webhook when the setup configuration does not override it.
pub const DEFAULT_WEBHOOK_NAME: &str = "Issue Sync";

const ISSUE_UPDATED_PATH: &str = "extensions/jira-server/issue-updated";

/// Claims carried by the webhook correlation token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookClaims {
	/// External installation identifier.
	pub id: String,
}

/// Signs `external_id` into an HS256 token with `secret`.
pub fn encode_token(external_id: &ExternalId, secret: &str) -> Result<String> {
	let claims = WebhookClaims { id: external_id.to_string() };

	Ok(jsonwebtoken::encode(
		&Header::new(Algorithm::HS256),
		&claims,
		&EncodingKey::from_secret(secret.as_bytes()),
	)?)
}

/// Verifies a token produced by [`encode_token`] and returns its claims.
///
/// Tokens carry no expiry; only the signature and algorithm are checked.
pub fn verify_token(token: &str, secret: &str) -> Result<WebhookClaims> {
	let mut validation = Validation::new(Algorithm::HS256);

	validation.required_spec_claims.clear();
	validation.validate_exp = false;

	let data = jsonwebtoken::decode::<WebhookClaims>(
		token,
		&DecodingKey::from_secret(secret.as_bytes()),
		&validation,
	)?;

	Ok(data.claims)
}

/// Public base URL of the integration that receives webhook deliveries.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookCallback {
	base: String,
}
impl WebhookCallback {
	/// Validates an absolute http(s) base URL; a trailing slash is ignored.
	pub fn parse(raw: impl AsRef<str>) -> Result<Self, ConfigError> {
		let trimmed = raw.as_ref().trim().trim_end_matches('/');
		let invalid = || ConfigError::InvalidCallback { url: trimmed.to_owned() };
		let url = Url::parse(trimmed).map_err(|_| invalid())?;

		if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
			return Err(invalid());
		}

		Ok(Self { base: trimmed.to_owned() })
	}

	/// Returns the normalized base URL.
	pub fn as_str(&self) -> &str {
		&self.base
	}

	/// Builds the delivery URL for a signed correlation token.
	pub fn issue_updated_url(&self, token: &str) -> String {
		format!("{}/{ISSUE_UPDATED_PATH}/{token}/", self.base)
	}
}
impl Debug for WebhookCallback {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "WebhookCallback({})", self.base)
	}
}
impl Display for WebhookCallback {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.base)
	}
}
