//! Client-level error types shared by the setup and authenticated clients.

// self
use crate::{_prelude::*, http::HttpMethod};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const BODY_PREVIEW_LEN: usize = 512;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Jira Server answered with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// OAuth1 signature could not be produced.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Cache backend failure.
	#[error("{0}")]
	Cache(
		#[from]
		#[source]
		crate::cache::CacheError,
	),
	/// Identity backend failure.
	#[error("{0}")]
	Identity(
		#[from]
		#[source]
		crate::installation::IdentityError,
	),
	/// Webhook correlation token could not be encoded or verified.
	#[error("Webhook token could not be processed.")]
	WebhookToken(#[from] jsonwebtoken::errors::Error),

	/// The user never completed the authorization step of the handshake.
	#[error("Missing OAuth token verifier; authorization was not completed.")]
	MissingVerifier,
	/// The installation identity lacks one of the four signing credentials.
	#[error("Installation identity is missing the `{field}` credential.")]
	MissingCredential {
		/// Name of the absent credential field.
		field: &'static str,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Rejected input.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses something other than HTTP(S).
	#[error("Base URL `{url}` must use http or https.")]
	UnsupportedScheme {
		/// Rejected input.
		url: String,
	},
	/// A request URL assembled from the base URL cannot be parsed.
	#[error("Request URL `{url}` is invalid.")]
	InvalidUrl {
		/// Rejected URL.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Webhook callback base is not an absolute http(s) URL.
	#[error("Webhook callback base `{url}` is not an absolute http(s) URL.")]
	InvalidCallback {
		/// Rejected URL.
		url: String,
	},

	/// Setup configuration omitted the consumer key.
	#[error("Consumer key is required.")]
	MissingConsumerKey,
	/// Setup configuration omitted the private key.
	#[error("RSA private key is required.")]
	MissingPrivateKey,
	/// Setup configuration carries a private key that cannot be parsed.
	#[error("RSA private key is invalid.")]
	InvalidPrivateKey(#[source] SigningError),
	/// Webhook registration requested without a callback base.
	#[error("No webhook callback base is configured.")]
	MissingCallback,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling Jira Server.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Non-success HTTP response returned by Jira Server.
#[derive(Debug, ThisError)]
#[error("{method} {url} failed with HTTP {status}.")]
pub struct ApiError {
	/// HTTP method of the failed call.
	pub method: HttpMethod,
	/// URL of the failed call, query included.
	pub url: String,
	/// HTTP status code.
	pub status: u16,
	/// Leading slice of the response body for diagnostics.
	pub body_preview: String,
	/// Retry-After hint from upstream, if supplied.
	pub retry_after: Option<Duration>,
}
impl ApiError {
	/// Builds an error from the response that failed.
	pub fn from_response(
		method: HttpMethod,
		url: &Url,
		status: u16,
		body: &[u8],
		retry_after: Option<Duration>,
	) -> Self {
		let body_preview = String::from_utf8_lossy(body).chars().take(BODY_PREVIEW_LEN).collect();

		Self { method, url: url.to_string(), status, body_preview, retry_after }
	}
}

/// OAuth1 signing failures.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// The PEM payload is neither PKCS#1 nor PKCS#8 RSA key material.
	#[error("Private key could not be parsed: {reason}.")]
	InvalidPrivateKey {
		/// Parser-supplied reason string.
		reason: String,
	},
	/// RSA signing failed.
	#[error("RSA-SHA1 signing failed.")]
	Rsa(#[from] rsa::Error),
}

/// Response decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Response body is not the expected JSON.
	#[error("Jira Server returned malformed JSON.")]
	Json {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Form-encoded token response lacks a required field.
	#[error("Token response is missing `{field}`.")]
	MissingTokenField {
		/// Missing field name.
		field: &'static str,
	},
}
