//! Shared request execution for the setup and authenticated clients.
//!
//! Both clients resolve an [`ApiCall`] against their [`BaseUrl`], pick a signing strategy, and
//! hand the pair to [`execute`]. The function signs, dispatches through the transport, and turns
//! non-2xx statuses into [`ApiError`]; nothing is retried.

// self
use crate::{
	_prelude::*,
	error::{ApiError, ConfigError},
	http::{ApiRequest, ApiResponse, HttpMethod, HttpTransport},
	oauth1::OAuth1Signer,
};

/// Root of a Jira Server deployment, context path included (for example
/// `https://intranet.example.com/jira`).
///
/// Stored without a trailing slash so endpoint paths can be appended verbatim.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BaseUrl(String);
impl BaseUrl {
	/// Validates and normalizes a base URL.
	pub fn parse(raw: impl AsRef<str>) -> Result<Self, ConfigError> {
		let trimmed = raw.as_ref().trim().trim_end_matches('/');
		let url = Url::parse(trimmed)
			.map_err(|source| ConfigError::InvalidBaseUrl { url: trimmed.to_owned(), source })?;

		if !matches!(url.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedScheme { url: trimmed.to_owned() });
		}

		Ok(Self(trimmed.to_owned()))
	}

	/// Returns the normalized base URL.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Resolves an endpoint path (or an already absolute URL) against the base.
	pub fn join(&self, path: &str) -> Result<Url, ConfigError> {
		let raw = if path.starts_with("http://") || path.starts_with("https://") {
			path.to_owned()
		} else if path.starts_with('/') {
			format!("{}{path}", self.0)
		} else {
			format!("{}/{path}", self.0)
		};

		Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { url: raw, source })
	}
}
impl AsRef<str> for BaseUrl {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl TryFrom<String> for BaseUrl {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(value)
	}
}
impl From<BaseUrl> for String {
	fn from(value: BaseUrl) -> Self {
		value.0
	}
}
impl Debug for BaseUrl {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "BaseUrl({})", self.0)
	}
}
impl Display for BaseUrl {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Description of one outbound call, prior to signing.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiCall {
	/// HTTP method.
	pub method: HttpMethod,
	/// Endpoint path relative to the base URL, or an absolute URL.
	pub path: String,
	/// Query parameters, appended in order.
	pub query: Vec<(String, String)>,
	/// JSON body, if any.
	pub json: Option<Value>,
}
impl ApiCall {
	/// Creates a `GET` call.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(HttpMethod::Get, path)
	}

	/// Creates a `POST` call.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(HttpMethod::Post, path)
	}

	/// Creates a call for an arbitrary method.
	pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
		Self { method, path: path.into(), query: Vec::new(), json: None }
	}

	/// Appends a query parameter.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Sets the JSON body.
	pub fn json(mut self, body: Value) -> Self {
		self.json = Some(body);

		self
	}
}

/// Signs `call` with `signer`, sends it through `transport`, and rejects non-2xx responses.
pub async fn execute<C>(
	transport: &C,
	base_url: &BaseUrl,
	call: ApiCall,
	signer: &OAuth1Signer,
) -> Result<ApiResponse>
where
	C: ?Sized + HttpTransport,
{
	let ApiCall { method, path, query, json } = call;
	let mut url = base_url.join(&path)?;

	if !query.is_empty() {
		url.query_pairs_mut().extend_pairs(query.iter());
	}

	let mut headers = vec![
		("Authorization".to_owned(), signer.authorization_header(method, &url)?),
		("Accept".to_owned(), "application/json".to_owned()),
	];
	let body = json.map(|value| {
		headers.push(("Content-Type".to_owned(), "application/json".to_owned()));

		value.to_string().into_bytes()
	});
	let response =
		transport.execute(ApiRequest { method, url: url.clone(), headers, body }).await?;

	if !response.is_success() {
		return Err(ApiError::from_response(
			method,
			&url,
			response.status,
			&response.body,
			response.retry_after,
		)
		.into());
	}

	Ok(response)
}
