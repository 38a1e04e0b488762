//! Signature base string, percent-encoding, and header assembly (RFC 5849 §3.4-§3.6).

// std
use std::borrow::Cow;
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha1::{Digest, Sha1};
// self
use crate::{_prelude::*, error::SigningError};

/// Percent-encodes per RFC 5849 §3.6: everything except `ALPHA`, `DIGIT`, `-`, `.`, `_`, `~`.
pub fn percent_encode(value: &str) -> Cow<'_, str> {
	urlencoding::encode(value)
}

/// Builds the signature base string for `method` + `url` and the protocol `params`.
///
/// Query parameters are read from `url`; `params` carries the `oauth_*` values (minus
/// `oauth_signature`) and any form-body parameters.
pub fn signature_base_string(method: &str, url: &Url, params: &[(String, String)]) -> String {
	let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
	let normalized = normalize_parameters(query.iter().chain(params));

	format!(
		"{}&{}&{}",
		method.to_ascii_uppercase(),
		percent_encode(&base_string_uri(url)),
		percent_encode(&normalized)
	)
}

/// Scheme, host, non-default port, and path; no query or fragment (§3.4.1.2).
pub(crate) fn base_string_uri(url: &Url) -> String {
	let host = url.host_str().unwrap_or_default();

	match url.port() {
		Some(port) => format!("{}://{host}:{port}{}", url.scheme(), url.path()),
		None => format!("{}://{host}{}", url.scheme(), url.path()),
	}
}

fn normalize_parameters<'a, I>(params: I) -> String
where
	I: IntoIterator<Item = &'a (String, String)>,
{
	let mut encoded: Vec<(String, String)> = params
		.into_iter()
		.map(|(key, value)| (percent_encode(key).into_owned(), percent_encode(value).into_owned()))
		.collect();

	encoded.sort();

	encoded.iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>().join("&")
}

pub(crate) fn sign_rsa_sha1(key: &RsaPrivateKey, base_string: &str) -> Result<String, SigningError> {
	let digest = Sha1::digest(base_string.as_bytes());
	let signature = key.sign(Pkcs1v15Sign::new::<Sha1>(), &digest)?;

	Ok(STANDARD.encode(signature))
}

/// Renders `OAuth k="v", ...` with percent-encoded keys and values.
pub(crate) fn authorization_header(params: &[(String, String)]) -> String {
	let rendered = params
		.iter()
		.map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
		.collect::<Vec<_>>()
		.join(", ");

	format!("OAuth {rendered}")
}
