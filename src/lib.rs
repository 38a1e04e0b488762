//! OAuth1 (RSA-SHA1) client for Jira Server: drive the three-legged setup handshake, sign REST
//! calls for an installed tenant, register issue webhooks, and cache slow-changing lookups.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod client;
pub mod error;
pub mod http;
pub mod installation;
pub mod oauth1;
pub mod obs;
pub mod request;
pub mod setup;
pub mod webhook;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Fixtures and a recording transport for tests; enabled via `cfg(test)` or the `test` crate
	//! feature so hosts can reuse them in their own suites.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// crates.io
	use parking_lot::Mutex;
	// self
	use crate::{
		auth::{ConsumerCredentials, InstallationCredentials, TokenSecret},
		http::{ApiRequest, ApiResponse, HttpTransport, TransportFuture},
		installation::{IdentityData, InstallationMetadata, MemoryIdentity},
		request::BaseUrl,
		setup::SetupConfig,
		webhook::WebhookCallback,
	};

	/// PKCS#1 PEM private key shared by every test fixture.
	pub const TEST_PRIVATE_KEY_PEM: &str = include_str!("../tests/fixtures/rsa_private_key.pem");
	/// The same key as [`TEST_PRIVATE_KEY_PEM`], PKCS#8 encoded.
	pub const TEST_PRIVATE_KEY_PKCS8_PEM: &str =
		include_str!("../tests/fixtures/rsa_private_key_pkcs8.pem");
	/// Consumer key used by test fixtures.
	pub const TEST_CONSUMER_KEY: &str = "jira-consumer";
	/// Callback base used when registering webhooks in tests.
	pub const TEST_CALLBACK_BASE: &str = "https://integrations.example.com";

	/// Consumer credentials backed by the fixture key.
	pub fn test_consumer() -> ConsumerCredentials {
		ConsumerCredentials::new(TEST_CONSUMER_KEY, TEST_PRIVATE_KEY_PEM)
	}

	/// Installation credentials backed by the fixture key and the provided token pair.
	pub fn test_credentials(access_token: &str, access_token_secret: &str) -> InstallationCredentials {
		InstallationCredentials::new(
			test_consumer(),
			access_token,
			TokenSecret::new(access_token_secret),
		)
	}

	/// Setup configuration pointed at `base_url` with a webhook callback configured.
	pub fn test_setup_config(base_url: &str) -> SetupConfig {
		SetupConfig::builder(base_url)
			.consumer_key(TEST_CONSUMER_KEY)
			.private_key(TEST_PRIVATE_KEY_PEM)
			.callback(
				WebhookCallback::parse(TEST_CALLBACK_BASE)
					.expect("Test callback base should parse successfully."),
			)
			.build()
			.expect("Test setup configuration should build successfully.")
	}

	/// Installation metadata pointed at `base_url`.
	pub fn test_metadata(base_url: &str) -> InstallationMetadata {
		InstallationMetadata::new(
			BaseUrl::parse(base_url).expect("Test base URL should parse successfully."),
		)
	}

	/// In-memory identity seeded with the fixture credentials.
	pub fn test_identity(access_token: &str, access_token_secret: &str) -> Arc<MemoryIdentity> {
		Arc::new(MemoryIdentity::new(IdentityData::from(test_credentials(
			access_token,
			access_token_secret,
		))))
	}

	/// Transport double that records every request and replays queued responses.
	///
	/// When the queue is empty the transport answers `200 {}`.
	#[derive(Clone, Debug, Default)]
	pub struct RecordingTransport {
		requests: Arc<Mutex<Vec<ApiRequest>>>,
		responses: Arc<Mutex<VecDeque<ApiResponse>>>,
	}
	impl RecordingTransport {
		/// Queues a response for the next request.
		pub fn respond_with(&self, response: ApiResponse) -> &Self {
			self.responses.lock().push_back(response);

			self
		}

		/// Returns every request observed so far.
		pub fn requests(&self) -> Vec<ApiRequest> {
			self.requests.lock().clone()
		}
	}
	impl HttpTransport for RecordingTransport {
		fn execute(&self, request: ApiRequest) -> TransportFuture<'_, ApiResponse> {
			Box::pin(async move {
				self.requests.lock().push(request);

				Ok(self
					.responses
					.lock()
					.pop_front()
					.unwrap_or_else(|| ApiResponse::new(200, b"{}".to_vec())))
			})
		}
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
