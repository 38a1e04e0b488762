//! Authenticated client for an installed Jira Server tenant.
//!
//! Every call re-reads the installation identity from the injected [`IdentityProvider`] and
//! signs with the full credential set, so rotated tokens take effect on the next request.
//! Slow-changing lookups (priorities, project versions) go through a 60-second cache-aside
//! layer backed by the injected [`CacheStore`].

pub mod endpoints;
pub mod search;

mod cached;

pub use search::build_jql;

// self
use crate::{
	_prelude::*,
	auth::InstallationCredentials,
	cache::CacheStore,
	http::{ApiResponse, HttpTransport},
	installation::{IdentityProvider, InstallationMetadata},
	oauth1::OAuth1Signer,
	request::{self, ApiCall, BaseUrl},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Authenticated client specialized for the crate's default reqwest transport.
pub type ReqwestJiraServerClient = JiraServerClient<ReqwestHttpClient>;

/// Signs and sends REST calls on behalf of one installation.
pub struct JiraServerClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Installation connection settings.
	pub metadata: InstallationMetadata,
	identity: Arc<dyn IdentityProvider>,
	cache: Arc<dyn CacheStore>,
	transport: Arc<C>,
}
impl<C> JiraServerClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client that reuses a caller-provided transport.
	pub fn with_transport(
		metadata: InstallationMetadata,
		identity: Arc<dyn IdentityProvider>,
		cache: Arc<dyn CacheStore>,
		transport: impl Into<Arc<C>>,
	) -> Self {
		Self { metadata, identity, cache, transport: transport.into() }
	}

	/// Jira Server base URL.
	pub fn base_url(&self) -> &BaseUrl {
		&self.metadata.base_url
	}

	/// Loads and validates the installation's current credentials.
	pub async fn credentials(&self) -> Result<InstallationCredentials> {
		self.identity.identity().await?.credentials()
	}

	/// Sends `call` signed with the installation's current credentials.
	pub async fn request(&self, call: ApiCall) -> Result<ApiResponse> {
		let credentials = self.credentials().await?;
		let signer = OAuth1Signer::for_installation(&credentials)?;

		self.request_signed(call, &signer).await
	}

	/// Sends `call` with a caller-provided signer instead of the installation identity.
	pub async fn request_signed(
		&self,
		call: ApiCall,
		signer: &OAuth1Signer,
	) -> Result<ApiResponse> {
		request::execute(self.transport.as_ref(), &self.metadata.base_url, call, signer).await
	}

	/// Sends `call` and decodes the response body as JSON.
	pub async fn get(&self, call: ApiCall) -> Result<Value> {
		Ok(self.request(call).await?.json()?)
	}
}
#[cfg(feature = "reqwest")]
impl JiraServerClient<ReqwestHttpClient> {
	/// Creates a client backed by a reqwest transport honoring `metadata.verify_ssl`.
	pub fn new(
		metadata: InstallationMetadata,
		identity: Arc<dyn IdentityProvider>,
		cache: Arc<dyn CacheStore>,
	) -> Result<Self> {
		let transport = ReqwestHttpClient::new(metadata.verify_ssl)?;

		Ok(Self::with_transport(metadata, identity, cache, transport))
	}
}
impl<C> Clone for JiraServerClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			metadata: self.metadata.clone(),
			identity: self.identity.clone(),
			cache: self.cache.clone(),
			transport: self.transport.clone(),
		}
	}
}
impl<C> Debug for JiraServerClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("JiraServerClient").field("metadata", &self.metadata).finish_non_exhaustive()
	}
}
