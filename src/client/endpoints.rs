//! Jira Server REST endpoints used by the integration.

// self
use crate::{
	_prelude::*,
	client::{JiraServerClient, search},
	http::HttpTransport,
	obs::{self, CallKind},
	oauth1::percent_encode,
	request::ApiCall,
};

/// Issue creation metadata.
pub const META_URL: &str = "/rest/api/2/issue/createmeta";
/// Priority list.
pub const PRIORITIES_URL: &str = "/rest/api/2/priority";
/// Issue search.
pub const SEARCH_URL: &str = "/rest/api/2/search/";

/// Versions of one project.
pub fn versions_path(project: impl Display) -> String {
	format!("/rest/api/2/project/{}/versions", percent_encode(&project.to_string()))
}

/// A single issue.
pub fn issue_path(issue_id: impl Display) -> String {
	format!("/rest/api/2/issue/{}", percent_encode(&issue_id.to_string()))
}

impl<C> JiraServerClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Fetches issue creation metadata with fields expanded, optionally for one project id.
	pub async fn get_create_meta(&self, project: Option<u64>) -> Result<Value> {
		let mut call = ApiCall::get(META_URL).query("expand", "projects.issuetypes.fields");

		if let Some(project) = project {
			call = call.query("projectIds", project.to_string());
		}

		obs::observed(CallKind::Api, "get_create_meta", self.get(call)).await
	}

	/// Lists priorities; cached for 60 seconds.
	pub async fn get_priorities(&self) -> Result<Value> {
		obs::observed(CallKind::Api, "get_priorities", self.get_cached(PRIORITIES_URL)).await
	}

	/// Lists the versions of `project`; cached for 60 seconds.
	pub async fn get_versions(&self, project: impl Display) -> Result<Value> {
		let path = versions_path(project);

		obs::observed(CallKind::Api, "get_versions", self.get_cached(&path)).await
	}

	/// Searches issues by key or free text (see [`search::build_jql`]).
	pub async fn search_issues(&self, query: &str) -> Result<Value> {
		let call = ApiCall::get(SEARCH_URL).query("jql", search::build_jql(query));

		obs::observed(CallKind::Api, "search_issues", self.get(call)).await
	}

	/// Fetches one issue.
	pub async fn get_issue(&self, issue_id: impl Display) -> Result<Value> {
		obs::observed(CallKind::Api, "get_issue", self.get(ApiCall::get(issue_path(issue_id))))
			.await
	}

	/// Not implemented for Jira Server; always empty, which does not mean the server has none.
	pub async fn get_valid_statuses(&self) -> Result<Vec<Value>> {
		Ok(Vec::new())
	}

	/// Not implemented for Jira Server; always empty, which does not mean the server has none.
	pub async fn get_projects_list(&self) -> Result<Vec<Value>> {
		Ok(Vec::new())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::RecordingTransport,
		client::tests::client_with,
		http::{ApiResponse, HttpMethod},
	};

	fn query_of(url: &Url) -> Vec<(String, String)> {
		url.query_pairs().into_owned().collect()
	}

	#[test]
	fn paths_are_templated() {
		assert_eq!(versions_path(42), "/rest/api/2/project/42/versions");
		assert_eq!(issue_path("ABC-1"), "/rest/api/2/issue/ABC-1");
	}

	#[tokio::test]
	async fn create_meta_expands_fields_and_filters_by_project() {
		let transport = RecordingTransport::default();
		let (client, _) = client_with(&transport);

		client.get_create_meta(None).await.expect("Unfiltered createmeta should succeed.");
		client.get_create_meta(Some(10000)).await.expect("Filtered createmeta should succeed.");

		let requests = transport.requests();

		assert_eq!(requests[0].method, HttpMethod::Get);
		assert_eq!(requests[0].url.path(), "/jira/rest/api/2/issue/createmeta");
		assert_eq!(
			query_of(&requests[0].url),
			vec![("expand".to_owned(), "projects.issuetypes.fields".to_owned())]
		);
		assert_eq!(
			query_of(&requests[1].url),
			vec![
				("expand".to_owned(), "projects.issuetypes.fields".to_owned()),
				("projectIds".to_owned(), "10000".to_owned()),
			]
		);
	}

	#[tokio::test]
	async fn search_sends_jql_and_issue_fetch_uses_id_path() {
		let transport = RecordingTransport::default();
		let (client, _) = client_with(&transport);

		transport.respond_with(ApiResponse::new(200, b"{\"issues\":[]}".to_vec()));

		let found = client.search_issues("ABC-123").await.expect("Search should succeed.");

		client.get_issue("ABC-123").await.expect("Issue fetch should succeed.");

		let requests = transport.requests();

		assert_eq!(found["issues"], Value::Array(Vec::new()));
		assert_eq!(requests[0].url.path(), "/jira/rest/api/2/search/");
		assert_eq!(
			query_of(&requests[0].url),
			vec![("jql".to_owned(), "id=\"ABC-123\"".to_owned())]
		);
		assert_eq!(requests[1].url.path(), "/jira/rest/api/2/issue/ABC-123");
	}

	#[tokio::test]
	async fn unimplemented_lookups_are_empty_without_network() {
		let transport = RecordingTransport::default();
		let (client, _) = client_with(&transport);

		assert!(client.get_valid_statuses().await.expect("Stub should succeed.").is_empty());
		assert!(client.get_projects_list().await.expect("Stub should succeed.").is_empty());
		assert!(transport.requests().is_empty());
	}
}
