//! JQL construction for free-text issue search.

// std
use std::sync::LazyLock;
// crates.io
use regex::Regex;

static ISSUE_KEY: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z]+-\d+$").expect("Issue key pattern should be a valid regex.")
});

/// Turns a search box query into JQL.
///
/// Queries shaped like an issue key (`ABC-123`) match by id, everything else is a full-text
/// search. Only double quotes are escaped.
pub fn build_jql(query: &str) -> String {
	let escaped = query.replace('"', "\\\"");

	if ISSUE_KEY.is_match(query) {
		format!("id=\"{escaped}\"")
	} else {
		format!("text ~ \"{escaped}\"")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn issue_keys_match_by_id() {
		assert_eq!(build_jql("ABC-123"), "id=\"ABC-123\"");
		assert_eq!(build_jql("abc-1"), "id=\"abc-1\"");
	}

	#[test]
	fn other_queries_use_full_text_with_escaped_quotes() {
		assert_eq!(build_jql("foo \"bar\""), "text ~ \"foo \\\"bar\\\"\"");
		assert_eq!(build_jql("ABC-123-extra"), "text ~ \"ABC-123-extra\"");
		assert_eq!(build_jql("ABC-123\n"), "text ~ \"ABC-123\n\"");
		assert_eq!(build_jql("back\\slash"), "text ~ \"back\\slash\"");
	}
}
