//! Client for retrieving repository trees and file contents

use crate::config::Config;
use crate::error::Result;
use crate::github::http::HttpClient;
use crate::github::types::{ContentRecord, TreeEntry, TreeResponse};
use crate::repository::RepositoryReference;
use tracing::{debug, info, instrument, warn};

/// Branch requested first when listing a repository
pub const PRIMARY_BRANCH: &str = "main";

/// Branch requested when the primary branch does not exist
pub const FALLBACK_BRANCH: &str = "master";

/// Client for the GitHub REST API
#[derive(Clone)]
pub struct GitHubClient {
    http_client: HttpClient,
}

impl GitHubClient {
    /// Create a client for the given API base URL and token
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http_client: HttpClient::new(base_url, token)?,
        })
    }

    /// Create a client from the relay configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.github_api_url.clone(), config.github_token.clone())
    }

    /// Retrieve the recursive tree listing of the default branch
    ///
    /// `main` is requested first; a 404 there triggers exactly one retry
    /// against `master`. Any other failure, including a 404 on `master`, is
    /// returned unchanged.
    #[instrument(skip(self, repo), fields(repo = %repo), level = "debug")]
    pub async fn fetch_tree(&self, repo: &RepositoryReference) -> Result<Vec<TreeEntry>> {
        match self.fetch_tree_for_branch(repo, PRIMARY_BRANCH).await {
            Err(e) if e.is_not_found() => {
                info!(
                    "Branch {} not found for {}, trying {}",
                    PRIMARY_BRANCH, repo, FALLBACK_BRANCH
                );
                self.fetch_tree_for_branch(repo, FALLBACK_BRANCH).await
            }
            result => result,
        }
    }

    /// Retrieve the recursive tree listing of a single branch
    pub async fn fetch_tree_for_branch(
        &self,
        repo: &RepositoryReference,
        branch: &str,
    ) -> Result<Vec<TreeEntry>> {
        let url = self.http_client.build_url([
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "git",
            "trees",
            branch,
        ])?;

        let response: TreeResponse = self.http_client.get(url, &[("recursive", "1")]).await?;
        if response.truncated {
            warn!(
                "Tree listing for {}@{} was truncated by GitHub ({} entries returned)",
                repo,
                branch,
                response.tree.len()
            );
        }

        debug!("Fetched {} tree entries for {}@{}", response.tree.len(), repo, branch);
        Ok(response.tree)
    }

    /// Retrieve a single file and decode it into text
    #[instrument(skip(self, repo), fields(repo = %repo), level = "debug")]
    pub async fn fetch_file(&self, repo: &RepositoryReference, path: &str) -> Result<String> {
        let segments = ["repos", repo.owner.as_str(), repo.name.as_str(), "contents"]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        let url = self.http_client.build_url(segments)?;

        let record: ContentRecord = self.http_client.get(url, &[]).await?;
        let text = record.decode()?;

        debug!("Fetched {} ({} bytes)", path, text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::github::EntryKind;
    use mockito::{Matcher, Server};

    fn repo() -> RepositoryReference {
        RepositoryReference::new("acme", "widgets").unwrap()
    }

    const TREE_BODY: &str = r#"{
        "sha": "abc",
        "tree": [
            {"path": "src", "type": "tree"},
            {"path": "src/a.js", "type": "blob"}
        ],
        "truncated": false
    }"#;

    #[tokio::test]
    async fn test_fetch_tree_primary_branch() {
        let mut server = Server::new_async().await;
        let main_mock = server
            .mock("GET", "/repos/acme/widgets/git/trees/main")
            .match_query(Matcher::UrlEncoded("recursive".into(), "1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(TREE_BODY)
            .expect(1)
            .create_async()
            .await;
        let master_mock = server
            .mock("GET", "/repos/acme/widgets/git/trees/master")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = GitHubClient::new(server.url(), "test-token").unwrap();
        let tree = client.fetch_tree(&repo()).await.unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[1].path, "src/a.js");
        assert_eq!(tree[1].kind, EntryKind::Blob);
        main_mock.assert_async().await;
        master_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_tree_returns_truncated_listing() {
        let mut server = Server::new_async().await;
        let main_mock = server
            .mock("GET", "/repos/acme/widgets/git/trees/main")
            .match_query(Matcher::UrlEncoded("recursive".into(), "1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "sha": "abc",
                "tree": [
                    {"path": "lib", "type": "tree"},
                    {"path": "lib/x.rs", "type": "blob", "size": 12},
                    {"path": "lib/y.rs", "type": "blob", "size": 7}
                ],
                "truncated": true
            }"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = GitHubClient::new(server.url(), "test-token").unwrap();
        let tree = client.fetch_tree(&repo()).await.unwrap();

        let paths: Vec<&str> = tree.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["lib", "lib/x.rs", "lib/y.rs"]);
        assert_eq!(tree[1].size, Some(12));
        main_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_tree_falls_back_on_not_found() {
        let mut server = Server::new_async().await;
        let main_mock = server
            .mock("GET", "/repos/acme/widgets/git/trees/main")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .expect(1)
            .create_async()
            .await;
        let master_mock = server
            .mock("GET", "/repos/acme/widgets/git/trees/master")
            .match_query(Matcher::UrlEncoded("recursive".into(), "1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(TREE_BODY)
            .expect(1)
            .create_async()
            .await;

        let client = GitHubClient::new(server.url(), "test-token").unwrap();
        let tree = client.fetch_tree(&repo()).await.unwrap();

        assert_eq!(tree.len(), 2);
        main_mock.assert_async().await;
        master_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_tree_no_fallback_on_other_errors() {
        let mut server = Server::new_async().await;
        let main_mock = server
            .mock("GET", "/repos/acme/widgets/git/trees/main")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"message": "Bad credentials"}"#)
            .expect(1)
            .create_async()
            .await;
        let master_mock = server
            .mock("GET", "/repos/acme/widgets/git/trees/master")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = GitHubClient::new(server.url(), "test-token").unwrap();
        let result = client.fetch_tree(&repo()).await;

        assert!(matches!(result, Err(Error::Api { status_code: 401, .. })));
        main_mock.assert_async().await;
        master_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_tree_second_not_found_propagates() {
        let mut server = Server::new_async().await;
        let main_mock = server
            .mock("GET", "/repos/acme/widgets/git/trees/main")
            .match_query(Matcher::Any)
            .with_status(404)
            .expect(1)
            .create_async()
            .await;
        let master_mock = server
            .mock("GET", "/repos/acme/widgets/git/trees/master")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = GitHubClient::new(server.url(), "test-token").unwrap();
        let result = client.fetch_tree(&repo()).await;

        assert!(matches!(result, Err(ref e) if e.is_not_found()));
        main_mock.assert_async().await;
        master_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_file_decodes_content() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("GET", "/repos/acme/widgets/contents/src/a.js")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"name": "a.js", "path": "src/a.js", "encoding": "base64", "content": "Y29uc29sZS5s\nb2coMSk=\n"}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = GitHubClient::new(server.url(), "test-token").unwrap();
        let text = client.fetch_file(&repo(), "src/a.js").await.unwrap();

        assert_eq!(text, "console.log(1)");
        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_file_failure_carries_status() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("GET", "/repos/acme/widgets/contents/missing.py")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let client = GitHubClient::new(server.url(), "test-token").unwrap();
        let err = client.fetch_file(&repo(), "missing.py").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.remote_body(), Some(r#"{"message": "Not Found"}"#));
        mock_server.assert_async().await;
    }
}
