//! # Repository Analyzer
//!
//! Sequences the GitHub and Gemini collaborators for the two relay
//! operations:
//!
//! - listing: tree fetch (with branch fallback), then source-file filter
//! - analysis: concurrent file fetches, prompt assembly, one model call
//!
//! The analyzer holds no mutable state; every call is independent.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::gemini;
use crate::github::{GitHubClient, TreeEntry, filter_source_files};
use crate::prompt::{self, FileText};
use crate::repository::RepositoryReference;
use futures::future::try_join_all;
use std::collections::HashSet;
use tracing::{info, instrument};

/// Fetches repository files and analyzes them with a model
#[derive(Clone)]
pub struct Analyzer {
    github: GitHubClient,
    gemini: gemini::Client,
    max_prompt_bytes: Option<usize>,
}

impl Analyzer {
    /// Create an analyzer from explicit collaborators
    pub fn new(github: GitHubClient, gemini: gemini::Client) -> Self {
        Self {
            github,
            gemini,
            max_prompt_bytes: None,
        }
    }

    /// Create an analyzer from the relay configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let analyzer = Self::new(
            GitHubClient::from_config(config)?,
            gemini::Client::from_config(config)?,
        );
        Ok(analyzer.with_max_prompt_bytes(config.max_prompt_bytes))
    }

    /// Reject prompts larger than `limit` bytes
    pub fn with_max_prompt_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_prompt_bytes = limit;
        self
    }

    /// List the source files of a repository's default branch
    #[instrument(skip(self, repo), fields(repo = %repo))]
    pub async fn list_source_files(&self, repo: &RepositoryReference) -> Result<Vec<TreeEntry>> {
        let entries = self.github.fetch_tree(repo).await?;
        let total = entries.len();
        let files = filter_source_files(entries);

        info!("{} of {} tree entries are source files", files.len(), total);
        Ok(files)
    }

    /// Fetch the selected files concurrently, in selection order
    ///
    /// Duplicate paths collapse to their first occurrence. The first failed
    /// fetch fails the whole batch.
    pub async fn fetch_files(
        &self,
        repo: &RepositoryReference,
        paths: &[String],
    ) -> Result<Vec<FileText>> {
        let selection = dedup_selection(paths);

        let fetches = selection.into_iter().map(|path| async move {
            let content = self.github.fetch_file(repo, path).await?;
            Ok::<_, Error>(FileText::new(path, content))
        });

        try_join_all(fetches).await
    }

    /// Analyze the selected files, answering `question` when one is given
    #[instrument(skip(self, repo, paths, question), fields(repo = %repo, files = paths.len()))]
    pub async fn analyze(
        &self,
        repo: &RepositoryReference,
        paths: &[String],
        question: Option<&str>,
    ) -> Result<String> {
        let files = self.fetch_files(repo, paths).await?;

        let prompt = prompt::assemble(&files, question);
        prompt::check_size(&prompt, self.max_prompt_bytes)?;

        info!(
            "Sending {} files ({} bytes) to {}",
            files.len(),
            prompt.len(),
            self.gemini.model()
        );
        self.gemini.analyze(&prompt).await
    }
}

/// Collapse duplicate paths, keeping the first occurrence of each
fn dedup_selection(paths: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .map(String::as_str)
        .filter(|path| seen.insert(*path))
        .collect()
}
