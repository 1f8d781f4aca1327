//! Repository reference parsing
//!
//! Both relay endpoints identify a repository through the same parser so
//! that a URL accepted by one is interpreted identically by the other.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host marker that precedes `owner/name` in a repository URL
const HOST_MARKER: &str = "github.com/";

/// Host marker of an SCP-style remote such as `git@github.com:owner/name.git`
const SSH_HOST_MARKER: &str = "github.com:";

fn is_valid_component(component: &str) -> bool {
    component
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// An `owner/name` pair identifying a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryReference {
    /// Account or organization owning the repository
    pub owner: String,

    /// Repository name
    pub name: String,
}

impl RepositoryReference {
    /// Create a reference, rejecting empty components and characters
    /// GitHub does not allow in account or repository names
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();
        if owner.is_empty() || name.is_empty() {
            return Err(Error::InvalidRepository(format!(
                "owner and name must both be non-empty (got '{}/{}')",
                owner, name
            )));
        }
        if !is_valid_component(&owner) || !is_valid_component(&name) {
            return Err(Error::InvalidRepository(format!(
                "'{}/{}' contains characters not allowed in a repository name",
                owner, name
            )));
        }
        Ok(Self { owner, name })
    }

    /// Parse a repository reference from user input
    ///
    /// Accepts full URLs such as `https://github.com/owner/name`, URLs with
    /// trailing path segments (`.../tree/main/src`), a trailing `.git`, and a
    /// bare `owner/name`. SCP-style remotes (`git@github.com:owner/name.git`)
    /// are accepted too. When the host marker is present the two segments
    /// following it are used; otherwise the input must consist of exactly two
    /// segments.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::InvalidRepository("repository is empty".to_string()));
        }

        let is_url = input.contains("://");
        let host_rest = match input.split_once(HOST_MARKER) {
            Some((_, rest)) => Some(rest),
            None if !is_url => input.split_once(SSH_HOST_MARKER).map(|(_, rest)| rest),
            None => None,
        };

        let rest = match host_rest {
            Some(rest) => rest,
            None if is_url => {
                return Err(Error::InvalidRepository(format!(
                    "'{}' is not a github.com URL",
                    input
                )));
            }
            None => input,
        };

        let rest = rest.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

        let (owner, name) = match (host_rest.is_some(), segments.as_slice()) {
            (true, [owner, name, ..]) => (*owner, *name),
            (false, [owner, name]) => (*owner, *name),
            _ => {
                return Err(Error::InvalidRepository(format!(
                    "expected owner/name in '{}'",
                    input
                )));
            }
        };

        Self::new(owner, name.strip_suffix(".git").unwrap_or(name))
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
