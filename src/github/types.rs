//! Type definitions for GitHub API payloads

use crate::error::{Error, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Kind of an entry in a repository tree listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file
    Blob,
    /// A directory
    Tree,
    /// A submodule
    Commit,
    /// Anything the API adds later
    #[serde(other)]
    Other,
}

/// One file or directory record in a recursive tree listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the repository root
    pub path: String,

    /// Entry kind
    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// File mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Object SHA
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,

    /// Size in bytes (blobs only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// API URL of the object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl TreeEntry {
    /// Create an entry with only a path and kind
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
            mode: None,
            sha: None,
            size: None,
            url: None,
        }
    }
}

/// Response of `GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1`
#[derive(Debug, Clone, Deserialize)]
pub struct TreeResponse {
    /// SHA of the tree
    #[serde(default)]
    pub sha: Option<String>,

    /// Entries of the tree, recursively
    #[serde(default)]
    pub tree: Vec<TreeEntry>,

    /// Whether GitHub cut the listing short
    #[serde(default)]
    pub truncated: bool,
}

/// Response of `GET /repos/{owner}/{repo}/contents/{path}` for a file
#[derive(Debug, Clone, Deserialize)]
pub struct ContentRecord {
    /// File name
    #[serde(default)]
    pub name: Option<String>,

    /// Path relative to the repository root
    #[serde(default)]
    pub path: Option<String>,

    /// Size in bytes
    #[serde(default)]
    pub size: Option<u64>,

    /// Transport encoding of `content`
    #[serde(default)]
    pub encoding: Option<String>,

    /// Encoded file body
    #[serde(default)]
    pub content: Option<String>,
}

impl ContentRecord {
    /// Decode the embedded content into text
    ///
    /// GitHub wraps base64 content at 60 columns, so whitespace is removed
    /// before decoding. Invalid UTF-8 sequences are replaced.
    pub fn decode(&self) -> Result<String> {
        let content = self
            .content
            .as_deref()
            .ok_or_else(|| Error::UnexpectedResponse("content record has no content".to_string()))?;

        match self.encoding.as_deref() {
            Some("base64") | None => {}
            Some(other) => {
                return Err(Error::Decode(format!("unsupported content encoding '{}'", other)));
            }
        }

        let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| Error::Decode(format!("invalid base64 content: {}", e)))?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
