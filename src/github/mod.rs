//! GitHub API integration
//!
//! This module retrieves repository tree listings and file contents from the
//! GitHub REST API and narrows listings down to source files.

mod client;
mod filter;
mod http;
mod types;

pub use client::{FALLBACK_BRANCH, GitHubClient, PRIMARY_BRANCH};
pub use filter::{SOURCE_EXTENSIONS, filter_source_files, is_source_file};
pub use types::{ContentRecord, EntryKind, TreeEntry, TreeResponse};
