//! Narrowing tree listings down to source files

use crate::github::types::{EntryKind, TreeEntry};

/// Path suffixes that identify a source file (case-sensitive)
pub const SOURCE_EXTENSIONS: [&str; 9] = [
    ".js", ".ts", ".py", ".java", ".cpp", ".rb", ".go", ".rs", ".php",
];

/// Whether an entry is a blob whose path ends in a source extension
pub fn is_source_file(entry: &TreeEntry) -> bool {
    entry.kind == EntryKind::Blob
        && SOURCE_EXTENSIONS
            .iter()
            .any(|extension| entry.path.ends_with(extension))
}

/// Keep only source-file blobs, preserving input order
pub fn filter_source_files(entries: Vec<TreeEntry>) -> Vec<TreeEntry> {
    entries.into_iter().filter(is_source_file).collect()
}
