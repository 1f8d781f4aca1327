//! # Prompt Assembly
//!
//! Turns a set of retrieved files into the single text prompt sent to the
//! model. Each file renders as a `File: {path}` header followed by a blank
//! line and the file body; files are separated by a blank line and keep
//! the order they were given in.
//!
//! A non-empty question replaces the default four-point analysis
//! instruction. Nothing is truncated here; size limits are enforced by the
//! caller, which rejects rather than shortens an oversized prompt.

use crate::error::{Error, Result};

/// Leading line when the user asks a specific question
const QUESTION_PREFIX: &str = "Analyze the following code files and answer this specific question: ";

/// Instruction used when no question is supplied
pub const DEFAULT_INSTRUCTION: &str = "Analyze the following code files and provide insights about:
1. Overall architecture
2. Main functionalities
3. Potential improvements
4. Code quality";

/// A retrieved file: its repository path and decoded text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileText {
    /// Path relative to the repository root
    pub path: String,

    /// Decoded file body
    pub content: String,
}

impl FileText {
    /// Create a new file text pair
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Render this file as a prompt block
    pub fn render(&self) -> String {
        format!("File: {}\n\n{}", self.path, self.content)
    }
}

/// Assemble the prompt for a set of files and an optional question
///
/// A question that is empty or whitespace-only counts as absent.
pub fn assemble(files: &[FileText], question: Option<&str>) -> String {
    let joined = files
        .iter()
        .map(FileText::render)
        .collect::<Vec<_>>()
        .join("\n\n");

    match question.map(str::trim).filter(|q| !q.is_empty()) {
        Some(question) => format!("{}{}\n\n{}", QUESTION_PREFIX, question, joined),
        None => format!("{}\n\n{}", DEFAULT_INSTRUCTION, joined),
    }
}

/// Reject a prompt larger than `limit` bytes
pub fn check_size(prompt: &str, limit: Option<usize>) -> Result<()> {
    match limit {
        Some(limit) if prompt.len() > limit => Err(Error::PromptTooLarge {
            size: prompt.len(),
            limit,
        }),
        _ => Ok(()),
    }
}
