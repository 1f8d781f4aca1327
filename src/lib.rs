//! # Code Analyzer - AI analysis of GitHub repositories
//!
//! This crate implements a small relay between a browser UI, the GitHub REST
//! API and the Gemini API. A user points it at a public repository, picks a
//! subset of its source files, and receives a natural-language analysis of
//! those files: either an architecture overview or an answer to a question.
//!
//! ## Flow
//!
//! - List: fetch the recursive tree of `main` (falling back to `master`),
//!   keep blobs with a source extension
//! - Analyze: fetch the selected files concurrently, concatenate them into
//!   one prompt, submit it to the model, return its text
//!
//! Nothing is cached or persisted between requests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use code_analyzer::{Analyzer, Config, RepositoryReference};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let analyzer = Analyzer::from_config(&config)?;
//!
//!     let repo = RepositoryReference::parse("https://github.com/acme/widgets")?;
//!     let files = analyzer.list_source_files(&repo).await?;
//!     let paths: Vec<String> = files.into_iter().map(|f| f.path).collect();
//!
//!     let analysis = analyzer.analyze(&repo, &paths, None).await?;
//!     println!("{}", analysis);
//!     Ok(())
//! }
//! ```

mod error;

pub mod analyzer;
pub mod config;
pub mod gemini;
pub mod github;
pub mod prompt;
pub mod repository;
pub mod server;

pub use analyzer::Analyzer;
pub use config::Config;
pub use error::Error;
pub use repository::RepositoryReference;

