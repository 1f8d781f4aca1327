//! Gemini API implementation
//!
//! This module provides the client the relay uses to submit prompts to
//! Google's Gemini API.

mod client;
mod http;
mod models;
mod types;

pub use client::Client;

