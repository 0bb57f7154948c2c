//! Utility functions and helpers.

pub mod settings;

pub use settings::{github_token_fallback, Settings};
