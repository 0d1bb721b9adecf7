//! theralink-bedrock
//!
//! Session prep summaries: the prompt template, the text-generation seam,
//! the Bedrock Converse implementation behind it, and the cached summary
//! service the dashboard talks to.

pub mod cache;
pub mod client;
pub mod error;
pub mod generator;
pub mod prompt;
pub mod summary;
pub mod tokens;
