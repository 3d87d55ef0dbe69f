//! Feishu Digest — render daily arXiv recommendations and publish them to
//! Feishu group chats and docx documents.
//!
//! Pure pipeline (summary → renderers → text transform) plus a blocking
//! transport and a local Markdown history.

// Core types
pub mod config;
pub mod constants;
pub mod error;
pub mod paper;
pub mod summary;

// Pipeline
pub mod render;
pub mod text;

// Delivery
pub mod history;
pub mod publish;
pub mod transport;

pub mod tracing_init;

#[cfg(test)]
pub mod test_helpers;

// Re-exports for convenience
pub use error::{DigestError, DigestResult};
pub use paper::Paper;
pub use render::{RenderContext, Renderer};
