//! Renderers: paper list + date → one platform payload shape.
//!
//! Each format is its own strategy behind [`Renderer`]; the caller picks one by
//! destination (chat card, rich post, Markdown history, docx blocks).

pub mod blocks;
pub mod card;
pub mod markdown;
pub mod post;

pub use blocks::{BlockRenderer, DocBlock};
pub use card::CardRenderer;
pub use markdown::MarkdownRenderer;
pub use post::PostRenderer;

use serde::{Deserialize, Serialize};

use crate::constants::DATE_FORMAT;
use crate::paper::Paper;

/// Inputs shared by every renderer besides the papers themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub date: String,
    /// Link to the full digest, used as the "view more" target.
    pub doc_url: Option<String>,
}

impl RenderContext {
    pub fn new(date: impl Into<String>) -> Self {
        Self { date: date.into(), doc_url: None }
    }

    /// Today's local date in the digest format.
    pub fn today() -> Self {
        Self::new(chrono::Local::now().format(DATE_FORMAT).to_string())
    }

    /// Use `date` when given, otherwise today.
    pub fn resolve(date: Option<&str>) -> Self {
        match date {
            Some(d) => Self::new(d),
            None => Self::today(),
        }
    }

    pub fn with_doc_url(mut self, url: Option<String>) -> Self {
        self.doc_url = url.filter(|u| !u.is_empty());
        self
    }
}

pub trait Renderer {
    type Output;

    fn render(&self, papers: &[Paper], ctx: &RenderContext) -> Self::Output;
}

/// Feishu `msg_type` values produced by the chat renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Interactive,
    Post,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interactive => "interactive",
            Self::Post => "post",
        }
    }
}

/// A chat message ready to send. `content` stays structured here; the
/// transport serializes it to the string form the messages API expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub msg_type: MessageKind,
    pub content: serde_json::Value,
}

impl MessagePayload {
    pub fn content_string(&self) -> String {
        self.content.to_string()
    }
}

pub(crate) fn digest_title(date: &str) -> String {
    format!("{} - {}", crate::constants::DIGEST_TITLE, date)
}
