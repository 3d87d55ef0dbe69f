//! Docx block list: the Markdown digest flattened into text paragraph blocks.

use serde::{Deserialize, Serialize};

use super::{MarkdownRenderer, RenderContext, Renderer};
use crate::constants::DOCX_TEXT_BLOCK;
use crate::paper::Paper;
use crate::text::markdown_to_paragraphs;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocBlock {
    pub block_type: u8,
    pub text: TextBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBody {
    pub style: TextStyle,
    pub elements: Vec<TextElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub text_run: TextRun,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub content: String,
}

impl DocBlock {
    pub fn paragraph(content: impl Into<String>) -> Self {
        Self {
            block_type: DOCX_TEXT_BLOCK,
            text: TextBody {
                style: TextStyle::default(),
                elements: vec![TextElement { text_run: TextRun { content: content.into() } }],
            },
        }
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        self.text.elements.iter().map(|e| e.text_run.content.as_str()).collect()
    }
}

/// Build one paragraph block per non-empty paragraph of `md`.
pub fn blocks_from_markdown(md: &str) -> Vec<DocBlock> {
    markdown_to_paragraphs(md).into_iter().map(DocBlock::paragraph).collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlockRenderer;

impl Renderer for BlockRenderer {
    type Output = Vec<DocBlock>;

    fn render(&self, papers: &[Paper], ctx: &RenderContext) -> Vec<DocBlock> {
        blocks_from_markdown(&MarkdownRenderer.render(papers, ctx))
    }
}
