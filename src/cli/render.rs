use std::path::Path;

use anyhow::Result;
use feishu_digest::render::{BlockRenderer, CardRenderer, MarkdownRenderer, PostRenderer};
use feishu_digest::text::markdown_to_paragraphs;
use feishu_digest::{RenderContext, Renderer};

use super::read_papers;
use crate::RenderFormat;

/// Offline preview: print the payload a send would produce.
pub fn run(papers_path: &Path, format: RenderFormat, date: Option<&str>, doc_url: Option<String>) -> Result<()> {
    let papers = read_papers(papers_path)?;
    let ctx = RenderContext::resolve(date).with_doc_url(doc_url);

    let out = match format {
        RenderFormat::Card => serde_json::to_string_pretty(&CardRenderer.render(&papers, &ctx))?,
        RenderFormat::Post => serde_json::to_string_pretty(&PostRenderer.render(&papers, &ctx))?,
        RenderFormat::Markdown => MarkdownRenderer.render(&papers, &ctx),
        RenderFormat::Blocks => serde_json::to_string_pretty(&BlockRenderer.render(&papers, &ctx))?,
        RenderFormat::Paragraphs => {
            markdown_to_paragraphs(&MarkdownRenderer.render(&papers, &ctx)).join("\n\n")
        }
    };
    println!("{}", out);
    Ok(())
}
