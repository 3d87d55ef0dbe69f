//! Flat Markdown digest, the form kept in the local history file.

use super::{RenderContext, Renderer};
use crate::constants::{MAX_AFFILIATIONS, NO_PAPERS_TEXT};
use crate::paper::Paper;
use crate::summary::PaperSummary;

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

fn affiliation_line(affiliations: &[String]) -> String {
    let mut line = affiliations
        .iter()
        .take(MAX_AFFILIATIONS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if affiliations.len() > MAX_AFFILIATIONS {
        line.push_str(", ...");
    }
    line
}

impl Renderer for MarkdownRenderer {
    type Output = String;

    fn render(&self, papers: &[Paper], ctx: &RenderContext) -> String {
        if papers.is_empty() {
            return format!("## {}\n\n{}\n\n---\n\n", ctx.date, NO_PAPERS_TEXT);
        }

        // Heading lines share a paragraph with the line below them.
        let mut md = format!("## {}\n**{} papers recommended**\n\n", ctx.date, papers.len());

        for (i, p) in papers.iter().enumerate() {
            let info = PaperSummary::from_paper(p);
            md.push_str(&format!("### {}. {} {}\n", i + 1, info.title, info.stars));
            md.push_str(&format!("**Authors:** {}\n\n", info.authors));
            if !info.affiliations.is_empty() {
                md.push_str(&format!("**Affiliations:** {}\n\n", affiliation_line(&info.affiliations)));
            }
            md.push_str(&format!("**Keywords:** {}\n\n", info.keywords));
            md.push_str(&format!("**TLDR:** {}\n\n", info.tldr));
            md.push_str(&format!(
                "**Links:** [arXiv]({}) | [PDF]({})",
                info.abs_url(),
                info.pdf_url
            ));
            if let Some(code) = &info.code_url {
                md.push_str(&format!(" | [Code]({})", code));
            }
            md.push_str("\n\n---\n\n");
        }
        md
    }
}
