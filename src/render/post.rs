//! Rich-text `post` message enumerating every paper.

use serde_json::{json, Value};

use super::{digest_title, MessageKind, MessagePayload, RenderContext, Renderer};
use crate::constants::{NO_PAPERS_TEXT, POST_SEPARATOR_WIDTH};
use crate::paper::Paper;
use crate::summary::PaperSummary;

/// Post messages are keyed by locale; the digest is published in one.
const POST_LOCALE: &str = "en_us";

#[derive(Debug, Clone, Copy, Default)]
pub struct PostRenderer;

fn text(s: String, style: Value) -> Value {
    json!({ "tag": "text", "text": s, "style": style })
}

fn small(s: String) -> Vec<Value> {
    vec![text(s, json!([{ "font_size": "small" }]))]
}

impl PostRenderer {
    fn paper_rows(idx: usize, info: &PaperSummary) -> Vec<Vec<Value>> {
        let mut links = format!("   📄 PDF: {}", info.pdf_url);
        if let Some(code) = &info.code_url {
            links.push_str(&format!(" | 💻 Code: {}", code));
        }
        links.push('\n');

        vec![
            vec![
                text(format!("{}. ", idx), json!([{ "bold": true }])),
                json!({ "tag": "a", "text": info.title, "href": info.abs_url() }),
                json!({ "tag": "text", "text": format!(" {}\n", info.stars) }),
            ],
            small(format!("   Authors: {}\n", info.authors)),
            small(format!("   Keywords: {}\n", info.keywords)),
            small(format!("   TLDR: {}\n", info.tldr)),
            small(links),
        ]
    }

    /// The rows of the `content` matrix, one inner vector per line.
    pub fn rows(&self, papers: &[Paper], ctx: &RenderContext) -> Vec<Vec<Value>> {
        if papers.is_empty() {
            return vec![vec![json!({ "tag": "text", "text": NO_PAPERS_TEXT })]];
        }

        let mut rows = vec![
            vec![text(
                format!("📚 {}\n", digest_title(&ctx.date)),
                json!([{ "bold": true }, { "font_size": "large" }]),
            )],
            vec![text(
                format!("{} papers recommended\n\n", papers.len()),
                json!([{ "font_size": "medium" }]),
            )],
        ];

        for (i, p) in papers.iter().enumerate() {
            let idx = i + 1;
            rows.extend(Self::paper_rows(idx, &PaperSummary::from_paper(p)));
            if idx < papers.len() {
                rows.push(small(format!("{}\n", "─".repeat(POST_SEPARATOR_WIDTH))));
            }
        }
        rows
    }
}

impl Renderer for PostRenderer {
    type Output = MessagePayload;

    fn render(&self, papers: &[Paper], ctx: &RenderContext) -> MessagePayload {
        let content = json!({
            "post": {
                POST_LOCALE: {
                    "title": format!("📚 {}", digest_title(&ctx.date)),
                    "content": self.rows(papers, ctx),
                }
            }
        });
        MessagePayload { msg_type: MessageKind::Post, content }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::PaperBuilder;

    fn separators(rows: &[Vec<Value>]) -> usize {
        rows.iter()
            .filter(|r| r[0]["text"].as_str().is_some_and(|t| t.starts_with('─')))
            .count()
    }

    #[test]
    fn test_empty_list_gives_single_friendly_row() {
        let payload = PostRenderer.render(&[], &RenderContext::new("2024-05-01"));
        assert_eq!(payload.msg_type, MessageKind::Post);
        let body = &payload.content["post"]["en_us"];
        assert_eq!(body["title"], "📚 Daily arXiv - 2024-05-01");
        assert_eq!(body["content"][0][0]["text"], NO_PAPERS_TEXT);
        assert_eq!(body["content"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_every_paper_listed_with_separators_between() {
        let papers: Vec<Paper> = (1..=4)
            .map(|i| PaperBuilder::new().title(&format!("P{}", i)).build())
            .collect();
        let rows = PostRenderer.rows(&papers, &RenderContext::new("d"));
        // 2 header rows, 5 rows per paper, 3 separators
        assert_eq!(rows.len(), 2 + 4 * 5 + 3);
        assert_eq!(separators(&rows), 3);
        for i in 1..=4 {
            let title = format!("P{}", i);
            assert!(rows.iter().any(|r| r.len() == 3 && r[1]["text"] == title.as_str()));
        }
    }

    #[test]
    fn test_single_paper_has_no_separator() {
        let rows = PostRenderer.rows(&[PaperBuilder::new().build()], &RenderContext::new("d"));
        assert_eq!(separators(&rows), 0);
    }

    #[test]
    fn test_title_links_to_arxiv_and_code_link_optional() {
        let with_code = PaperBuilder::new()
            .arxiv_id("2401.00042")
            .code_url(Some("https://github.com/o/r"))
            .build();
        let rows = PostRenderer.rows(&[with_code], &RenderContext::new("d"));
        assert_eq!(rows[2][1]["href"], "https://arxiv.org/abs/2401.00042");
        let links = rows[6][0]["text"].as_str().unwrap();
        assert!(links.contains("💻 Code: https://github.com/o/r"));

        let without = PaperBuilder::new().code_url(None).build();
        let rows = PostRenderer.rows(&[without], &RenderContext::new("d"));
        assert!(!rows[6][0]["text"].as_str().unwrap().contains("Code"));
    }
}
