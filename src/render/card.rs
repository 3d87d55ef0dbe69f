//! Compact interactive card: top papers only, with a pointer to the rest.

use serde_json::json;

use super::{digest_title, MessageKind, MessagePayload, RenderContext, Renderer};
use crate::constants::{CARD_TOP_PAPERS, NO_PAPERS_TEXT};
use crate::paper::Paper;
use crate::summary::PaperSummary;

#[derive(Debug, Clone, Copy, Default)]
pub struct CardRenderer;

impl CardRenderer {
    /// The `lark_md` body of the card.
    pub fn body(&self, papers: &[Paper], ctx: &RenderContext) -> String {
        if papers.is_empty() {
            return NO_PAPERS_TEXT.to_string();
        }

        let shown = papers.len().min(CARD_TOP_PAPERS);
        let mut lines = vec![
            format!("📚 **{}**", digest_title(&ctx.date)),
            String::new(),
            format!(
                "{} papers recommended today, top {} below:",
                papers.len(),
                shown
            ),
            String::new(),
        ];

        for (idx, p) in papers.iter().take(CARD_TOP_PAPERS).enumerate() {
            let info = PaperSummary::from_paper(p);
            lines.push(format!("{}. **{}** {}", idx + 1, info.title, info.stars));
            lines.push(format!("   Keywords: {}", info.keywords));
            lines.push(format!("   [arXiv]({})", info.abs_url()));
            lines.push(String::new());
        }

        let hidden = papers.len() - shown;
        if hidden > 0 {
            lines.push(format!("…and {} more in the full digest.", hidden));
        }
        if let Some(url) = &ctx.doc_url {
            lines.push(format!("[👉 View all {} papers]({})", papers.len(), url));
        }

        lines.join("\n").trim().to_string()
    }
}

impl Renderer for CardRenderer {
    type Output = MessagePayload;

    fn render(&self, papers: &[Paper], ctx: &RenderContext) -> MessagePayload {
        let card = json!({
            "config": { "wide_screen_mode": true },
            "header": {
                "title": { "tag": "plain_text", "content": digest_title(&ctx.date) },
                "template": "blue",
            },
            "elements": [{
                "tag": "div",
                "text": { "tag": "lark_md", "content": self.body(papers, ctx) },
            }],
        });

        MessagePayload { msg_type: MessageKind::Interactive, content: card }
    }
}
