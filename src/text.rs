//! Markdown → plain paragraphs, for destinations that only take raw text runs.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::PARAGRAPH_RULE;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}[ \t]*").expect("heading regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link regex"));
static RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^-{3,}[ \t]*$").expect("rule regex"));

/// Strip heading and bold markers, rewrite `[text](url)` as `text (url)`,
/// turn `---` lines into a fixed dash line, then split on blank lines.
pub fn markdown_to_paragraphs(md: &str) -> Vec<String> {
    let text = HEADING.replace_all(md, "");
    let text = text.replace("**", "");
    let text = LINK.replace_all(&text, "$1 ($2)");
    let text = RULE.replace_all(&text, PARAGRAPH_RULE);

    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
