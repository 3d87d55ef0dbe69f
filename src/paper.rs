//! Paper records as produced by the upstream scoring pipeline.
//!
//! The pipeline hands over a JSON array of these; nothing here mutates them.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub arxiv_id: String,
    /// Relevance score on a 0-10 scale. Absent means "not scored".
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub tldr: String,
    /// Absent and empty are treated the same by the summary builder. Anything
    /// other than a list of strings reads as absent instead of failing the batch.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub affiliations: Option<Vec<String>>,
    pub pdf_url: String,
    #[serde(default)]
    pub code_url: Option<String>,
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

/// Parse a JSON array of papers.
pub fn parse_papers(json: &str) -> crate::DigestResult<Vec<Paper>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_record() {
        let json = r#"[{
            "title": "Attention Is All You Need",
            "arxiv_id": "1706.03762",
            "pdf_url": "https://arxiv.org/pdf/1706.03762"
        }]"#;
        let papers = parse_papers(json).unwrap();
        assert_eq!(papers.len(), 1);
        let p = &papers[0];
        assert!(p.authors.is_empty());
        assert_eq!(p.score, None);
        assert_eq!(p.keywords, None);
        assert_eq!(p.code_url, None);
        assert_eq!(p.tldr, "");
    }

    #[test]
    fn test_parse_full_record() {
        let json = r#"[{
            "title": "T",
            "authors": ["A", "B"],
            "arxiv_id": "2401.00001",
            "score": 7.5,
            "tldr": "short",
            "keywords": ["llm", "rl"],
            "affiliations": ["MIT"],
            "pdf_url": "https://arxiv.org/pdf/2401.00001",
            "code_url": "https://github.com/x/y"
        }]"#;
        let p = &parse_papers(json).unwrap()[0];
        assert_eq!(p.authors, vec!["A", "B"]);
        assert_eq!(p.score, Some(7.5));
        assert_eq!(p.keywords.as_deref(), Some(&["llm".to_string(), "rl".to_string()][..]));
        assert_eq!(p.code_url.as_deref(), Some("https://github.com/x/y"));
    }

    #[test]
    fn test_parse_rejects_missing_title() {
        let json = r#"[{"arxiv_id": "1", "pdf_url": "u"}]"#;
        assert!(parse_papers(json).is_err());
    }

    #[test]
    fn test_malformed_keywords_read_as_absent() {
        let json = r#"[
            {"title": "A", "arxiv_id": "1", "pdf_url": "u1", "keywords": ["a"]},
            {"title": "B", "arxiv_id": "2", "pdf_url": "u2", "keywords": "llm, rl"},
            {"title": "C", "arxiv_id": "3", "pdf_url": "u3", "keywords": ["x", 3]},
            {"title": "D", "arxiv_id": "4", "pdf_url": "u4", "keywords": null}
        ]"#;
        let papers = parse_papers(json).unwrap();
        assert_eq!(papers.len(), 4);
        assert_eq!(papers[0].keywords, Some(vec!["a".to_string()]));
        assert_eq!(papers[1].keywords, None);
        assert_eq!(papers[2].keywords, None);
        assert_eq!(papers[3].keywords, None);

        let summary = crate::summary::PaperSummary::from_paper(&papers[1]);
        assert_eq!(summary.keywords, crate::constants::KEYWORDS_FALLBACK);
    }
}
