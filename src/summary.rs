//! Display summary of a paper: the render-ready view every renderer works from.
//!
//! Recomputed on each render call, never cached.

use crate::constants::{
    AUTHOR_ELLIPSIS, KEYWORDS_FALLBACK, MAX_AUTHORS_IN_FULL, MAX_KEYWORDS, MAX_STARS, STAR,
    STAR_SCORE_THRESHOLD,
};
use crate::paper::Paper;

#[derive(Debug, Clone, PartialEq)]
pub struct PaperSummary {
    pub title: String,
    pub authors: String,
    pub keywords: String,
    pub score: f64,
    pub stars: String,
    pub arxiv_id: String,
    pub tldr: String,
    pub pdf_url: String,
    pub code_url: Option<String>,
    pub affiliations: Vec<String>,
}

impl PaperSummary {
    pub fn from_paper(p: &Paper) -> Self {
        let score = p.score.unwrap_or(0.0);
        Self {
            title: p.title.clone(),
            authors: join_authors(&p.authors),
            keywords: keyword_line(p.keywords.as_deref()),
            score,
            stars: star_rating(score),
            arxiv_id: p.arxiv_id.clone(),
            tldr: p.tldr.clone(),
            pdf_url: p.pdf_url.clone(),
            code_url: p.code_url.clone().filter(|u| !u.is_empty()),
            affiliations: p.affiliations.clone().unwrap_or_default(),
        }
    }

    pub fn abs_url(&self) -> String {
        format!("{}{}", crate::constants::ARXIV_ABS_URL, self.arxiv_id)
    }
}

/// Full list up to three authors, otherwise first two, an ellipsis and the last one.
pub fn join_authors(authors: &[String]) -> String {
    if authors.len() <= MAX_AUTHORS_IN_FULL {
        return authors.join(", ");
    }
    let mut shown: Vec<&str> = authors[..2].iter().map(String::as_str).collect();
    shown.push(AUTHOR_ELLIPSIS);
    shown.push(&authors[authors.len() - 1]);
    shown.join(", ")
}

/// At most four keywords, comma-joined; absent or empty lists give the fallback text.
pub fn keyword_line(keywords: Option<&[String]>) -> String {
    match keywords {
        Some(kws) if !kws.is_empty() => kws
            .iter()
            .take(MAX_KEYWORDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        _ => KEYWORDS_FALLBACK.to_string(),
    }
}

/// `min(5, floor(score / 2))` stars, only for scores above 6.
pub fn star_rating(score: f64) -> String {
    if score.is_nan() || score <= STAR_SCORE_THRESHOLD {
        return String::new();
    }
    let count = ((score / 2.0).floor() as usize).min(MAX_STARS);
    STAR.repeat(count)
}
