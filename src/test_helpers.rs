//! Shared test utilities — paper builder, scripted HTTP transport.
//!
//! Available only under `#[cfg(test)]`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::{DigestError, DigestResult};
use crate::paper::Paper;
use crate::transport::{HttpReply, HttpRequest, HttpTransport};

// ============================================================================
// PaperBuilder
// ============================================================================

pub struct PaperBuilder {
    paper: Paper,
}

impl PaperBuilder {
    pub fn new() -> Self {
        Self {
            paper: Paper {
                title: "Test paper".to_string(),
                authors: vec!["Alice".to_string(), "Bob".to_string()],
                arxiv_id: "2401.00001".to_string(),
                score: Some(7.0),
                tldr: "A short summary.".to_string(),
                keywords: Some(vec!["testing".to_string()]),
                affiliations: None,
                pdf_url: "https://arxiv.org/pdf/2401.00001".to_string(),
                code_url: None,
            },
        }
    }

    pub fn title(mut self, t: &str) -> Self {
        self.paper.title = t.to_string();
        self
    }

    pub fn authors(mut self, names: &[&str]) -> Self {
        self.paper.authors = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn arxiv_id(mut self, id: &str) -> Self {
        self.paper.arxiv_id = id.to_string();
        self
    }

    pub fn score(mut self, s: Option<f64>) -> Self {
        self.paper.score = s;
        self
    }

    pub fn tldr(mut self, t: &str) -> Self {
        self.paper.tldr = t.to_string();
        self
    }

    pub fn keywords(mut self, kws: &[&str]) -> Self {
        self.paper.keywords = Some(kws.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn no_keywords(mut self) -> Self {
        self.paper.keywords = None;
        self
    }

    pub fn affiliations(mut self, affs: &[&str]) -> Self {
        self.paper.affiliations = Some(affs.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn pdf_url(mut self, u: &str) -> Self {
        self.paper.pdf_url = u.to_string();
        self
    }

    pub fn code_url(mut self, u: Option<&str>) -> Self {
        self.paper.code_url = u.map(str::to_string);
        self
    }

    pub fn build(self) -> Paper {
        self.paper
    }
}

// ============================================================================
// MockHttp
// ============================================================================

enum Scripted {
    Reply(HttpReply),
    Fail(String),
}

/// Replays scripted replies in order and records every request.
/// Clones share the same script and log.
#[derive(Clone, Default)]
pub struct MockHttp {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    log: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Reply(HttpReply { status, body: body.to_string() }));
        self
    }

    /// Next call fails at the network level.
    pub fn fail(self, message: &str) -> Self {
        self.script.lock().unwrap().push_back(Scripted::Fail(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.log.lock().unwrap().clone()
    }
}

impl HttpTransport for MockHttp {
    fn execute(&self, request: &HttpRequest) -> DigestResult<HttpReply> {
        self.log.lock().unwrap().push(request.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Reply(r)) => Ok(r),
            Some(Scripted::Fail(m)) => Err(DigestError::Transport(m)),
            None => panic!("MockHttp: unexpected request to {}", request.url),
        }
    }
}

/// Successful tenant token reply body.
pub fn token_ok(token: &str) -> String {
    format!(
        r#"{{"code": 0, "msg": "ok", "tenant_access_token": "{}", "expire": 7200}}"#,
        token
    )
}
