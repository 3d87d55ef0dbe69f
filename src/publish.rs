//! Render → deliver → persist, with the error policy applied.
//!
//! Only authentication failures propagate. Transport and API failures are
//! logged and reported in the return value, so the chat notification, the
//! document update and the local history never block each other.

use crate::error::{DigestError, DigestResult};
use crate::history::HistorySink;
use crate::paper::Paper;
use crate::render::blocks::blocks_from_markdown;
use crate::render::{CardRenderer, MarkdownRenderer, RenderContext, Renderer};
use crate::transport::FeishuClient;

/// Result of a document update. Only `Failed` counts as failure; a rejected
/// update still leaves the local history as the authoritative copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Updated,
    /// No document configured; only the history file was written.
    LocalOnly,
    Rejected { code: i64, msg: String },
    Failed(String),
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub document: Option<DocumentOutcome>,
    pub chat_sent: Option<bool>,
}

/// `client` is `None` when no remote destination can be reached (history-only
/// setups, or credentials missing); the history is still written.
pub struct Publisher {
    client: Option<FeishuClient>,
    history: Option<HistorySink>,
}

impl Publisher {
    pub fn new(client: Option<FeishuClient>, history: Option<HistorySink>) -> Self {
        Self { client, history }
    }

    /// Send the compact card. `Ok(false)` on delivery failure, `Err` on auth failure.
    pub fn notify_chat(&self, chat_id: &str, papers: &[Paper], ctx: &RenderContext) -> DigestResult<bool> {
        let Some(client) = &self.client else {
            tracing::warn!(chat_id, "No API client, chat notification skipped");
            return Ok(false);
        };
        let payload = CardRenderer.render(papers, ctx);
        match client.send_message(chat_id, &payload) {
            Ok(message_id) => {
                tracing::info!(chat_id, message_id = %message_id, papers = papers.len(), "Chat message sent");
                Ok(true)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::error!(chat_id, error = %e, "Failed to send chat message");
                Ok(false)
            }
        }
    }

    /// Write the history, then append the digest at the top of the document.
    pub fn update_document(
        &self,
        doc_token: Option<&str>,
        papers: &[Paper],
        ctx: &RenderContext,
    ) -> DigestResult<DocumentOutcome> {
        let markdown = MarkdownRenderer.render(papers, ctx);
        if let Some(history) = &self.history {
            history.prepend_logged(&markdown);
        }

        let Some(doc_token) = doc_token.filter(|t| !t.is_empty()) else {
            tracing::warn!("No document token configured, only the local history was updated");
            return Ok(DocumentOutcome::LocalOnly);
        };

        let Some(client) = &self.client else {
            tracing::warn!(doc_token, "No API client, only the local history was updated");
            return Ok(DocumentOutcome::LocalOnly);
        };

        let blocks = blocks_from_markdown(&markdown);
        match client.append_document_blocks(doc_token, &blocks) {
            Ok(()) => {
                tracing::info!(doc_token, blocks = blocks.len(), "Document updated");
                Ok(DocumentOutcome::Updated)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(DigestError::Api { code, msg }) => {
                tracing::warn!(doc_token, code, msg = %msg, "Document API rejected the update");
                self.log_manual_import_hint();
                Ok(DocumentOutcome::Rejected { code, msg })
            }
            Err(e) => {
                tracing::warn!(doc_token, error = %e, "Document update failed");
                self.log_manual_import_hint();
                Ok(DocumentOutcome::Failed(e.to_string()))
            }
        }
    }

    fn log_manual_import_hint(&self) {
        if let Some(history) = &self.history {
            tracing::info!(
                path = %history.path().display(),
                "Digest kept in the local history; import the Markdown into the document manually \
                 or check the user access token"
            );
        }
    }

    /// Document first, so the card can link to it; then the chat card.
    pub fn publish(
        &self,
        chat_id: Option<&str>,
        doc_token: Option<&str>,
        papers: &[Paper],
        ctx: &RenderContext,
    ) -> DigestResult<PublishReport> {
        let document = match (doc_token, &self.history) {
            (None, None) => None,
            _ => Some(self.update_document(doc_token, papers, ctx)?),
        };
        let chat_sent = match chat_id {
            Some(id) => Some(self.notify_chat(id, papers, ctx)?),
            None => None,
        };
        Ok(PublishReport { document, chat_sent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiSettings, Credentials};
    use crate::test_helpers::{token_ok, MockHttp, PaperBuilder};

    const OK: &str = r#"{"code": 0, "msg": "success", "data": {"message_id": "om_1"}}"#;

    fn publisher(mock: &MockHttp, history: Option<HistorySink>) -> Publisher {
        let creds = Credentials {
            app_id: "cli_test".into(),
            app_secret: "secret".into(),
            user_access_token: None,
        };
        let client = FeishuClient::with_transport(ApiSettings::default(), creds, Box::new(mock.clone()));
        Publisher::new(Some(client), history)
    }

    fn papers() -> Vec<Paper> {
        vec![PaperBuilder::new().title("Only paper").build()]
    }

    fn ctx() -> RenderContext {
        RenderContext::new("2024-05-01")
    }

    #[test]
    fn test_notify_chat_success() {
        let mock = MockHttp::new().reply(200, &token_ok("t")).reply(200, OK);
        assert!(publisher(&mock, None).notify_chat("oc_1", &papers(), &ctx()).unwrap());
    }

    #[test]
    fn test_notify_chat_api_error_reports_false() {
        let mock = MockHttp::new()
            .reply(200, &token_ok("t"))
            .reply(200, r#"{"code": 230002, "msg": "bot not in chat"}"#);
        assert!(!publisher(&mock, None).notify_chat("oc_1", &papers(), &ctx()).unwrap());
    }

    #[test]
    fn test_notify_chat_network_error_reports_false() {
        let mock = MockHttp::new().reply(200, &token_ok("t")).fail("timed out");
        assert!(!publisher(&mock, None).notify_chat("oc_1", &papers(), &ctx()).unwrap());
    }

    #[test]
    fn test_notify_chat_auth_failure_propagates() {
        let mock = MockHttp::new().reply(200, r#"{"code": 99991661, "msg": "bad app"}"#);
        let err = publisher(&mock, None).notify_chat("oc_1", &papers(), &ctx()).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_update_document_writes_history_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.md");
        let mock = MockHttp::new().reply(200, &token_ok("t")).reply(200, r#"{"code": 0, "msg": "ok"}"#);
        let outcome = publisher(&mock, Some(HistorySink::new(&path)))
            .update_document(Some("doccn1"), &papers(), &ctx())
            .unwrap();
        assert_eq!(outcome, DocumentOutcome::Updated);
        let history = std::fs::read_to_string(&path).unwrap();
        assert!(history.contains("### 1. Only paper"));
    }

    #[test]
    fn test_update_document_api_error_is_soft() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.md");
        let mock = MockHttp::new()
            .reply(200, &token_ok("t"))
            .reply(200, r#"{"code": 1770032, "msg": "forbidden"}"#);
        let outcome = publisher(&mock, Some(HistorySink::new(&path)))
            .update_document(Some("doccn1"), &papers(), &ctx())
            .unwrap();
        assert_eq!(outcome, DocumentOutcome::Rejected { code: 1770032, msg: "forbidden".into() });
        assert!(outcome.is_success());
        assert!(path.exists());
    }

    #[test]
    fn test_update_document_transport_error_is_failure() {
        let mock = MockHttp::new().reply(200, &token_ok("t")).reply(502, "bad gateway");
        let outcome = publisher(&mock, None)
            .update_document(Some("doccn1"), &papers(), &ctx())
            .unwrap();
        assert!(matches!(outcome, DocumentOutcome::Failed(_)));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_update_document_without_token_is_local_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.md");
        let mock = MockHttp::new();
        let outcome = publisher(&mock, Some(HistorySink::new(&path)))
            .update_document(None, &papers(), &ctx())
            .unwrap();
        assert_eq!(outcome, DocumentOutcome::LocalOnly);
        assert!(mock.requests().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_history_written_even_when_auth_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.md");
        let mock = MockHttp::new().reply(401, "unauthorized");
        let result = publisher(&mock, Some(HistorySink::new(&path)))
            .update_document(Some("doccn1"), &papers(), &ctx());
        assert!(result.unwrap_err().is_fatal());
        assert!(path.exists());
    }

    #[test]
    fn test_broken_history_does_not_block_document() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockHttp::new().reply(200, &token_ok("t")).reply(200, r#"{"code": 0, "msg": "ok"}"#);
        let outcome = publisher(&mock, Some(HistorySink::new(dir.path())))
            .update_document(Some("doccn1"), &papers(), &ctx())
            .unwrap();
        assert_eq!(outcome, DocumentOutcome::Updated);
    }

    #[test]
    fn test_publish_document_failure_still_notifies_chat() {
        let mock = MockHttp::new()
            .reply(200, &token_ok("t"))
            .reply(503, "unavailable")
            .reply(200, &token_ok("t"))
            .reply(200, OK);
        let report = publisher(&mock, None)
            .publish(Some("oc_1"), Some("doccn1"), &papers(), &ctx())
            .unwrap();
        assert!(matches!(report.document, Some(DocumentOutcome::Failed(_))));
        assert_eq!(report.chat_sent, Some(true));
        assert_eq!(mock.requests().len(), 4);
    }

    #[test]
    fn test_publish_without_client_writes_history_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("digest").join("history.md");
        let publisher = Publisher::new(None, Some(HistorySink::new(&path)));

        let report = publisher.publish(None, None, &papers(), &ctx()).unwrap();
        assert_eq!(report, PublishReport { document: Some(DocumentOutcome::LocalOnly), chat_sent: None });
        let history = std::fs::read_to_string(&path).unwrap();
        assert!(history.contains("### 1. Only paper"));
    }

    #[test]
    fn test_publish_without_client_skips_remote_destinations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.md");
        let publisher = Publisher::new(None, Some(HistorySink::new(&path)));

        let report = publisher.publish(Some("oc_1"), Some("doccn1"), &papers(), &ctx()).unwrap();
        assert_eq!(report.document, Some(DocumentOutcome::LocalOnly));
        assert_eq!(report.chat_sent, Some(false));
        assert!(path.exists());
    }

    #[test]
    fn test_publish_chat_only() {
        let mock = MockHttp::new().reply(200, &token_ok("t")).reply(200, OK);
        let report = publisher(&mock, None)
            .publish(Some("oc_1"), None, &papers(), &ctx())
            .unwrap();
        assert_eq!(report, PublishReport { document: None, chat_sent: Some(true) });
    }
}
