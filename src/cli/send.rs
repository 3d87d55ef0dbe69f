use std::path::Path;

use anyhow::{bail, Result};
use feishu_digest::config::DigestConfig;
use feishu_digest::history::HistorySink;
use feishu_digest::publish::{DocumentOutcome, PublishReport, Publisher};
use feishu_digest::{Paper, RenderContext};

use super::{build_client, load_config, read_papers};

pub fn run(
    config: Option<&Path>,
    papers_path: &Path,
    date: Option<&str>,
    chat_only: bool,
    doc_only: bool,
) -> Result<()> {
    let cfg = load_config(config)?;
    let papers = read_papers(papers_path)?;
    publish_digest(&cfg, &papers, date, chat_only, doc_only)?;
    Ok(())
}

fn publish_digest(
    cfg: &DigestConfig,
    papers: &[Paper],
    date: Option<&str>,
    chat_only: bool,
    doc_only: bool,
) -> Result<PublishReport> {
    let history = if chat_only { None } else { cfg.history_file.clone().map(HistorySink::new) };
    let chat_id = if doc_only { None } else { cfg.destinations.chat_id.as_deref() };
    let doc_token = if chat_only { None } else { cfg.destinations.doc_token.as_deref() };
    if chat_id.is_none() && doc_token.is_none() && history.is_none() {
        bail!("Nothing to publish to: configure a chat_id, doc_token or history_file");
    }
    if !doc_only && chat_id.is_none() {
        tracing::warn!("No chat_id configured, skipping chat notification");
    }

    // Credentials only gate the remote destinations; the history is written
    // before a credentials error is returned.
    let mut credentials_error = None;
    let client = if chat_id.is_some() || doc_token.is_some() {
        match build_client(cfg) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!(error = %e, "Credentials unusable, remote destinations skipped");
                credentials_error = Some(e);
                None
            }
        }
    } else {
        None
    };
    let publisher = Publisher::new(client, history);

    let ctx = RenderContext::resolve(date).with_doc_url(cfg.destinations.doc_url.clone());
    tracing::info!(papers = papers.len(), date = %ctx.date, "Publishing digest");
    let report = publisher.publish(chat_id, doc_token, papers, &ctx)?;
    print_report(&report, papers.len());

    if let Some(e) = credentials_error {
        return Err(e.context("Chat and document were not updated"));
    }
    Ok(report)
}

fn print_report(report: &PublishReport, count: usize) {
    match &report.document {
        Some(DocumentOutcome::Updated) => println!("Document: updated"),
        Some(DocumentOutcome::LocalOnly) => println!("Document: history file only"),
        Some(DocumentOutcome::Rejected { code, msg }) => {
            println!("Document: rejected ({} {}), local history kept", code, msg)
        }
        Some(DocumentOutcome::Failed(e)) => println!("Document: failed ({})", e),
        None => {}
    }
    match report.chat_sent {
        Some(true) => println!("Chat: sent ({} papers)", count),
        Some(false) => println!("Chat: failed, see log"),
        None => {}
    }
}
