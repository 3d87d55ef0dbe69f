use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use super::chats::explain_api_error;
use super::{build_client, load_config};

static DOCX_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/docx/([A-Za-z0-9]+)").expect("docx url regex"));

/// Token segment of a `.../docx/<token>` URL.
pub fn extract_doc_token(url: &str) -> Option<String> {
    DOCX_URL.captures(url).map(|c| c[1].to_string())
}

pub fn run(config: Option<&Path>, url: Option<&str>) -> Result<()> {
    if let Some(url) = url {
        match extract_doc_token(url) {
            Some(token) => {
                println!("Document token: {}", token);
                println!("Put it into destinations.doc_token or FEISHU_DOC_TOKEN.");
                return Ok(());
            }
            None => eprintln!("No /docx/<token> segment in that URL, listing documents instead"),
        }
    }

    let cfg = load_config(config)?;
    let client = build_client(&cfg)?;
    let files = match client.list_documents() {
        Ok(f) => f,
        Err(e) => {
            explain_api_error(&e, "drive:file");
            return Err(e.into());
        }
    };

    if files.is_empty() {
        println!("No docx documents found in the drive root.");
        println!("Open the document, copy its link and run: feishu-digest doc-token <url>");
        return Ok(());
    }

    for (idx, f) in files.iter().enumerate() {
        println!("[{}] {}", idx + 1, f.name);
        println!("    Document token: {}", f.token);
    }
    println!();
    println!("{} document(s) found.", files.len());
    Ok(())
}
