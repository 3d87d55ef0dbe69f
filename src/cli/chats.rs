use std::path::Path;

use anyhow::Result;
use feishu_digest::constants::{CODE_BAD_APP_CREDENTIALS, CODE_NO_PERMISSION};
use feishu_digest::DigestError;

use super::{build_client, load_config};

/// Print a hint for the API codes people usually hit while setting up the app.
pub fn explain_api_error(err: &DigestError, permission: &str) {
    if let DigestError::Api { code, .. } = err {
        match *code {
            CODE_NO_PERMISSION => {
                eprintln!("Hint: missing permission, add the '{}' scope to the app", permission)
            }
            CODE_BAD_APP_CREDENTIALS => eprintln!("Hint: App ID or App Secret is wrong"),
            _ => {}
        }
    }
}

pub fn run(config: Option<&Path>) -> Result<()> {
    let cfg = load_config(config)?;
    let client = build_client(&cfg)?;

    let chats = match client.list_chats() {
        Ok(c) => c,
        Err(e) => {
            explain_api_error(&e, "im:chat");
            return Err(e.into());
        }
    };

    if chats.is_empty() {
        println!("No chats found. Make sure the app bot has been added to the target group.");
        return Ok(());
    }

    println!("{}", "=".repeat(60));
    println!("Chats");
    println!("{}", "=".repeat(60));
    for (idx, chat) in chats.iter().enumerate() {
        println!();
        println!("[{}] {}", idx + 1, if chat.name.is_empty() { "(unnamed)" } else { chat.name.as_str() });
        println!("    Chat ID: {}", chat.chat_id);
        println!("    Type: {}", chat.type_label());
        if !chat.description.is_empty() {
            println!("    Description: {}", chat.description);
        }
    }
    println!();
    println!("{} chat(s). Put the target Chat ID into destinations.chat_id or FEISHU_CHAT_ID.", chats.len());
    Ok(())
}
