pub mod chats;
pub mod config;
pub mod doc_token;
pub mod render;
pub mod send;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use feishu_digest::config::{default_config_path, DigestConfig};
use feishu_digest::transport::FeishuClient;
use feishu_digest::Paper;

/// Config file (explicit or default) overlaid with `FEISHU_*` environment values.
pub fn load_config(path: Option<&Path>) -> Result<DigestConfig> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    let cfg = DigestConfig::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    Ok(cfg.with_env_overrides(|k| std::env::var(k).ok()))
}

/// Client for commands that talk to the API; credentials are checked first.
pub fn build_client(cfg: &DigestConfig) -> Result<FeishuClient> {
    cfg.validate_credentials()?;
    Ok(FeishuClient::new(cfg.api.clone(), cfg.credentials.clone()))
}

/// Paper records from a JSON file, or stdin for `-`.
pub fn read_papers(path: &Path) -> Result<Vec<Paper>> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read papers from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    feishu_digest::paper::parse_papers(&json)
        .with_context(|| format!("Invalid paper list in {}", path.display()))
}
