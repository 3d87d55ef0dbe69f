//! Digest configuration — credentials, API endpoints, destinations.
//!
//! Loaded from `{config_dir}/feishu-digest/config.json` (or an explicit path),
//! then optionally overlaid with `FEISHU_*` environment values by the binary.
//! The library itself never reads the environment: everything reaches the
//! transport through these values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE, REQUEST_TIMEOUT_SECS, TOKEN_TIMEOUT_SECS};
use crate::error::{DigestError, DigestResult};

const REDACTED: &str = "***";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub app_id: String,
    pub app_secret: String,
    /// User-scoped token for docx calls; tenant token is used when absent.
    pub user_access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub token_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            token_timeout_secs: TOKEN_TIMEOUT_SECS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Destinations {
    pub chat_id: Option<String>,
    pub doc_token: Option<String>,
    /// Browser URL of the document, linked from the chat card.
    pub doc_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub credentials: Credentials,
    pub api: ApiSettings,
    pub destinations: Destinations,
    pub history_file: Option<PathBuf>,
}

/// `{config_dir}/feishu-digest/`
pub fn config_dir() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
    });
    base.join("feishu-digest")
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

impl DigestConfig {
    /// Read the config file. A missing file gives defaults; a malformed one is an error.
    pub fn load(path: &Path) -> DigestResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                DigestError::Config(format!("invalid config {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> DigestResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Overlay `FEISHU_*` values from `lookup`; empty values are ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = non_empty(lookup("FEISHU_APP_ID")) {
            self.credentials.app_id = v;
        }
        if let Some(v) = non_empty(lookup("FEISHU_APP_SECRET")) {
            self.credentials.app_secret = v;
        }
        if let Some(v) = non_empty(lookup("FEISHU_USER_ACCESS_TOKEN")) {
            self.credentials.user_access_token = Some(v);
        }
        if let Some(v) = non_empty(lookup("FEISHU_CHAT_ID")) {
            self.destinations.chat_id = Some(v);
        }
        if let Some(v) = non_empty(lookup("FEISHU_DOC_TOKEN")) {
            self.destinations.doc_token = Some(v);
        }
        if let Some(v) = non_empty(lookup("FEISHU_DOC_URL")) {
            self.destinations.doc_url = Some(v);
        }
        if let Some(v) = non_empty(lookup("FEISHU_HISTORY_FILE")) {
            self.history_file = Some(PathBuf::from(v));
        }
        self
    }

    /// App id and secret must be present before any network call.
    pub fn validate_credentials(&self) -> DigestResult<()> {
        if self.credentials.app_id.trim().is_empty() {
            return Err(DigestError::Config("app_id is not configured (FEISHU_APP_ID)".into()));
        }
        if self.credentials.app_secret.trim().is_empty() {
            return Err(DigestError::Config(
                "app_secret is not configured (FEISHU_APP_SECRET)".into(),
            ));
        }
        if !self.credentials.app_id.starts_with("cli_") {
            tracing::warn!(app_id = %self.credentials.app_id, "App id does not look like cli_xxx");
        }
        Ok(())
    }

    /// Copy safe to print: secrets masked.
    pub fn redacted(&self) -> Self {
        let mut out = self.clone();
        if !out.credentials.app_secret.is_empty() {
            out.credentials.app_secret = REDACTED.to_string();
        }
        if out.credentials.user_access_token.is_some() {
            out.credentials.user_access_token = Some(REDACTED.to_string());
        }
        out
    }
}
