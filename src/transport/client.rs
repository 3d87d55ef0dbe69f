//! Feishu Open API client: token exchange, chat messages, docx block append,
//! and the two listing calls used to look up chat ids and document tokens.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use super::http::{HttpReply, HttpRequest, HttpTransport, UreqTransport};
use crate::config::{ApiSettings, Credentials};
use crate::constants::{
    CHATS_PATH, DRIVE_FILES_PATH, DRIVE_ROOT_FOLDER, LIST_PAGE_SIZE, MESSAGES_PATH, TENANT_TOKEN_PATH,
};
use crate::error::{DigestError, DigestResult};
use crate::render::{DocBlock, MessagePayload};

#[derive(Deserialize)]
struct TokenReply {
    code: i64,
    #[serde(default)]
    msg: String,
    tenant_access_token: Option<String>,
}

/// Standard `{code, msg, data}` envelope of the Open API.
#[derive(Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    msg: String,
    data: Option<T>,
}

#[derive(Deserialize)]
struct MessageData {
    #[serde(default)]
    message_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatInfo {
    pub chat_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Reported as a number (`2` group, `1` p2p) or a string, depending on API version.
    #[serde(default, deserialize_with = "string_or_number")]
    pub chat_type: Option<String>,
}

impl ChatInfo {
    pub fn type_label(&self) -> String {
        match self.chat_type.as_deref() {
            None => "unknown type".to_string(),
            Some("2") | Some("group") => "group chat".to_string(),
            Some("1") | Some("p2p") => "direct chat".to_string(),
            Some(other) => format!("type {}", other),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Deserialize)]
struct ChatPage {
    #[serde(default)]
    items: Vec<ChatInfo>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DriveFile {
    pub token: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Deserialize)]
struct FilePage {
    #[serde(default)]
    files: Vec<DriveFile>,
}

pub struct FeishuClient {
    api: ApiSettings,
    credentials: Credentials,
    http: Box<dyn HttpTransport>,
}

impl FeishuClient {
    pub fn new(api: ApiSettings, credentials: Credentials) -> Self {
        Self::with_transport(api, credentials, Box::new(UreqTransport))
    }

    pub fn with_transport(
        api: ApiSettings,
        credentials: Credentials,
        http: Box<dyn HttpTransport>,
    ) -> Self {
        Self { api, credentials, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api.base_url.trim_end_matches('/'), path)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Exchange app id/secret for a tenant bearer token. Any failure is `Auth`.
    pub fn tenant_access_token(&self) -> DigestResult<String> {
        let req = HttpRequest::post(
            self.url(TENANT_TOKEN_PATH),
            json!({
                "app_id": self.credentials.app_id,
                "app_secret": self.credentials.app_secret,
            }),
            Duration::from_secs(self.api.token_timeout_secs),
        );

        let reply = self.http.execute(&req).map_err(|e| {
            tracing::error!(error = %e, "Tenant token request failed");
            DigestError::Auth(e.to_string())
        })?;
        if !reply.is_success() {
            tracing::error!(status = reply.status, body = %reply.body, "Tenant token HTTP error");
            return Err(DigestError::Auth(format!("HTTP {}", reply.status)));
        }

        let parsed: TokenReply = serde_json::from_str(&reply.body)
            .map_err(|e| DigestError::Auth(format!("unreadable token reply: {}", e)))?;
        if parsed.code != 0 {
            tracing::error!(code = parsed.code, msg = %parsed.msg, "Tenant token rejected");
            return Err(DigestError::Auth(format!("code {}: {}", parsed.code, parsed.msg)));
        }
        parsed
            .tenant_access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DigestError::Auth("reply carried no tenant_access_token".into()))
    }

    /// Token for docx calls: the user-scoped one when configured.
    fn document_token(&self) -> DigestResult<String> {
        match &self.credentials.user_access_token {
            Some(t) if !t.is_empty() => Ok(t.clone()),
            _ => self.tenant_access_token(),
        }
    }

    /// Check HTTP status, then the envelope code.
    fn interpret<T: DeserializeOwned>(reply: HttpReply) -> DigestResult<Option<T>> {
        if !reply.is_success() {
            return Err(DigestError::Transport(format!(
                "HTTP {}: {}",
                reply.status, reply.body
            )));
        }
        let env: Envelope<T> = serde_json::from_str(&reply.body)
            .map_err(|e| DigestError::InvalidResponse(e.to_string()))?;
        if env.code != 0 {
            return Err(DigestError::Api { code: env.code, msg: env.msg });
        }
        Ok(env.data)
    }

    /// Send a chat message to a group; returns the message id.
    pub fn send_message(&self, chat_id: &str, payload: &MessagePayload) -> DigestResult<String> {
        let token = self.tenant_access_token()?;
        let req = HttpRequest::post(
            self.url(MESSAGES_PATH),
            json!({
                "receive_id": chat_id,
                "msg_type": payload.msg_type.as_str(),
                "content": payload.content_string(),
            }),
            self.request_timeout(),
        )
        .bearer(&token)
        .query("receive_id_type", "chat_id");

        let data: Option<MessageData> = Self::interpret(self.http.execute(&req)?)?;
        Ok(data.map(|d| d.message_id).unwrap_or_default())
    }

    /// Insert `blocks` at the top of a docx document.
    pub fn append_document_blocks(&self, document_id: &str, blocks: &[DocBlock]) -> DigestResult<()> {
        let token = self.document_token()?;
        let path = format!(
            "/docx/v1/documents/{doc}/blocks/{doc}/children",
            doc = document_id
        );
        let req = HttpRequest::post(
            self.url(&path),
            json!({ "children": blocks, "index": 0 }),
            self.request_timeout(),
        )
        .bearer(&token)
        .query("document_revision_id", -1);

        let _: Option<Value> = Self::interpret(self.http.execute(&req)?)?;
        Ok(())
    }

    /// Chats the app has joined (first page).
    pub fn list_chats(&self) -> DigestResult<Vec<ChatInfo>> {
        let token = self.tenant_access_token()?;
        let req = HttpRequest::get(self.url(CHATS_PATH), self.request_timeout())
            .bearer(&token)
            .query("page_size", LIST_PAGE_SIZE);
        let page: Option<ChatPage> = Self::interpret(self.http.execute(&req)?)?;
        Ok(page.map(|p| p.items).unwrap_or_default())
    }

    /// Docx files in the drive root (first page).
    pub fn list_documents(&self) -> DigestResult<Vec<DriveFile>> {
        let token = self.tenant_access_token()?;
        let req = HttpRequest::get(self.url(DRIVE_FILES_PATH), self.request_timeout())
            .bearer(&token)
            .query("page_size", LIST_PAGE_SIZE)
            .query("folder_token", DRIVE_ROOT_FOLDER);
        let page: Option<FilePage> = Self::interpret(self.http.execute(&req)?)?;
        Ok(page
            .map(|p| p.files)
            .unwrap_or_default()
            .into_iter()
            .filter(|f| f.kind == "docx")
            .collect())
    }
}
