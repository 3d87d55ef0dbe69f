//! Blocking HTTP seam. Production goes through ureq; tests script replies.

use std::time::Duration;

use serde_json::Value;

use crate::error::DigestResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            bearer: None,
            query: Vec::new(),
            body: None,
            timeout,
        }
    }

    pub fn post(url: impl Into<String>, body: Value, timeout: Duration) -> Self {
        Self {
            method: Method::Post,
            body: Some(body),
            ..Self::get(url, timeout)
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// Raw reply: status line plus body text. Interpretation is up to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait HttpTransport: Send + Sync {
    /// Only network-level failures are errors; any HTTP status is a reply.
    fn execute(&self, request: &HttpRequest) -> DigestResult<HttpReply>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl HttpTransport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> DigestResult<HttpReply> {
        let auth = request.bearer.as_ref().map(|t| format!("Bearer {}", t));

        let mut response = match request.method {
            Method::Get => {
                let mut req = ureq::get(&request.url);
                for (k, v) in &request.query {
                    req = req.query(k, v);
                }
                if let Some(auth) = &auth {
                    req = req.header("Authorization", auth);
                }
                req.config()
                    .timeout_global(Some(request.timeout))
                    .http_status_as_error(false)
                    .build()
                    .call()?
            }
            Method::Post => {
                let mut req = ureq::post(&request.url);
                for (k, v) in &request.query {
                    req = req.query(k, v);
                }
                if let Some(auth) = &auth {
                    req = req.header("Authorization", auth);
                }
                let body = request.body.clone().unwrap_or(Value::Null);
                req.header("Content-Type", "application/json; charset=utf-8")
                    .config()
                    .timeout_global(Some(request.timeout))
                    .http_status_as_error(false)
                    .build()
                    .send_json(&body)?
            }
        };

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;
        tracing::debug!(url = %request.url, status, "HTTP reply");
        Ok(HttpReply { status, body })
    }
}
