use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    /// Token exchange rejected or unusable. Fatal for the calling operation.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network failure or non-2xx HTTP status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// HTTP succeeded but the Feishu envelope carried a non-zero code.
    #[error("Feishu API error {code}: {msg}")]
    Api { code: i64, msg: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DigestError {
    /// Only authentication failures abort a publishing step.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

impl From<ureq::Error> for DigestError {
    fn from(e: ureq::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

pub type DigestResult<T> = Result<T, DigestError>;
