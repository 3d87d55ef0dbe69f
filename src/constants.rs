// === Feishu Open API ===
pub const DEFAULT_API_BASE: &str = "https://open.feishu.cn/open-apis";
pub const TENANT_TOKEN_PATH: &str = "/auth/v3/tenant_access_token/internal";
pub const MESSAGES_PATH: &str = "/im/v1/messages";
pub const CHATS_PATH: &str = "/im/v1/chats";
pub const DRIVE_FILES_PATH: &str = "/drive/v1/files";
pub const DRIVE_ROOT_FOLDER: &str = "root";
pub const LIST_PAGE_SIZE: u32 = 50;

// === Timeouts ===
pub const TOKEN_TIMEOUT_SECS: u64 = 10;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// === Known API error codes ===
pub const CODE_NO_PERMISSION: i64 = 99991663;
pub const CODE_BAD_APP_CREDENTIALS: i64 = 99991661;

// === Summary ===
pub const MAX_AUTHORS_IN_FULL: usize = 3;
pub const AUTHOR_ELLIPSIS: &str = "...";
pub const MAX_KEYWORDS: usize = 4;
pub const KEYWORDS_FALLBACK: &str = "N/A";
pub const STAR_SCORE_THRESHOLD: f64 = 6.0;
pub const MAX_STARS: usize = 5;
pub const STAR: &str = "\u{2B50}";
pub const MAX_AFFILIATIONS: usize = 3;

// === Rendering ===
pub const CARD_TOP_PAPERS: usize = 3;
pub const DIGEST_TITLE: &str = "Daily arXiv";
pub const NO_PAPERS_TEXT: &str = "No new papers today, take a break! 😊";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const POST_SEPARATOR_WIDTH: usize = 30;
pub const PARAGRAPH_RULE: &str = "--------------------";
pub const ARXIV_ABS_URL: &str = "https://arxiv.org/abs/";

// === History ===
pub const HISTORY_HEADER: &str = "# Daily arXiv Digest History\n\n";

// === Docx blocks ===
pub const DOCX_TEXT_BLOCK: u8 = 2;
