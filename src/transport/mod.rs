//! Authenticated delivery to the Feishu Open API.

pub mod client;
pub mod http;

pub use client::{ChatInfo, DriveFile, FeishuClient};
pub use http::{HttpReply, HttpRequest, HttpTransport, Method, UreqTransport};
