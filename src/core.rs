pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod types;

pub use config::{ApiKey, DialConfig};
pub use error::DialError;
pub use http::{HttpClient, HttpClientConfig, RawResponse};
pub use types::{Attachment, ChatRole, CustomContent, FileMetadata, Message};
