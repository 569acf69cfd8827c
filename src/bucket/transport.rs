use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::core::{DialConfig, DialError, HttpClient, RawResponse};

/// A single named part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Used as both the multipart field name and the file name.
    pub name: String,
    pub mime_type: String,
    pub content: Bytes,
}

/// Network seam of the bucket client.
///
/// Implementations own whatever connection resources they need and give them
/// back in [`Transport::close`]. The bucket client calls `close` exactly once.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<RawResponse, DialError>;

    async fn put_file(&self, path: &str, upload: FileUpload) -> Result<RawResponse, DialError>;

    fn close(&mut self);
}

/// reqwest-backed transport holding one session with the gateway.
#[derive(Debug)]
pub struct HttpTransport {
    http: Option<HttpClient>,
}

impl HttpTransport {
    pub fn connect(config: &DialConfig) -> Result<Self, DialError> {
        let http = HttpClient::new(config)?;
        debug!(base_url = %http.base_url(), "Bucket session opened");
        Ok(Self { http: Some(http) })
    }

    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    fn session(&self) -> Result<&HttpClient, DialError> {
        self.http.as_ref().ok_or(DialError::SessionClosed)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<RawResponse, DialError> {
        self.session()?.get(path).await
    }

    async fn put_file(&self, path: &str, upload: FileUpload) -> Result<RawResponse, DialError> {
        let session = self.session()?;

        let part = Part::bytes(upload.content.to_vec())
            .file_name(upload.name.clone())
            .mime_str(&upload.mime_type)
            .map_err(|e| {
                DialError::InvalidRequest(format!("Invalid MIME type '{}': {e}", upload.mime_type))
            })?;
        let form = Form::new().part(upload.name, part);

        session.put_multipart(path, form).await
    }

    fn close(&mut self) {
        // Dropping the last handle to the reqwest client releases pooled connections.
        if self.http.take().is_some() {
            debug!("Bucket session closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn requests_after_close_fail() {
        let mut transport =
            HttpTransport::connect(&DialConfig::new("key", "http://127.0.0.1:9")).unwrap();
        transport.close();

        assert!(transport.is_closed());
        assert!(matches!(
            transport.get("/v1/bucket").await,
            Err(DialError::SessionClosed)
        ));
    }

    #[tokio::test]
    async fn rejects_malformed_mime_type() {
        let transport =
            HttpTransport::connect(&DialConfig::new("key", "http://127.0.0.1:9")).unwrap();
        let upload = FileUpload {
            name: "photo.png".to_string(),
            mime_type: "not a mime type".to_string(),
            content: Bytes::from_static(b"png"),
        };

        let result = transport.put_file("/v1/files/b1/photo.png", upload).await;
        assert!(matches!(result, Err(DialError::InvalidRequest(_))));
    }
}
