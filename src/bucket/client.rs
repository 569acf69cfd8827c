//! Bucket-scoped file transfer against the gateway storage API.

use bytes::Bytes;
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use tracing::debug;

use super::transport::{FileUpload, HttpTransport, Transport};
use crate::core::{
    DialConfig, DialError, FileMetadata,
    constants::bucket::{API_VERSION_PREFIX, BUCKET_ENDPOINT, BUCKET_FIELDS, FILES_PREFIX},
};

/// Authenticated client for one storage bucket.
///
/// The client owns its session from [`BucketClient::open`] until it is closed or
/// dropped; the transport is released exactly once on either path. The bucket id
/// is resolved on the first upload and cached for the rest of the session.
///
/// Operations that may resolve the bucket take `&mut self`, so one client never
/// has two of them in flight.
///
/// ```rust,no_run
/// use dial_client::{BucketClient, DialConfig};
///
/// # async fn run() -> Result<(), dial_client::DialError> {
/// let config = DialConfig::new("my-key", "https://ai-proxy.lab.epam.com");
/// let png = std::fs::read("banner.png")?;
///
/// let metadata = BucketClient::scoped(&config, move |bucket| {
///     Box::pin(async move { bucket.put_file("banner.png", "image/png", png).await })
/// })
/// .await?;
/// println!("uploaded to {}", metadata.url);
/// # Ok(())
/// # }
/// ```
pub struct BucketClient<T: Transport = HttpTransport> {
    transport: T,
    bucket_id: Option<String>,
    released: bool,
}

impl BucketClient<HttpTransport> {
    /// Open a session against the gateway described by `config`.
    pub fn open(config: &DialConfig) -> Result<Self, DialError> {
        Ok(Self::with_transport(HttpTransport::connect(config)?))
    }

    /// Open a session, run `f` with it and close the session before returning,
    /// whether `f` succeeded or not.
    pub async fn scoped<F, R>(config: &DialConfig, f: F) -> Result<R, DialError>
    where
        F: for<'a> FnOnce(&'a mut Self) -> BoxFuture<'a, Result<R, DialError>>,
    {
        Self::open(config)?.scope(f).await
    }
}

impl<T: Transport> BucketClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            bucket_id: None,
            released: false,
        }
    }

    /// Run `f` with this client, then close it.
    pub async fn scope<F, R>(mut self, f: F) -> Result<R, DialError>
    where
        F: for<'a> FnOnce(&'a mut Self) -> BoxFuture<'a, Result<R, DialError>>,
    {
        let result = f(&mut self).await;
        self.close();
        result
    }

    /// The cached bucket id, if it has been resolved in this session.
    pub fn bucket_id(&self) -> Option<&str> {
        self.bucket_id.as_deref()
    }

    #[tracing::instrument(name = "resolve_bucket", level = "debug", skip(self), err)]
    async fn resolve_bucket(&mut self) -> Result<String, DialError> {
        if let Some(bucket) = &self.bucket_id {
            debug!(bucket = %bucket, "Using cached bucket id");
            return Ok(bucket.clone());
        }

        let response = self.transport.get(BUCKET_ENDPOINT).await?.error_for_status()?;
        let body: Map<String, Value> = response.json()?;

        let bucket = bucket_from_response(&body)?;

        debug!(bucket = %bucket, "Resolved bucket id");
        self.bucket_id = Some(bucket.clone());
        Ok(bucket)
    }

    /// Upload `content` as `name` into the session's bucket.
    ///
    /// `name` is used verbatim as the remote file name and as the multipart
    /// field name. Gateway errors (quota, auth, invalid name) come back as
    /// [`DialError::Http`] with the gateway's message.
    #[tracing::instrument(name = "put_file", skip(self, content), err)]
    pub async fn put_file(
        &mut self,
        name: &str,
        mime_type: &str,
        content: impl Into<Bytes>,
    ) -> Result<FileMetadata, DialError> {
        let content = content.into();
        if name.is_empty() {
            return Err(DialError::InvalidRequest(
                "file name must not be empty".to_string(),
            ));
        }

        let bucket = self.resolve_bucket().await?;
        let path = format!("{FILES_PREFIX}/{bucket}/{name}");
        let upload = FileUpload {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            content,
        };

        debug!(path = %path, size = upload.content.len(), "Uploading file");

        self.transport
            .put_file(&path, upload)
            .await?
            .error_for_status()?
            .json()
    }

    /// Download the file at the bucket-relative `url`, e.g. `files/<bucket>/photo.png`.
    ///
    /// The whole body is buffered and returned as bytes.
    #[tracing::instrument(name = "get_file", skip(self), err)]
    pub async fn get_file(&self, url: &str) -> Result<Bytes, DialError> {
        let path = download_path(url);
        let response = self.transport.get(&path).await?.error_for_status()?;

        debug!(size = response.body.len(), "Downloaded file");
        Ok(response.body)
    }

    /// Release the session.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.transport.close();
        }
    }
}

impl<T: Transport> Drop for BucketClient<T> {
    fn drop(&mut self) {
        self.release();
    }
}

/// The first bucket field present in `body` decides the id; a later field is
/// consulted only when every earlier one is absent.
fn bucket_from_response(body: &Map<String, Value>) -> Result<String, DialError> {
    let (field, value) = BUCKET_FIELDS
        .iter()
        .find_map(|field| body.get(*field).map(|value| (*field, value)))
        .ok_or_else(|| {
            DialError::Configuration("no bucket reference found in response".to_string())
        })?;

    match value.as_str() {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(DialError::Configuration(format!(
            "bucket reference in '{field}' is not a non-empty string: {value}"
        ))),
    }
}

fn download_path(url: &str) -> String {
    format!("{API_VERSION_PREFIX}/{}", url.trim_start_matches('/'))
}
