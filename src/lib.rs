//! # dial-client
//!
//! Bucket-scoped file transfer and chat completions for the DIAL AI gateway.
//!
//! Assets are uploaded into the caller's storage bucket with [`BucketClient`], then
//! referenced from chat messages as [`Attachment`]s, so one upload works with
//! models from any vendor behind the gateway.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dial_client::{BucketClient, ChatCompletion, DialConfig, Message, ModelClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DialConfig::from_env()?;
//!     let png = std::fs::read("banner.png")?;
//!
//!     let uploaded = BucketClient::scoped(&config, move |bucket| {
//!         Box::pin(async move { bucket.put_file("banner.png", "image/png", png).await })
//!     })
//!     .await?;
//!
//!     let model = ModelClient::new(&config, "gpt-4o")?;
//!     let reply = model
//!         .get_completion(
//!             vec![Message::user("What do you see on this picture?")
//!                 .with_attachments(vec![uploaded.to_attachment("banner.png", "image/png")])],
//!             None,
//!         )
//!         .await?;
//!
//!     println!("{}", reply.content);
//!     Ok(())
//! }
//! ```

pub mod bucket;
pub mod completions;
pub mod core;
pub mod tasks;

pub use bucket::{BucketClient, HttpTransport, Transport};
pub use completions::{
    ChatCompletion, ImageConfiguration, ImageQuality, ImageSize, ImageStyle, ModelClient,
};
pub use crate::core::{
    ApiKey, Attachment, ChatRole, CustomContent, DialConfig, DialError, FileMetadata,
    HttpClientConfig, Message,
};
