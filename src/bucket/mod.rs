//! File transfer against the gateway's per-account storage bucket.

pub mod client;
pub mod transport;

pub use client::BucketClient;
pub use transport::{FileUpload, HttpTransport, Transport};
