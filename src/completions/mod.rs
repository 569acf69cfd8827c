//! Chat completions against gateway deployments.

pub mod client;
pub mod image;

pub use client::{ChatCompletion, ModelClient};
pub use image::{ImageConfiguration, ImageQuality, ImageSize, ImageStyle};
