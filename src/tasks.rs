//! End-to-end flows combining the bucket and model clients.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::Local;
use tracing::{info, warn};

use crate::bucket::BucketClient;
use crate::completions::{ChatCompletion, ImageConfiguration};
use crate::core::{Attachment, DialConfig, DialError, Message};

pub const IMAGE_TO_TEXT_DEPLOYMENT: &str = "gpt-4o";
pub const TEXT_TO_IMAGE_DEPLOYMENT: &str = "imagegeneration@005";
pub const DEFAULT_DESCRIBE_PROMPT: &str = "What do you see on this picture?";
pub const DEFAULT_GENERATE_PROMPT: &str = "Generate an image of the sunny day on Bali.";

/// MIME type for a file, judged by its extension.
pub fn mime_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

/// Upload a local file to the caller's bucket and return an attachment for it.
#[tracing::instrument(name = "upload_image", skip(config), err)]
pub async fn upload_image(config: &DialConfig, path: &Path) -> Result<Attachment, DialError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            DialError::InvalidRequest(format!("'{}' has no usable file name", path.display()))
        })?
        .to_string();
    let mime_type = mime_type_for(path);
    let content = tokio::fs::read(path).await?;

    let name = file_name.clone();
    let part_type = mime_type.clone();
    let metadata = BucketClient::scoped(config, move |bucket| {
        Box::pin(async move { bucket.put_file(&name, &part_type, content).await })
    })
    .await?;

    info!(url = %metadata.url, "Image uploaded");
    Ok(metadata.to_attachment(&file_name, &mime_type))
}

/// Upload an image and ask `model` about it.
pub async fn describe_image<C>(
    config: &DialConfig,
    model: &C,
    path: &Path,
    prompt: &str,
) -> Result<(Attachment, Message), DialError>
where
    C: ChatCompletion + ?Sized,
{
    let attachment = upload_image(config, path).await?;
    let message = Message::user(prompt).with_attachments(vec![attachment.clone()]);

    let reply = model.get_completion(vec![message], None).await?;
    Ok((attachment, reply))
}

/// Ask `model` to generate images and save every returned attachment into
/// `out_dir`. Returns the written paths, in attachment order.
pub async fn generate_images<C>(
    config: &DialConfig,
    model: &C,
    prompt: &str,
    image_config: ImageConfiguration,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, DialError>
where
    C: ChatCompletion + ?Sized,
{
    let custom_fields = (!image_config.is_empty()).then(|| image_config.into_custom_fields());
    let reply = model
        .get_completion(vec![Message::user(prompt)], custom_fields)
        .await?;

    let urls: Vec<String> = reply
        .attachments()
        .iter()
        .filter_map(|attachment| attachment.url.clone())
        .collect();

    if urls.is_empty() {
        warn!("Completion returned no image attachments");
        return Ok(Vec::new());
    }

    let images: Vec<Bytes> = BucketClient::scoped(config, move |bucket| {
        Box::pin(async move {
            let mut images = Vec::with_capacity(urls.len());
            for url in &urls {
                images.push(bucket.get_file(url).await?);
            }
            Ok::<_, DialError>(images)
        })
    })
    .await?;

    tokio::fs::create_dir_all(out_dir).await?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

    let mut saved = Vec::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        let path = out_dir.join(format!("generated_image_{timestamp}_{index}.png"));
        tokio::fs::write(&path, image).await?;
        info!(path = %path.display(), size = image.len(), "Image saved");
        saved.push(path);
    }

    Ok(saved)
}
