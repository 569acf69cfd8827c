mod common;

use dial_client::{DialConfig, ImageConfiguration, ImageQuality, ModelClient, tasks};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn completion(message: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "choices": [{ "message": message }] }))
}

#[tokio::test]
async fn describe_image_uploads_then_references_the_upload() {
    common::init_tracing();
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("dialx-banner.png");
    std::fs::write(&image, b"banner-bytes").unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/bucket"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "appdata": "b1" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v1/files/b1/dialx-banner.png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "dialx-banner.png",
            "url": "files/b1/dialx-banner.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt-4o/chat/completions"))
        .respond_with(completion(json!({ "role": "assistant", "content": "A banner." })))
        .expect(1)
        .mount(&server)
        .await;

    let config = DialConfig::new("test-key", server.uri());
    let model = ModelClient::new(&config, "gpt-4o").unwrap();

    let (attachment, reply) =
        tasks::describe_image(&config, &model, &image, tasks::DEFAULT_DESCRIBE_PROMPT)
            .await
            .unwrap();

    assert_eq!(attachment.title.as_deref(), Some("dialx-banner.png"));
    assert_eq!(attachment.url.as_deref(), Some("files/b1/dialx-banner.png"));
    assert_eq!(attachment.mime_type.as_deref(), Some("image/png"));
    assert_eq!(reply.content, "A banner.");

    let requests = server.received_requests().await.unwrap();
    let completion_request = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .expect("completion request");
    let body: Value = serde_json::from_slice(&completion_request.body).unwrap();
    assert_eq!(
        body["messages"][0]["custom_content"]["attachments"][0]["url"],
        "files/b1/dialx-banner.png"
    );
}

#[tokio::test]
async fn generate_images_saves_every_attachment() {
    common::init_tracing();
    let server = MockServer::start().await;
    let out_dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/openai/deployments/imagegeneration@005/chat/completions"))
        .respond_with(completion(json!({
            "role": "assistant",
            "content": "",
            "custom_content": {
                "attachments": [
                    { "title": "Image", "type": "image/png", "url": "files/b1/first.png" },
                    { "title": "Image", "type": "image/png", "url": "files/b1/second.png" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    for (name, bytes) in [("first.png", b"first".to_vec()), ("second.png", b"second".to_vec())] {
        Mock::given(method("GET"))
            .and(path(format!("/v1/files/b1/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes))
            .expect(1)
            .mount(&server)
            .await;
    }

    // Downloads never need the bucket id.
    Mock::given(method("GET"))
        .and(path("/v1/bucket"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "appdata": "b1" })))
        .expect(0)
        .mount(&server)
        .await;

    let config = DialConfig::new("test-key", server.uri());
    let model = ModelClient::new(&config, tasks::TEXT_TO_IMAGE_DEPLOYMENT).unwrap();

    let saved = tasks::generate_images(
        &config,
        &model,
        tasks::DEFAULT_GENERATE_PROMPT,
        ImageConfiguration::default().quality(ImageQuality::Hd),
        out_dir.path(),
    )
    .await
    .unwrap();

    assert_eq!(saved.len(), 2);
    assert_eq!(std::fs::read(&saved[0]).unwrap(), b"first");
    assert_eq!(std::fs::read(&saved[1]).unwrap(), b"second");
    for file in &saved {
        let name = file.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("generated_image_"));
        assert!(name.ends_with(".png"));
    }
}

#[tokio::test]
async fn generate_images_without_attachments_writes_nothing() {
    common::init_tracing();
    let server = MockServer::start().await;
    let out_dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/openai/deployments/imagegeneration@005/chat/completions"))
        .respond_with(completion(json!({ "role": "assistant", "content": "I cannot draw." })))
        .mount(&server)
        .await;

    let config = DialConfig::new("test-key", server.uri());
    let model = ModelClient::new(&config, tasks::TEXT_TO_IMAGE_DEPLOYMENT).unwrap();

    let saved = tasks::generate_images(
        &config,
        &model,
        "Draw something",
        ImageConfiguration::default(),
        out_dir.path(),
    )
    .await
    .unwrap();

    assert!(saved.is_empty());
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}
