//! Chat completions against a named gateway deployment.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::core::{
    DialConfig, DialError, HttpClient, Message,
    constants::completions::{CHAT_COMPLETIONS_SUFFIX, DEPLOYMENTS_PREFIX},
};

/// Anything that can answer a conversation with one message.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn get_completion(
        &self,
        messages: Vec<Message>,
        custom_fields: Option<Map<String, Value>>,
    ) -> Result<Message, DialError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_fields: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Client bound to one deployment, e.g. `gpt-4o` or `imagegeneration@005`.
#[derive(Debug, Clone)]
pub struct ModelClient {
    http: HttpClient,
    deployment_name: String,
}

impl ModelClient {
    pub fn new(config: &DialConfig, deployment_name: impl Into<String>) -> Result<Self, DialError> {
        let deployment_name = deployment_name.into();
        if deployment_name.is_empty() {
            return Err(DialError::Configuration(
                "deployment name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            http: HttpClient::new(config)?,
            deployment_name,
        })
    }

    pub fn deployment_name(&self) -> &str {
        &self.deployment_name
    }

    fn endpoint(&self) -> String {
        format!(
            "{DEPLOYMENTS_PREFIX}/{}{CHAT_COMPLETIONS_SUFFIX}",
            self.deployment_name
        )
    }
}

#[async_trait]
impl ChatCompletion for ModelClient {
    #[tracing::instrument(
        name = "chat_completion",
        skip(self, messages, custom_fields),
        fields(deployment = %self.deployment_name, message_count = messages.len()),
        err
    )]
    async fn get_completion(
        &self,
        messages: Vec<Message>,
        custom_fields: Option<Map<String, Value>>,
    ) -> Result<Message, DialError> {
        let request = ChatCompletionRequest {
            messages,
            custom_fields,
        };

        let response: ChatCompletionResponse = self
            .http
            .post_json(&self.endpoint(), &request)
            .await?
            .error_for_status()?
            .json()?;

        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| {
                DialError::InvalidResponse("completion response contained no choices".to_string())
            })?;

        info!(
            attachments = message.attachments().len(),
            "Received completion"
        );
        debug!(content = %message.content, "Completion content");

        Ok(message)
    }
}
