use std::time::Duration;

use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message,
};
use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::info;

use theralink_core::models::token_count::TokenCount;

use crate::error::GenerationError;
use crate::tokens::extract_token_usage;

/// Text returned by a generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub usage: Option<TokenCount>,
}

/// An external text-generation service: prompt in, completion out.
pub trait TextGenerator: Send + Sync {
    /// Identifier of the model completions come from.
    fn model_id(&self) -> &str;

    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<Completion, GenerationError>>;
}

/// Model and decoding parameters for summary generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Inference profile ID, e.g. `us.anthropic.claude-haiku-4-5-20251001-v1:0`.
    pub model_id: String,
    /// Kept low so repeated calls for the same score read alike.
    pub temperature: f32,
    pub max_tokens: i32,
    /// Upper bound on a single model call.
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model_id: "us.anthropic.claude-haiku-4-5-20251001-v1:0".to_string(),
            temperature: 0.2,
            max_tokens: 400,
            timeout: Duration::from_secs(30),
        }
    }
}

impl GenerationSettings {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.model_id.trim().is_empty() {
            return Err(GenerationError::Config("model id is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(GenerationError::Config(format!(
                "temperature {} is outside [0, 1]",
                self.temperature
            )));
        }
        if self.max_tokens <= 0 {
            return Err(GenerationError::Config(format!(
                "max tokens must be positive, got {}",
                self.max_tokens
            )));
        }
        if self.timeout.is_zero() {
            return Err(GenerationError::Config("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// [`TextGenerator`] backed by the Bedrock Converse API.
#[derive(Debug, Clone)]
pub struct BedrockGenerator {
    client: aws_sdk_bedrockruntime::Client,
    settings: GenerationSettings,
}

impl BedrockGenerator {
    pub fn new(
        config: &aws_config::SdkConfig,
        settings: GenerationSettings,
    ) -> Result<Self, GenerationError> {
        settings.validate()?;
        Ok(Self {
            client: aws_sdk_bedrockruntime::Client::new(config),
            settings,
        })
    }

    async fn converse(&self, prompt: &str) -> Result<Completion, GenerationError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(prompt.to_string()))
            .build()
            .map_err(|e| GenerationError::Invocation(e.to_string()))?;

        let inference = InferenceConfiguration::builder()
            .temperature(self.settings.temperature)
            .max_tokens(self.settings.max_tokens)
            .build();

        info!(model_id = %self.settings.model_id, "requesting completion");

        let response = self
            .client
            .converse()
            .model_id(&self.settings.model_id)
            .messages(message)
            .inference_config(inference)
            .send()
            .await
            .map_err(|e| GenerationError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| GenerationError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        let usage = response.usage().map(extract_token_usage);

        info!(
            model_id = %self.settings.model_id,
            text_len = text.len(),
            input_tokens = usage.map(|u| u.input),
            output_tokens = usage.map(|u| u.output),
            "completion received"
        );

        Ok(Completion { text, usage })
    }
}

impl TextGenerator for BedrockGenerator {
    fn model_id(&self) -> &str {
        &self.settings.model_id
    }

    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<Completion, GenerationError>> {
        self.converse(prompt).boxed()
    }
}
