//! OpenAI client configuration and shared structured-output plumbing.

use crate::error::{Result, VidgistError};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
    ResponseFormatJsonSchema,
};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
///
/// Audio transcription of a 20 MiB payload routinely takes tens of
/// seconds; the generous ceiling only guards against hung connections.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client with configured timeout.
pub fn create_client() -> Client<OpenAIConfig> {
    create_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an OpenAI client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}

/// Check if the OpenAI API key is configured.
pub fn is_api_key_configured() -> bool {
    std::env::var("OPENAI_API_KEY").is_ok()
}

/// Issue one chat completion bound to an explicit JSON schema and parse
/// the reply as JSON.
///
/// The schema is strict: every field is enumerated and required, so a
/// conforming reply deserializes without guesswork. Any API failure or
/// non-JSON reply maps to [`VidgistError::Generative`].
pub async fn structured_call(
    client: &Client<OpenAIConfig>,
    model: &str,
    system_prompt: &str,
    user_prompt: String,
    schema_name: &str,
    schema: serde_json::Value,
) -> Result<serde_json::Value> {
    let messages: Vec<ChatCompletionRequestMessage> = vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()
            .map_err(|e| VidgistError::Generative(e.to_string()))?
            .into(),
        ChatCompletionRequestUserMessageArgs::default()
            .content(user_prompt)
            .build()
            .map_err(|e| VidgistError::Generative(e.to_string()))?
            .into(),
    ];

    let request = CreateChatCompletionRequestArgs::default()
        .model(model)
        .messages(messages)
        .response_format(ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: None,
                name: schema_name.to_string(),
                schema: Some(schema),
                strict: Some(true),
            },
        })
        .build()
        .map_err(|e| VidgistError::Generative(e.to_string()))?;

    let response = client
        .chat()
        .create(request)
        .await
        .map_err(|e| VidgistError::Generative(format!("{} API error: {}", model, e)))?;

    let content = response
        .choices
        .first()
        .and_then(|c| c.message.content.as_ref())
        .ok_or_else(|| VidgistError::Generative("Empty response from model".to_string()))?;

    serde_json::from_str(content)
        .map_err(|e| VidgistError::Generative(format!("Malformed structured output: {}", e)))
}
