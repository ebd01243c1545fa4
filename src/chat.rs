//! Chat model abstraction and the default OpenAI-backed implementation.
//!
//! Defines the [`ChatModel`] trait — the single capability the response
//! pipeline needs: send an ordered message sequence, get text back — and
//! one concrete implementation:
//! - **[`OpenAiChat`]** — calls the chat-completions API over HTTPS.
//!
//! Callers may inject any other implementation (tests use a scripted mock);
//! the default is constructed only when no override is supplied.
//!
//! # Failure Policy
//!
//! One attempt per call, no retry loop. Network errors and non-2xx
//! responses propagate to the caller with status and body context. The
//! API key is validated before any request is built, so a missing or
//! malformed credential never reaches the network.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::config::ChatConfig;

/// Role tag for one conversational turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged turn in the sequence sent to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A black-box chat model: ordered messages in, plain text out.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the message sequence and return the model's text reply.
    async fn invoke(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Read the OpenAI API key from the environment and validate it.
///
/// # Errors
///
/// Fails when `OPENAI_API_KEY` is unset, empty after trimming, or does
/// not start with `sk-`. This runs before any network interaction.
pub fn openai_api_key() -> Result<String> {
    let key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    validate_api_key(key.trim())
}

fn validate_api_key(key: &str) -> Result<String> {
    if key.is_empty() || !key.starts_with("sk-") {
        bail!(
            "Invalid or missing OPENAI_API_KEY environment variable. \
             Ensure it exists and starts with 'sk-'."
        );
    }
    Ok(key.to_string())
}

/// Chat model backed by the OpenAI chat-completions API.
///
/// Sends `POST {api_base}/chat/completions` with the configured model and
/// returns `choices[0].message.content`.
pub struct OpenAiChat {
    model: String,
    api_base: String,
    api_key: String,
    timeout: Duration,
}

impl OpenAiChat {
    /// Create a provider from configuration, reading the API key from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the key is missing or malformed;
    /// no request is attempted in that case.
    pub fn from_env(config: &ChatConfig) -> Result<Self> {
        Ok(Self {
            model: config.model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: openai_api_key()?,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn invoke(&self, messages: &[ChatMessage]) -> Result<String> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        let response = client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("chat completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("OpenAI API error {}: {}", status, body_text);
        }

        let json: serde_json::Value = response.json().await?;
        extract_content(&json)
    }
}

/// Pull the assistant text out of a chat-completions response.
fn extract_content(json: &serde_json::Value) -> Result<String> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("Invalid chat response: missing choices[0].message.content"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_api_key_accepts_sk_prefix() {
        assert_eq!(validate_api_key("sk-abc123").unwrap(), "sk-abc123");
    }

    #[test]
    fn test_validate_api_key_rejects_empty() {
        assert!(validate_api_key("").is_err());
    }

    #[test]
    fn test_validate_api_key_rejects_wrong_prefix() {
        assert!(validate_api_key("pk-abc123").is_err());
        assert!(validate_api_key("abc123").is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let message = ChatMessage::system("hello");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value, json!({"role": "system", "content": "hello"}));

        let message = ChatMessage::user("hi");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "user");
    }

    #[test]
    fn test_extract_content() {
        let json = json!({
            "choices": [{"message": {"role": "assistant", "content": "The answer."}}]
        });
        assert_eq!(extract_content(&json).unwrap(), "The answer.");
    }

    #[test]
    fn test_extract_content_missing_choices() {
        let json = json!({"error": {"message": "bad request"}});
        assert!(extract_content(&json).is_err());
    }

    #[test]
    fn test_extract_content_null_content() {
        let json = json!({"choices": [{"message": {"role": "assistant", "content": null}}]});
        assert!(extract_content(&json).is_err());
    }
}
