use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::llm::groq::GroqClient;
use crate::llm::retry::RetryingClient;
use crate::{RecapError, Result};

/// Who a chat message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged message of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

/// A hosted model that turns a message sequence into one text completion.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Short provider name used in logs and reports.
    fn provider(&self) -> &'static str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;
}

#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for Box<T> {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        (**self).complete(messages).await
    }

    fn provider(&self) -> &'static str {
        (**self).provider()
    }

    fn model(&self) -> &str {
        (**self).model()
    }
}

/// Build a completion client from runtime settings, wrapped in the configured retry policy.
pub fn build_client(settings: &Settings) -> Result<Box<dyn CompletionClient>> {
    let inner: Box<dyn CompletionClient> = match settings.llm.provider.to_lowercase().as_str() {
        "groq" => Box::new(GroqClient::from_settings(settings)?),
        "gemini" => Box::new(GeminiClient::from_settings(settings)?),
        other => {
            return Err(RecapError::Config(format!(
                "Unsupported llm.provider '{}'. Supported providers: groq, gemini",
                other
            )))
        }
    };

    Ok(Box::new(RetryingClient::new(inner, settings.llm.retry.clone())))
}
