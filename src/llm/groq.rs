use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::client::{ChatMessage, CompletionClient};
use crate::{RecapError, Result};

const DEFAULT_GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1";
const DEFAULT_GROQ_MODEL: &str = "llama3-70b-8192";
const PROVIDER: &str = "groq";

/// Client for Groq's OpenAI-compatible chat completions API.
pub struct GroqClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GroqClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.llm.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(RecapError::Config(
                "Groq API key is missing. Set llm.api_key in config, RECAP_API_KEY or GROQ_API_KEY."
                    .to_string(),
            ));
        }

        let model = if settings.llm.model.trim().is_empty() {
            DEFAULT_GROQ_MODEL.to_string()
        } else {
            settings.llm.model.trim().to_string()
        };

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_GROQ_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(settings.llm.timeout_secs))
                .build()?,
            api_key,
            model,
            endpoint,
        })
    }

    fn request_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        tracing::debug!(model = %self.model, messages = messages.len(), "Sending Groq request");

        let response = self
            .http
            .post(self.request_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecapError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let payload: ChatCompletionResponse = response.json().await?;

        payload
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content.filter(|c| !c.trim().is_empty()))
            .ok_or(RecapError::EmptyCompletion(PROVIDER))
    }

    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(server: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.llm.api_key = "test-key".to_string();
        settings.llm.endpoint = format!("{}/", server.uri());
        settings
    }

    #[tokio::test]
    async fn sends_chat_completion_and_returns_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "llama3-70b-8192",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi there."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GroqClient::from_settings(&settings_for(&server)).unwrap();
        let text = client
            .complete(&[ChatMessage::system("be brief"), ChatMessage::user("hello")])
            .await
            .unwrap();

        assert_eq!(text, "Hi there.");
    }

    #[tokio::test]
    async fn error_status_keeps_code_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = GroqClient::from_settings(&settings_for(&server)).unwrap();
        let err = client.complete(&[ChatMessage::user("hello")]).await.unwrap_err();

        match err {
            RecapError::Status { status, body, .. } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_choices_is_an_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = GroqClient::from_settings(&settings_for(&server)).unwrap();
        let err = client.complete(&[ChatMessage::user("hello")]).await.unwrap_err();
        assert!(matches!(err, RecapError::EmptyCompletion("groq")));
    }

    #[tokio::test]
    async fn blank_content_is_an_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": ""}}]
            })))
            .mount(&server)
            .await;

        let client = GroqClient::from_settings(&settings_for(&server)).unwrap();
        let err = client.complete(&[ChatMessage::user("hello")]).await.unwrap_err();
        assert!(matches!(err, RecapError::EmptyCompletion("groq")));
    }

    #[test]
    fn configured_model_overrides_default() {
        let mut settings = Settings::default();
        settings.llm.api_key = "k".to_string();
        settings.llm.model = " llama-3.3-70b-versatile ".to_string();

        let client = GroqClient::from_settings(&settings).unwrap();
        assert_eq!(client.model(), "llama-3.3-70b-versatile");
        assert_eq!(
            client.request_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }
}
