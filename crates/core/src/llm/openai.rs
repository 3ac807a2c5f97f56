use crate::config::Settings;
use crate::llm::error::{InvocationError, InvocationStage};
use crate::llm::{ChatRequest, LlmClient, Provider};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for any server exposing the OpenAI `chat/completions` route (Ollama, vLLM, llama.cpp).
#[derive(Debug, Clone)]
pub struct OpenAiCompatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiCompatClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.llm_timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            base_url: settings.llm_base_url.clone(),
            api_key: settings.llm_api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn headers(&self) -> Result<HeaderMap, InvocationError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                InvocationError::new(
                    Provider::OpenAiCompatible,
                    InvocationStage::Request,
                    format!("invalid API key header: {e}"),
                )
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn request_body(request: &ChatRequest) -> ChatCompletionRequest<'_> {
        ChatCompletionRequest {
            model: &request.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &request.system,
                },
                Message {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        }
    }

    /// Pulls the assistant text out of a successful response body.
    fn response_text(body: &str) -> Result<String, InvocationError> {
        let parsed = serde_json::from_str::<ChatCompletionResponse>(body).map_err(|e| {
            InvocationError::new(
                Provider::OpenAiCompatible,
                InvocationStage::Decode,
                format!("unexpected response shape: {e}"),
            )
            .with_raw_output(body)
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(InvocationError::new(
                Provider::OpenAiCompatible,
                InvocationStage::Empty,
                "model returned no content",
            )
            .with_raw_output(body));
        }

        Ok(content)
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiCompatClient {
    fn provider(&self) -> Provider {
        Provider::OpenAiCompatible
    }

    async fn complete(&self, request: ChatRequest) -> Result<String, InvocationError> {
        let url = self.endpoint();
        tracing::debug!(%url, model = %request.model, "sending chat completion request");

        let res = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&Self::request_body(&request))
            .send()
            .await
            .map_err(|e| {
                InvocationError::new(
                    Provider::OpenAiCompatible,
                    InvocationStage::Request,
                    format!("request to {url} failed: {e}"),
                )
            })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| {
            InvocationError::new(
                Provider::OpenAiCompatible,
                InvocationStage::Request,
                format!("failed to read response body: {e}"),
            )
        })?;

        if !status.is_success() {
            return Err(InvocationError::new(
                Provider::OpenAiCompatible,
                InvocationStage::Http,
                format!("status={status}"),
            )
            .with_raw_output(text));
        }

        Self::response_text(&text)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
