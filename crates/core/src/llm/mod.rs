pub mod error;
pub mod openai;

pub use error::InvocationError;

/// One chat-style call: a system instruction, a user instruction and generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAiCompatible,
}

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> Provider;

    /// Returns the generated text, or an error if the call did not produce any.
    async fn complete(&self, request: ChatRequest) -> Result<String, InvocationError>;
}
