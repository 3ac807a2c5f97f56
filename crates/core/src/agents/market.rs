use crate::agents::prompts::{MARKET_ANALYST_SYSTEM, MARKET_ANALYST_USER};
use crate::agents::ModelSettings;
use crate::llm::{InvocationError, LlmClient};
use std::sync::Arc;

/// Produces the free-form market overview every recommendation is based on.
pub struct MarketAnalyst {
    client: Arc<dyn LlmClient>,
    model: ModelSettings,
}

impl MarketAnalyst {
    pub fn new(client: Arc<dyn LlmClient>, model: ModelSettings) -> Self {
        Self { client, model }
    }

    /// One invocation, no retry. The text is returned verbatim.
    pub async fn analyze(&self) -> Result<String, InvocationError> {
        let request = self
            .model
            .request(MARKET_ANALYST_SYSTEM, MARKET_ANALYST_USER.to_string());
        self.client.complete(request).await
    }
}
