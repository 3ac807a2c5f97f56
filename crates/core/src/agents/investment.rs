use crate::agents::prompts;
use crate::agents::ModelSettings;
use crate::domain::recommendation::Horizon;
use crate::extract::{extract_from_text, RawOutput};
use crate::llm::{InvocationError, LlmClient};
use std::sync::Arc;

/// Recommends one asset for a fixed horizon, given the market overview.
///
/// Up to `retries` extra invocations are made when the call fails or the
/// answer does not validate. The answer is returned raw; turning it into an
/// [`InvestmentRecommendation`](crate::domain::recommendation::InvestmentRecommendation)
/// is the caller's job.
pub struct InvestmentAdvisor {
    horizon: Horizon,
    client: Arc<dyn LlmClient>,
    model: ModelSettings,
    retries: u32,
    system_prompt: String,
}

impl InvestmentAdvisor {
    pub fn new(horizon: Horizon, client: Arc<dyn LlmClient>, model: ModelSettings, retries: u32) -> Self {
        Self {
            horizon,
            client,
            model,
            retries,
            system_prompt: prompts::advisor_system(horizon),
        }
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    pub async fn recommend(&self, market_context: &str) -> Result<RawOutput, InvocationError> {
        let max_attempts = self.retries.saturating_add(1);
        let mut user_prompt = prompts::advisor_user(self.horizon, market_context);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let request = self.model.request(&self.system_prompt, user_prompt.clone());

            match self.client.complete(request).await {
                Ok(text) => {
                    let err = match extract_from_text(&text) {
                        Ok(_) => return Ok(RawOutput::Text(text)),
                        Err(err) => err,
                    };
                    if attempt >= max_attempts {
                        // Handed back unchanged so the caller's extraction reports the failure.
                        return Ok(RawOutput::Text(text));
                    }
                    tracing::warn!(
                        horizon = %self.horizon,
                        attempt,
                        max_attempts,
                        error = %err,
                        "advisor output failed validation; retrying"
                    );
                    user_prompt =
                        prompts::advisor_repair(self.horizon, market_context, &text, &err.to_string());
                }
                // Resends the current prompt, which is the repair prompt after an invalid answer.
                Err(err) => {
                    if attempt >= max_attempts {
                        return Err(err);
                    }
                    tracing::warn!(
                        horizon = %self.horizon,
                        attempt,
                        max_attempts,
                        error = %err,
                        "advisor invocation failed; retrying"
                    );
                }
            }
        }
    }
}
