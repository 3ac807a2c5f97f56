pub mod investment;
pub mod market;
pub mod prompts;

use crate::config::Settings;
use crate::llm::ChatRequest;

pub use investment::InvestmentAdvisor;
pub use market::MarketAnalyst;

/// Generation parameters a step sends with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ModelSettings {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            model: settings.llm_model.clone(),
            temperature: settings.llm_temperature,
            max_tokens: settings.llm_max_tokens,
        }
    }

    pub(crate) fn request(&self, system: &str, user: String) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            system: system.to_string(),
            user,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
