pub mod agents;
pub mod domain;
pub mod extract;
pub mod llm;
pub mod workflow;

pub mod config {
    use anyhow::Context;
    use std::str::FromStr;

    pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";
    pub const DEFAULT_MODEL: &str = "llama3.2:latest";
    pub const DEFAULT_TEMPERATURE: f32 = 0.3;
    pub const DEFAULT_MAX_TOKENS: u32 = 2000;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
    pub const DEFAULT_RECOMMENDATION_RETRIES: u32 = 3;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub llm_base_url: String,
        pub llm_model: String,
        pub llm_api_key: Option<String>,
        pub llm_temperature: f32,
        pub llm_max_tokens: u32,
        pub llm_timeout_secs: u64,
        pub recommendation_retries: u32,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                llm_base_url: DEFAULT_BASE_URL.to_string(),
                llm_model: DEFAULT_MODEL.to_string(),
                llm_api_key: None,
                llm_temperature: DEFAULT_TEMPERATURE,
                llm_max_tokens: DEFAULT_MAX_TOKENS,
                llm_timeout_secs: DEFAULT_TIMEOUT_SECS,
                recommendation_retries: DEFAULT_RECOMMENDATION_RETRIES,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Builds settings from an arbitrary key lookup; `from_env` passes the process environment.
        pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let defaults = Self::default();
            let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

            Ok(Self {
                llm_base_url: non_empty("LLM_BASE_URL").unwrap_or(defaults.llm_base_url),
                llm_model: non_empty("LLM_MODEL").unwrap_or(defaults.llm_model),
                llm_api_key: non_empty("LLM_API_KEY"),
                llm_temperature: parse_or(non_empty("LLM_TEMPERATURE"), "LLM_TEMPERATURE", defaults.llm_temperature)?,
                llm_max_tokens: parse_or(non_empty("LLM_MAX_TOKENS"), "LLM_MAX_TOKENS", defaults.llm_max_tokens)?,
                llm_timeout_secs: parse_or(non_empty("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS", defaults.llm_timeout_secs)?,
                recommendation_retries: parse_or(
                    non_empty("RECOMMENDATION_RETRIES"),
                    "RECOMMENDATION_RETRIES",
                    defaults.recommendation_retries,
                )?,
                sentry_dsn: non_empty("SENTRY_DSN"),
            })
        }
    }

    fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match raw {
            Some(s) => s
                .trim()
                .parse::<T>()
                .with_context(|| format!("{key} has an invalid value: {s:?}")),
            None => Ok(default),
        }
    }

}
