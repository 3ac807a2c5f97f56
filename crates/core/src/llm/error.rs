use crate::llm::Provider;
use std::fmt;

/// Where an invocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStage {
    Request,
    Http,
    Decode,
    Empty,
}

impl fmt::Display for InvocationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvocationStage::Request => "request",
            InvocationStage::Http => "http",
            InvocationStage::Decode => "decode",
            InvocationStage::Empty => "empty",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("LLM invocation failed (provider={provider:?}, stage={stage}): {detail}")]
pub struct InvocationError {
    pub provider: Provider,
    pub stage: InvocationStage,
    pub detail: String,
    pub raw_output: Option<String>,
}

impl InvocationError {
    pub fn new(provider: Provider, stage: InvocationStage, detail: impl Into<String>) -> Self {
        Self {
            provider,
            stage,
            detail: detail.into(),
            raw_output: None,
        }
    }

    pub fn with_raw_output(mut self, raw_output: impl Into<String>) -> Self {
        self.raw_output = Some(raw_output.into());
        self
    }
}
