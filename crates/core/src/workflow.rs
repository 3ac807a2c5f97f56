use crate::agents::{InvestmentAdvisor, MarketAnalyst, ModelSettings};
use crate::config::Settings;
use crate::domain::recommendation::{AdvisoryReport, Horizon, InvestmentRecommendation};
use crate::extract::{extract_recommendation, ExtractionError};
use crate::llm::{InvocationError, LlmClient};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    MarketAnalysis,
    ShortTerm,
    LongTerm,
}

impl WorkflowStage {
    fn position(self) -> u8 {
        match self {
            WorkflowStage::MarketAnalysis => 1,
            WorkflowStage::ShortTerm => 2,
            WorkflowStage::LongTerm => 3,
        }
    }
}

impl From<Horizon> for WorkflowStage {
    fn from(horizon: Horizon) -> Self {
        match horizon {
            Horizon::ShortTerm => WorkflowStage::ShortTerm,
            Horizon::LongTerm => WorkflowStage::LongTerm,
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowStage::MarketAnalysis => "market analysis",
            WorkflowStage::ShortTerm => "short-term recommendation",
            WorkflowStage::LongTerm => "long-term recommendation",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("{stage} step failed")]
    Invocation {
        stage: WorkflowStage,
        #[source]
        source: InvocationError,
    },

    #[error("{stage} step returned an unusable recommendation")]
    Extraction {
        stage: WorkflowStage,
        #[source]
        source: ExtractionError,
    },
}

impl AdvisorError {
    pub fn stage(&self) -> WorkflowStage {
        match self {
            AdvisorError::Invocation { stage, .. } | AdvisorError::Extraction { stage, .. } => *stage,
        }
    }
}

/// Runs market analysis, then the short-term and long-term advisors, in that order.
///
/// The first failure aborts the run; nothing is returned for the steps that did succeed.
pub struct FinancialAdvisor {
    market: MarketAnalyst,
    short_term: InvestmentAdvisor,
    long_term: InvestmentAdvisor,
}

impl FinancialAdvisor {
    pub fn new(market: MarketAnalyst, short_term: InvestmentAdvisor, long_term: InvestmentAdvisor) -> Self {
        Self {
            market,
            short_term,
            long_term,
        }
    }

    /// Builds all three steps against one client, each with its own copy of the model settings.
    pub fn from_settings(settings: &Settings, client: Arc<dyn LlmClient>) -> Self {
        let model = ModelSettings::from_settings(settings);
        let retries = settings.recommendation_retries;
        Self::new(
            MarketAnalyst::new(client.clone(), model.clone()),
            InvestmentAdvisor::new(Horizon::ShortTerm, client.clone(), model.clone(), retries),
            InvestmentAdvisor::new(Horizon::LongTerm, client, model, retries),
        )
    }

    pub async fn run(&self) -> Result<AdvisoryReport, AdvisorError> {
        let started = Instant::now();
        tracing::info!("financial advisor workflow started");

        let stage = WorkflowStage::MarketAnalysis;
        tracing::info!(step = stage.position(), of = 3, %stage, "running step");
        let market_analysis = self.market.analyze().await.map_err(|source| {
            tracing::error!(%stage, error = %source, "step failed");
            AdvisorError::Invocation { stage, source }
        })?;
        tracing::info!(%stage, chars = market_analysis.len(), "step completed");

        let short_term_investment = self.recommend(&self.short_term, &market_analysis).await?;
        let long_term_investment = self.recommend(&self.long_term, &market_analysis).await?;

        let elapsed = started.elapsed();
        tracing::info!(elapsed_secs = elapsed.as_secs_f64(), "all steps completed");

        Ok(AdvisoryReport {
            market_analysis,
            short_term_investment,
            long_term_investment,
            generated_at: chrono::Utc::now(),
            elapsed,
        })
    }

    async fn recommend(
        &self,
        advisor: &InvestmentAdvisor,
        market_analysis: &str,
    ) -> Result<InvestmentRecommendation, AdvisorError> {
        let stage = WorkflowStage::from(advisor.horizon());
        tracing::info!(step = stage.position(), of = 3, %stage, "running step");

        let output = advisor.recommend(market_analysis).await.map_err(|source| {
            tracing::error!(%stage, error = %source, "step failed");
            AdvisorError::Invocation { stage, source }
        })?;

        let recommendation = extract_recommendation(&output).map_err(|source| {
            tracing::error!(%stage, error = %source, "step failed");
            AdvisorError::Extraction { stage, source }
        })?;

        tracing::info!(%stage, asset = %recommendation.asset_name, "step completed");
        Ok(recommendation)
    }
}
