use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// A single recommendation as produced by one of the investment advisors.
///
/// `risk_level` is expected to be "Low", "Medium" or "High" and `time_horizon`
/// "Short-term" or "Long-term", but neither is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestmentRecommendation {
    pub asset_name: String,
    pub rationale: String,
    pub risk_level: String,
    pub expected_return: String,
    pub time_horizon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    ShortTerm,
    LongTerm,
}

impl Horizon {
    /// The `time_horizon` value the advisor is told to emit.
    pub fn label(self) -> &'static str {
        match self {
            Horizon::ShortTerm => "Short-term",
            Horizon::LongTerm => "Long-term",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryReport {
    pub market_analysis: String,
    pub short_term_investment: InvestmentRecommendation,
    pub long_term_investment: InvestmentRecommendation,
    pub generated_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(elapsed.as_secs_f64())
}
