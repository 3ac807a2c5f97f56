use crate::domain::recommendation::Horizon;

pub const MARKET_ANALYST_SYSTEM: &str = "\
You are a professional financial market analyst.

Responsibilities:
- Analyze current global and Indian market trends
- Evaluate macroeconomic factors such as inflation,
  interest rates, and geopolitical events
- Assess overall market sentiment
- Provide a concise, factual, and easy-to-understand
  market overview that can be used by other advisors
  for investment decision-making";

pub const MARKET_ANALYST_USER: &str = "Analyze current financial market conditions.";

const OUTPUT_RULES: &str = "\
CRITICAL INSTRUCTIONS:
- You must return ONLY a valid JSON object
- Do NOT use function call format
- Do NOT wrap the response in any additional text
- Return the JSON directly as your final answer";

fn focus(horizon: Horizon) -> &'static str {
    match horizon {
        Horizon::ShortTerm => "\
You are a short-term investment advisor.

Focus:
- Time horizon: weeks to months
- Market momentum and short-term volatility
- Tactical investment opportunities",
        Horizon::LongTerm => "\
You are a long-term investment advisor.

Focus:
- Time horizon: multiple years
- Strong fundamentals and financial stability
- Risk-adjusted returns and long-term compounding",
    }
}

fn required_shape(horizon: Horizon) -> String {
    format!(
        "{{\n  \"asset_name\": \"Name of the investment\",\n  \"rationale\": \"Why this investment is recommended\",\n  \"risk_level\": \"Low\" or \"Medium\" or \"High\",\n  \"expected_return\": \"Expected return description\",\n  \"time_horizon\": \"{}\"\n}}",
        horizon.label()
    )
}

fn example_output(horizon: Horizon) -> &'static str {
    match horizon {
        Horizon::ShortTerm => "\
{
  \"asset_name\": \"NIFTY 50 ETF\",
  \"rationale\": \"Broad market exposure with stable growth potential\",
  \"risk_level\": \"Medium\",
  \"expected_return\": \"10-12% annually\",
  \"time_horizon\": \"Short-term\"
}",
        Horizon::LongTerm => "\
{
  \"asset_name\": \"Index Fund\",
  \"rationale\": \"Diversified portfolio with long-term growth potential\",
  \"risk_level\": \"Medium\",
  \"expected_return\": \"12-15% annually\",
  \"time_horizon\": \"Long-term\"
}",
    }
}

pub fn advisor_system(horizon: Horizon) -> String {
    format!(
        "{}\n\n{OUTPUT_RULES}\n\nRequired JSON format:\n{}\n\nExample output:\n{}",
        focus(horizon),
        required_shape(horizon),
        example_output(horizon)
    )
}

fn horizon_word(horizon: Horizon) -> &'static str {
    match horizon {
        Horizon::ShortTerm => "short-term",
        Horizon::LongTerm => "long-term",
    }
}

pub fn advisor_user(horizon: Horizon, market_context: &str) -> String {
    format!(
        "Market Context: {market_context}\n\n\
Provide a {} investment recommendation. \
Return ONLY a JSON object with the required fields.",
        horizon_word(horizon)
    )
}

/// Follow-up sent after an answer that failed validation.
pub fn advisor_repair(horizon: Horizon, market_context: &str, previous_output: &str, error: &str) -> String {
    format!(
        "Your previous message was NOT a valid recommendation ({error}).\n\n\
TASK: Output ONLY a single JSON object that exactly matches the required format.\n\
- Do NOT include any markdown, prose, or code fences.\n\
- Do NOT include trailing commas or comments.\n\
- Use double quotes for all JSON strings.\n\
- Every value MUST be a string.\n\
- The JSON MUST include keys: asset_name, rationale, risk_level, expected_return, time_horizon.\n\n\
REQUIRED FORMAT:\n{}\n\n\
{}\n\n\
INVALID OUTPUT (for reference only; DO NOT copy verbatim):\n{previous_output}",
        required_shape(horizon),
        advisor_user(horizon, market_context)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_is_specialized_per_horizon() {
        let short = advisor_system(Horizon::ShortTerm);
        assert!(short.contains("weeks to months"));
        assert!(short.contains("\"time_horizon\": \"Short-term\""));
        assert!(short.contains("NIFTY 50 ETF"));
        assert!(short.contains("ONLY a valid JSON object"));

        let long = advisor_system(Horizon::LongTerm);
        assert!(long.contains("multiple years"));
        assert!(long.contains("\"time_horizon\": \"Long-term\""));
        assert!(!long.contains("Short-term"));
    }

    #[test]
    fn user_prompt_embeds_market_context() {
        let prompt = advisor_user(Horizon::LongTerm, "Markets stable, moderate growth.");
        assert_eq!(
            prompt,
            "Market Context: Markets stable, moderate growth.\n\n\
Provide a long-term investment recommendation. Return ONLY a JSON object with the required fields."
        );
    }

    #[test]
    fn repair_prompt_quotes_previous_output() {
        let prompt = advisor_repair(Horizon::ShortTerm, "calm", "{oops", "output is not valid JSON");
        assert!(prompt.contains("output is not valid JSON"));
        assert!(prompt.ends_with("{oops"));
        assert!(prompt.contains("Market Context: calm"));
    }
}
