use crate::domain::contract::{json_kind, SchemaValidationError};
use crate::domain::recommendation::InvestmentRecommendation;
use serde_json::{Map, Value};

/// What a step hands back: model text, or an object that is already decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutput {
    Text(String),
    Structured(Map<String, Value>),
}

impl From<String> for RawOutput {
    fn from(text: String) -> Self {
        RawOutput::Text(text)
    }
}

impl From<&str> for RawOutput {
    fn from(text: &str) -> Self {
        RawOutput::Text(text.to_string())
    }
}

impl From<Map<String, Value>> for RawOutput {
    fn from(object: Map<String, Value>) -> Self {
        RawOutput::Structured(object)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("output is not valid JSON: {0}")]
    Parse(serde_json::Error),

    #[error("output is JSON but not an object (found {found})")]
    NotAnObject { found: &'static str },

    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
}

impl ExtractionError {
    pub fn is_parse(&self) -> bool {
        matches!(self, ExtractionError::Parse(_))
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, ExtractionError::Schema(_))
    }
}

/// Turns raw step output into a validated recommendation.
///
/// Text must be exactly one JSON object. Markdown fences or surrounding prose
/// are not stripped and make extraction fail.
pub fn extract_recommendation(output: &RawOutput) -> Result<InvestmentRecommendation, ExtractionError> {
    match output {
        RawOutput::Structured(object) => Ok(InvestmentRecommendation::from_json_object(object)?),
        RawOutput::Text(text) => extract_from_text(text),
    }
}

pub fn extract_from_text(text: &str) -> Result<InvestmentRecommendation, ExtractionError> {
    let value = serde_json::from_str::<Value>(text).map_err(ExtractionError::Parse)?;
    match value {
        Value::Object(object) => Ok(InvestmentRecommendation::from_json_object(&object)?),
        other => Err(ExtractionError::NotAnObject {
            found: json_kind(&other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contract::REQUIRED_FIELDS;
    use serde_json::json;

    const SHORT_TERM_JSON: &str = r#"{"asset_name":"NIFTY 50 ETF","rationale":"Broad exposure","risk_level":"Medium","expected_return":"10-12%","time_horizon":"Short-term"}"#;

    fn sample() -> InvestmentRecommendation {
        InvestmentRecommendation {
            asset_name: "Index Fund".to_string(),
            rationale: "Diversified portfolio with long-term growth potential".to_string(),
            risk_level: "Medium".to_string(),
            expected_return: "12-15% annually".to_string(),
            time_horizon: "Long-term".to_string(),
        }
    }

    #[test]
    fn parses_plain_json_text() {
        let rec = extract_recommendation(&RawOutput::from(SHORT_TERM_JSON)).unwrap();
        assert_eq!(rec.asset_name, "NIFTY 50 ETF");
        assert_eq!(rec.time_horizon, "Short-term");
    }

    #[test]
    fn serialized_recommendation_round_trips() {
        let original = sample();
        let text = serde_json::to_string(&original).unwrap();
        assert_eq!(extract_recommendation(&RawOutput::Text(text)).unwrap(), original);

        let pretty = serde_json::to_string_pretty(&original).unwrap();
        assert_eq!(extract_recommendation(&RawOutput::Text(pretty)).unwrap(), original);
    }

    #[test]
    fn structured_input_matches_text_input() {
        let Value::Object(object) = serde_json::from_str::<Value>(SHORT_TERM_JSON).unwrap() else {
            panic!("fixture must be an object");
        };
        let from_map = extract_recommendation(&RawOutput::Structured(object)).unwrap();
        let from_text = extract_recommendation(&RawOutput::from(SHORT_TERM_JSON)).unwrap();
        assert_eq!(from_map, from_text);
    }

    #[test]
    fn missing_field_is_a_schema_error_for_both_inputs() {
        for field in REQUIRED_FIELDS {
            let mut value = serde_json::to_value(sample()).unwrap();
            value.as_object_mut().unwrap().remove(field);

            let err = extract_recommendation(&RawOutput::Text(value.to_string())).unwrap_err();
            assert!(err.is_schema(), "{field}: {err}");

            let Value::Object(object) = value else { unreachable!() };
            let err = extract_recommendation(&RawOutput::Structured(object)).unwrap_err();
            match err {
                ExtractionError::Schema(schema) => assert_eq!(schema.missing_fields(), vec![field]),
                other => panic!("expected schema error, got {other}"),
            }
        }
    }

    #[test]
    fn non_string_field_is_a_schema_error() {
        let text = json!({
            "asset_name": "Gold ETF",
            "rationale": "Hedge",
            "risk_level": 2,
            "expected_return": "8%",
            "time_horizon": "Long-term",
        })
        .to_string();
        let err = extract_recommendation(&RawOutput::Text(text)).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("risk_level: expected string, found number"));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        for text in [
            "",
            "not json at all",
            r#"{"asset_name": "X",}"#,
            "{\"asset_name\": \"X\"",
        ] {
            let err = extract_recommendation(&RawOutput::from(text)).unwrap_err();
            assert!(err.is_parse(), "{text:?} gave {err}");
            assert!(!err.is_schema());
        }
    }

    #[test]
    fn trailing_comma_is_a_parse_error() {
        let text = r#"{"asset_name":"Index Fund","rationale":"r","risk_level":"Low","expected_return":"8%","time_horizon":"Long-term",}"#;
        let err = extract_recommendation(&RawOutput::from(text)).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn json_that_is_not_an_object_fails() {
        for (text, kind) in [
            ("[1, 2, 3]", "array"),
            ("42", "number"),
            ("\"Index Fund\"", "string"),
            ("true", "bool"),
            ("null", "null"),
        ] {
            match extract_recommendation(&RawOutput::from(text)).unwrap_err() {
                ExtractionError::NotAnObject { found } => assert_eq!(found, kind),
                other => panic!("{text}: expected NotAnObject, got {other}"),
            }
        }
    }

    #[test]
    fn wrapped_json_is_not_unwrapped() {
        let fenced = format!("```json\n{SHORT_TERM_JSON}\n```");
        assert!(extract_recommendation(&RawOutput::Text(fenced)).unwrap_err().is_parse());

        let prose = format!("Here is my recommendation: {SHORT_TERM_JSON}");
        assert!(extract_recommendation(&RawOutput::Text(prose)).unwrap_err().is_parse());

        let two = format!("{SHORT_TERM_JSON}\n{SHORT_TERM_JSON}");
        assert!(extract_recommendation(&RawOutput::Text(two)).unwrap_err().is_parse());
    }

    #[test]
    fn surrounding_whitespace_is_fine() {
        let text = format!("\n  {SHORT_TERM_JSON}  \n");
        assert!(extract_recommendation(&RawOutput::Text(text)).is_ok());
    }
}
