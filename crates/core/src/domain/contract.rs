use crate::domain::recommendation::InvestmentRecommendation;
use serde_json::{Map, Value};
use std::fmt;

/// Keys every recommendation object must carry, all string-valued.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "asset_name",
    "rationale",
    "risk_level",
    "expected_return",
    "time_horizon",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldViolation {
    Missing { field: &'static str },
    NotAString { field: &'static str, found: &'static str },
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldViolation::Missing { field } => write!(f, "{field}: field required"),
            FieldViolation::NotAString { field, found } => {
                write!(f, "{field}: expected string, found {found}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("recommendation does not match schema: {}", join_violations(.violations))]
pub struct SchemaValidationError {
    pub violations: Vec<FieldViolation>,
}

impl SchemaValidationError {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.violations
            .iter()
            .filter_map(|v| match v {
                FieldViolation::Missing { field } => Some(*field),
                FieldViolation::NotAString { .. } => None,
            })
            .collect()
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl InvestmentRecommendation {
    /// Validates a decoded JSON object against the recommendation shape.
    ///
    /// All violations are collected before failing. Keys outside
    /// [`REQUIRED_FIELDS`] are ignored.
    pub fn from_json_object(object: &Map<String, Value>) -> Result<Self, SchemaValidationError> {
        let mut violations = Vec::new();
        let mut string_field = |field: &'static str| match object.get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                violations.push(FieldViolation::NotAString {
                    field,
                    found: json_kind(other),
                });
                None
            }
            None => {
                violations.push(FieldViolation::Missing { field });
                None
            }
        };

        let asset_name = string_field("asset_name");
        let rationale = string_field("rationale");
        let risk_level = string_field("risk_level");
        let expected_return = string_field("expected_return");
        let time_horizon = string_field("time_horizon");

        match (asset_name, rationale, risk_level, expected_return, time_horizon) {
            (
                Some(asset_name),
                Some(rationale),
                Some(risk_level),
                Some(expected_return),
                Some(time_horizon),
            ) => Ok(Self {
                asset_name,
                rationale,
                risk_level,
                expected_return,
                time_horizon,
            }),
            _ => Err(SchemaValidationError { violations }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture is not an object: {other}"),
        }
    }

    fn valid() -> Value {
        json!({
            "asset_name": "NIFTY 50 ETF",
            "rationale": "Broad exposure",
            "risk_level": "Medium",
            "expected_return": "10-12%",
            "time_horizon": "Short-term",
        })
    }

    #[test]
    fn accepts_complete_object() {
        let rec = InvestmentRecommendation::from_json_object(&object(valid())).unwrap();
        assert_eq!(rec.asset_name, "NIFTY 50 ETF");
        assert_eq!(rec.rationale, "Broad exposure");
        assert_eq!(rec.risk_level, "Medium");
        assert_eq!(rec.expected_return, "10-12%");
        assert_eq!(rec.time_horizon, "Short-term");
    }

    #[test]
    fn fields_are_read_by_name() {
        let map = object(json!({
            "time_horizon": "Long-term",
            "expected_return": "7%",
            "risk_level": "Low",
            "rationale": "Stable coupons",
            "asset_name": "Government Bond Fund",
        }));
        let rec = InvestmentRecommendation::from_json_object(&map).unwrap();
        assert_eq!(rec.asset_name, "Government Bond Fund");
        assert_eq!(rec.rationale, "Stable coupons");
        assert_eq!(rec.risk_level, "Low");
        assert_eq!(rec.expected_return, "7%");
        assert_eq!(rec.time_horizon, "Long-term");
    }

    #[test]
    fn each_missing_field_is_reported() {
        for field in REQUIRED_FIELDS {
            let mut map = object(valid());
            map.remove(field);
            let err = InvestmentRecommendation::from_json_object(&map).unwrap_err();
            assert_eq!(err.missing_fields(), vec![field]);
        }
    }

    #[test]
    fn collects_every_violation() {
        let map = object(json!({
            "asset_name": 42,
            "rationale": null,
            "risk_level": "High",
        }));
        let err = InvestmentRecommendation::from_json_object(&map).unwrap_err();
        assert_eq!(
            err.violations,
            vec![
                FieldViolation::NotAString { field: "asset_name", found: "number" },
                FieldViolation::NotAString { field: "rationale", found: "null" },
                FieldViolation::Missing { field: "expected_return" },
                FieldViolation::Missing { field: "time_horizon" },
            ]
        );
        assert!(err.to_string().contains("asset_name: expected string, found number"));
    }

    #[test]
    fn unenforced_values_and_extra_keys_are_accepted() {
        let mut map = object(valid());
        map.insert("risk_level".into(), json!("Extreme"));
        map.insert("time_horizon".into(), json!(""));
        map.insert("confidence".into(), json!(0.9));
        let rec = InvestmentRecommendation::from_json_object(&map).unwrap();
        assert_eq!(rec.risk_level, "Extreme");
        assert_eq!(rec.time_horizon, "");
    }
}
