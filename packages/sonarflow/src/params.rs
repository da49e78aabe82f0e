//! Construction parameters for source components.
//!
//! Parameters arrive as a JSON object. A depth source expects
//! `{"path": "<file>"}`; a command source expects `{"inputs": ["<file>", ...]}`
//! and only reads the first input.

use crate::error::{FlowError, Result};
use crate::source::Schema;
use serde_json::Value;
use std::path::PathBuf;

/// Validated source parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceParams {
    pub path: PathBuf,
}

impl SourceParams {
    pub fn from_value(schema: Schema, params: &Value) -> Result<Self> {
        let Value::Object(map) = params else {
            return Err(FlowError::Configuration(format!(
                "expecting parameters to be an object, got {}",
                type_name(params)
            )));
        };

        let path = match schema {
            Schema::Depth => {
                let path = map.get("path").ok_or_else(|| {
                    FlowError::Configuration("missing `path` parameter".to_string())
                })?;
                expect_string(path, "path")?
            }
            Schema::Command => {
                let inputs = map.get("inputs").ok_or_else(|| {
                    FlowError::Configuration("missing `inputs` parameter".to_string())
                })?;
                let Value::Array(inputs) = inputs else {
                    return Err(FlowError::Configuration(format!(
                        "unexpected `inputs` parameter type, got {}",
                        type_name(inputs)
                    )));
                };
                let first = inputs.first().ok_or_else(|| {
                    FlowError::Configuration("`inputs` parameter is empty".to_string())
                })?;
                expect_string(first, "inputs[0]")?
            }
        };

        Ok(Self {
            path: PathBuf::from(path),
        })
    }

    /// Parameters in the shape a source of `schema` expects for `path`.
    pub fn to_value(schema: Schema, path: &str) -> Value {
        match schema {
            Schema::Depth => serde_json::json!({ "path": path }),
            Schema::Command => serde_json::json!({ "inputs": [path] }),
        }
    }
}

pub(crate) fn expect_string<'a>(value: &'a Value, name: &str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| {
        FlowError::Configuration(format!(
            "expecting `{}` parameter to be a string, got {}",
            name,
            type_name(value)
        ))
    })
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_message(result: Result<SourceParams>) -> String {
        match result {
            Err(FlowError::Configuration(msg)) => msg,
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_depth_params() {
        let params = SourceParams::from_value(Schema::Depth, &json!({ "path": "in.aoc21" })).unwrap();
        assert_eq!(params.path, PathBuf::from("in.aoc21"));
    }

    #[test]
    fn test_depth_params_missing_path() {
        let msg = config_message(SourceParams::from_value(Schema::Depth, &json!({})));
        assert!(msg.contains("missing `path`"));
    }

    #[test]
    fn test_depth_params_wrong_type() {
        let msg = config_message(SourceParams::from_value(Schema::Depth, &json!({ "path": 3 })));
        assert!(msg.contains("a number"));
    }

    #[test]
    fn test_command_params_uses_first_input() {
        let params = SourceParams::from_value(
            Schema::Command,
            &json!({ "inputs": ["first.aoc21", "second.aoc21"] }),
        )
        .unwrap();
        assert_eq!(params.path, PathBuf::from("first.aoc21"));
    }

    #[test]
    fn test_command_params_invalid() {
        let msg = config_message(SourceParams::from_value(Schema::Command, &json!({})));
        assert!(msg.contains("missing `inputs`"));

        let msg = config_message(SourceParams::from_value(
            Schema::Command,
            &json!({ "inputs": "in.aoc21" }),
        ));
        assert!(msg.contains("unexpected `inputs`"));

        let msg = config_message(SourceParams::from_value(Schema::Command, &json!({ "inputs": [] })));
        assert!(msg.contains("empty"));

        let msg = config_message(SourceParams::from_value(Schema::Command, &json!({ "inputs": [1] })));
        assert!(msg.contains("inputs[0]"));
    }

    #[test]
    fn test_params_not_an_object() {
        let msg = config_message(SourceParams::from_value(Schema::Depth, &json!(["in.aoc21"])));
        assert!(msg.contains("an array"));
    }

    #[test]
    fn test_to_value_round_trips_through_validation() {
        for schema in [Schema::Depth, Schema::Command] {
            let value = SourceParams::to_value(schema, "in.aoc21");
            let params = SourceParams::from_value(schema, &value).unwrap();
            assert_eq!(params.path, PathBuf::from("in.aoc21"));
        }
    }
}
