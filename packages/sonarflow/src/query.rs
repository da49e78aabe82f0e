//! Support-info scoring: how well a source fits a given input.

use crate::error::{FlowError, Result};
use crate::params::{expect_string, type_name};
use serde::Serialize;
use serde_json::Value;

/// Query object answered by [`query`]
pub const SUPPORT_INFO_OBJECT: &str = "support-info";

/// File extension marking puzzle input files
pub const FILE_EXTENSION: &str = ".aoc21";

/// Weight reported for a recognised file
pub const FILE_WEIGHT: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SupportInfo {
    pub weight: f64,
}

/// Answer a query about source support.
///
/// Params for `support-info` are `{"type": "file", "input": "<path>"}`.
pub fn query(object: &str, params: &Value) -> Result<SupportInfo> {
    if object != SUPPORT_INFO_OBJECT {
        return Err(FlowError::UnknownQuery(object.to_string()));
    }

    let Value::Object(map) = params else {
        return Err(FlowError::Configuration(format!(
            "expecting query parameters to be an object, got {}",
            type_name(params)
        )));
    };
    let input_type = map
        .get("type")
        .ok_or_else(|| FlowError::Configuration("missing `type` parameter".to_string()))?;
    let input = map
        .get("input")
        .ok_or_else(|| FlowError::Configuration("missing `input` parameter".to_string()))?;
    let input_type = expect_string(input_type, "type")?;
    let input = expect_string(input, "input")?;

    let weight = if input_type == "file" && input.ends_with(FILE_EXTENSION) {
        FILE_WEIGHT
    } else {
        0.0
    };
    log::debug!("support-info for {} ({}): {}", input, input_type, weight);

    Ok(SupportInfo { weight })
}
