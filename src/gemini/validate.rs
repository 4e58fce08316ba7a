//! Explicit check of the model's JSON against the declared schema before it is
//! turned into a [`ModelAssessment`].

use serde_json::{Map, Value};

use crate::models::{FootStrike, ModelAssessment};

use super::{
    schema::{METRIC_FIELDS, OBSERVATION_FIELDS},
    AnalysisError,
};

type Object = Map<String, Value>;

pub fn parse_assessment(text: &str) -> Result<ModelAssessment, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::NoResult);
    }

    let value: Value = serde_json::from_str(text)?;
    validate_assessment(&value)?;

    serde_json::from_value(value).map_err(|err| AnalysisError::validation("$", err.to_string()))
}

pub fn validate_assessment(value: &Value) -> Result<(), AnalysisError> {
    let root = as_object(value, "$")?;

    require_number(root, "", "overallScore")?;

    let metrics = as_object(require(root, "", "metrics")?, "metrics")?;
    for field in METRIC_FIELDS {
        require_number(metrics, "metrics", field)?;
    }

    let observations = require_array(root, "", "observations")?;
    for (index, item) in observations.iter().enumerate() {
        let path = format!("observations[{index}]");
        let observation = as_object(item, &path)?;
        for field in OBSERVATION_FIELDS {
            if field == "score" {
                require_number(observation, &path, field)?;
            } else {
                require_string(observation, &path, field)?;
            }
        }
    }

    let foot_strike = require_string(root, "", "footStrike")?;
    if FootStrike::parse(foot_strike).is_none() {
        return Err(AnalysisError::validation(
            "footStrike",
            format!("`{foot_strike}` is not one of Heel, Midfoot, Forefoot"),
        ));
    }

    require_string(root, "", "summary")?;

    let steps = require_array(root, "", "trainingSteps")?;
    for (index, step) in steps.iter().enumerate() {
        if !step.is_string() {
            return Err(AnalysisError::validation(
                format!("trainingSteps[{index}]"),
                "expected a string",
            ));
        }
    }

    Ok(())
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, AnalysisError> {
    value
        .as_object()
        .ok_or_else(|| AnalysisError::validation(path, "expected an object"))
}

fn require<'a>(object: &'a Object, parent: &str, key: &str) -> Result<&'a Value, AnalysisError> {
    match object.get(key) {
        Some(Value::Null) | None => Err(AnalysisError::validation(
            join(parent, key),
            "required field is missing",
        )),
        Some(value) => Ok(value),
    }
}

fn require_number(object: &Object, parent: &str, key: &str) -> Result<f64, AnalysisError> {
    require(object, parent, key)?
        .as_f64()
        .ok_or_else(|| AnalysisError::validation(join(parent, key), "expected a number"))
}

fn require_string<'a>(object: &'a Object, parent: &str, key: &str) -> Result<&'a str, AnalysisError> {
    require(object, parent, key)?
        .as_str()
        .ok_or_else(|| AnalysisError::validation(join(parent, key), "expected a string"))
}

fn require_array<'a>(
    object: &'a Object,
    parent: &str,
    key: &str,
) -> Result<&'a Vec<Value>, AnalysisError> {
    require(object, parent, key)?
        .as_array()
        .ok_or_else(|| AnalysisError::validation(join(parent, key), "expected an array"))
}
