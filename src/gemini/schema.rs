use serde_json::{json, Value};

use crate::models::FootStrike;

pub const VIDEO_MIME_TYPE: &str = "video/mp4";
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Fields the model must always return.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "overallScore",
    "metrics",
    "observations",
    "footStrike",
    "summary",
    "trainingSteps",
];

pub const METRIC_FIELDS: [&str; 5] = [
    "cadence",
    "strideLength",
    "groundContactTime",
    "verticalOscillation",
    "flightTime",
];

pub const OBSERVATION_FIELDS: [&str; 4] = ["joint", "finding", "score", "advice"];

/// Response schema declared on every request.
pub fn response_schema() -> Value {
    let foot_strikes: Vec<&str> = FootStrike::ALL.iter().map(FootStrike::as_str).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "overallScore": { "type": "NUMBER" },
            "metrics": {
                "type": "OBJECT",
                "properties": {
                    "cadence": { "type": "NUMBER", "description": "spm" },
                    "strideLength": { "type": "NUMBER", "description": "meters" },
                    "groundContactTime": { "type": "NUMBER", "description": "ms" },
                    "verticalOscillation": { "type": "NUMBER", "description": "cm" },
                    "flightTime": { "type": "NUMBER", "description": "ms" }
                },
                "required": METRIC_FIELDS
            },
            "observations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "joint": { "type": "STRING" },
                        "finding": { "type": "STRING" },
                        "score": { "type": "NUMBER" },
                        "advice": { "type": "STRING" }
                    },
                    "required": OBSERVATION_FIELDS
                }
            },
            "footStrike": { "type": "STRING", "enum": foot_strikes },
            "summary": { "type": "STRING" },
            "trainingSteps": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": REQUIRED_FIELDS
    })
}
