use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no result received from the model")]
    NoResult,

    #[error("model response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model response failed validation at `{field}`: {reason}")]
    Validation { field: String, reason: String },

    #[error("model request failed: {0}")]
    Transport(String),
}

impl AnalysisError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
