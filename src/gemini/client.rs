use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::{
    models::{AnalysisResult, Language, SkillLevel},
    prompt::{build_prompt, PromptInput},
};

use super::{
    schema::{response_schema, RESPONSE_MIME_TYPE, VIDEO_MIME_TYPE},
    types::{Blob, Content, GenerateContentRequest, GenerationConfig, Part},
    validate::parse_assessment,
    AnalysisError, ModelTransport,
};

/// Parameters of one analysis besides the video itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisParams {
    pub runner_description: String,
    pub target_pace: String,
    pub level: SkillLevel,
    pub language: Language,
}

#[derive(Clone)]
pub struct AnalysisClient {
    transport: Arc<dyn ModelTransport>,
}

impl AnalysisClient {
    pub fn new(transport: Arc<dyn ModelTransport>) -> Self {
        Self { transport }
    }

    /// Sends one request and turns the answer into a decorated result.
    /// Never retries.
    pub async fn analyze(
        &self,
        video: Vec<u8>,
        params: &AnalysisParams,
    ) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_prompt(&PromptInput {
            runner_description: &params.runner_description,
            target_pace: &params.target_pace,
            level: params.level,
            language: params.language,
        });
        let video_len = video.len();
        let request = build_request(&video, prompt);
        drop(video);

        info!("Submitting {video_len}-byte video for analysis");

        let transport = self.transport.clone();
        let response = tokio::task::spawn_blocking(move || transport.generate_content(&request))
            .await
            .map_err(|err| AnalysisError::Transport(format!("model request task failed: {err}")))?
            .map_err(|err| AnalysisError::Transport(format!("{err:#}")))?;

        if let Some(reason) = response.block_reason() {
            warn!("Model blocked the request: {reason}");
            return Err(AnalysisError::Transport(format!("request blocked: {reason}")));
        }

        let text = response.text().ok_or(AnalysisError::NoResult)?;
        let assessment = parse_assessment(&text)?;

        Ok(AnalysisResult::from_assessment(
            assessment,
            Uuid::new_v4().to_string(),
            Utc::now(),
            params.target_pace.clone(),
            params.runner_description.clone(),
            Some(params.level),
        ))
    }
}

pub fn build_request(video: &[u8], prompt: String) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text { text: prompt },
                Part::InlineData {
                    inline_data: Blob {
                        mime_type: VIDEO_MIME_TYPE.into(),
                        data: STANDARD.encode(video),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: RESPONSE_MIME_TYPE.into(),
            response_schema: response_schema(),
        },
    }
}
