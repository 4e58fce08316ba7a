use anyhow::{anyhow, Context, Result};
use log::debug;

use crate::config::AppConfig;

use super::types::{GenerateContentRequest, GenerateContentResponse};

/// One blocking request/response exchange with the model endpoint.
pub trait ModelTransport: Send + Sync {
    fn generate_content(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse>;
}

pub struct GeminiTransport {
    agent: ureq::Agent,
    endpoint: String,
    api_key: Option<String>,
    debug: bool,
}

impl GeminiTransport {
    /// No timeouts are configured beyond ureq's own defaults.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
            debug: config.debug,
        }
    }
}

impl ModelTransport for GeminiTransport {
    fn generate_content(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("API key is not configured (set RUNFORM_API_KEY)"))?;

        let body = serde_json::to_string(request).context("failed to serialize model request")?;
        if self.debug {
            debug!("POST {} ({} bytes)", self.endpoint, body.len());
        }

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .set("x-goog-api-key", api_key)
            .send_string(&body);

        let text = match response {
            Ok(resp) => resp
                .into_string()
                .context("failed to read model response body")?,
            Err(ureq::Error::Status(code, resp)) => {
                let text = resp.into_string().unwrap_or_default();
                return Err(anyhow!("model endpoint returned {code}: {text}"));
            }
            Err(err) => return Err(anyhow!("failed to reach model endpoint: {err}")),
        };

        if self.debug {
            debug!("model response: {} bytes", text.len());
        }

        serde_json::from_str(&text).context("model endpoint returned an unexpected body")
    }
}
