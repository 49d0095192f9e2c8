//! Gemini HTTP client and the normalization round-trip.

use reqwest::Client;
use tracing::{debug, warn};

use veoprompt_models::VideoPrompt;

use crate::config::GeminiConfig;
use crate::contract::{function_declaration, FUNCTION_NAME};
use crate::error::{GeminiError, GeminiResult};
use crate::types::{
    Content, FunctionCall, FunctionCallingConfig, GenerateContentRequest,
    GenerateContentResponse, RequestPart, Tool, ToolConfig,
};

const INSTRUCTION_TEMPLATE: &str = "\
Analyze the following video description and extract all relevant elements to create a complete \
video generation prompt.

Fill in missing details with professional, cinematic defaults based on the context.
For camera specifications, use industry-standard equipment and techniques.
For lighting and ambiance, infer from the described mood or setting.

For duration_seconds, use 8 for detailed scenes, 6 for medium length, or 4 for short clips.
For aspect_ratio, use \"16:9\" for landscape/cinematic or \"9:16\" for vertical/mobile content.

Video Description:
{video_description}

Extract and structure ALL elements: subject details, scene setup, camera work, style, and \
technical parameters.";

/// Client for the Gemini structured-generation service.
///
/// Holds only the HTTP handle and read-only configuration, so one instance
/// can serve any number of independent [`normalize`](Self::normalize) calls.
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client.
    pub fn new(config: GeminiConfig) -> GeminiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeminiError::Initialization(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> GeminiResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// Normalize unstructured text into a validated [`VideoPrompt`].
    ///
    /// One round-trip, no internal retry; the caller owns any retry policy.
    pub async fn normalize(&self, text: &str) -> GeminiResult<VideoPrompt> {
        if text.trim().is_empty() {
            return Err(GeminiError::EmptyInput);
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let request = build_request(text);

        debug!(model = %self.config.model, "sending normalization request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeminiError::Timeout(self.config.timeout.as_secs())
                } else {
                    GeminiError::Network(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "normalization request rejected");
            return Err(GeminiError::Service(format!(
                "service returned {status}: {body}"
            )));
        }

        let body = response.text().await?;
        let response: GenerateContentResponse = serde_json::from_str(&body)?;
        let call = extract_function_call(response)?;

        debug!(function = %call.name, "model returned structured arguments");

        Ok(VideoPrompt::from_value(&call.args)?)
    }
}

fn build_request(text: &str) -> GenerateContentRequest {
    let instruction = INSTRUCTION_TEMPLATE.replace("{video_description}", text);

    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![RequestPart { text: instruction }],
        }],
        tools: vec![Tool {
            function_declarations: vec![function_declaration()],
        }],
        tool_config: ToolConfig {
            function_calling_config: FunctionCallingConfig {
                mode: "ANY".to_string(),
                allowed_function_names: vec![FUNCTION_NAME.to_string()],
            },
        },
    }
}

fn extract_function_call(response: GenerateContentResponse) -> GeminiResult<FunctionCall> {
    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        GeminiError::ContractViolation("response contained no candidates".to_string())
    })?;

    let parts = candidate.content.map(|content| content.parts).unwrap_or_default();

    let mut saw_text = false;
    for part in parts {
        if let Some(call) = part.function_call {
            if call.name != FUNCTION_NAME {
                return Err(GeminiError::ContractViolation(format!(
                    "model called unknown function {}",
                    call.name
                )));
            }
            return Ok(call);
        }
        if part.text.is_some() {
            saw_text = true;
        }
    }

    if saw_text {
        Err(GeminiError::ContractViolation(
            "model returned free text instead of a function call".to_string(),
        ))
    } else {
        Err(GeminiError::ContractViolation(
            "response contained no function call".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_embeds_the_description_and_guidance() {
        let request = build_request("a cat chasing a laser pointer");
        let instruction = &request.contents[0].parts[0].text;

        assert!(instruction.contains("a cat chasing a laser pointer"));
        assert!(instruction.contains("duration_seconds"));
        assert!(instruction.contains("\"16:9\""));
        assert!(!instruction.contains("{video_description}"));
    }

    #[test]
    fn test_request_forces_structured_output() {
        let request = build_request("anything");
        assert_eq!(request.tool_config.function_calling_config.mode, "ANY");
        assert_eq!(
            request.tool_config.function_calling_config.allowed_function_names,
            vec![FUNCTION_NAME.to_string()]
        );
        assert_eq!(request.tools[0].function_declarations.len(), 1);
    }
}
