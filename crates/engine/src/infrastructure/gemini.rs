//! Gemini client (generateContent REST API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::config::GatewayConfig;
use crate::infrastructure::ports::{
    CompletionError, CompletionPort, CompletionRequest, CompletionResponse, TokenUsage,
};

/// Client for Gemini's `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(api_key: &str, base_url: &str, model: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    timeout_secs = timeout.as_secs(),
                    "Failed to build Gemini HTTP client, falling back to defaults without timeout"
                );
                Client::new()
            });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            timeout,
        }
    }

    /// Create a client from gateway configuration.
    ///
    /// Returns `None` when no API key is configured.
    pub fn from_config(config: &GatewayConfig) -> Option<Self> {
        let api_key = config.api_key.as_deref()?;
        Some(Self::new(
            api_key,
            &config.base_url,
            &config.model,
            config.timeout,
        ))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn map_send_error(&self, error: reqwest::Error) -> CompletionError {
        if error.is_timeout() {
            tracing::warn!(
                model = %self.model,
                timeout_secs = self.timeout.as_secs(),
                "Gemini request timed out"
            );
            return CompletionError::Timeout(self.timeout);
        }

        // Debug output carries the full source chain; keep it in the logs only.
        tracing::error!(error = ?error, model = %self.model, "Gemini transport failure");
        CompletionError::Transport(error.to_string())
    }
}

#[async_trait]
impl CompletionPort for GeminiClient {
    async fn generate(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let api_request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![TextPart {
                    text: request.prompt,
                }],
            }],
            system_instruction: SystemInstruction {
                parts: vec![TextPart {
                    text: request.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: request.response_mime_type,
                response_schema: request.response_schema,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(convert_error(status, &body));
        }

        let api_response: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        convert_response(api_response)
    }
}

fn convert_error(status: reqwest::StatusCode, body: &str) -> CompletionError {
    let code = Some(status.as_u16());

    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        if !parsed.error.message.is_empty() {
            return CompletionError::api(code, parsed.error.message);
        }
    }

    let body = body.trim();
    if body.is_empty() {
        CompletionError::api(code, status.to_string())
    } else {
        CompletionError::api(code, format!("{}: {}", status, body))
    }
}

fn convert_response(
    response: GenerateContentResponse,
) -> Result<CompletionResponse, CompletionError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(CompletionError::Blocked(format!("prompt blocked: {}", reason)));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| {
            CompletionError::InvalidResponse("No candidates in Gemini response".to_string())
        })?;

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|part| !part.thought)
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        return Err(match candidate.finish_reason.as_deref() {
            Some(reason) if reason != "STOP" => {
                CompletionError::Blocked(format!("response blocked: {}", reason))
            }
            _ => CompletionError::InvalidResponse("Candidate has no text".to_string()),
        });
    }

    Ok(CompletionResponse {
        text,
        finish_reason: candidate.finish_reason,
        usage: response.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count.unwrap_or(0),
            completion_tokens: u.candidates_token_count.unwrap_or(0),
            total_tokens: u.total_token_count.unwrap_or(0),
        }),
    })
}

// =============================================================================
// Gemini API types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: SystemInstruction,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    /// Thinking-model summaries are not part of the answer
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    total_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}
