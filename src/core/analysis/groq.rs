//! Groq chat-completions analyzer
//!
//! Groq exposes an OpenAI-compatible API; the model is asked for a JSON
//! object (`response_format: json_object`) which is then validated.

use super::prompt::{SYSTEM_PROMPT, user_prompt};
use super::{Analyzer, AnalyzerError, DEFAULT_CATEGORY, ErrorAnalysis, Severity};
use crate::config::AnalyzerConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Analyzer backed by the Groq API
pub struct GroqAnalyzer {
    client: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Model output before validation
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    causes: Vec<String>,
    #[serde(default)]
    solutions: Vec<String>,
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "example_code")]
    #[serde(rename = "exampleCode")]
    example_code: Option<String>,
}

impl GroqAnalyzer {
    /// Build an analyzer from configuration; the key may come from `GROQ_API_KEY`
    pub fn new(config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AnalyzerError::NotConfigured(format!("HTTP client: {}", e)))?;

        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            warn!("GROQ_API_KEY is not set; analysis requests will fail");
        }

        Ok(Self {
            client,
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
        })
    }

    fn parse_content(content: &str) -> Result<ErrorAnalysis, AnalyzerError> {
        let raw: RawAnalysis = serde_json::from_str(content.trim())
            .map_err(|e| AnalyzerError::MalformedResponse(format!("invalid JSON: {}", e)))?;

        let severity = match raw.severity.as_deref() {
            Some(value) => value
                .parse::<Severity>()
                .map_err(AnalyzerError::MalformedResponse)?,
            None => {
                return Err(AnalyzerError::MalformedResponse(
                    "severity is missing".to_string(),
                ));
            }
        };

        let category = raw
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let analysis = ErrorAnalysis {
            explanation: raw.explanation.trim().to_string(),
            causes: non_empty(raw.causes),
            solutions: non_empty(raw.solutions),
            severity,
            category,
            example_code: raw.example_code.filter(|code| !code.trim().is_empty()),
        };
        analysis.validate()?;
        Ok(analysis)
    }
}

fn non_empty(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[async_trait]
impl Analyzer for GroqAnalyzer {
    async fn analyze(
        &self,
        error_text: &str,
        language: &str,
    ) -> Result<ErrorAnalysis, AnalyzerError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AnalyzerError::NotConfigured("GROQ_API_KEY is not set".to_string()))?;

        let prompt = user_prompt(error_text, language);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/chat/completions", self.api_base);
        debug!(model = %self.model, "Requesting error analysis");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalyzerError::Timeout(self.timeout_secs)
                } else {
                    AnalyzerError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::Upstream {
                status: status.as_u16(),
                message: crate::utils::truncate_chars(&body, 200),
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AnalyzerError::Timeout(self.timeout_secs)
            } else {
                AnalyzerError::MalformedResponse(format!("invalid completion body: {}", e))
            }
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AnalyzerError::MalformedResponse("no completion content".to_string()))?;

        Self::parse_content(&content)
    }

    fn name(&self) -> &'static str {
        "groq"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
