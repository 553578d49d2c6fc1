//! Gemini integration for workout-plan generation and coach Q&A.
//!
//! Both call sites share one prompt-agnostic completion call; only the
//! prompt content differs. No retries, no streaming, and upstream failures
//! surface their message verbatim.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

use crate::models::UserStats;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-pro";

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
  #[error("API key not configured")]
  MissingApiKey,

  #[error("Request failed: {0}")]
  Request(String),

  #[error("API error: {0}")]
  Api(String),

  #[error("Parse error: {0}")]
  Parse(String),
}

/// ---------------------------------------------------------------------------
/// Gemini API Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest {
  contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
  parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
  text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Content,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
  error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
  message: String,
}

/// ---------------------------------------------------------------------------
/// Prompts
/// ---------------------------------------------------------------------------

/// The 5-day bodybuilding plan template, interpolated with user stats
pub fn workout_plan_prompt(stats: &UserStats) -> String {
  format!(
    r#"Create a detailed 5-day bodybuilding workout plan:

Overview:
- Rest days and schedule
- Progression guidelines
- Cardio recommendations
- Nutrition tips
- General guidelines

For each day (Days 1-5), provide:
Day [X]: [Focus]
- Detailed exercise list with sets, reps, and rest periods
- Form cues and tips
- Progression suggestions

User stats:
- Weight: {}kg
- Height: {}cm
- Goal: {}
- Experience: {}

Please provide a comprehensive and detailed plan with clear formatting."#,
    stats.weight, stats.height, stats.goal, stats.experience
  )
}

/// ---------------------------------------------------------------------------
/// Gemini Client
/// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct GeminiClient {
  client: Client,
  api_key: String,
  base_url: String,
}

impl GeminiClient {
  /// Create a new Gemini client, loading the API key from the environment
  pub fn from_env() -> Result<Self, GeminiError> {
    let api_key = env::var("GOOGLE_API_KEY").map_err(|_| GeminiError::MissingApiKey)?;
    Ok(Self::new(api_key))
  }

  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      client: Client::new(),
      api_key: api_key.into(),
      base_url: GEMINI_API_BASE.to_string(),
    }
  }

  /// Client pointed at an alternate base URL (used by tests)
  pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      ..Self::new(api_key)
    }
  }

  /// Single-shot text completion for an arbitrary prompt
  pub async fn complete(&self, prompt: &str) -> Result<String, GeminiError> {
    let url = format!(
      "{}/{}:generateContent?key={}",
      self.base_url, GEMINI_MODEL, self.api_key
    );

    let request = GenerateRequest {
      contents: vec![Content {
        parts: vec![Part {
          text: prompt.to_string(),
        }],
      }],
    };

    let response = self
      .client
      .post(&url)
      .json(&request)
      .send()
      .await
      .map_err(|e| GeminiError::Request(e.to_string()))?;

    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(|e| GeminiError::Request(e.to_string()))?;

    if !status.is_success() {
      // Surface the upstream message verbatim when it parses
      if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&body) {
        return Err(GeminiError::Api(error_resp.error.message));
      }
      return Err(GeminiError::Api(format!("HTTP {}: {}", status, body)));
    }

    let generate_response: GenerateResponse =
      serde_json::from_str(&body).map_err(|e| GeminiError::Parse(e.to_string()))?;

    generate_response
      .candidates
      .into_iter()
      .next()
      .and_then(|c| c.content.parts.into_iter().next())
      .map(|p| p.text)
      .ok_or_else(|| GeminiError::Parse("No text content in response".to_string()))
  }

  /// Generate a workout plan for the given user stats
  pub async fn generate_workout_plan(&self, stats: &UserStats) -> Result<String, GeminiError> {
    self.complete(&workout_plan_prompt(stats)).await
  }

  /// Free-form coach Q&A: the question is the prompt
  pub async fn ask(&self, question: &str) -> Result<String, GeminiError> {
    self.complete(question).await
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
