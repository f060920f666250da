//! AI tutor: turns a scenario's explanation prompt into a short answer.

use std::sync::Arc;

use async_trait::async_trait;
use shared::error::RedoxError;
use thiserror::Error;
use tracing::warn;

mod gemini;

pub use gemini::{GeminiConfig, GeminiProvider, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};

/// Used when a scenario carries no prompt of its own.
pub const DEFAULT_PROMPT: &str =
    "請用繁體中文，向高中生簡單解釋鈉(Na)和氯(Cl)形成氯化鈉(NaCl)的氧化還原反應過程。";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured")]
    MissingCredential,
    #[error("provider returned no text")]
    EmptyResponse,
    #[error("provider responded with status {status}")]
    Status { status: u16, body: String },
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<ProviderError> for RedoxError {
    fn from(err: ProviderError) -> Self {
        RedoxError::ProviderFailure(err.to_string())
    }
}

#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    /// `prompt` is already framed; see [`frame_prompt`].
    async fn explain(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Stand-in used when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingCredentialProvider;

#[async_trait]
impl ExplanationProvider for MissingCredentialProvider {
    async fn explain(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::MissingCredential)
    }
}

pub fn frame_prompt(prompt: &str) -> String {
    let prompt = prompt.trim();
    let prompt = if prompt.is_empty() { DEFAULT_PROMPT } else { prompt };
    format!("身為一位專業的化學老師，{prompt} 請將解釋控制在 150 字以內，語氣生動有趣。")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackMessages {
    pub missing_credential: String,
    pub empty_response: String,
    pub unavailable: String,
}

impl Default for FallbackMessages {
    fn default() -> Self {
        Self {
            missing_credential: "請設定 API Key 以啟用 AI 導師功能。".into(),
            empty_response: "無法產生解釋，請稍後再試。".into(),
            unavailable: "AI 服務暫時無法使用，請檢查網路或 API Key。".into(),
        }
    }
}

impl FallbackMessages {
    pub fn for_error(&self, err: &ProviderError) -> &str {
        match err {
            ProviderError::MissingCredential => &self.missing_credential,
            ProviderError::EmptyResponse => &self.empty_response,
            ProviderError::Status { .. } | ProviderError::Transport(_) => &self.unavailable,
        }
    }
}

/// Wraps a provider so callers always get displayable text.
#[derive(Clone)]
pub struct Tutor {
    provider: Arc<dyn ExplanationProvider>,
    fallbacks: FallbackMessages,
}

impl Tutor {
    pub fn new(provider: Arc<dyn ExplanationProvider>) -> Self {
        Self {
            provider,
            fallbacks: FallbackMessages::default(),
        }
    }

    /// Gemini when a key is present, otherwise the missing-credential stand-in.
    pub fn from_config(config: Option<GeminiConfig>) -> Self {
        match config {
            Some(config) => Self::new(Arc::new(GeminiProvider::new(config))),
            None => Self::new(Arc::new(MissingCredentialProvider)),
        }
    }

    pub fn with_fallbacks(mut self, fallbacks: FallbackMessages) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    pub async fn try_explain(&self, prompt: &str) -> Result<String, ProviderError> {
        let text = self.provider.explain(&frame_prompt(prompt)).await?;
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }

    pub async fn explain(&self, prompt: &str) -> String {
        match self.try_explain(prompt).await {
            Ok(text) => text,
            Err(err) => {
                let fallback = self.fallbacks.for_error(&err).to_string();
                let err = RedoxError::from(err);
                warn!(code = ?err.code(), error = %err, "explanation unavailable");
                fallback
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
