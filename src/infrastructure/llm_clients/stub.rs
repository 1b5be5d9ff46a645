use super::LLMClient;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{InlineImage, LLMConfig};
use async_trait::async_trait;
use std::sync::Mutex;

/// Canned-reply client that records every prompt it receives.
#[derive(Default)]
pub(crate) struct StubClient {
    reply: Option<String>,
    pub(crate) prompts: Mutex<Vec<String>>,
    pub(crate) images: Mutex<Vec<InlineImage>>,
}

impl StubClient {
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self::default()
    }

    fn answer(&self) -> Result<String> {
        self.reply
            .clone()
            .ok_or_else(|| AppError::LLMError("API error (503): unavailable".to_string()))
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LLMClient for StubClient {
    async fn generate(&self, _config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push(format!("{}{}", system, user));
        self.answer()
    }

    async fn generate_with_image(
        &self,
        _config: &LLMConfig,
        prompt: &str,
        image: &InlineImage,
    ) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.images.lock().unwrap().push(image.clone());
        self.answer()
    }

    async fn list_models(&self, _config: &LLMConfig) -> Result<Vec<String>> {
        Ok(vec!["stub-model".to_string()])
    }
}
