pub mod gemini;

#[cfg(test)]
pub(crate) mod stub;

use crate::domain::error::Result;
use crate::domain::llm_config::{InlineImage, LLMConfig};
use async_trait::async_trait;

pub use gemini::GeminiClient;

#[async_trait]
pub trait LLMClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String>;
    async fn generate_with_image(
        &self,
        config: &LLMConfig,
        prompt: &str,
        image: &InlineImage,
    ) -> Result<String>;
    async fn list_models(&self, config: &LLMConfig) -> Result<Vec<String>>;
}
