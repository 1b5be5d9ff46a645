use std::sync::Arc;

use tracing::info;

use crate::domain::error::{AppError, Result};
use crate::domain::image_description::{ImageDescription, ImageDescriptionRequest};
use crate::domain::llm_config::{InlineImage, LLMConfig};
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::clean_llm_response;

/// Inline payloads above this size are rejected by the API.
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

pub struct ImageDescriptionUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
}

impl ImageDescriptionUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    pub async fn execute(
        &self,
        config: &LLMConfig,
        request: ImageDescriptionRequest,
    ) -> Result<ImageDescription> {
        let mime_type = request.mime_type.trim().to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(AppError::ValidationError(format!(
                "Unsupported content type '{}', expected an image",
                request.mime_type
            )));
        }
        if request.data.is_empty() {
            return Err(AppError::ValidationError("Image is empty".to_string()));
        }
        if request.data.len() > MAX_IMAGE_BYTES {
            return Err(AppError::ValidationError(format!(
                "Image is {} bytes, the limit is {}",
                request.data.len(),
                MAX_IMAGE_BYTES
            )));
        }

        let prompt = request.prompt_text().to_string();
        let size_bytes = request.data.len();
        let image = InlineImage {
            mime_type: mime_type.clone(),
            data: request.data,
        };

        let raw = self
            .llm_client
            .generate_with_image(config, &prompt, &image)
            .await?;
        let description = clean_llm_response(&raw);

        info!(mime_type = %mime_type, size_bytes, "Described image");

        Ok(ImageDescription {
            mime_type,
            size_bytes,
            description,
        })
    }
}
