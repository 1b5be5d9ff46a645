use serde::Serialize;

pub const DEFAULT_IMAGE_PROMPT: &str = "Describe this image in detail.";

#[derive(Debug, Clone)]
pub struct ImageDescriptionRequest {
    pub mime_type: String,
    pub data: Vec<u8>,
    pub prompt: Option<String>,
}

impl ImageDescriptionRequest {
    pub fn prompt_text(&self) -> &str {
        match self.prompt.as_deref().map(str::trim) {
            Some(prompt) if !prompt.is_empty() => prompt,
            _ => DEFAULT_IMAGE_PROMPT,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageDescription {
    pub mime_type: String,
    pub size_bytes: usize,
    pub description: String,
}
