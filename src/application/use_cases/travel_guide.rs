use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::application::use_cases::prompts::build_travel_guide_prompt;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::travel_guide::{TravelGuide, TravelGuideRequest};
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::clean_llm_response;

pub struct TravelGuideUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
}

impl TravelGuideUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    pub async fn execute(
        &self,
        config: &LLMConfig,
        request: &TravelGuideRequest,
    ) -> Result<TravelGuide> {
        request.validate()?;

        let prompt = build_travel_guide_prompt(request);
        let raw = self.llm_client.generate(config, "", &prompt).await?;
        let guide = clean_llm_response(&raw);
        if guide.is_empty() {
            return Err(AppError::LLMError("Model returned an empty guide".to_string()));
        }

        info!(
            city = %request.city,
            month = %request.month,
            budget = request.budget.label(),
            "Generated travel guide"
        );

        Ok(TravelGuide {
            city: request.city.trim().to_string(),
            month: request.month.trim().to_string(),
            language: request.language.trim().to_string(),
            budget: request.budget,
            guide,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::travel_guide::Budget;
    use crate::infrastructure::llm_clients::stub::StubClient;

    fn request(city: &str) -> TravelGuideRequest {
        TravelGuideRequest {
            city: city.to_string(),
            month: "October".to_string(),
            language: "Japanese".to_string(),
            budget: Budget::Mid,
        }
    }

    #[tokio::test]
    async fn returns_cleaned_guide() {
        let client = Arc::new(StubClient::replying("<think>plan</think>\n\n1. Fushimi Inari\n\n\n\n2. Ramen"));
        let guide = TravelGuideUseCase::new(client.clone())
            .execute(&LLMConfig::default(), &request("Kyoto"))
            .await
            .unwrap();

        assert_eq!(guide.city, "Kyoto");
        assert_eq!(guide.guide, "1. Fushimi Inari\n\n2. Ramen");
        assert!(client.last_prompt().unwrap().contains("Useful phrases in Japanese"));
    }

    #[tokio::test]
    async fn blank_city_is_rejected() {
        let client = Arc::new(StubClient::replying("unused"));
        let result = TravelGuideUseCase::new(client.clone())
            .execute(&LLMConfig::default(), &request("   "))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(client.last_prompt().is_none());
    }

    #[tokio::test]
    async fn empty_reply_is_an_error() {
        let client = Arc::new(StubClient::replying("<think>nothing</think>"));
        let result = TravelGuideUseCase::new(client)
            .execute(&LLMConfig::default(), &request("Oslo"))
            .await;
        assert!(matches!(result, Err(AppError::LLMError(_))));
    }
}
