use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Budget {
    High,
    Mid,
    Low,
}

impl Budget {
    pub fn label(self) -> &'static str {
        match self {
            Budget::High => "High",
            Budget::Mid => "Mid",
            Budget::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TravelGuideRequest {
    #[validate(length(min = 1, max = 120), custom(function = "not_blank"))]
    pub city: String,
    #[validate(length(min = 1, max = 40), custom(function = "not_blank"))]
    pub month: String,
    #[validate(length(min = 1, max = 60), custom(function = "not_blank"))]
    pub language: String,
    pub budget: Budget,
}

#[derive(Debug, Clone, Serialize)]
pub struct TravelGuide {
    pub city: String,
    pub month: String,
    pub language: String,
    pub budget: Budget,
    pub guide: String,
}

pub(crate) fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}
