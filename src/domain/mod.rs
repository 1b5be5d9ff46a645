pub mod credentials;
pub mod defect;
pub mod error;
pub mod image_description;
pub mod llm_config;
pub mod test_case;
pub mod travel_guide;
