pub mod admin_auth;
pub mod defect_tracker;
pub mod image_description;
pub(crate) mod prompts;
pub mod test_case_export;
pub mod test_case_generator;
pub mod test_case_parser;
pub mod travel_guide;
