pub mod use_cases;

pub use use_cases::admin_auth::AdminAuthUseCase;
pub use use_cases::defect_tracker::DefectTrackerUseCase;
pub use use_cases::image_description::ImageDescriptionUseCase;
pub use use_cases::test_case_generator::TestCaseGeneratorUseCase;
pub use use_cases::test_case_parser::TestCaseParser;
pub use use_cases::travel_guide::TravelGuideUseCase;
