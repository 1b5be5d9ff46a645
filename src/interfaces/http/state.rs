use std::sync::Arc;

use crate::application::{
    AdminAuthUseCase, DefectTrackerUseCase, ImageDescriptionUseCase, TestCaseGeneratorUseCase,
    TestCaseParser, TravelGuideUseCase,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::LLMClient;

pub struct AppState {
    pub config: AppConfig,
    pub llm_client: Arc<dyn LLMClient + Send + Sync>,
    pub test_case_generator: TestCaseGeneratorUseCase,
    pub travel_guide: TravelGuideUseCase,
    pub image_description: ImageDescriptionUseCase,
    pub defect_tracker: DefectTrackerUseCase,
    pub admin_auth: AdminAuthUseCase,
}

impl AppState {
    pub fn new(config: AppConfig, llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        let parser = TestCaseParser::new(config.parser.unrecognized_policy);
        let data_dir = config.storage.data_dir.clone();

        Self {
            test_case_generator: TestCaseGeneratorUseCase::new(llm_client.clone(), parser),
            travel_guide: TravelGuideUseCase::new(llm_client.clone()),
            image_description: ImageDescriptionUseCase::new(llm_client.clone()),
            defect_tracker: DefectTrackerUseCase::in_dir(&data_dir),
            admin_auth: AdminAuthUseCase::in_dir(&data_dir),
            llm_client,
            config,
        }
    }
}
