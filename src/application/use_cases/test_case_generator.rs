use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::application::use_cases::prompts::build_test_case_prompt;
use crate::application::use_cases::test_case_export::{self, ExportFormat};
use crate::application::use_cases::test_case_parser::TestCaseParser;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::test_case::{column_union, GeneratedTestCases, ParseReport, TestCaseRequest};
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::clean_llm_response;

/// A finished download: bytes plus what to call them.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct TestCaseGeneratorUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    parser: TestCaseParser,
}

impl TestCaseGeneratorUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>, parser: TestCaseParser) -> Self {
        Self { llm_client, parser }
    }

    pub async fn generate(
        &self,
        config: &LLMConfig,
        request: &TestCaseRequest,
    ) -> Result<GeneratedTestCases> {
        request.validate()?;
        if request.module.trim().is_empty() || request.acceptance_criteria.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Please fill in all required fields.".to_string(),
            ));
        }

        let prompt = build_test_case_prompt(request);
        let raw = self.llm_client.generate(config, "", &prompt).await?;
        let raw_text = clean_llm_response(&raw);
        let report = self.parser.parse(&raw_text);

        if report.is_empty() {
            warn!(module = %request.module, "Model reply contained no parseable test cases");
        }
        info!(
            module = %request.module,
            scenario = request.scenario_type.label(),
            records = report.records.len(),
            "Generated test cases"
        );

        Ok(GeneratedTestCases {
            module: request.module.trim().to_string(),
            raw_text,
            records: report.records,
            warnings: report.warnings,
        })
    }

    pub fn parse(&self, text: &str) -> ParseReport {
        self.parser.parse(&clean_llm_response(text))
    }

    /// Parses `text` and packages the records for download. Refuses to build
    /// an empty file so the caller can tell the user nothing was found.
    pub fn export_text(
        &self,
        text: &str,
        module: Option<&str>,
        format: ExportFormat,
    ) -> Result<ExportedFile> {
        let report = self.parse(text);
        if report.is_empty() || column_union(&report.records).is_empty() {
            return Err(AppError::ValidationError(
                "No test cases found. Please check the generated format.".to_string(),
            ));
        }

        let bytes = test_case_export::export(&report.records, format)?;
        info!(
            records = report.records.len(),
            format = format.extension(),
            bytes = bytes.len(),
            "Exported test cases"
        );

        Ok(ExportedFile {
            file_name: export_file_name(module, format),
            mime_type: format.mime_type(),
            bytes,
        })
    }
}

/// `<module>_test_cases.<ext>`, with the module reduced to `[A-Za-z0-9_-]`.
pub fn export_file_name(module: Option<&str>, format: ExportFormat) -> String {
    let stem: String = module
        .unwrap_or_default()
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if stem.is_empty() {
        format!("test_cases.{}", format.extension())
    } else {
        format!("{}_test_cases.{}", stem, format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_case_export::read_xlsx;
    use crate::domain::test_case::{
        ParseWarning, ScenarioType, TestCaseField, TestCaseTemplate, UnrecognizedPolicy,
    };
    use crate::infrastructure::llm_clients::stub::StubClient;

    const REPLY: &str = "Sure! Here are the test cases:\n\n\
        **Test Case ID:** TC-001\n**Description:** Valid login\nSteps: 1. Submit\nExpected Results: Dashboard\n\n\
        Test Case ID: TC-002\nDescription: Wrong password\nExpected Results: Error\n";

    fn request() -> TestCaseRequest {
        TestCaseRequest {
            module: "Login".to_string(),
            acceptance_criteria: "User can log in".to_string(),
            scenario_type: ScenarioType::All,
            template: TestCaseTemplate::Basic,
        }
    }

    fn use_case(client: Arc<StubClient>) -> TestCaseGeneratorUseCase {
        TestCaseGeneratorUseCase::new(client, TestCaseParser::default())
    }

    #[tokio::test]
    async fn generate_parses_cleaned_reply() {
        let client = Arc::new(StubClient::replying(REPLY));
        let generated = use_case(client.clone())
            .generate(&LLMConfig::default(), &request())
            .await
            .unwrap();

        assert_eq!(generated.module, "Login");
        assert_eq!(generated.records.len(), 2);
        assert_eq!(
            generated.records[0].get(TestCaseField::TestCaseId),
            Some("TC-001")
        );
        assert!(generated.warnings.is_empty());

        let prompt = client.last_prompt().unwrap();
        assert!(prompt.contains("Module: Login\n"));
        assert!(prompt.contains("Scenario Type: All Scenarios"));
    }

    #[tokio::test]
    async fn generate_reports_empty_reply() {
        let client = Arc::new(StubClient::replying("I cannot help with that."));
        let generated = use_case(client)
            .generate(&LLMConfig::default(), &request())
            .await
            .unwrap();

        assert!(generated.records.is_empty());
        assert_eq!(generated.warnings, vec![ParseWarning::EmptyInput]);
    }

    #[tokio::test]
    async fn generate_rejects_blank_fields_without_calling_model() {
        let client = Arc::new(StubClient::replying(REPLY));
        let mut req = request();
        req.acceptance_criteria = "   ".to_string();

        let result = use_case(client.clone())
            .generate(&LLMConfig::default(), &req)
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(client.last_prompt().is_none());
    }

    #[tokio::test]
    async fn generate_propagates_llm_failure() {
        let client = Arc::new(StubClient::failing());
        let result = use_case(client)
            .generate(&LLMConfig::default(), &request())
            .await;
        assert!(matches!(result, Err(AppError::LLMError(_))));
    }

    #[test]
    fn export_text_builds_named_workbook() {
        let client = Arc::new(StubClient::failing());
        let file = use_case(client)
            .export_text(REPLY, Some("User Login"), ExportFormat::Xlsx)
            .unwrap();

        assert_eq!(file.file_name, "User_Login_test_cases.xlsx");
        assert_eq!(file.mime_type, test_case_export::XLSX_MIME);
        let sheet = read_xlsx(&file.bytes).unwrap();
        assert_eq!(
            sheet.header,
            vec!["Test Case ID", "Description", "Steps", "Expected Results"]
        );
        assert_eq!(sheet.rows.len(), 2);
    }

    #[test]
    fn export_text_refuses_empty_result() {
        let client = Arc::new(StubClient::failing());
        let result = use_case(client).export_text("nothing here", None, ExportFormat::Csv);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn export_text_refuses_prose_under_collect_policy() {
        let generator = TestCaseGeneratorUseCase::new(
            Arc::new(StubClient::failing()),
            TestCaseParser::new(UnrecognizedPolicy::Collect),
        );
        for format in [ExportFormat::Xlsx, ExportFormat::Csv] {
            let result =
                generator.export_text("Sorry, I cannot help with that.", Some("Auth"), format);
            assert!(matches!(result, Err(AppError::ValidationError(_))));
        }
    }

    #[test]
    fn collect_policy_flows_through_parse() {
        let generator = TestCaseGeneratorUseCase::new(
            Arc::new(StubClient::failing()),
            TestCaseParser::new(UnrecognizedPolicy::Collect),
        );
        let report = generator.parse("TC-1\nPriority: High");
        assert_eq!(report.records[0].unrecognized.len(), 1);
    }

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(
            export_file_name(Some("../etc/passwd"), ExportFormat::Xlsx),
            "etcpasswd_test_cases.xlsx"
        );
        assert_eq!(export_file_name(Some("  "), ExportFormat::Csv), "test_cases.csv");
        assert_eq!(export_file_name(None, ExportFormat::Xlsx), "test_cases.xlsx");
    }
}
