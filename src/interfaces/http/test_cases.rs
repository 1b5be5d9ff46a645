use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use super::{add_log, fail, HttpState};
use crate::application::use_cases::test_case_export::{import_xlsx, ExportFormat};
use crate::domain::test_case::{TestCaseRecord, TestCaseRequest};

#[derive(Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct ExportRequest {
    pub text: String,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub format: ExportFormat,
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub records: Vec<TestCaseRecord>,
}

#[post("/test-cases/generate")]
async fn generate_test_cases(
    data: web::Data<HttpState>,
    req: web::Json<TestCaseRequest>,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "TestCases",
        &format!(
            "Generating test cases (module={} scenario={} model={})",
            req.module,
            req.scenario_type.label(),
            data.app_state.config.llm.model
        ),
    );

    match data
        .app_state
        .test_case_generator
        .generate(&data.app_state.config.llm, &req)
        .await
    {
        Ok(generated) => {
            if generated.records.is_empty() {
                add_log(
                    &data.logs,
                    "WARN",
                    "TestCases",
                    "Failed to parse test cases. Please check the generated format.",
                );
            }
            HttpResponse::Ok().json(generated)
        }
        Err(e) => fail(&data.logs, "TestCases", "Test case generation failed", &e),
    }
}

#[post("/test-cases/parse")]
async fn parse_test_cases(
    data: web::Data<HttpState>,
    req: web::Json<ParseRequest>,
) -> impl Responder {
    let report = data.app_state.test_case_generator.parse(&req.text);
    HttpResponse::Ok().json(report)
}

#[post("/test-cases/export")]
async fn export_test_cases(
    data: web::Data<HttpState>,
    req: web::Json<ExportRequest>,
) -> impl Responder {
    match data.app_state.test_case_generator.export_text(
        &req.text,
        req.module.as_deref(),
        req.format,
    ) {
        Ok(file) => {
            add_log(
                &data.logs,
                "INFO",
                "TestCases",
                &format!("Prepared {} ({} bytes)", file.file_name, file.bytes.len()),
            );
            HttpResponse::Ok()
                .content_type(file.mime_type)
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(file.file_name)],
                })
                .body(file.bytes)
        }
        Err(e) => fail(&data.logs, "TestCases", "Export failed", &e),
    }
}

#[post("/test-cases/import")]
async fn import_test_cases(data: web::Data<HttpState>, body: web::Bytes) -> impl Responder {
    match import_xlsx(&body) {
        Ok(records) => {
            add_log(
                &data.logs,
                "INFO",
                "TestCases",
                &format!("Imported {} test cases from workbook", records.len()),
            );
            HttpResponse::Ok().json(ImportResponse { records })
        }
        Err(e) => fail(&data.logs, "TestCases", "Import failed", &e),
    }
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_test_cases)
        .service(parse_test_cases)
        .service(export_test_cases)
        .service(import_test_cases);
}
