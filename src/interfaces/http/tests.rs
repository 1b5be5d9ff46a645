use super::*;
use crate::application::use_cases::test_case_export::{read_xlsx, XLSX_MIME};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::stub::StubClient;
use crate::infrastructure::llm_clients::LLMClient;
use actix_web::http::header;
use actix_web::test as actix_test;
use serde_json::{json, Value};
use std::path::Path;

const REPLY: &str = "Test Case ID: TC-001\nDescription: Login works\nSteps: 1. Open app\nExpected Results: User logged in\n\nTest Case ID: TC-002\nDescription: Logout\n";

fn http_state(dir: &Path, client: StubClient) -> web::Data<HttpState> {
    let mut config = AppConfig::default();
    config.storage.data_dir = dir.to_path_buf();
    let client: Arc<dyn LLMClient + Send + Sync> = Arc::new(client);

    web::Data::new(HttpState {
        app_state: Arc::new(AppState::new(config, client)),
        logs: Arc::new(Mutex::new(Vec::new())),
    })
}

macro_rules! app {
    ($state:expr) => {
        actix_test::init_service(App::new().app_data($state.clone()).configure(configure)).await
    };
}

fn defect_json(release: &str) -> Value {
    json!({
        "Release": release,
        "Platform": "Web",
        "Component": "Cart",
        "Date": "2024-06-01",
        "Priority": "High",
        "Severity": "Major",
        "Count": 2,
        "Status": "Open",
        "AssignedTo": "lee",
        "Description": ""
    })
}

#[actix_web::test]
async fn health_responds() {
    let dir = tempfile::tempdir().unwrap();
    let state = http_state(dir.path(), StubClient::failing());
    let app = app!(state);

    let req = actix_test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"status": "ok"}));
}

#[actix_web::test]
async fn generate_returns_records() {
    let dir = tempfile::tempdir().unwrap();
    let state = http_state(dir.path(), StubClient::replying(REPLY));
    let app = app!(state);

    let req = actix_test::TestRequest::post()
        .uri("/api/test-cases/generate")
        .set_json(json!({
            "module": "Auth",
            "acceptance_criteria": "Users can log in and out",
            "scenario_type": "Positive Scenarios"
        }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["module"], "Auth");
    assert_eq!(body["records"].as_array().unwrap().len(), 2);
    assert_eq!(body["records"][0]["Test Case ID"], "TC-001");
    assert_eq!(body["warnings"], json!([]));
}

#[actix_web::test]
async fn generate_maps_llm_failure_to_bad_gateway() {
    let dir = tempfile::tempdir().unwrap();
    let state = http_state(dir.path(), StubClient::failing());
    let app = app!(state);

    let req = actix_test::TestRequest::post()
        .uri("/api/test-cases/generate")
        .set_json(json!({"module": "Auth", "acceptance_criteria": "x"}))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let logs = state.logs.lock().unwrap();
    assert_eq!(logs.last().unwrap().level, "ERROR");
}

#[actix_web::test]
async fn parse_reports_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let state = http_state(dir.path(), StubClient::failing());
    let app = app!(state);

    let req = actix_test::TestRequest::post()
        .uri("/api/test-cases/parse")
        .set_json(json!({"text": ""}))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["records"], json!([]));
    assert_eq!(body["warnings"], json!(["empty_input"]));
}

#[actix_web::test]
async fn export_returns_workbook_attachment() {
    let dir = tempfile::tempdir().unwrap();
    let state = http_state(dir.path(), StubClient::failing());
    let app = app!(state);

    let req = actix_test::TestRequest::post()
        .uri("/api/test-cases/export")
        .set_json(json!({"text": REPLY, "module": "Auth"}))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        XLSX_MIME
    );
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("Auth_test_cases.xlsx"));

    let bytes = actix_test::read_body(resp).await;
    let sheet = read_xlsx(&bytes).unwrap();
    assert_eq!(sheet.rows.len(), 2);
}

#[actix_web::test]
async fn export_of_unparseable_text_is_unprocessable() {
    let dir = tempfile::tempdir().unwrap();
    let state = http_state(dir.path(), StubClient::failing());
    let app = app!(state);

    let req = actix_test::TestRequest::post()
        .uri("/api/test-cases/export")
        .set_json(json!({"text": "no cases", "format": "csv"}))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = actix_test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("No test cases found"));
}

#[actix_web::test]
async fn import_reads_exported_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let state = http_state(dir.path(), StubClient::failing());
    let app = app!(state);

    let export = actix_test::TestRequest::post()
        .uri("/api/test-cases/export")
        .set_json(json!({"text": REPLY}))
        .to_request();
    let bytes = actix_test::call_and_read_body(&app, export).await;

    let import = actix_test::TestRequest::post()
        .uri("/api/test-cases/import")
        .insert_header((header::CONTENT_TYPE, XLSX_MIME))
        .set_payload(bytes)
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, import).await;
    assert_eq!(body["records"][1]["Description"], "Logout");
}

#[actix_web::test]
async fn travel_guide_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = http_state(dir.path(), StubClient::replying("guide"));
    let app = app!(state);

    let req = actix_test::TestRequest::post()
        .uri("/api/travel-guide")
        .set_json(json!({"city": "", "month": "May", "language": "French", "budget": "Low"}))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn describe_image_uses_content_type_and_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let state = http_state(dir.path(), StubClient::replying("A login form."));
    let app = app!(state);

    let req = actix_test::TestRequest::post()
        .uri("/api/images/describe?prompt=What%20is%20shown")
        .insert_header((header::CONTENT_TYPE, "image/jpeg"))
        .set_payload(vec![0xFF, 0xD8, 0xFF])
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["description"], "A login form.");
    assert_eq!(body["mime_type"], "image/jpeg");
    assert_eq!(body["size_bytes"], 3);
}

#[actix_web::test]
async fn defect_writes_require_login() {
    let dir = tempfile::tempdir().unwrap();
    let state = http_state(dir.path(), StubClient::failing());
    let app = app!(state);

    let anonymous = actix_test::TestRequest::post()
        .uri("/api/defects")
        .set_json(defect_json("v1.0.0"))
        .to_request();
    let resp = actix_test::call_service(&app, anonymous).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let login = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "admin", "password": "admin123"}))
        .to_request();
    let session: Value = actix_test::call_and_read_body_json(&app, login).await;
    let token = session["token"].as_str().unwrap().to_string();

    let add = actix_test::TestRequest::post()
        .uri("/api/defects")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(defect_json("v1.0.0"))
        .to_request();
    let resp = actix_test::call_service(&app, add).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let summary = actix_test::TestRequest::get().uri("/api/defects/summary").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, summary).await;
    assert_eq!(body["total_defects"], 2);
    assert_eq!(body["by_platform"][0]["platform"], "Web");

    let list = actix_test::TestRequest::get().uri("/api/defects").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, list).await;
    assert_eq!(body[0]["Release"], "v1.0.0");
}

#[actix_web::test]
async fn wrong_login_is_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let state = http_state(dir.path(), StubClient::failing());
    let app = app!(state);

    let req = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "admin", "password": "guess"}))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn log_buffer_is_bounded() {
    let logs = Mutex::new(Vec::new());
    for i in 0..(MAX_LOG_ENTRIES + 5) {
        add_log(&logs, "INFO", "Test", &format!("entry {}", i));
    }
    let logs = logs.lock().unwrap();
    assert_eq!(logs.len(), MAX_LOG_ENTRIES);
    assert_eq!(logs[0].message, "entry 5");
}
