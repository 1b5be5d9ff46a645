mod assistants;
mod defects;
pub mod state;
mod test_cases;

#[cfg(test)]
mod tests;

use crate::application::use_cases::image_description::MAX_IMAGE_BYTES;
use crate::domain::error::AppError;
use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{
    dev::Server, get, web, App, HttpRequest, HttpResponse, HttpServer, Responder, ResponseError,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

pub use state::AppState;

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub app_state: Arc<AppState>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::ParseError(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::SecurityError(_) => StatusCode::FORBIDDEN,
            AppError::LLMError(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_)
            | AppError::IoError(_)
            | AppError::ConfigError(_)
            | AppError::ExportError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

/// Logs the failure and renders it.
pub(crate) fn fail(
    logs: &Mutex<Vec<LogEntry>>,
    source: &str,
    context: &str,
    err: &AppError,
) -> HttpResponse {
    let level = if err.status_code().is_server_error() {
        "ERROR"
    } else {
        "WARN"
    };
    add_log(logs, level, source, &format!("{}: {}", context, err));
    err.error_response()
}

pub(crate) fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[get("/models")]
async fn list_models(data: web::Data<HttpState>) -> impl Responder {
    let config = &data.app_state.config.llm;
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Fetching models (base_url={})", config.base_url),
    );

    match data.app_state.llm_client.list_models(config).await {
        Ok(models) => HttpResponse::Ok().json(models),
        Err(e) => fail(&data.logs, "HttpApi", "Failed to list models", &e),
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    match data.logs.lock() {
        Ok(logs) => HttpResponse::Ok().json(&*logs),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    match level {
        "ERROR" => tracing::error!(source, "{}", message),
        "WARN" => tracing::warn!(source, "{}", message),
        _ => tracing::info!(source, "{}", message),
    }
    if let Ok(mut logs) = logs.lock() {
        logs.push(entry.clone());
        if logs.len() > MAX_LOG_ENTRIES {
            logs.remove(0);
        }
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// Registers every `/api` route. Shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::PayloadConfig::new(MAX_IMAGE_BYTES + 1024))
            .service(health)
            .service(list_models)
            .service(get_logs)
            .configure(test_cases::configure)
            .configure(assistants::configure)
            .configure(defects::configure),
    );
}

pub fn start_server(
    app_state: Arc<AppState>,
    logs: Arc<Mutex<Vec<LogEntry>>>,
) -> std::io::Result<Server> {
    let bind = (
        app_state.config.server.host.clone(),
        app_state.config.server.port,
    );
    let state = web::Data::new(HttpState { app_state, logs });

    add_log(
        &state.logs,
        "INFO",
        "HttpApi",
        &format!("Listening on http://{}:{}", bind.0, bind.1),
    );

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(bind)?
    .run();

    Ok(server)
}
