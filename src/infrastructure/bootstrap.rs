use std::error::Error;
use std::sync::{Arc, Mutex};

use tracing::error;

use crate::infrastructure::config::{AppConfig, ConfigService};
use crate::infrastructure::llm_clients::{GeminiClient, LLMClient};
use crate::infrastructure::storage::ensure_data_dir;
use crate::interfaces::http::{add_log, AppState, LogEntry};

pub struct Bootstrapped {
    pub state: Arc<AppState>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

pub fn setup() -> Result<Bootstrapped, Box<dyn Error>> {
    let config = ConfigService::new().load().map_err(|err| {
        error!(error = %err, "Failed to load configuration");
        err
    })?;
    setup_with(config, Arc::new(GeminiClient::new()))
}

pub fn setup_with(
    config: AppConfig,
    llm_client: Arc<dyn LLMClient + Send + Sync>,
) -> Result<Bootstrapped, Box<dyn Error>> {
    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

    ensure_data_dir(&config.storage.data_dir).map_err(|err| {
        error!(
            error = %err,
            data_dir = %config.storage.data_dir.display(),
            "Failed to create data dir"
        );
        err
    })?;

    if config.llm.api_key.is_none() {
        add_log(
            &logs,
            "WARN",
            "Bootstrap",
            "Google API key is missing. Set GOOGLE_API_KEY in the .env file.",
        );
    }
    add_log(
        &logs,
        "INFO",
        "Bootstrap",
        &format!(
            "Using data dir {} and model {}",
            config.storage.data_dir.display(),
            config.llm.model
        ),
    );

    let state = Arc::new(AppState::new(config, llm_client));
    Ok(Bootstrapped { state, logs })
}
