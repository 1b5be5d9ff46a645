use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::domain::credentials::{
    AdminCredentials, ChangePasswordRequest, LoginRequest, SessionToken, StoredCredentials,
};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::storage::{JsonFileStore, CREDENTIALS_FILE};

pub struct AdminAuthUseCase {
    store: JsonFileStore<StoredCredentials>,
    sessions: Mutex<HashSet<String>>,
}

impl AdminAuthUseCase {
    pub fn new(store: JsonFileStore<StoredCredentials>) -> Self {
        Self {
            store,
            sessions: Mutex::new(HashSet::new()),
        }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(JsonFileStore::new(data_dir.join(CREDENTIALS_FILE)))
    }

    fn credentials(&self) -> Result<AdminCredentials> {
        Ok(self
            .store
            .load()?
            .map(AdminCredentials::from)
            .unwrap_or_default())
    }

    fn sessions(&self) -> Result<std::sync::MutexGuard<'_, HashSet<String>>> {
        self.sessions
            .lock()
            .map_err(|_| AppError::Internal("Session lock poisoned".to_string()))
    }

    pub fn login(&self, request: &LoginRequest) -> Result<SessionToken> {
        request.validate()?;
        let credentials = self.credentials()?;
        if !credentials.verify(&request.username, &request.password) {
            warn!(username = %request.username, "Rejected admin login");
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = Uuid::new_v4().to_string();
        self.sessions()?.insert(token.clone());
        info!(username = %request.username, "Admin logged in");
        Ok(SessionToken { token })
    }

    pub fn logout(&self, token: &str) -> Result<()> {
        self.sessions()?.remove(token);
        Ok(())
    }

    pub fn authorize(&self, token: Option<&str>) -> Result<()> {
        let token = token.ok_or_else(|| {
            AppError::Unauthorized("Admin login required".to_string())
        })?;
        if self.sessions()?.contains(token) {
            Ok(())
        } else {
            Err(AppError::Unauthorized("Session expired or invalid".to_string()))
        }
    }

    pub fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
        let mut credentials = self.credentials()?;
        if !credentials.verify_password(&request.current_password) {
            return Err(AppError::ValidationError(
                "Current password is incorrect!".to_string(),
            ));
        }
        if request.new_password != request.confirm_password {
            return Err(AppError::ValidationError(
                "New passwords don't match!".to_string(),
            ));
        }
        request.validate()?;

        credentials = AdminCredentials::new(&credentials.username, &request.new_password);
        self.store.save(&StoredCredentials::Hashed(credentials))?;
        info!("Admin password changed");
        Ok(())
    }
}
