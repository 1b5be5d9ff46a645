use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use validator::Validate;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password_hash: String,
}

impl AdminCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password_hash: hash_password(password),
        }
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.verify_password(password)
    }

    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash == hash_password(password)
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
    }
}

/// On-disk form. Older files kept the password in clear text; they are still
/// accepted and rewritten hashed on the next save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredCredentials {
    Hashed(AdminCredentials),
    Legacy { username: String, password: String },
}

impl From<StoredCredentials> for AdminCredentials {
    fn from(stored: StoredCredentials) -> Self {
        match stored {
            StoredCredentials::Hashed(credentials) => credentials,
            StoredCredentials::Legacy { username, password } => {
                AdminCredentials::new(&username, &password)
            }
        }
    }
}

pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 1, max = 256))]
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionToken {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_credentials_accept_factory_password() {
        let creds = AdminCredentials::default();
        assert!(creds.verify("admin", "admin123"));
        assert!(!creds.verify("admin", "admin"));
        assert!(!creds.verify("root", "admin123"));
    }

    #[test]
    fn legacy_plaintext_file_is_accepted() {
        let stored: StoredCredentials =
            serde_json::from_str(r#"{"username": "admin", "password": "s3cret"}"#).unwrap();
        let creds = AdminCredentials::from(stored);
        assert!(creds.verify("admin", "s3cret"));
    }

    #[test]
    fn hashed_file_round_trips() {
        let json = serde_json::to_string(&StoredCredentials::Hashed(AdminCredentials::default()))
            .unwrap();
        assert!(json.contains("password_hash"));
        let stored: StoredCredentials = serde_json::from_str(&json).unwrap();
        assert_eq!(AdminCredentials::from(stored), AdminCredentials::default());
    }

    #[test]
    fn hash_is_hex_sha256() {
        let hash = hash_password("secret");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash, hash_password("Secret"));
    }
}
