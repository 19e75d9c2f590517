//! Service account key handling
//!
//! Loads a Google service account key file and prepares the signing key used
//! for the OAuth2 JWT-bearer flow. Only the two read-only scopes are ever requested.

use crate::error::AuthError;
use crate::utils::logging::Logger;
use jsonwebtoken::EncodingKey;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const TAGMANAGER_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/tagmanager.readonly";
pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";

/// Scopes requested for every audit run
pub const SCOPES: [&str; 2] = [TAGMANAGER_READONLY_SCOPE, ANALYTICS_READONLY_SCOPE];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Fields of the standard service account key file that the audit needs
#[derive(Deserialize, Clone)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("key_type", &self.key_type)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"<redacted>")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

/// Scoped, read-only service account credentials
#[derive(Clone)]
pub struct ServiceAccountCredentials {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scopes: Vec<String>,
}

impl fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("key", &self.key)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl ServiceAccountCredentials {
    pub fn from_file(path: &Path) -> Result<Self, AuthError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AuthError::CredentialsNotFound {
                path: path.to_string_lossy().to_string(),
            },
            _ => AuthError::InvalidKey(format!("{}: {}", path.display(), e)),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, AuthError> {
        let key: ServiceAccountKey =
            serde_json::from_str(content).map_err(|e| AuthError::InvalidKey(e.to_string()))?;

        if let Some(key_type) = &key.key_type
            && key_type != "service_account"
        {
            return Err(AuthError::InvalidKey(format!(
                "expected key type 'service_account', found '{}'",
                key_type
            )));
        }

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| AuthError::InvalidKey(format!("private_key: {}", e)))?;

        Ok(Self {
            key,
            encoding_key,
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Point the token exchange at a different endpoint
    pub fn with_token_uri(mut self, token_uri: String) -> Self {
        self.key.token_uri = token_uri;
        self
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    pub fn token_uri(&self) -> &str {
        &self.key.token_uri
    }

    pub fn private_key_id(&self) -> Option<&str> {
        self.key.private_key_id.as_deref()
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }
}

/// Load scoped credentials, logging the cause and returning `None` on any failure.
pub fn get_credentials(path: &Path, logger: &Logger) -> Option<ServiceAccountCredentials> {
    match ServiceAccountCredentials::from_file(path) {
        Ok(credentials) => {
            logger.verbose(&format!(
                "Loaded service account {}",
                credentials.client_email()
            ));
            Some(credentials)
        }
        Err(AuthError::CredentialsNotFound { path }) => {
            logger.error(&format!("Credentials file not found at '{}'.", path));
            logger.error("Please ensure 'config.json' points to your service account key file.");
            None
        }
        Err(e) => {
            logger.error(&format!("An error occurred during authentication: {}", e));
            None
        }
    }
}
