use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("DisplayError: {0}")]
    Display(#[from] DisplayError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Authentication failed ({status}) for {endpoint}: {server_message}")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
    #[error("Unexpected response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },
    #[error("Access token unavailable: {0}")]
    Token(String),
}

impl ApiError {
    /// True when the server answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Credentials file not found at '{path}'")]
    CredentialsNotFound { path: String },
    #[error("Invalid service account key: {0}")]
    InvalidKey(String),
    #[error("Failed to sign token assertion: {0}")]
    Signing(String),
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchange { status: u16, message: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Home directory not found")]
    HomeDirNotFound,
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Report formatting failed: {0}")]
    Format(String),
    #[error("Report serialization failed: {0}")]
    Serialize(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String, hint: String },
    #[error("Configuration file {path} could not be parsed: {message}")]
    Parse { path: String, message: String },
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String, field_type: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } | ApiError::Token(_) => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Auth(_) => ErrorSeverity::Critical,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Display(_) => ErrorSeverity::Low,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Config(ConfigError::FileNotFound { hint, .. }) => Some(hint.clone()),
            AppError::Config(ConfigError::MissingField { field, .. }) => Some(format!(
                "Add \"{}\" to config.json pointing at your service account key file",
                field
            )),
            AppError::Auth(AuthError::CredentialsNotFound { .. }) => Some(
                "Please ensure 'config.json' points to your service account key file".to_string(),
            ),
            AppError::Api(ApiError::Unauthorized { .. }) => Some(
                "Grant the service account read access in Tag Manager and Analytics admin"
                    .to_string(),
            ),
            AppError::Api(ApiError::Timeout { .. }) => {
                Some("Check your internet connection and try again".to_string())
            }
            _ => None,
        }
    }
}
