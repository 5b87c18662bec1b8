use thiserror::Error;

#[derive(Error, Debug)]
pub enum DescriberError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{operation} returned {status}: {body}")]
    HttpStatus {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    #[error("Usage error: {message}")]
    UsageError { message: String },

    #[error("Failed to process {resource} {id}: {source}")]
    TraversalError {
        resource: String,
        id: String,
        #[source]
        source: Box<DescriberError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, DescriberError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Authentication,
    Usage,
    Traversal,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DescriberError {
    /// 將具體錯誤 wrap 成 traversal 錯誤，保留資源種類與 ID
    pub fn traversal(resource: &str, id: &str, source: DescriberError) -> Self {
        Self::TraversalError {
            resource: resource.to_string(),
            id: id.to_string(),
            source: Box::new(source),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::HttpStatus { .. } => ErrorCategory::Network,
            Self::AuthenticationError { .. } => ErrorCategory::Authentication,
            Self::UsageError { .. } => ErrorCategory::Usage,
            Self::TraversalError { .. } => ErrorCategory::Traversal,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::IoError(_) => ErrorCategory::System,
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Usage => ErrorSeverity::Low,
            ErrorCategory::Traversal => ErrorSeverity::Medium,
            ErrorCategory::Network | ErrorCategory::Authentication | ErrorCategory::Data => {
                ErrorSeverity::High
            }
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 依嚴重程度決定 process exit code
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::AuthenticationError { .. } => {
                "Check user_id, password, api_key, secret and the area UUID"
            }
            Self::HttpStatus { status: 401 | 403, .. } => {
                "The token was rejected; verify the account has access to this area"
            }
            Self::HttpStatus { status: 404, .. } => "Check the package and plan identifiers",
            Self::HttpStatus { .. } | Self::ApiError(_) => {
                "Check network connectivity and the api.base_url setting"
            }
            Self::UsageError { .. } => "Run with --help to see the accepted options",
            Self::TraversalError { .. } => "Re-run for the failed package or plan only",
            Self::SerializationError(_) => "The API returned an unexpected response shape",
            Self::IoError(_) => "Check that the configuration file exists and is readable",
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Fix the configuration file; ${VAR} placeholders are read from the environment"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::AuthenticationError { message } => {
                format!("Could not obtain an access token ({})", message)
            }
            Self::HttpStatus {
                operation, status, ..
            } => format!("The API rejected {} with status {}", operation, status),
            Self::ApiError(e) => format!("Could not reach the API: {}", e),
            other => other.to_string(),
        }
    }
}
