use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Feed error for {url}: {message}")]
    FeedError { url: String, message: String },

    #[error("Generation API unreachable: {0}")]
    GenerationTransportError(reqwest::Error),

    #[error("Generation API returned {status}: {body}")]
    GenerationApiError { status: u16, body: String },

    #[error("Generation response malformed: {message}")]
    GenerationResponseError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Generation,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::TomlError(_) => ErrorCategory::Configuration,
            EtlError::HttpError(_) | EtlError::FeedError { .. } => ErrorCategory::Network,
            EtlError::GenerationTransportError(_)
            | EtlError::GenerationApiError { .. }
            | EtlError::GenerationResponseError { .. } => ErrorCategory::Generation,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Generation => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// 依嚴重程度對應程序結束碼；走到這裡的錯誤都代表沒有送出報告
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::MissingConfigError { .. } => {
                "Export NEWS_API_KEY, OPENAI_API_KEY and LINE_CHANNEL_ACCESS_TOKEN before running"
            }
            EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigError { .. }
            | EtlError::TomlError(_) => "Check the configuration file passed with --config",
            EtlError::GenerationApiError { status: 401, .. } => {
                "The generation API key was rejected; rotate OPENAI_API_KEY"
            }
            EtlError::GenerationApiError { status: 429, .. } => {
                "The generation API is rate limiting this key; rerun later"
            }
            EtlError::GenerationTransportError(_)
            | EtlError::GenerationApiError { .. }
            | EtlError::GenerationResponseError { .. } => {
                "No report was produced and nothing was broadcast; rerun the job"
            }
            EtlError::HttpError(_) | EtlError::FeedError { .. } => {
                "Check network connectivity to the upstream service"
            }
            EtlError::IoError(_) | EtlError::SerializationError(_) => {
                "Unexpected internal failure; inspect the logs with --verbose"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Upstream request failed: {}", self),
            ErrorCategory::Generation => format!("Report generation failed: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
