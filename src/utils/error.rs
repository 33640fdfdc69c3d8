use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpiryError {
    #[error("Malformed marker on \"{declaration}\": {reason}")]
    MalformedMarker { declaration: String, reason: String },

    #[error("Invalid expiry date \"{text}\": {reason}")]
    DateParse { text: String, reason: String },

    #[error("Failed to parse {path}: {message}")]
    SourceParse { path: String, message: String },

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk failed: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value \"{value}\" for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Marker,
    Source,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ExpiryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExpiryError::MalformedMarker { .. } | ExpiryError::DateParse { .. } => {
                ErrorCategory::Marker
            }
            ExpiryError::SourceParse { .. } => ErrorCategory::Source,
            ExpiryError::ConfigError { .. }
            | ExpiryError::ConfigValidationError { .. }
            | ExpiryError::InvalidConfigValueError { .. }
            | ExpiryError::MissingConfigError { .. } => ErrorCategory::Config,
            ExpiryError::ReadError { .. }
            | ExpiryError::WalkError(_)
            | ExpiryError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Marker => ErrorSeverity::Medium,
            ErrorCategory::Source => ErrorSeverity::High,
            ErrorCategory::Config | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Why a marker was rejected, without the declaration it sits on.
    pub fn marker_reason(&self) -> String {
        match self {
            ExpiryError::MalformedMarker { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the driver may record this error against one declaration and keep going.
    pub fn is_declaration_scoped(&self) -> bool {
        self.category() == ErrorCategory::Marker
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ExpiryError::MalformedMarker { .. } => {
                "Give the marker exactly one string argument, e.g. #[expiry(\"31-12-2025\")]"
            }
            ExpiryError::DateParse { .. } => {
                "Write the date as dd-mm-yyyy with a real calendar day, e.g. \"02-03-2022\""
            }
            ExpiryError::SourceParse { .. } => {
                "Fix the syntax error or exclude the file from the scan"
            }
            ExpiryError::ReadError { .. } | ExpiryError::WalkError(_) => {
                "Check that the scan paths exist and are readable"
            }
            ExpiryError::SerializationError(_) => "Retry with --format text",
            ExpiryError::ConfigError { .. } => "Fix the TOML syntax or field types in expiry.toml",
            ExpiryError::ConfigValidationError { .. }
            | ExpiryError::InvalidConfigValueError { .. }
            | ExpiryError::MissingConfigError { .. } => {
                "Check expiry.toml and the command line options"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Marker => format!("Invalid expiry marker: {}", self),
            ErrorCategory::Source => format!("Could not read Rust sources: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExpiryError>;
