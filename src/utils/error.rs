use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemapError {
    #[error("Input not found or unreadable: {path}: {source}")]
    NotFoundError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    ParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing or invalid key `{key}` in {context}")]
    SchemaError { key: String, context: String },

    #[error("Malformed video_id {value} in {context}: {reason}")]
    FormatError {
        value: String,
        context: String,
        reason: String,
    },

    #[error("Failed to write {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Usage error: {message}")]
    UsageError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Schema,
    Format,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Bad invocation or configuration, nothing was read.
    Medium,
    /// The input could not be converted.
    High,
    /// The conversion succeeded but the result could not be persisted.
    Critical,
}

impl RemapError {
    pub fn schema(key: &str, context: impl Into<String>) -> Self {
        RemapError::SchemaError {
            key: key.to_string(),
            context: context.into(),
        }
    }

    pub fn format(value: impl Into<String>, context: impl Into<String>, reason: impl Into<String>) -> Self {
        RemapError::FormatError {
            value: value.into(),
            context: context.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RemapError::NotFoundError { .. } | RemapError::ParseError { .. } => ErrorCategory::Input,
            RemapError::SchemaError { .. } => ErrorCategory::Schema,
            RemapError::FormatError { .. } => ErrorCategory::Format,
            RemapError::IoError { .. } | RemapError::SerializationError(_) => ErrorCategory::Output,
            RemapError::UsageError { .. }
            | RemapError::ConfigValidationError { .. }
            | RemapError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Schema | ErrorCategory::Format => {
                ErrorSeverity::High
            }
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RemapError::NotFoundError { path, .. } => {
                format!("Cannot read input file '{}'", path)
            }
            RemapError::ParseError { path, source } => {
                format!("Input file '{}' is not valid JSON ({})", path, source)
            }
            RemapError::SchemaError { key, context } => {
                format!("SchemaError: `{}` is missing or has the wrong type in {}", key, context)
            }
            RemapError::FormatError {
                value,
                context,
                reason,
            } => format!("FormatError: video_id {} in {} {}", value, context, reason),
            RemapError::IoError { path, source } => {
                format!("Cannot write output file '{}': {}", path, source)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check that the input path exists and contains a JSON document",
            ErrorCategory::Schema => {
                "The input must be an object with `sentences` and `videos`; already converted files cannot be converted again"
            }
            ErrorCategory::Format => "Every video_id must look like \"video<N>\" with a decimal <N>",
            ErrorCategory::Output => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => "Run with --help to see the expected arguments and options",
        }
    }
}

impl From<clap::Error> for RemapError {
    fn from(e: clap::Error) -> Self {
        RemapError::UsageError {
            message: e.render().to_string().trim_end().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RemapError>;
