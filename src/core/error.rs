//! Typed error handling for the inventory client
//!
//! Every failure the client can meet is recovered at the call site and turned
//! into a user-visible notice, so the taxonomy is shaped around what the user
//! is told rather than where the error came from.
//!
//! # Error Categories
//!
//! - [`ClientError::Transport`]: the request never got a response
//! - [`ClientError::Status`]: the API answered with a non-2xx status
//! - [`ClientError::Decode`]: the API answered with a body we cannot read
//! - [`ValidationError`]: form input rejected before any request was made
//! - [`ConfigError`]: configuration could not be loaded or is invalid
//!
//! # Example
//!
//! ```rust,ignore
//! match api.upsert_stock(entry).await {
//!     Ok(_) => {}
//!     Err(ClientError::Status { status: 400, message }) => {
//!         println!("Rejected by the server: {}", message);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for inventory client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network/transport failure (connection refused, timeout, ...)
    #[error("Request {method} {path} failed: {message}")]
    Transport {
        method: String,
        path: String,
        message: String,
    },

    /// Non-success HTTP status
    ///
    /// `message` is the server-provided `detail`/`message` field, or
    /// `HTTP <status>` when the body carries none.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Malformed response from {path}: {message}")]
    Decode { path: String, message: String },

    /// Client-side validation failure
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Transport { .. } => "TRANSPORT_ERROR",
            ClientError::Status { .. } => "HTTP_ERROR",
            ClientError::Decode { .. } => "DECODE_ERROR",
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server reported the target as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

/// Errors related to input validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("{field}: {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("{}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::FieldError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Collapse a list of field errors, keeping the single-error form when possible
    pub fn from_fields(mut errors: Vec<FieldValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => {
                let e = errors.remove(0);
                Some(ValidationError::FieldError {
                    field: e.field,
                    message: e.message,
                })
            }
            _ => Some(ValidationError::FieldErrors(errors)),
        }
    }

    /// Names of the offending fields
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::FieldError { field, .. } => vec![field.as_str()],
            ValidationError::FieldErrors(errors) => {
                errors.iter().map(|e| e.field.as_str()).collect()
            }
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        // field_errors() is a HashMap; keep messages stable
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        ValidationError::from_fields(fields)
            .unwrap_or_else(|| ValidationError::field("payload", "invalid"))
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::Validation(errors.into())
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for inventory client operations
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Tests
// =============================================================================
