//! Error types shared across the workspace
//!
//! Infrastructure failures carry an [`ErrorContext`] so the caller can log
//! where an error came from and what to try next.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type HmsResult<T> = Result<T, HmsError>;

/// Diagnostic context attached to infrastructure errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Identifier to correlate log lines about one failure
    pub error_id: String,
    /// When the failure happened
    pub timestamp: DateTime<Utc>,
    /// Component that produced the error
    pub component: String,
    /// Operation in flight, if known
    pub operation: Option<String>,
    /// Free-form key/value details
    pub metadata: std::collections::HashMap<String, String>,
    /// What the operator can do about it
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: std::collections::HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Failures of the storage and configuration infrastructure
///
/// Domain-level rejections (bad credentials, duplicate usernames) live in
/// the crates that own them; this enum only covers the machinery underneath.
#[derive(Error, Debug)]
pub enum HmsError {
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HmsError {
    /// Context for the variants that carry one
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            HmsError::Storage { context, .. } => Some(context),
            HmsError::Config { context, .. } => Some(context),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context_builders() {
        let context = ErrorContext::new("file_store")
            .with_operation("read")
            .with_metadata("key", "hms_users")
            .with_suggestion("Check storage directory permissions");

        assert_eq!(context.component, "file_store");
        assert_eq!(context.operation.as_deref(), Some("read"));
        assert_eq!(context.metadata.get("key").map(String::as_str), Some("hms_users"));
        assert_eq!(context.recovery_suggestions.len(), 1);
        assert!(!context.error_id.is_empty());
    }

    #[test]
    fn test_storage_error_display() {
        let error = HmsError::Storage {
            message: "failed to write entry".to_string(),
            source: None,
            context: ErrorContext::new("file_store"),
        };

        assert_eq!(error.to_string(), "Storage error: failed to write entry");
        assert!(error.context().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: HmsError = io.into();

        assert!(matches!(error, HmsError::Io(_)));
        assert!(error.context().is_none());
    }

    #[test]
    fn test_serialization_error_conversion() {
        let parse = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let error: HmsError = parse.into();

        assert!(matches!(error, HmsError::Serialization(_)));
    }
}
