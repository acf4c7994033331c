//! Application-wide error types.
//!
//! This module defines the main error type hierarchy for the application,
//! allowing for type-safe error handling throughout the codebase.

pub use crate::config::ConfigError;
pub use crate::router::RouterError;
pub use crate::store::StoreError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the application. It uses `thiserror` for automatic error derivation
/// and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store operation errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Navigation errors
    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    /// Output serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_error = ConfigError::FilePathNotSet;
        let app_error: AppError = config_error.into();
        assert!(matches!(app_error, AppError::Config(_)));
        assert!(app_error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_app_error_from_store_error() {
        let store_error = StoreError::InvalidArgument("page".to_string());
        let app_error: AppError = store_error.into();
        assert!(matches!(app_error, AppError::Store(_)));
        assert!(app_error.to_string().contains("Store error"));
    }

    #[test]
    fn test_app_error_from_router_error() {
        let router_error = RouterError::TooManyRedirects {
            path: "/".to_string(),
        };
        let app_error: AppError = router_error.into();
        assert!(matches!(app_error, AppError::Router(_)));
    }

    #[test]
    fn test_app_error_logger() {
        let error = AppError::Logger("already set".to_string());
        assert!(error.to_string().contains("Logger error"));
    }
}
