//! Router-specific error types.

/// Errors that can occur while navigating.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// Redirects did not settle on a route
    #[error("Too many redirects while navigating to {path}")]
    TooManyRedirects { path: String },
}
