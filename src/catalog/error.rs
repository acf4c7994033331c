//! Catalog API-specific error types.

/// Errors that can occur during catalog API operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Paged response did not carry the expected collection key
    #[error("Response is missing the '{key}' collection")]
    MissingCollection { key: String },

    /// Base URL could not be joined with a request path
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl CatalogError {
    /// HTTP status code if the server answered at all.
    ///
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::ApiError { status, .. } => Some(*status),
            CatalogError::HttpRequest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let error = CatalogError::MissingCollection {
            key: "albums".to_string(),
        };
        assert!(error.to_string().contains("missing"));
        assert!(error.to_string().contains("albums"));

        let error = CatalogError::InvalidUrl("::".to_string());
        assert!(error.to_string().contains("Invalid request URL"));
    }

    #[test]
    fn test_catalog_error_api_error() {
        let error = CatalogError::ApiError {
            status: 404,
            message: "Not found".to_string(),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("404"));
        assert!(error_str.contains("Not found"));
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_catalog_error_status_absent_for_decoding() {
        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        let error: CatalogError = decode.into();
        assert_eq!(error.status(), None);
    }
}
