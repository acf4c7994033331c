//! Store-specific error types.

use crate::catalog::CatalogError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Errors returned to callers of store operations. Transport failures are
/// never returned; they are recorded on the store instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Caller supplied an out-of-range page or a missing identifier
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// A recorded fetch failure, shared between snapshots of the same state.
///
#[derive(Debug, Clone)]
pub struct StoreFailure(Arc<CatalogError>);

impl StoreFailure {
    /// The underlying catalog error.
    ///
    pub fn cause(&self) -> &CatalogError {
        &self.0
    }

    pub fn status(&self) -> Option<u16> {
        self.0.status()
    }
}

impl From<CatalogError> for StoreFailure {
    fn from(error: CatalogError) -> Self {
        StoreFailure(Arc::new(error))
    }
}

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for StoreFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
