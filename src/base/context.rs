//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting IO and JSON errors into context-rich `StoreError` variants.

use crate::base::storeerror::StoreError;
use std::io;
use std::path::Path;

/// Extension trait for attaching a jar file path to a failed operation.
pub trait PersistenceResultExt<T> {
    /// Add file context to an error.
    ///
    /// # Example
    /// ```ignore
    /// use crumbjar::base::context::PersistenceResultExt;
    ///
    /// let json = fs::read_to_string(path).persistence_context(path)?;
    /// // Error: "cookie jar file /tmp/jar.json: No such file or directory"
    /// ```
    fn persistence_context(self, path: &Path) -> Result<T, StoreError>;
}

impl<T> PersistenceResultExt<T> for Result<T, io::Error> {
    fn persistence_context(self, path: &Path) -> Result<T, StoreError> {
        self.map_err(|e| StoreError::persistence(path.display().to_string(), e))
    }
}

impl<T> PersistenceResultExt<T> for Result<T, serde_json::Error> {
    fn persistence_context(self, path: &Path) -> Result<T, StoreError> {
        self.map_err(|e| StoreError::persistence(path.display().to_string(), e))
    }
}
