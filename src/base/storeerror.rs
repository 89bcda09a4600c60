use thiserror::Error;

/// Errors produced by the cookie store and jar persistence.
///
/// Reads never return these directly: a stored value that fails to decode is
/// logged and reported as absent, and only shows up as data inside
/// [`CookieLookup::Invalid`](crate::cookies::store::CookieLookup::Invalid).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StoreError {
    /// The stored value for a cookie is not valid JSON (or not the expected shape).
    #[error("cookie '{name}' holds an undecodable value: {message}")]
    Decode { name: String, message: String },

    /// A value could not be serialized to JSON before writing.
    #[error("cookie '{name}' could not be encoded: {message}")]
    Encode { name: String, message: String },

    /// Saving or loading a cookie jar file failed.
    #[error("cookie jar file {path}: {message}")]
    Persistence { path: String, message: String },
}

impl StoreError {
    pub fn decode(name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        StoreError::Decode {
            name: name.into(),
            message: err.to_string(),
        }
    }

    pub fn encode(name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        StoreError::Encode {
            name: name.into(),
            message: err.to_string(),
        }
    }

    pub fn persistence(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        StoreError::Persistence {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Name of the cookie this error concerns, if any.
    pub fn cookie_name(&self) -> Option<&str> {
        match self {
            StoreError::Decode { name, .. } | StoreError::Encode { name, .. } => Some(name),
            StoreError::Persistence { .. } => None,
        }
    }
}
