//! Top-level error wrapper types.

use crate::{
    ConfigError, GenerationError, HttpError, JsonError, PipelineError, StorageError,
};

/// Every error domain in the workspace.
///
/// # Examples
///
/// ```
/// use scenecraft_error::{ScenecraftError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: ScenecraftError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ScenecraftErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Draft store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Pipeline stage error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Generation call error
    #[from(GenerationError)]
    Generation(GenerationError),
}

/// SceneCraft error with kind discrimination.
///
/// # Examples
///
/// ```
/// use scenecraft_error::{ScenecraftResult, ConfigError};
///
/// fn might_fail() -> ScenecraftResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("SceneCraft Error: {}", _0)]
pub struct ScenecraftError(Box<ScenecraftErrorKind>);

impl ScenecraftError {
    /// Create a new error from a kind.
    pub fn new(kind: ScenecraftErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScenecraftErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ScenecraftErrorKind
impl<T> From<T> for ScenecraftError
where
    T: Into<ScenecraftErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for SceneCraft operations.
pub type ScenecraftResult<T> = std::result::Result<T, ScenecraftError>;
