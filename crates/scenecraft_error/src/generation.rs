//! Generation call error types and retry classification.

/// Generation failure conditions.
///
/// These map the failure taxonomy of a generation call: validation failures are
/// fatal, provider failures are retryable, and exhausted retries are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Missing or malformed input, bad credentials (never retried)
    #[display("Validation failure: {}", _0)]
    Validation(String),
    /// Rate limit, timeout, 5xx-class or provider unavailable
    #[display("Transient provider failure: {}", _0)]
    ProviderTransient(String),
    /// Unusable auxiliary data, most often an unreachable reference image
    #[display("Provider rejected input: {}", _0)]
    ProviderInput(String),
    /// All attempts failed
    #[display("Gave up after {} attempts: {}", attempts, message)]
    ExhaustedRetries {
        /// Number of attempts made
        attempts: u32,
        /// Message of the last underlying failure
        message: String,
    },
}

impl GenerationErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationErrorKind::ProviderTransient(_) | GenerationErrorKind::ProviderInput(_)
        )
    }

    /// Underlying provider or validation message.
    pub fn message(&self) -> &str {
        match self {
            GenerationErrorKind::Validation(msg)
            | GenerationErrorKind::ProviderTransient(msg)
            | GenerationErrorKind::ProviderInput(msg) => msg,
            GenerationErrorKind::ExhaustedRetries { message, .. } => message,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(backoff_step_ms, max_attempts, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            GenerationErrorKind::ProviderInput(_) => (2000, 3, 30),
            GenerationErrorKind::ProviderTransient(_) => (2000, 3, 60),
            _ => (0, 1, 0),
        }
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use scenecraft_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::ProviderTransient(
///     "429 Too Many Requests".to_string(),
/// ));
/// assert!(format!("{}", err).contains("429"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use scenecraft_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::ProviderTransient(
///     "503 Service Unavailable".to_string(),
/// ));
///
/// assert!(err.is_retryable());
/// let (step, attempts, _max_delay) = err.retry_strategy_params();
/// assert_eq!(step, 2000);
/// assert_eq!(attempts, 3);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like rate limits, timeouts and provider outages return
    /// true. Validation and authorization failures return false.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(backoff_step_ms, max_attempts, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 3, 60)
    }
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}
