//! Pipeline stage error types.

/// Specific error conditions for pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Topic text is empty or whitespace
    #[display("Topic text cannot be empty")]
    EmptyTopic,
    /// Generation credential not supplied
    #[display("Missing API credential: {}", _0)]
    MissingCredential(String),
    /// Scene index outside the planned range
    #[display("Scene {} does not exist (draft has {} scenes)", index, count)]
    UnknownScene {
        /// Requested scene index
        index: usize,
        /// Number of scenes in the draft
        count: usize,
    },
    /// Draft has no scenes to generate
    #[display("Draft has no planned scenes")]
    NoScenes,
    /// Script response could not be parsed
    #[display("Malformed script response: {}", _0)]
    MalformedScript(String),
    /// Script response has a different scene count than the plan
    #[display("Script returned {} scenes, expected {}", returned, expected)]
    ScriptCountMismatch {
        /// Scenes in the response
        returned: usize,
        /// Scenes in the plan
        expected: usize,
    },
    /// Generation run was abandoned before the scene was dispatched
    #[display("Generation run abandoned")]
    Abandoned,
    /// Generation stage failed
    #[display("Stage '{}' failed: {}", stage, message)]
    StageFailed {
        /// Stage name
        stage: String,
        /// Failure message
        message: String,
    },
}

/// Error type for pipeline stages.
///
/// # Examples
///
/// ```
/// use scenecraft_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::EmptyTopic);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
