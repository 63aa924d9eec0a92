//! Script-generation pipeline error types.

use uuid::Uuid;

/// Specific error conditions for script generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ScriptErrorKind {
    /// Outline does not exist in the record store
    #[display("Outline {} not found", _0)]
    OutlineNotFound(Uuid),
    /// A batch generation call failed; the run is abandoned
    #[display("Generation failed on batch {} of {}: {}", batch, total, message)]
    BatchFailed {
        /// 1-based batch index
        batch: usize,
        /// Total batch count for the run
        total: usize,
        /// Underlying failure
        message: String,
    },
    /// The generated batch contained no usable text
    #[display("Batch {} returned no text output", _0)]
    EmptyBatch(usize),
}

/// Error type for script-generation operations.
///
/// # Examples
///
/// ```
/// use animatic_error::{ScriptError, ScriptErrorKind};
/// use uuid::Uuid;
///
/// let err = ScriptError::new(ScriptErrorKind::OutlineNotFound(Uuid::nil()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Script Error: {} at line {} in {}", kind, line, file)]
pub struct ScriptError {
    /// The specific error condition
    pub kind: ScriptErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ScriptError {
    /// Create a new ScriptError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ScriptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
