//! Ordering-suggestion error types.

/// Specific error conditions for ordering-suggestion requests.
///
/// Every variant is a contract violation by the text-generation service;
/// the whole request fails, nothing is partially accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SuggestionErrorKind {
    /// The response was empty
    #[display("Generation service returned an empty response")]
    EmptyResponse,
    /// A required top-level field is missing or has the wrong type
    #[display("Response field '{}' is missing or not an array", _0)]
    MissingField(String),
    /// An ordering does not contain every input element exactly once
    #[display(
        "Candidate {} ordering has {} entries, expected {}",
        candidate, actual, expected
    )]
    WrongCardinality {
        /// Candidate index (0-based)
        candidate: usize,
        /// Entries returned
        actual: usize,
        /// Entries expected (input element count)
        expected: usize,
    },
    /// An ordering repeats or invents element ids
    #[display("Candidate {} ordering is not a permutation of the input ids", _0)]
    NotAPermutation(usize),
    /// The transition narration list has the wrong length
    #[display(
        "Candidate {} has {} transition narrations, expected {}",
        candidate, actual, expected
    )]
    TransitionCount {
        /// Candidate index (0-based)
        candidate: usize,
        /// Narrations returned
        actual: usize,
        /// Narrations expected (ordering length minus one)
        expected: usize,
    },
    /// A candidate's timestamp list does not cover every element
    #[display("Candidate {} is missing a timestamp for element {}", candidate, element)]
    MissingTimestamp {
        /// Candidate index (0-based)
        candidate: usize,
        /// Element id without a timestamp entry
        element: String,
    },
    /// A timestamp string is not a valid time of day
    #[display("Unparseable suggestion timestamp '{}': {}", value, message)]
    BadTimestamp {
        /// Offending value
        value: String,
        /// Parser message
        message: String,
    },
    /// The three response arrays do not zip into equal candidate counts
    #[display("Response arrays disagree on candidate count: {}", _0)]
    CandidateMismatch(String),
}

/// Error type for ordering-suggestion operations.
///
/// # Examples
///
/// ```
/// use animatic_error::{SuggestionError, SuggestionErrorKind};
///
/// let err = SuggestionError::new(SuggestionErrorKind::EmptyResponse);
/// assert!(format!("{}", err).contains("empty response"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Suggestion Error: {} at line {} in {}", kind, line, file)]
pub struct SuggestionError {
    /// The specific error condition
    pub kind: SuggestionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SuggestionError {
    /// Create a new SuggestionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SuggestionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
