//! Record store error types.

/// Kinds of record store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// Requested record does not exist
    #[display("Record not found: {}", _0)]
    NotFound(String),
    /// Write was rejected by the backing store
    #[display("Write rejected: {}", _0)]
    WriteRejected(String),
    /// Transient I/O failure talking to the backing store
    #[display("Store unavailable: {}", _0)]
    Unavailable(String),
    /// Stored record could not be decoded
    #[display("Corrupt record: {}", _0)]
    Corrupt(String),
}

/// Record store error with location tracking.
///
/// # Examples
///
/// ```
/// use animatic_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::NotFound("outline 42".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
