//! Timeline error types.

use uuid::Uuid;

/// Specific error conditions for timeline operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TimelineErrorKind {
    /// A bounds update would produce a non-positive duration
    #[display("Element bounds rejected: end ({}) must be after start ({})", end, start)]
    Bounds {
        /// Requested start instant (RFC 3339)
        start: String,
        /// Requested end instant (RFC 3339)
        end: String,
    },
    /// A write would overlap a neighboring element
    #[display("Element {} would overlap neighbor {}", element, neighbor)]
    Overlap {
        /// Element being written
        element: Uuid,
        /// Neighbor it collides with
        neighbor: Uuid,
    },
    /// Referenced element is not on the timeline
    #[display("Element {} is not on the timeline", _0)]
    UnknownElement(Uuid),
    /// Operation requires at least one placed element
    #[display("Timeline has no placed elements")]
    EmptyTimeline,
    /// Element belongs to a different outline
    #[display("Element {} belongs to outline {}, not {}", element, actual, expected)]
    ForeignElement {
        /// Element being written
        element: Uuid,
        /// Outline the element claims
        actual: Uuid,
        /// Outline the timeline holds
        expected: Uuid,
    },
}

/// Timeline error with location tracking.
///
/// # Examples
///
/// ```
/// use animatic_error::{TimelineError, TimelineErrorKind};
///
/// let err = TimelineError::new(TimelineErrorKind::EmptyTimeline);
/// assert!(format!("{}", err).contains("no placed elements"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Timeline Error: {} at line {} in {}", kind, line, file)]
pub struct TimelineError {
    /// The specific error condition
    pub kind: TimelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl TimelineError {
    /// Create a new TimelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TimelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
