//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, HttpError, JsonError, ScriptError, StoreError, SuggestionError,
    TimelineError,
};

/// This is the foundation error enum. Each member crate of the workspace
/// contributes the variants it can raise.
///
/// # Examples
///
/// ```
/// use animatic_error::{AnimaticError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: AnimaticError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AnimaticErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Record store error
    #[from(StoreError)]
    Store(StoreError),
    /// Timeline invariant violation
    #[from(TimelineError)]
    Timeline(TimelineError),
    /// Ordering-suggestion validation error
    #[from(SuggestionError)]
    Suggestion(SuggestionError),
    /// Script-generation pipeline error
    #[from(ScriptError)]
    Script(ScriptError),
}

/// Animatic error with kind discrimination.
///
/// # Examples
///
/// ```
/// use animatic_error::{AnimaticResult, ConfigError};
///
/// fn might_fail() -> AnimaticResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Animatic Error: {}", _0)]
pub struct AnimaticError(Box<AnimaticErrorKind>);

impl AnimaticError {
    /// Create a new error from a kind.
    pub fn new(kind: AnimaticErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AnimaticErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AnimaticErrorKind
impl<T> From<T> for AnimaticError
where
    T: Into<AnimaticErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Animatic operations.
///
/// # Examples
///
/// ```
/// use animatic_error::{AnimaticResult, HttpError};
///
/// fn fetch_data() -> AnimaticResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type AnimaticResult<T> = std::result::Result<T, AnimaticError>;
