//! Error types for the Animatic outline-composition engine.
//!
//! This crate provides the foundation error types used throughout the
//! Animatic workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean
//! error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use animatic_error::{AnimaticResult, HttpError};
//!
//! fn fetch_data() -> AnimaticResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod http;
mod json;
mod script;
mod store;
mod suggestion;
mod timeline;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{AnimaticError, AnimaticErrorKind, AnimaticResult};
pub use http::HttpError;
pub use json::JsonError;
pub use script::{ScriptError, ScriptErrorKind};
pub use store::{StoreError, StoreErrorKind};
pub use suggestion::{SuggestionError, SuggestionErrorKind};
pub use timeline::{TimelineError, TimelineErrorKind};
