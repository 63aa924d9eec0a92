//! Core data types for the Animatic outline-composition engine.
//!
//! This crate provides the foundation data types used across all Animatic
//! interfaces: the outline/element domain model, the generation
//! request/response types exchanged with text-generation backends, and the
//! editor preference store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod element;
mod message;
mod outline;
mod output;
mod preferences;
mod request;
mod role;
mod telemetry;

pub use element::{ElementKind, OutlineElement, SourceClip, TranscriptSegment};
pub use message::Message;
pub use outline::{Outline, OutlineStatus};
pub use output::Output;
pub use preferences::{EditorPreferences, PreferenceStore};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use telemetry::init_telemetry;
