//! Trait definitions for the Animatic outline-composition engine.
//!
//! This crate defines the seams between the engine and its external
//! collaborators: the text-generation service, the record store holding
//! outline/element rows, and the best-effort progress sink.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod progress;
mod store;
mod traits;

pub use progress::ProgressSink;
pub use store::{ElementPatch, OutlinePatch, OutlineStore};
pub use traits::AnimaticDriver;
