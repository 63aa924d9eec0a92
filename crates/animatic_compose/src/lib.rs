//! AI ordering suggestions and the script-generation pipeline.
//!
//! This crate holds the two generation flows of the engine:
//!
//! - **Ordering suggestions**: [`OrderingSuggestionClient`] sends per-clip
//!   metadata to a text-generation backend under a strict response schema
//!   and returns validated candidate orderings with synthesized transition
//!   narration. Accepting a candidate replaces the timeline wholesale.
//! - **Script generation**: [`ScriptGenerationPipeline`] partitions the
//!   timeline into fixed-size batches, requests narration per batch in
//!   strict document order, tracks progress through a best-effort sink,
//!   and assembles the final script.
//!
//! Responses are never trusted: [`extract_json`] and [`parse_json`] apply
//! strict extraction and typed validation before anything is accepted.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod memory;
mod ordering;
mod script;
mod suggest;

pub use extraction::{extract_json, parse_json};
pub use memory::MemoryOutlineStore;
pub use ordering::{OrderingSuggestion, OrderingSuggestionClient, SuggestionTimestamp};
pub use script::{ScriptGenerationPipeline, CHUNK_SIZE};
pub use suggest::{AnnotationField, AnnotationSuggester};
