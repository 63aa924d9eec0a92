//! Animatic - an outline-composition engine for ad production.
//!
//! Animatic models a video advertisement as an ordered, time-addressed
//! sequence of clip/transition elements and provides everything an editor
//! surface needs around that model:
//!
//! - **Timeline**: the canonical element sequence with an enforced
//!   non-overlap invariant, proportional layout math, and gesture
//!   resolution (`TimelineModel`, `layout_on_timeline`, `resolve_drag`).
//! - **Ordering suggestions**: AI-proposed alternate arrangements with
//!   synthesized transition narration, validated against a strict schema
//!   before anything is accepted (`OrderingSuggestionClient`).
//! - **Script generation**: a chunked, progress-tracked pipeline that
//!   narrates the whole composition batch by batch
//!   (`ScriptGenerationPipeline`).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use animatic::{
//!     MemoryOutlineStore, OpenAiClient, Outline, OutlineElement,
//!     ScriptGenerationPipeline, TimelineModel,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryOutlineStore::new());
//!     let outline = Outline::new("City spot", "30s persuasion ad");
//!     let outline_id = outline.id;
//!     store.insert_outline(outline)?;
//!
//!     let driver = OpenAiClient::from_env()?;
//!     let pipeline = ScriptGenerationPipeline::new(driver, store.clone(), store.clone());
//!     let script = pipeline.generate_full_script(outline_id).await?;
//!     println!("{script}");
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Animatic is organized as a workspace with focused crates:
//!
//! - `animatic_error` - Error types
//! - `animatic_core` - Core data types (Outline, OutlineElement, requests)
//! - `animatic_interface` - Driver, record store, and progress traits
//! - `animatic_timeline` - Timeline model, layout calculus, gestures
//! - `animatic_compose` - Ordering suggestions and script generation
//! - `animatic_models` - Text-generation backends
//!
//! This crate (`animatic`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use animatic_compose::{
    extract_json, parse_json, AnnotationField, AnnotationSuggester, MemoryOutlineStore,
    OrderingSuggestion, OrderingSuggestionClient, ScriptGenerationPipeline, SuggestionTimestamp,
    CHUNK_SIZE,
};
pub use animatic_core::{
    init_telemetry, EditorPreferences, ElementKind, GenerateRequest, GenerateResponse, Message,
    Outline, OutlineElement, OutlineStatus, Output, PreferenceStore, Role, SourceClip,
    TranscriptSegment,
};
pub use animatic_error::{
    AnimaticError, AnimaticErrorKind, AnimaticResult, BuilderError, BuilderErrorKind, ConfigError,
    HttpError, JsonError, ScriptError, ScriptErrorKind, StoreError, StoreErrorKind,
    SuggestionError, SuggestionErrorKind, TimelineError, TimelineErrorKind,
};
pub use animatic_interface::{
    AnimaticDriver, ElementPatch, OutlinePatch, OutlineStore, ProgressSink,
};
pub use animatic_models::OpenAiClient;
pub use animatic_timeline::{
    layout_for_ordering_preview, layout_on_timeline, pointer_position_to_instant, resolve,
    resolve_drag, resolve_resize, write_fcpxml, GestureCommand, ResizeEdge, ResolvedBounds,
    TimelineModel, TrackPosition, TrackRect, MIN_ELEMENT_DURATION_MS,
};
