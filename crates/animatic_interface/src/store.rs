//! Record store trait and the patch types it exchanges.

use animatic_core::{Outline, OutlineElement, SourceClip, TranscriptSegment};
use animatic_error::AnimaticResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Partial update for an outline element.
///
/// Only the populated fields are written; everything else is left alone.
///
/// # Examples
///
/// ```
/// use animatic_interface::ElementPatch;
///
/// let patch = ElementPatch::default()
///     .with_description("Closing montage".to_string())
///     .with_script("NARRATOR: It's time.".to_string());
/// assert!(patch.position_start_time.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct ElementPatch {
    /// New placement start on the timeline
    pub position_start_time: Option<DateTime<Utc>>,
    /// New placement end on the timeline
    pub position_end_time: Option<DateTime<Utc>>,
    /// New description text
    pub description: Option<String>,
    /// New editing instructions
    pub instructions: Option<String>,
    /// New source citations
    pub sources: Option<String>,
    /// New per-element narration text
    pub script: Option<String>,
}

/// Partial update for an outline record.
#[derive(Debug, Clone, Default, PartialEq, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct OutlinePatch {
    /// New lifecycle status
    pub status: Option<animatic_core::OutlineStatus>,
    /// Assembled narration script
    pub full_script: Option<String>,
    /// Script-generation progress percentage (0-100)
    pub script_generation_progress: Option<u8>,
}

/// The record store owning outline and element rows.
///
/// The engine treats this as the sole source of truth: all persistence is
/// by explicit call, never implicit. Ownership is exclusive: deleting an
/// outline deletes its elements, enforced by the implementation rather
/// than the engine.
#[async_trait]
pub trait OutlineStore: Send + Sync {
    /// Fetch one outline.
    async fn get_outline(&self, outline_id: Uuid) -> AnimaticResult<Outline>;

    /// Fetch an outline's elements ordered by `position_start_time`.
    async fn get_elements(&self, outline_id: Uuid) -> AnimaticResult<Vec<OutlineElement>>;

    /// Fetch one element by id.
    async fn get_element(&self, element_id: Uuid) -> AnimaticResult<OutlineElement>;

    /// Insert a newly placed element.
    async fn insert_element(&self, element: &OutlineElement) -> AnimaticResult<()>;

    /// Apply a partial update to one element.
    async fn update_element(&self, element_id: Uuid, patch: ElementPatch) -> AnimaticResult<()>;

    /// Apply a partial update to one outline.
    async fn update_outline(&self, outline_id: Uuid, patch: OutlinePatch) -> AnimaticResult<()>;

    /// Remove one element. Surviving neighbors are not reflowed.
    async fn delete_element(&self, element_id: Uuid) -> AnimaticResult<()>;

    /// Replace an outline's element set wholesale (accepting an ordering
    /// suggestion). No merge: the provided rows become the new truth.
    async fn replace_elements(
        &self,
        outline_id: Uuid,
        elements: Vec<OutlineElement>,
    ) -> AnimaticResult<()>;

    /// Fetch title/description metadata for a source clip.
    async fn get_source(&self, source_ref: Uuid) -> AnimaticResult<SourceClip>;

    /// Fetch the full transcript of a source clip; callers filter segments
    /// against the element's trimmed span.
    async fn transcript_segments(&self, source_ref: Uuid)
        -> AnimaticResult<Vec<TranscriptSegment>>;
}
