//! In-memory record store.
//!
//! A complete [`OutlineStore`] implementation backed by process memory.
//! Useful as the reference implementation in tests and for embedding the
//! engine without a database.

use animatic_core::{Outline, OutlineElement, SourceClip, TranscriptSegment};
use animatic_error::{AnimaticResult, StoreError, StoreErrorKind};
use animatic_interface::{ElementPatch, OutlinePatch, OutlineStore, ProgressSink};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    outlines: HashMap<Uuid, Outline>,
    elements: HashMap<Uuid, OutlineElement>,
    sources: HashMap<Uuid, SourceClip>,
    transcripts: HashMap<Uuid, Vec<TranscriptSegment>>,
}

/// An [`OutlineStore`] backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryOutlineStore {
    inner: Mutex<Inner>,
}

impl MemoryOutlineStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an outline record.
    pub fn insert_outline(&self, outline: Outline) -> AnimaticResult<()> {
        self.lock()?.outlines.insert(outline.id, outline);
        Ok(())
    }

    /// Seed source-clip metadata.
    pub fn insert_source(&self, source: SourceClip) -> AnimaticResult<()> {
        self.lock()?.sources.insert(source.id, source);
        Ok(())
    }

    /// Seed transcript segments for a source clip.
    pub fn insert_transcript(
        &self,
        source_ref: Uuid,
        segments: Vec<TranscriptSegment>,
    ) -> AnimaticResult<()> {
        self.lock()?.transcripts.insert(source_ref, segments);
        Ok(())
    }

    fn lock(&self) -> AnimaticResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| StoreError::new(StoreErrorKind::Unavailable(e.to_string())).into())
    }
}

#[async_trait]
impl OutlineStore for MemoryOutlineStore {
    async fn get_outline(&self, outline_id: Uuid) -> AnimaticResult<Outline> {
        self.lock()?
            .outlines
            .get(&outline_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::new(StoreErrorKind::NotFound(format!("outline {outline_id}"))).into()
            })
    }

    async fn get_elements(&self, outline_id: Uuid) -> AnimaticResult<Vec<OutlineElement>> {
        let mut elements: Vec<OutlineElement> = self
            .lock()?
            .elements
            .values()
            .filter(|e| e.outline_id == outline_id)
            .cloned()
            .collect();
        elements.sort_by_key(|e| e.position_start_time);
        Ok(elements)
    }

    async fn get_element(&self, element_id: Uuid) -> AnimaticResult<OutlineElement> {
        self.lock()?
            .elements
            .get(&element_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::new(StoreErrorKind::NotFound(format!("element {element_id}"))).into()
            })
    }

    async fn insert_element(&self, element: &OutlineElement) -> AnimaticResult<()> {
        let mut inner = self.lock()?;
        // The first placed element moves a fresh outline into Editing.
        if let Some(outline) = inner.outlines.get_mut(&element.outline_id) {
            outline.note_element_added();
        }
        inner.elements.insert(element.id, element.clone());
        Ok(())
    }

    async fn update_element(&self, element_id: Uuid, patch: ElementPatch) -> AnimaticResult<()> {
        let mut inner = self.lock()?;
        let element = inner.elements.get_mut(&element_id).ok_or_else(|| {
            StoreError::new(StoreErrorKind::NotFound(format!("element {element_id}")))
        })?;

        if let Some(start) = patch.position_start_time {
            element.position_start_time = start;
        }
        if let Some(end) = patch.position_end_time {
            element.position_end_time = end;
        }
        if let Some(description) = patch.description {
            element.description = Some(description);
        }
        if let Some(instructions) = patch.instructions {
            element.instructions = Some(instructions);
        }
        if let Some(sources) = patch.sources {
            element.sources = Some(sources);
        }
        if let Some(script) = patch.script {
            element.script = Some(script);
        }
        Ok(())
    }

    async fn update_outline(&self, outline_id: Uuid, patch: OutlinePatch) -> AnimaticResult<()> {
        let mut inner = self.lock()?;
        let outline = inner.outlines.get_mut(&outline_id).ok_or_else(|| {
            StoreError::new(StoreErrorKind::NotFound(format!("outline {outline_id}")))
        })?;

        if let Some(status) = patch.status {
            outline.status = status;
        }
        if let Some(full_script) = patch.full_script {
            outline.full_script = Some(full_script);
        }
        if let Some(progress) = patch.script_generation_progress {
            outline.script_generation_progress = progress;
        }
        outline.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_element(&self, element_id: Uuid) -> AnimaticResult<()> {
        let mut inner = self.lock()?;
        inner.elements.remove(&element_id).ok_or_else(|| {
            StoreError::new(StoreErrorKind::NotFound(format!("element {element_id}")))
        })?;
        Ok(())
    }

    async fn replace_elements(
        &self,
        outline_id: Uuid,
        elements: Vec<OutlineElement>,
    ) -> AnimaticResult<()> {
        for element in &elements {
            if element.outline_id != outline_id {
                return Err(StoreError::new(StoreErrorKind::WriteRejected(format!(
                    "element {} belongs to outline {}",
                    element.id, element.outline_id
                )))
                .into());
            }
        }

        let mut inner = self.lock()?;
        inner.elements.retain(|_, e| e.outline_id != outline_id);
        for element in elements {
            inner.elements.insert(element.id, element);
        }
        Ok(())
    }

    async fn get_source(&self, source_ref: Uuid) -> AnimaticResult<SourceClip> {
        self.lock()?
            .sources
            .get(&source_ref)
            .cloned()
            .ok_or_else(|| {
                StoreError::new(StoreErrorKind::NotFound(format!("source {source_ref}"))).into()
            })
    }

    async fn transcript_segments(
        &self,
        source_ref: Uuid,
    ) -> AnimaticResult<Vec<TranscriptSegment>> {
        Ok(self
            .lock()?
            .transcripts
            .get(&source_ref)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ProgressSink for MemoryOutlineStore {
    /// Progress writes straight into the stored outline row.
    async fn report_progress(&self, outline_id: Uuid, percent: u8) -> AnimaticResult<()> {
        self.update_outline(
            outline_id,
            OutlinePatch::default().with_script_generation_progress(percent),
        )
        .await
    }
}
