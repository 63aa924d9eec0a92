//! The chunked, progress-tracked script-generation pipeline.
//!
//! One run narrates an entire outline: elements are partitioned into
//! fixed-size batches and narrated strictly in document order, one
//! generation call per batch. Progress is persisted after every batch
//! through a best-effort sink; the batch calls themselves are load-bearing
//! and abort the run on failure with nothing partial saved.

use animatic_core::{ElementKind, GenerateRequest, Message, OutlineStatus};
use animatic_error::{
    AnimaticError, AnimaticErrorKind, AnimaticResult, ScriptError, ScriptErrorKind,
    StoreErrorKind,
};
use animatic_interface::{AnimaticDriver, OutlinePatch, OutlineStore, ProgressSink};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Elements narrated per generation call.
pub const CHUNK_SIZE: usize = 5;

/// Token budget per batch response.
const BATCH_MAX_TOKENS: u32 = 1_500;

const SYSTEM_PROMPT: &str = "You are an assistant helping to create a full video script \
for a political advertisement. Generate a professional, well-formatted script that a \
campaign can hand to production.";

/// Narration context for one element within a batch.
#[derive(Debug, Serialize)]
struct ElementContext {
    kind: ElementKind,
    description: Option<String>,
    position: String,
    source_title: Option<String>,
    existing_script: Option<String>,
}

/// Drives one outline's script generation from start to finish.
///
/// Batches are processed strictly sequentially so narration is requested
/// and persisted in document order; each batch's prompt carries only the
/// original per-element annotations, never the previous batch's output.
pub struct ScriptGenerationPipeline<D: AnimaticDriver> {
    driver: D,
    store: Arc<dyn OutlineStore>,
    progress: Arc<dyn ProgressSink>,
    chunk_size: usize,
}

impl<D: AnimaticDriver> ScriptGenerationPipeline<D> {
    /// Create a pipeline over the given backend, record store, and
    /// progress sink.
    pub fn new(driver: D, store: Arc<dyn OutlineStore>, progress: Arc<dyn ProgressSink>) -> Self {
        Self {
            driver,
            store,
            progress,
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Generate the full narration script for an outline.
    ///
    /// Returns the assembled script; as side effects the outline's
    /// `full_script`, `script_generation_progress`, and status are
    /// persisted, and progress is reported after every batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the outline is missing, an element's source
    /// metadata cannot be loaded, or any batch generation call fails. A
    /// failed run persists no partial script. Progress-sink failures are
    /// logged and never abort the run.
    #[tracing::instrument(skip(self), fields(outline = %outline_id))]
    pub async fn generate_full_script(&self, outline_id: Uuid) -> AnimaticResult<String> {
        let outline = self.store.get_outline(outline_id).await.map_err(|e| {
            if is_not_found(&e) {
                ScriptError::new(ScriptErrorKind::OutlineNotFound(outline_id)).into()
            } else {
                e
            }
        })?;

        // A new run resets progress before anything else.
        self.report_progress(outline_id, 0).await;
        self.advance_status(outline_id, outline.status, OutlineStatus::Generating)
            .await?;

        let elements = self.store.get_elements(outline_id).await?;
        let element_count = elements.len();
        tracing::info!(element_count, "Starting full script generation");

        if elements.is_empty() {
            let script = String::new();
            self.persist_script(outline_id, outline.status, &script).await?;
            self.report_progress(outline_id, 100).await;
            return Ok(script);
        }

        let total_batches = element_count.div_ceil(self.chunk_size);
        let mut batch_texts = Vec::with_capacity(total_batches);

        for (batch_index, batch) in elements.chunks(self.chunk_size).enumerate() {
            let is_first_chunk = batch_index == 0;
            let is_last_chunk = batch_index + 1 == total_batches;
            tracing::debug!(
                batch = batch_index + 1,
                total_batches,
                is_first_chunk,
                is_last_chunk,
                "Processing batch"
            );

            let mut context = Vec::with_capacity(batch.len());
            for element in batch {
                let source_title = match element.source_ref {
                    Some(source_ref) => Some(self.store.get_source(source_ref).await?.title),
                    None => None,
                };
                context.push(ElementContext {
                    kind: element.kind,
                    description: element.description.clone(),
                    position: format!(
                        "{} - {}",
                        element.position_start_time.to_rfc3339(),
                        element.position_end_time.to_rfc3339()
                    ),
                    source_title,
                    existing_script: element.script.clone(),
                });
            }

            let text = self
                .generate_batch(&context, is_first_chunk, is_last_chunk)
                .await
                .map_err(|e| {
                    AnimaticError::from(ScriptError::new(ScriptErrorKind::BatchFailed {
                        batch: batch_index + 1,
                        total: total_batches,
                        message: e.to_string(),
                    }))
                })?;

            if text.trim().is_empty() {
                return Err(
                    ScriptError::new(ScriptErrorKind::EmptyBatch(batch_index + 1)).into(),
                );
            }
            batch_texts.push(text);

            let processed = ((batch_index + 1) * self.chunk_size).min(element_count);
            let percent = (processed as f64 / element_count as f64 * 100.0).round() as u8;
            self.report_progress(outline_id, percent).await;
        }

        let full_script = batch_texts.join("\n\n");
        self.persist_script(outline_id, outline.status, &full_script)
            .await?;
        tracing::info!(
            batches = total_batches,
            script_length = full_script.len(),
            "Full script generation completed"
        );
        Ok(full_script)
    }

    /// Get a reference to the underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    async fn generate_batch(
        &self,
        context: &[ElementContext],
        is_first_chunk: bool,
        is_last_chunk: bool,
    ) -> AnimaticResult<String> {
        let payload = serde_json::to_string_pretty(context)
            .map_err(|e| animatic_error::JsonError::new(format!("Failed to serialize batch context: {}", e)))?;

        let tone = if is_first_chunk && is_last_chunk {
            "This is the whole script. Start with a strong opening and conclude with a \
             powerful message and call to action."
        } else if is_first_chunk {
            "This is the beginning of the script. Start with a strong opening."
        } else if is_last_chunk {
            "This is the end of the script. Conclude with a powerful message and call to action."
        } else {
            "This is a middle part of the script. Ensure smooth transitions from the \
             previous part and to the next part."
        };

        let user_prompt = format!(
            "Given the following outline context for a political advertisement:\n{payload}\n\n\
             Generate the part of the video script that covers these elements. Incorporate \
             each element's existing script text without truncating it, and add narration, \
             transition ideas, visual descriptions, and technical directions where they \
             help the message flow.\n\n{tone}\n\n\
             Format the script professionally, including speaker labels.",
        );

        let request = GenerateRequest::builder()
            .messages(vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(user_prompt),
            ])
            .max_tokens(Some(BATCH_MAX_TOKENS))
            .build()
            .map_err(|e| animatic_error::BuilderError::from(e.to_string()))?;

        let response = self.driver.generate(&request).await?;
        Ok(response.text())
    }

    /// Report progress through the sink; failures are logged, never fatal.
    async fn report_progress(&self, outline_id: Uuid, percent: u8) {
        if let Err(e) = self.progress.report_progress(outline_id, percent).await {
            tracing::warn!(
                outline = %outline_id,
                percent,
                error = %e,
                "Progress report failed, continuing run"
            );
        } else {
            tracing::debug!(outline = %outline_id, percent, "Reported progress");
        }
    }

    /// Advance the outline status, skipping transitions the forward-only
    /// lifecycle forbids (a regeneration run on a finalized outline keeps
    /// its later status).
    async fn advance_status(
        &self,
        outline_id: Uuid,
        current: OutlineStatus,
        target: OutlineStatus,
    ) -> AnimaticResult<()> {
        if current == target || !current.allows_transition_to(target) {
            tracing::debug!(%current, %target, "Skipping status change");
            return Ok(());
        }
        self.store
            .update_outline(outline_id, OutlinePatch::default().with_status(target))
            .await
    }

    async fn persist_script(
        &self,
        outline_id: Uuid,
        status_at_start: OutlineStatus,
        full_script: &str,
    ) -> AnimaticResult<()> {
        let mut patch = OutlinePatch::default()
            .with_full_script(full_script.to_string())
            .with_script_generation_progress(100);
        let target = OutlineStatus::ScriptFinalized;
        if status_at_start.allows_transition_to(target) && status_at_start != target {
            patch = patch.with_status(target);
        }
        self.store.update_outline(outline_id, patch).await
    }
}

fn is_not_found(err: &AnimaticError) -> bool {
    matches!(
        err.kind(),
        AnimaticErrorKind::Store(e) if matches!(e.kind, StoreErrorKind::NotFound(_))
    )
}
