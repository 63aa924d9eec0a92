//! Progress reporting for long-running generation runs.

use animatic_error::AnimaticResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Best-effort sink for script-generation progress.
///
/// Implementations typically write `script_generation_progress` back to the
/// record store or push to a UI channel. Callers treat failures as
/// non-fatal: a lost progress update is logged and the run continues.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Record that `percent` (0-100) of the outline's elements have been
    /// narrated in the current run.
    async fn report_progress(&self, outline_id: Uuid, percent: u8) -> AnimaticResult<()>;
}
