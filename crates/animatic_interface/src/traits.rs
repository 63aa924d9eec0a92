//! Trait definitions for text-generation backends.

use animatic_core::{GenerateRequest, GenerateResponse};
use animatic_error::AnimaticResult;
use async_trait::async_trait;

/// Core trait that all text-generation backends must implement.
///
/// The engine sends fully assembled prompts and always re-validates
/// whatever comes back; a driver is never trusted to return the requested
/// shape.
#[async_trait]
pub trait AnimaticDriver: Send + Sync {
    /// Generate model output for the given request.
    async fn generate(&self, req: &GenerateRequest) -> AnimaticResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o").
    fn model_name(&self) -> &str;
}
