//! Single-field annotation suggestions.
//!
//! Each free-text annotation on an element (description, instructions,
//! sources, script) can be drafted by the backend independently. The whole
//! outline is serialized as context so a suggestion fits the flow of the
//! composition, but only the one requested field is ever written back by
//! the caller.

use animatic_core::{ElementKind, GenerateRequest, Message};
use animatic_error::{
    AnimaticResult, StoreError, StoreErrorKind, SuggestionError, SuggestionErrorKind,
};
use animatic_interface::{AnimaticDriver, OutlineStore};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Token budget for a single-field suggestion.
const SUGGESTION_MAX_TOKENS: u32 = 150;

/// Which annotation field a suggestion targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, strum::EnumIter,
)]
pub enum AnnotationField {
    /// The element's description text
    #[display("description")]
    Description,
    /// Editing instructions for the element
    #[display("instructions")]
    Instructions,
    /// Source citations backing the element
    #[display("sources")]
    Sources,
    /// The element's narration script
    #[display("script")]
    Script,
}

#[derive(Debug, Serialize)]
struct ElementContext {
    kind: ElementKind,
    description: Option<String>,
    position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_title: Option<String>,
}

/// Drafts annotation text for a single element field.
pub struct AnnotationSuggester<D: AnimaticDriver> {
    driver: D,
    store: Arc<dyn OutlineStore>,
}

impl<D: AnimaticDriver> AnnotationSuggester<D> {
    /// Create a suggester over the given backend and record store.
    pub fn new(driver: D, store: Arc<dyn OutlineStore>) -> Self {
        Self { driver, store }
    }

    /// Get a reference to the underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Draft text for one element's annotation field.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not part of the outline, the
    /// generation call fails, or the backend returns no text.
    #[tracing::instrument(skip(self), fields(outline = %outline_id, element = %element_id, %field))]
    pub async fn suggest(
        &self,
        outline_id: Uuid,
        element_id: Uuid,
        field: AnnotationField,
    ) -> AnimaticResult<String> {
        let elements = self.store.get_elements(outline_id).await?;
        let current = elements
            .iter()
            .find(|e| e.id == element_id)
            .ok_or_else(|| {
                StoreError::new(StoreErrorKind::NotFound(format!(
                    "element {element_id} in outline {outline_id}"
                )))
            })?;

        let mut context = Vec::with_capacity(elements.len());
        for element in &elements {
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
            });
        }

        let payload = serde_json::to_string_pretty(&context)
            .map_err(|e| animatic_error::JsonError::new(format!("Failed to serialize outline context: {}", e)))?;

        let request = GenerateRequest::builder()
            .messages(vec![
                Message::system(format!(
                    "You are an assistant helping to write {field} text for video outline elements."
                )),
                Message::user(format!(
                    "Given the following outline context:\n{payload}\n\nGenerate concise \
                     {field} text for the element at position {start} - {end}. Consider \
                     the flow and context of the entire outline.",
                    start = current.position_start_time.to_rfc3339(),
                    end = current.position_end_time.to_rfc3339(),
                )),
            ])
            .max_tokens(Some(SUGGESTION_MAX_TOKENS))
            .build()
            .map_err(|e| animatic_error::BuilderError::from(e.to_string()))?;

        let response = self.driver.generate(&request).await?;
        let suggestion = response.text();
        if suggestion.trim().is_empty() {
            return Err(SuggestionError::new(SuggestionErrorKind::EmptyResponse).into());
        }

        tracing::debug!(length = suggestion.len(), "Drafted annotation suggestion");
        Ok(suggestion)
    }
}
