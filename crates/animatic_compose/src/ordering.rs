//! AI-suggested alternate orderings of the timeline.
//!
//! The client assembles per-clip metadata (title, description, transcript
//! inside the trimmed span, duration), asks the text-generation backend for
//! alternate arrangements under a strict JSON schema, and validates the
//! response before anything reaches the caller. A malformed or incomplete
//! response fails the whole request; there is no partial acceptance and no
//! retry.

use crate::extraction::{extract_json, parse_json};
use animatic_core::{ElementKind, GenerateRequest, Message, OutlineElement};
use animatic_error::{
    AnimaticResult, ConfigError, SuggestionError, SuggestionErrorKind,
};
use animatic_interface::{AnimaticDriver, OutlineStore};
use animatic_timeline::TimelineModel;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// How many alternate orderings one request asks for.
const CANDIDATE_COUNT: usize = 3;

/// Sampling temperature for ordering requests; higher than the default so
/// the candidates actually differ from each other.
const ORDERING_TEMPERATURE: f32 = 0.6;

const SYSTEM_PROMPT: &str = "The following is a conversation with an AI assistant \
about possible orderings of video ad outline elements.";

/// A candidate element's spacing within a suggestion.
///
/// Times are time-of-day values anchored to a synthetic epoch day; a
/// suggestion carries relative spacing, never calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionTimestamp {
    /// Element the spacing applies to
    pub id: Uuid,
    /// Candidate start, time of day
    pub start: NaiveTime,
    /// Candidate end, time of day
    pub end: NaiveTime,
}

/// One AI-proposed alternate arrangement of the current elements.
///
/// Suggestions exist only in memory for the duration of a review step;
/// [`OrderingSuggestionClient::accept`] replaces the timeline wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderingSuggestion {
    /// A permutation of the input element ids
    pub ordering: Vec<Uuid>,
    /// Per-element spacing, aligned with `ordering`
    pub timestamps: Vec<SuggestionTimestamp>,
    /// Transition narration bridging consecutive elements; one fewer entry
    /// than `ordering`
    pub in_between: Vec<String>,
}

/// Per-clip metadata sent to the generation backend.
#[derive(Debug, Serialize)]
struct ClipContext {
    id: Uuid,
    title: String,
    description: Option<String>,
    clip_soundbite_text: String,
    duration_ms: i64,
}

/// Raw response shape required from the backend.
#[derive(Debug, Deserialize)]
struct WireResponse {
    orderings: Vec<Vec<Uuid>>,
    in_between: Vec<Vec<String>>,
    timestamps: Vec<Vec<WireTimestamp>>,
}

#[derive(Debug, Deserialize)]
struct WireTimestamp {
    id: Uuid,
    start: String,
    end: String,
}

/// Requests and validates alternate orderings for a timeline.
pub struct OrderingSuggestionClient<D: AnimaticDriver> {
    driver: D,
    store: Arc<dyn OutlineStore>,
}

impl<D: AnimaticDriver> OrderingSuggestionClient<D> {
    /// Create a client over the given backend and record store.
    pub fn new(driver: D, store: Arc<dyn OutlineStore>) -> Self {
        Self { driver, store }
    }

    /// Get a reference to the underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Request alternate orderings for the given elements.
    ///
    /// # Errors
    ///
    /// Returns an error if any element cannot be loaded, the generation
    /// call fails, or the response violates the required schema in any way
    /// (wrong cardinality, non-permutation, missing timestamps, malformed
    /// JSON). No partial result is ever returned.
    #[tracing::instrument(skip(self), fields(element_count = element_ids.len()))]
    pub async fn request_orderings(
        &self,
        element_ids: &[Uuid],
    ) -> AnimaticResult<Vec<OrderingSuggestion>> {
        if element_ids.is_empty() {
            return Err(
                ConfigError::new("Cannot request orderings for an empty element set").into(),
            );
        }

        let mut clips = Vec::with_capacity(element_ids.len());
        for element_id in element_ids {
            let element = self.store.get_element(*element_id).await?;
            clips.push(self.clip_context(&element).await?);
        }

        let payload = serde_json::to_string(&clips)
            .map_err(|e| animatic_error::JsonError::new(format!("Failed to serialize clip metadata: {}", e)))?;

        let user_prompt = format!(
            "Given the following clips and their metadata, generate {count} completely \
             different and unique orderings of the outline elements. Output the orderings \
             as the following JSON schema: {{\"orderings\": [[id, ...], ...], \
             \"in_between\": [[str, ...], ...], \"timestamps\": [[{{\"id\": \"clip_id\", \
             \"start\": \"HH:MM:SS\", \"end\": \"HH:MM:SS\"}}, ...], ...]}}. Each ordering \
             must contain the same number of clips as provided in the input and must be \
             unique (durations must stay the same, but you can add or remove time between \
             clips as you please). The in_between list for each ordering must have one \
             fewer entry than the ordering and should describe a good way to transition \
             between the two clips. The clips are from news videos and the user is \
             composing a political ad, so transitions should be written with the big \
             picture in mind. Your response must follow this schema regardless of the \
             reasoning. Do not include Markdown or any other formatting. Ensure that the \
             orderings are arrays of clip id strings only.\n\n{payload}",
            count = CANDIDATE_COUNT,
            payload = payload,
        );

        let request = GenerateRequest::builder()
            .messages(vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(user_prompt),
            ])
            .temperature(Some(ORDERING_TEMPERATURE))
            .build()
            .map_err(|e| animatic_error::BuilderError::from(e.to_string()))?;

        let response = self.driver.generate(&request).await?;
        let text = response.text();

        let suggestions = validate_response(element_ids, &text)?;
        tracing::info!(
            candidates = suggestions.len(),
            "Validated ordering suggestions"
        );
        Ok(suggestions)
    }

    /// Accept a suggestion: replace the timeline's ordering and spacing
    /// wholesale and persist the new rows.
    ///
    /// Suggestion times are re-anchored onto the timeline origin's calendar
    /// date, so relative spacing is preserved while the timeline keeps its
    /// date.
    ///
    /// # Errors
    ///
    /// Returns an error if a suggested id is not on the timeline, the
    /// suggested windows overlap, or the persistence write fails. The model
    /// is unchanged on validation failure.
    #[tracing::instrument(skip(self, model, suggestion))]
    pub async fn accept(
        &self,
        model: &mut TimelineModel,
        suggestion: &OrderingSuggestion,
    ) -> AnimaticResult<()> {
        let anchor = model.origin().date_naive();

        let mut replaced = Vec::with_capacity(suggestion.ordering.len());
        for timestamp in &suggestion.timestamps {
            let element = model.element(timestamp.id).ok_or_else(|| {
                animatic_error::TimelineError::new(
                    animatic_error::TimelineErrorKind::UnknownElement(timestamp.id),
                )
            })?;
            let mut element = element.clone();
            element.position_start_time = anchor.and_time(timestamp.start).and_utc();
            element.position_end_time = anchor.and_time(timestamp.end).and_utc();
            replaced.push(element);
        }

        model.replace_all(replaced.clone())?;
        self.store
            .replace_elements(model.outline_id(), replaced)
            .await?;
        tracing::info!(outline = %model.outline_id(), "Applied ordering suggestion");
        Ok(())
    }

    async fn clip_context(&self, element: &OutlineElement) -> AnimaticResult<ClipContext> {
        match (element.kind, element.source_ref) {
            (ElementKind::Video, Some(source_ref)) => {
                let source = self.store.get_source(source_ref).await?;
                let soundbite = match (element.source_start_time, element.source_end_time) {
                    (Some(start), Some(end)) => {
                        let segments = self.store.transcript_segments(source_ref).await?;
                        segments
                            .iter()
                            .filter(|s| s.within(start, end))
                            .map(|s| s.text.as_str())
                            .collect::<Vec<_>>()
                            .join(" ")
                    }
                    _ => String::new(),
                };
                let duration_ms = element
                    .source_duration()
                    .unwrap_or_else(|| element.timeline_duration())
                    .num_milliseconds();
                Ok(ClipContext {
                    id: element.id,
                    title: source.title,
                    description: source.description,
                    clip_soundbite_text: soundbite,
                    duration_ms,
                })
            }
            _ => Ok(ClipContext {
                id: element.id,
                title: "Transition".to_string(),
                description: element.description.clone(),
                clip_soundbite_text: String::new(),
                duration_ms: element.timeline_duration().num_milliseconds(),
            }),
        }
    }
}

/// Validate the raw response text against the input element set and zip it
/// into per-candidate suggestions.
fn validate_response(
    element_ids: &[Uuid],
    text: &str,
) -> AnimaticResult<Vec<OrderingSuggestion>> {
    if text.trim().is_empty() {
        return Err(SuggestionError::new(SuggestionErrorKind::EmptyResponse).into());
    }

    let json = extract_json(text)?;
    let value: serde_json::Value = parse_json(&json)?;

    for field in ["orderings", "in_between", "timestamps"] {
        if !value.get(field).map(|v| v.is_array()).unwrap_or(false) {
            return Err(SuggestionError::new(SuggestionErrorKind::MissingField(
                field.to_string(),
            ))
            .into());
        }
    }

    let wire: WireResponse = serde_json::from_value(value)
        .map_err(|e| animatic_error::JsonError::new(format!("Response shape mismatch: {}", e)))?;

    if wire.in_between.len() != wire.orderings.len()
        || wire.timestamps.len() != wire.orderings.len()
    {
        return Err(SuggestionError::new(SuggestionErrorKind::CandidateMismatch(format!(
            "{} orderings, {} in_between, {} timestamps",
            wire.orderings.len(),
            wire.in_between.len(),
            wire.timestamps.len()
        )))
        .into());
    }

    let expected: HashSet<Uuid> = element_ids.iter().copied().collect();
    let mut suggestions = Vec::with_capacity(wire.orderings.len());

    for (index, ((ordering, in_between), timestamps)) in wire
        .orderings
        .into_iter()
        .zip(wire.in_between)
        .zip(wire.timestamps)
        .enumerate()
    {
        if ordering.len() != element_ids.len() {
            return Err(SuggestionError::new(SuggestionErrorKind::WrongCardinality {
                candidate: index,
                actual: ordering.len(),
                expected: element_ids.len(),
            })
            .into());
        }

        let returned: HashSet<Uuid> = ordering.iter().copied().collect();
        if returned != expected {
            return Err(
                SuggestionError::new(SuggestionErrorKind::NotAPermutation(index)).into(),
            );
        }

        if in_between.len() != ordering.len() - 1 {
            return Err(SuggestionError::new(SuggestionErrorKind::TransitionCount {
                candidate: index,
                actual: in_between.len(),
                expected: ordering.len() - 1,
            })
            .into());
        }

        // Align timestamps with the candidate's ordering.
        let mut aligned = Vec::with_capacity(ordering.len());
        for id in &ordering {
            let wire_ts = timestamps.iter().find(|ts| ts.id == *id).ok_or_else(|| {
                SuggestionError::new(SuggestionErrorKind::MissingTimestamp {
                    candidate: index,
                    element: id.to_string(),
                })
            })?;
            aligned.push(SuggestionTimestamp {
                id: *id,
                start: parse_time_of_day(&wire_ts.start)?,
                end: parse_time_of_day(&wire_ts.end)?,
            });
        }

        suggestions.push(OrderingSuggestion {
            ordering,
            timestamps: aligned,
            in_between,
        });
    }

    Ok(suggestions)
}

fn parse_time_of_day(value: &str) -> AnimaticResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S").map_err(|e| {
        SuggestionError::new(SuggestionErrorKind::BadTimestamp {
            value: value.to_string(),
            message: e.to_string(),
        })
        .into()
    })
}
