//! Timeline elements and the source-media metadata attached to them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an element contributes to the composition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementKind {
    /// A trimmed span of an external source clip
    Video,
    /// A narrated bridge between two clips
    Transition,
}

/// One item placed on the composed timeline.
///
/// `position_start_time..position_end_time` is the element's window on the
/// timeline; for video elements `source_start_time..source_end_time` is the
/// span trimmed from the source media. The two durations start out equal and
/// diverge once the element is resized on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineElement {
    /// Unique identifier
    pub id: Uuid,
    /// Owning outline
    pub outline_id: Uuid,
    /// Clip or transition
    pub kind: ElementKind,
    /// Source clip reference (video elements only)
    pub source_ref: Option<Uuid>,
    /// Start of the trimmed source span
    pub source_start_time: Option<DateTime<Utc>>,
    /// End of the trimmed source span
    pub source_end_time: Option<DateTime<Utc>>,
    /// Placement start on the composed timeline
    pub position_start_time: DateTime<Utc>,
    /// Placement end on the composed timeline
    pub position_end_time: DateTime<Utc>,
    /// Free-text summary of what the element shows
    pub description: Option<String>,
    /// Editing directions for the element
    pub instructions: Option<String>,
    /// Citations backing the element's claims
    pub sources: Option<String>,
    /// Narration text already written for this element
    pub script: Option<String>,
}

impl OutlineElement {
    /// Create a video element from a trimmed source span.
    ///
    /// The element is born at the timeline origin with its on-timeline
    /// duration equal to the source span; `TimelineModel::append` moves the
    /// window to the end of the timeline.
    pub fn video(
        outline_id: Uuid,
        source_ref: Uuid,
        source_start: DateTime<Utc>,
        source_end: DateTime<Utc>,
    ) -> Self {
        let duration = source_end - source_start;
        let origin = DateTime::<Utc>::UNIX_EPOCH;
        Self {
            id: Uuid::new_v4(),
            outline_id,
            kind: ElementKind::Video,
            source_ref: Some(source_ref),
            source_start_time: Some(source_start),
            source_end_time: Some(source_end),
            position_start_time: origin,
            position_end_time: origin + duration,
            description: None,
            instructions: None,
            sources: None,
            script: None,
        }
    }

    /// Create a transition element of the given on-timeline duration.
    pub fn transition(outline_id: Uuid, duration: Duration) -> Self {
        let origin = DateTime::<Utc>::UNIX_EPOCH;
        Self {
            id: Uuid::new_v4(),
            outline_id,
            kind: ElementKind::Transition,
            source_ref: None,
            source_start_time: None,
            source_end_time: None,
            position_start_time: origin,
            position_end_time: origin + duration,
            description: None,
            instructions: None,
            sources: None,
            script: None,
        }
    }

    /// The element's duration on the composed timeline.
    pub fn timeline_duration(&self) -> Duration {
        self.position_end_time - self.position_start_time
    }

    /// The duration of the trimmed source span, if the element has one.
    pub fn source_duration(&self) -> Option<Duration> {
        match (self.source_start_time, self.source_end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// Title and description metadata for a source clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceClip {
    /// Clip identifier (matches `OutlineElement::source_ref`)
    pub id: Uuid,
    /// Clip title
    pub title: String,
    /// Clip description
    pub description: Option<String>,
}

/// A span of source-media transcript text.
///
/// Segments are filtered against an element's trimmed source span when
/// assembling generation payloads; only segments falling entirely inside
/// the span contribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Segment start within the source media
    pub start: DateTime<Utc>,
    /// Segment end within the source media
    pub end: DateTime<Utc>,
    /// Transcribed text
    pub text: String,
}

impl TranscriptSegment {
    /// Whether the segment lies entirely inside `[start, end]`.
    pub fn within(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start >= start && self.end <= end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs)
    }

    #[test]
    fn video_element_duration_matches_source_span() {
        let element = OutlineElement::video(Uuid::new_v4(), Uuid::new_v4(), at(30), at(42));
        assert_eq!(element.timeline_duration(), Duration::seconds(12));
        assert_eq!(element.source_duration(), Some(Duration::seconds(12)));
    }

    #[test]
    fn transition_has_no_source_span() {
        let element = OutlineElement::transition(Uuid::new_v4(), Duration::seconds(3));
        assert_eq!(element.timeline_duration(), Duration::seconds(3));
        assert_eq!(element.source_duration(), None);
    }

    #[test]
    fn transcript_window_filter() {
        let segment = TranscriptSegment {
            start: at(10),
            end: at(14),
            text: "we can do better".to_string(),
        };
        assert!(segment.within(at(10), at(14)));
        assert!(segment.within(at(8), at(20)));
        assert!(!segment.within(at(11), at(20)));
        assert!(!segment.within(at(0), at(13)));
    }
}
