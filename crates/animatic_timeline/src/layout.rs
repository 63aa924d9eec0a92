//! Pure mapping between time ranges and proportional track positions.
//!
//! Both layout functions return percentages of a fixed-width track and are
//! deterministic float arithmetic over millisecond timestamps: identical
//! inputs yield bit-identical output.

use animatic_core::OutlineElement;
use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A rendered span inside the track, in percent of track width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPosition {
    /// Left offset in percent
    pub left: f64,
    /// Width in percent
    pub width: f64,
}

impl TrackPosition {
    /// The degenerate position used when the track has no extent.
    pub const ZERO: Self = Self {
        left: 0.0,
        width: 0.0,
    };
}

/// The track's bounding rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackRect {
    /// Screen x of the track's left edge
    pub left: f64,
    /// Track width in screen units
    pub width: f64,
}

/// Layout a time range against the live timeline.
///
/// The denominator is the span from the first element's start to the last
/// element's end; the numerator offset is `start` relative to the first
/// element's start. Degenerate input (no elements, or zero total duration)
/// yields `{0%, 0%}`.
pub fn layout_on_timeline(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    elements: &[OutlineElement],
) -> TrackPosition {
    let (Some(first), Some(last)) = (elements.first(), elements.last()) else {
        return TrackPosition::ZERO;
    };

    let track_start = first.position_start_time.timestamp_millis() as f64;
    let track_end = last.position_end_time.timestamp_millis() as f64;
    proportional(
        start.timestamp_millis() as f64,
        end.timestamp_millis() as f64,
        track_start,
        track_end,
    )
}

/// Layout a time range for an ordering-suggestion preview.
///
/// Suggestion timestamps carry no calendar date, only time-of-day spacing
/// anchored to a synthetic epoch day; the arithmetic is otherwise identical
/// to [`layout_on_timeline`].
pub fn layout_for_ordering_preview(
    start: NaiveTime,
    end: NaiveTime,
    track_start: NaiveTime,
    track_end: NaiveTime,
) -> TrackPosition {
    proportional(
        day_millis(start),
        day_millis(end),
        day_millis(track_start),
        day_millis(track_end),
    )
}

/// Map a pointer's horizontal position inside the track back to the
/// absolute instant it corresponds to.
///
/// The pointer is interpolated proportionally across the span from the
/// first element's start to the last element's end. Returns `None` for a
/// degenerate track (no elements or zero width).
pub fn pointer_position_to_instant(
    pointer_x: f64,
    track: TrackRect,
    elements: &[OutlineElement],
) -> Option<DateTime<Utc>> {
    let first = elements.first()?;
    let last = elements.last()?;
    if track.width <= 0.0 {
        return None;
    }

    let total_ms =
        (last.position_end_time - first.position_start_time).num_milliseconds() as f64;
    let fraction = (pointer_x - track.left) / track.width;
    let offset_ms = (fraction * total_ms).round() as i64;
    Some(first.position_start_time + Duration::milliseconds(offset_ms))
}

fn proportional(start: f64, end: f64, track_start: f64, track_end: f64) -> TrackPosition {
    let total = track_end - track_start;
    if total <= 0.0 {
        return TrackPosition::ZERO;
    }
    TrackPosition {
        left: (start - track_start) / total * 100.0,
        width: (end - start) / total * 100.0,
    }
}

/// Milliseconds since midnight of the synthetic epoch day.
fn day_millis(t: NaiveTime) -> f64 {
    t.num_seconds_from_midnight() as f64 * 1000.0 + (t.nanosecond() / 1_000_000) as f64
}
