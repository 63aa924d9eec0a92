//! Resolution of pointer gestures into new temporal bounds.
//!
//! Gestures arrive as explicit commands so the resolution logic stays
//! testable independent of any UI toolkit. Each successful resolution
//! mutates the [`TimelineModel`] through `update_bounds` and returns the
//! new bounds; the caller fires the (fire-and-forget) persistence write.

use crate::TimelineModel;
use animatic_error::{AnimaticResult, TimelineError, TimelineErrorKind};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shortest on-timeline duration a resize may leave behind.
pub const MIN_ELEMENT_DURATION_MS: i64 = 1_000;

/// Which bound a resize gesture moves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum ResizeEdge {
    /// Move `position_start_time`; the end stays fixed
    Left,
    /// Move `position_end_time`; the start stays fixed
    Right,
}

/// A pointer interaction, reduced to its temporal effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureCommand {
    /// Translate the whole element window, preserving its duration exactly.
    Move {
        /// Element being dragged
        element_id: Uuid,
        /// Drop delta in milliseconds (negative moves earlier)
        delta_ms: i64,
    },
    /// Move one edge of the element window.
    Resize {
        /// Element being resized
        element_id: Uuid,
        /// Which bound moves
        edge: ResizeEdge,
        /// Where the pointer dropped the edge
        boundary: DateTime<Utc>,
    },
}

/// The bounds an element ended up with after a resolved gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBounds {
    /// Element that moved
    pub element_id: Uuid,
    /// New placement start
    pub start: DateTime<Utc>,
    /// New placement end
    pub end: DateTime<Utc>,
}

/// Resolve a gesture command against the timeline.
///
/// # Errors
///
/// Returns an error if the element is unknown or the resulting window
/// would overlap a neighbor; the model is unchanged on error.
pub fn resolve(
    model: &mut TimelineModel,
    command: GestureCommand,
) -> AnimaticResult<ResolvedBounds> {
    match command {
        GestureCommand::Move {
            element_id,
            delta_ms,
        } => resolve_drag(model, element_id, delta_ms),
        GestureCommand::Resize {
            element_id,
            edge,
            boundary,
        } => resolve_resize(model, element_id, edge, boundary),
    }
}

/// Translate an element's whole window by the drop delta.
///
/// Duration is preserved exactly: both bounds shift by the same amount.
pub fn resolve_drag(
    model: &mut TimelineModel,
    element_id: Uuid,
    delta_ms: i64,
) -> AnimaticResult<ResolvedBounds> {
    let element = model
        .element(element_id)
        .ok_or_else(|| TimelineError::new(TimelineErrorKind::UnknownElement(element_id)))?;

    let delta = Duration::milliseconds(delta_ms);
    let start = element.position_start_time + delta;
    let end = element.position_end_time + delta;

    model.update_bounds(element_id, start, end)?;
    tracing::debug!(element = %element_id, delta_ms, "Resolved drag");
    Ok(ResolvedBounds {
        element_id,
        start,
        end,
    })
}

/// Move one edge of an element's window to `boundary`.
///
/// The opposite bound stays fixed. The moved edge is clamped so the
/// element keeps at least [`MIN_ELEMENT_DURATION_MS`]; a resize can never
/// produce `end <= start`.
pub fn resolve_resize(
    model: &mut TimelineModel,
    element_id: Uuid,
    edge: ResizeEdge,
    boundary: DateTime<Utc>,
) -> AnimaticResult<ResolvedBounds> {
    let element = model
        .element(element_id)
        .ok_or_else(|| TimelineError::new(TimelineErrorKind::UnknownElement(element_id)))?;

    let min_duration = Duration::milliseconds(MIN_ELEMENT_DURATION_MS);
    let (start, end) = match edge {
        ResizeEdge::Left => {
            let end = element.position_end_time;
            (boundary.min(end - min_duration), end)
        }
        ResizeEdge::Right => {
            let start = element.position_start_time;
            (start, boundary.max(start + min_duration))
        }
    };

    model.update_bounds(element_id, start, end)?;
    tracing::debug!(element = %element_id, %edge, "Resolved resize");
    Ok(ResolvedBounds {
        element_id,
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use animatic_core::OutlineElement;
    use animatic_error::AnimaticErrorKind;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs)
    }

    fn model_with_two_clips() -> (TimelineModel, Uuid, Uuid) {
        let outline_id = Uuid::new_v4();
        let mut model = TimelineModel::new(outline_id);
        let a = model
            .append(OutlineElement::video(
                outline_id,
                Uuid::new_v4(),
                at(0),
                at(10),
            ))
            .unwrap()
            .id;
        let b = model
            .append(OutlineElement::video(
                outline_id,
                Uuid::new_v4(),
                at(0),
                at(15),
            ))
            .unwrap()
            .id;
        (model, a, b)
    }

    #[test]
    fn drag_preserves_duration_exactly() {
        let (mut model, _, b) = model_with_two_clips();
        let before = model.element(b).unwrap().timeline_duration();

        let resolved = resolve(
            &mut model,
            GestureCommand::Move {
                element_id: b,
                delta_ms: 4_321,
            },
        )
        .unwrap();

        assert_eq!(resolved.end - resolved.start, before);
        assert_eq!(model.element(b).unwrap().timeline_duration(), before);
        assert_eq!(model.element(b).unwrap().position_start_time, at(10) + Duration::milliseconds(4_321));
    }

    #[test]
    fn drag_into_a_neighbor_is_rejected() {
        let (mut model, _, b) = model_with_two_clips();
        let err = resolve_drag(&mut model, b, -5_000).unwrap_err();
        assert!(matches!(err.kind(), AnimaticErrorKind::Timeline(_)));
        // Model untouched.
        assert_eq!(model.element(b).unwrap().position_start_time, at(10));
    }

    #[test]
    fn resize_left_moves_only_the_start() {
        let (mut model, _, b) = model_with_two_clips();
        // Give the second clip room by dragging it right first.
        resolve_drag(&mut model, b, 5_000).unwrap();

        let resolved = resolve_resize(&mut model, b, ResizeEdge::Left, at(12)).unwrap();
        assert_eq!(resolved.start, at(12));
        assert_eq!(resolved.end, at(30));
    }

    #[test]
    fn resize_clamps_to_minimum_duration() {
        let (mut model, a, _) = model_with_two_clips();

        // Try to drag the left edge past the right bound.
        let resolved = resolve_resize(&mut model, a, ResizeEdge::Left, at(60)).unwrap();
        assert_eq!(resolved.end, at(10));
        assert_eq!(resolved.start, at(10) - Duration::milliseconds(MIN_ELEMENT_DURATION_MS));
        assert!(resolved.end > resolved.start);
    }

    #[test]
    fn resize_right_never_collapses() {
        let outline_id = Uuid::new_v4();
        let mut model = TimelineModel::new(outline_id);
        let id = model
            .append(OutlineElement::video(
                outline_id,
                Uuid::new_v4(),
                at(0),
                at(10),
            ))
            .unwrap()
            .id;

        let resolved = resolve_resize(&mut model, id, ResizeEdge::Right, at(-50)).unwrap();
        assert!(resolved.end > resolved.start);
        assert_eq!(
            resolved.end,
            at(0) + Duration::milliseconds(MIN_ELEMENT_DURATION_MS)
        );
    }

    #[test]
    fn unknown_element_is_an_error() {
        let (mut model, ..) = model_with_two_clips();
        let err = resolve_drag(&mut model, Uuid::new_v4(), 100).unwrap_err();
        assert!(matches!(err.kind(), AnimaticErrorKind::Timeline(_)));
    }
}
