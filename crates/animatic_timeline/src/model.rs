//! The canonical ordered element list for one outline.

use animatic_core::OutlineElement;
use animatic_error::{AnimaticResult, TimelineError, TimelineErrorKind};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Holds one outline's elements sorted by `position_start_time` and
/// enforces the non-overlap invariant on every write.
///
/// Every state change is an explicit operation: [`append`](Self::append),
/// [`delete`](Self::delete), [`replace_all`](Self::replace_all),
/// [`update_bounds`](Self::update_bounds). There is no hidden mutation.
///
/// Gaps between elements are representable (deleting an element does not
/// reflow its neighbors); overlaps are not.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineModel {
    outline_id: Uuid,
    origin: DateTime<Utc>,
    elements: Vec<OutlineElement>,
}

impl TimelineModel {
    /// Create an empty timeline anchored at the Unix epoch.
    pub fn new(outline_id: Uuid) -> Self {
        Self::with_origin(outline_id, DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Create an empty timeline anchored at `origin`.
    ///
    /// The origin is where the first appended element lands; timelines
    /// loaded from the record store keep whatever instants their rows
    /// carry.
    pub fn with_origin(outline_id: Uuid, origin: DateTime<Utc>) -> Self {
        Self {
            outline_id,
            origin,
            elements: Vec::new(),
        }
    }

    /// Build a timeline from stored rows, validating the sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if any element belongs to another outline, has a
    /// non-positive duration, or overlaps a neighbor.
    pub fn from_elements(
        outline_id: Uuid,
        mut elements: Vec<OutlineElement>,
    ) -> AnimaticResult<Self> {
        elements.sort_by_key(|e| e.position_start_time);
        validate_sequence(outline_id, &elements)?;
        let origin = elements
            .first()
            .map(|e| e.position_start_time)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Ok(Self {
            outline_id,
            origin,
            elements,
        })
    }

    /// The outline these elements belong to.
    pub fn outline_id(&self) -> Uuid {
        self.outline_id
    }

    /// The instant where the first appended element lands.
    pub fn origin(&self) -> DateTime<Utc> {
        self.origin
    }

    /// Read access to the sorted element list.
    pub fn elements(&self) -> &[OutlineElement] {
        &self.elements
    }

    /// Look up one element by id.
    pub fn element(&self, element_id: Uuid) -> Option<&OutlineElement> {
        self.elements.iter().find(|e| e.id == element_id)
    }

    /// Place a new element at the end of the timeline.
    ///
    /// The element's window is moved so its start coincides with the last
    /// element's `position_end_time` (or the origin when the timeline is
    /// empty); the end follows from the element's own duration.
    ///
    /// # Errors
    ///
    /// Returns an error if the element belongs to another outline or has a
    /// non-positive duration.
    pub fn append(&mut self, mut element: OutlineElement) -> AnimaticResult<&OutlineElement> {
        if element.outline_id != self.outline_id {
            return Err(TimelineError::new(TimelineErrorKind::ForeignElement {
                element: element.id,
                actual: element.outline_id,
                expected: self.outline_id,
            })
            .into());
        }
        let duration = element.timeline_duration();
        if duration <= Duration::zero() {
            return Err(TimelineError::new(TimelineErrorKind::Bounds {
                start: element.position_start_time.to_rfc3339(),
                end: element.position_end_time.to_rfc3339(),
            })
            .into());
        }

        let start = self
            .elements
            .last()
            .map(|last| last.position_end_time)
            .unwrap_or(self.origin);
        element.position_start_time = start;
        element.position_end_time = start + duration;

        tracing::debug!(
            element = %element.id,
            start = %element.position_start_time,
            end = %element.position_end_time,
            "Appended element at timeline end"
        );

        self.elements.push(element);
        let placed = self.elements.last().expect("element was just appended");
        Ok(placed)
    }

    /// Remove an element, returning it.
    ///
    /// The surviving neighbors keep their windows; the removed element's
    /// span becomes a gap.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not on the timeline.
    pub fn delete(&mut self, element_id: Uuid) -> AnimaticResult<OutlineElement> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == element_id)
            .ok_or_else(|| TimelineError::new(TimelineErrorKind::UnknownElement(element_id)))?;
        let removed = self.elements.remove(index);
        tracing::debug!(element = %element_id, "Deleted element, gap preserved");
        Ok(removed)
    }

    /// Replace the whole element set (accepting an ordering suggestion).
    ///
    /// # Errors
    ///
    /// Returns an error if the incoming set fails sequence validation; the
    /// current elements are left untouched in that case.
    pub fn replace_all(&mut self, mut elements: Vec<OutlineElement>) -> AnimaticResult<()> {
        elements.sort_by_key(|e| e.position_start_time);
        validate_sequence(self.outline_id, &elements)?;
        tracing::debug!(count = elements.len(), "Replaced timeline elements wholesale");
        self.elements = elements;
        Ok(())
    }

    /// Move one element's temporal bounds.
    ///
    /// The element may land anywhere that keeps the sequence overlap-free,
    /// including past its former neighbors; the list is re-sorted after the
    /// write.
    ///
    /// # Errors
    ///
    /// Returns an error if `new_end <= new_start`, the element is unknown,
    /// or the new window overlaps another element. The model is unchanged
    /// on error.
    pub fn update_bounds(
        &mut self,
        element_id: Uuid,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
    ) -> AnimaticResult<()> {
        if new_end <= new_start {
            return Err(TimelineError::new(TimelineErrorKind::Bounds {
                start: new_start.to_rfc3339(),
                end: new_end.to_rfc3339(),
            })
            .into());
        }
        if self.element(element_id).is_none() {
            return Err(TimelineError::new(TimelineErrorKind::UnknownElement(element_id)).into());
        }

        let mut updated = self.elements.clone();
        for element in &mut updated {
            if element.id == element_id {
                element.position_start_time = new_start;
                element.position_end_time = new_end;
            }
        }
        updated.sort_by_key(|e| e.position_start_time);
        validate_sequence(self.outline_id, &updated)?;

        self.elements = updated;
        Ok(())
    }

    /// Total composed duration: `max(position_end_time) - min(position_start_time)`.
    pub fn total_duration(&self) -> Duration {
        match self.span() {
            Some((start, end)) => end - start,
            None => Duration::zero(),
        }
    }

    /// Earliest start and latest end over all elements.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.elements.iter().map(|e| e.position_start_time).min()?;
        let end = self.elements.iter().map(|e| e.position_end_time).max()?;
        Some((start, end))
    }

    /// Whether consecutive elements touch exactly, with no gaps.
    pub fn is_contiguous(&self) -> bool {
        self.elements
            .windows(2)
            .all(|pair| pair[0].position_end_time == pair[1].position_start_time)
    }
}

/// Validate ownership, positive durations, and pairwise non-overlap of a
/// sorted element sequence.
fn validate_sequence(outline_id: Uuid, elements: &[OutlineElement]) -> AnimaticResult<()> {
    for element in elements {
        if element.outline_id != outline_id {
            return Err(TimelineError::new(TimelineErrorKind::ForeignElement {
                element: element.id,
                actual: element.outline_id,
                expected: outline_id,
            })
            .into());
        }
        if element.position_end_time <= element.position_start_time {
            return Err(TimelineError::new(TimelineErrorKind::Bounds {
                start: element.position_start_time.to_rfc3339(),
                end: element.position_end_time.to_rfc3339(),
            })
            .into());
        }
    }
    for pair in elements.windows(2) {
        if pair[1].position_start_time < pair[0].position_end_time {
            return Err(TimelineError::new(TimelineErrorKind::Overlap {
                element: pair[1].id,
                neighbor: pair[0].id,
            })
            .into());
        }
    }
    Ok(())
}
