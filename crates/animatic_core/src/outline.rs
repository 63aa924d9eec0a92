//! Outline records and their lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of an outline.
///
/// The lifecycle only moves forward under normal use; `allows_transition_to`
/// encodes the order. `Initialized -> Editing` fires automatically the first
/// time an element is placed on the timeline.
///
/// # Examples
///
/// ```
/// use animatic_core::OutlineStatus;
///
/// assert!(OutlineStatus::Editing.allows_transition_to(OutlineStatus::Generating));
/// assert!(!OutlineStatus::ScriptFinalized.allows_transition_to(OutlineStatus::Editing));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutlineStatus {
    /// Freshly created, no elements placed yet
    Initialized,
    /// At least one element placed; composition in progress
    Editing,
    /// A script-generation run is active
    Generating,
    /// A full script has been generated and persisted
    ScriptFinalized,
    /// The script is under compliance review
    ComplianceCheck,
}

impl OutlineStatus {
    /// Position of this status in the forward lifecycle.
    fn rank(self) -> u8 {
        match self {
            Self::Initialized => 0,
            Self::Editing => 1,
            Self::Generating => 2,
            Self::ScriptFinalized => 3,
            Self::ComplianceCheck => 4,
        }
    }

    /// Whether moving to `next` respects the monotonic forward lifecycle.
    ///
    /// Re-entering the current status is permitted (a new generation run on
    /// an already-generating outline is a no-op transition).
    pub fn allows_transition_to(self, next: Self) -> bool {
        next.rank() >= self.rank()
    }
}

/// A single ad-composition project: an ordered element sequence plus the
/// narration script generated for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Unique identifier
    pub id: Uuid,
    /// Project title
    pub title: String,
    /// Project description
    pub description: String,
    /// Lifecycle status
    pub status: OutlineStatus,
    /// Assembled narration text; `None` until a generation run completes
    pub full_script: Option<String>,
    /// Percentage of elements narrated in the current generation run (0-100)
    pub script_generation_progress: u8,
    /// Last modification instant
    pub updated_at: DateTime<Utc>,
}

impl Outline {
    /// Create a new outline in the `Initialized` state.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            status: OutlineStatus::Initialized,
            full_script: None,
            script_generation_progress: 0,
            updated_at: Utc::now(),
        }
    }

    /// Record that an element has been placed on the timeline.
    ///
    /// The first placement moves a fresh outline from `Initialized` to
    /// `Editing`; later placements leave the status alone.
    pub fn note_element_added(&mut self) {
        if self.status == OutlineStatus::Initialized {
            self.status = OutlineStatus::Editing;
        }
        self.updated_at = Utc::now();
    }
}
