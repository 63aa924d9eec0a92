//! Timeline model, layout calculus, and gesture resolution for Animatic.
//!
//! The timeline is a virtual, time-addressed track. [`TimelineModel`] holds
//! the canonical ordered element list for one outline and enforces the
//! non-overlap invariant on every write. [`layout`] maps time ranges to
//! proportional track positions for rendering, and [`gesture`] resolves
//! pointer interactions into new temporal bounds.
//!
//! # Example
//!
//! ```
//! use animatic_core::OutlineElement;
//! use animatic_timeline::{layout_on_timeline, TimelineModel};
//! use chrono::{DateTime, Duration, Utc};
//! use uuid::Uuid;
//!
//! let outline_id = Uuid::new_v4();
//! let mut model = TimelineModel::new(outline_id);
//! let clip = OutlineElement::video(
//!     outline_id,
//!     Uuid::new_v4(),
//!     DateTime::<Utc>::UNIX_EPOCH,
//!     DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(10),
//! );
//! model.append(clip).unwrap();
//!
//! let first = &model.elements()[0];
//! let position = layout_on_timeline(
//!     first.position_start_time,
//!     first.position_end_time,
//!     model.elements(),
//! );
//! assert_eq!(position.left, 0.0);
//! assert_eq!(position.width, 100.0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod export;
mod gesture;
mod layout;
mod model;

pub use export::write_fcpxml;
pub use gesture::{
    resolve, resolve_drag, resolve_resize, GestureCommand, ResizeEdge, ResolvedBounds,
    MIN_ELEMENT_DURATION_MS,
};
pub use layout::{
    layout_for_ordering_preview, layout_on_timeline, pointer_position_to_instant, TrackPosition,
    TrackRect,
};
pub use model::TimelineModel;
