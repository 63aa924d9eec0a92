//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a message sent to a text-generation backend.
///
/// # Examples
///
/// ```
/// use animatic_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "System");
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
)]
pub enum Role {
    /// System messages provide context and instructions
    System,
    /// User messages carry the composition payload
    User,
    /// Assistant messages are from the model
    Assistant,
}
