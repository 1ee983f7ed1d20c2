//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! degenerate input geometry, invalid configuration, care areas that could not be assigned
//! to a main field, malformed CSV input and IO.
use thiserror::Error;

use crate::fields::FieldId;
use crate::geometry::Rect;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a care area could not be covered by subfields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnassignedReason {
    /// No main field overlaps the care area.
    NoMainField,
    /// The assigned main field overlaps the care area with zero area.
    ZeroOverlap { main_field_id: FieldId },
}

impl std::fmt::Display for UnassignedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnassignedReason::NoMainField => f.write_str("no overlapping main field"),
            UnassignedReason::ZeroOverlap { main_field_id } => {
                write!(f, "zero overlap with main field {main_field_id}")
            }
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid rectangle for {context}: {rect}")]
    InvalidRectangle { context: String, rect: Rect },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("care area {care_area_id} is unassigned: {reason}")]
    UnassignedCareArea {
        care_area_id: FieldId,
        reason: UnassignedReason,
    },

    #[error("duplicate care area id {id}")]
    DuplicateCareArea { id: FieldId },

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
