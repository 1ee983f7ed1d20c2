//! Field records and the generators that produce them.
//!
//! A [`CareArea`] is an input region of interest. Each care area gets one [`MainField`]
//! (see [`main_field`]), is linked to it by [`assign`], and the overlap between the two is
//! covered with fixed-size [`SubField`]s (see [`sub_field`]).
use crate::error::Result;
use crate::geometry::Rect;

pub mod assign;
pub mod main_field;
pub mod sub_field;

pub use assign::{find_main_field, AssignmentStrategy, FieldAssigner};
pub use main_field::{DiagonalMode, MainFieldGenerator};
pub use sub_field::{SubFieldGenerator, TileMode};

/// Identifier type shared by care areas, main fields and subfields.
pub type FieldId = u64;

/// Input region of interest.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CareArea {
    pub id: FieldId,
    pub rect: Rect,
}

impl CareArea {
    /// Creates a care area without checking its geometry.
    pub fn new(id: FieldId, rect: Rect) -> Self {
        Self { id, rect }
    }

    /// Creates a care area, rejecting degenerate or non-finite rectangles.
    pub fn try_new(id: FieldId, rect: Rect) -> Result<Self> {
        rect.validate(|| format!("care area {id}"))?;
        Ok(Self { id, rect })
    }
}

/// Square acquisition field generated for exactly one care area.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MainField {
    /// 0-based position of the originating care area in the input sequence.
    pub id: FieldId,
    pub rect: Rect,
    /// Id of the care area this field was generated for.
    pub care_area_id: FieldId,
}

/// Fixed-size tile covering part of a care area's overlap with its main field.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubField {
    pub id: FieldId,
    pub rect: Rect,
    pub main_field_id: FieldId,
}

/// Monotonic id source shared across every care area of a run.
#[derive(Clone, Debug, Default)]
pub struct IdCounter {
    next: FieldId,
}

impl IdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting at `first`.
    pub fn starting_at(first: FieldId) -> Self {
        Self { next: first }
    }

    /// Returns the next id and advances the counter.
    #[inline]
    pub fn next_id(&mut self) -> FieldId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Id that the next call to [`IdCounter::next_id`] will return.
    pub fn peek(&self) -> FieldId {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn id_counter_is_strictly_increasing() {
        let mut counter = IdCounter::new();
        let ids: Vec<_> = (0..4).map(|_| counter.next_id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(counter.peek(), 4);
    }

    #[test]
    fn id_counter_can_start_later() {
        let mut counter = IdCounter::starting_at(10);
        assert_eq!(counter.next_id(), 10);
        assert_eq!(counter.next_id(), 11);
    }

    #[test]
    fn care_area_try_new_rejects_inverted_bounds() {
        let err = CareArea::try_new(3, Rect::new(5.0, 1.0, 0.0, 1.0)).unwrap_err();
        assert!(
            matches!(err, Error::InvalidRectangle { ref context, .. } if context == "care area 3")
        );
        assert!(CareArea::try_new(3, Rect::new(0.0, 1.0, 0.0, 1.0)).is_ok());
    }
}
