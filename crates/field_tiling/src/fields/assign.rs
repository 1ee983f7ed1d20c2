//! Linking care areas back to the main field that covers them.
use crate::fields::{CareArea, MainField};
use crate::geometry::overlap;

/// Strategy used by [`FieldAssigner`] to pick a main field for a care area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignmentStrategy {
    /// Use the main field generated for the care area. Constant time per care area.
    #[default]
    Direct,
    /// Scan all main fields in order and take the first with a positive overlap.
    ///
    /// Linear per care area. When main fields overlap each other this can pick a field
    /// generated for an earlier care area.
    FirstOverlap,
}

/// Returns the first main field in `main_fields` whose overlap with `care_area` is positive.
pub fn find_main_field<'a>(
    care_area: &CareArea,
    main_fields: &'a [MainField],
) -> Option<&'a MainField> {
    main_fields
        .iter()
        .find(|candidate| overlap(&care_area.rect, &candidate.rect).area > 0.0)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FieldAssigner {
    pub strategy: AssignmentStrategy,
}

impl FieldAssigner {
    pub fn new(strategy: AssignmentStrategy) -> Self {
        Self { strategy }
    }

    /// Main field for the care area at input position `index`.
    ///
    /// `main_fields` must be the output of
    /// [`MainFieldGenerator::generate`](crate::fields::MainFieldGenerator::generate) for the
    /// same care area sequence. With [`AssignmentStrategy::Direct`] a field whose
    /// `care_area_id` does not match the care area is treated as missing.
    pub fn assign<'a>(
        &self,
        index: usize,
        care_area: &CareArea,
        main_fields: &'a [MainField],
    ) -> Option<&'a MainField> {
        match self.strategy {
            AssignmentStrategy::Direct => main_fields
                .get(index)
                .filter(|field| field.care_area_id == care_area.id),
            AssignmentStrategy::FirstOverlap => find_main_field(care_area, main_fields),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::MainFieldGenerator;
    use crate::geometry::Rect;

    fn care(id: u64, xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> CareArea {
        CareArea::new(id, Rect::new(xmin, xmax, ymin, ymax))
    }

    #[test]
    fn search_finds_own_field_when_fields_are_apart() {
        let areas = [care(0, 0.0, 1.0, 0.0, 1.0), care(1, 50.0, 51.0, 50.0, 51.0)];
        let fields = MainFieldGenerator::new(2.0).generate(&areas).unwrap();
        assert_eq!(find_main_field(&areas[0], &fields).map(|f| f.id), Some(0));
        assert_eq!(find_main_field(&areas[1], &fields).map(|f| f.id), Some(1));
    }

    #[test]
    fn search_returns_first_overlapping_field() {
        // The second care area sits inside the first one's large main field.
        let areas = [care(0, 0.0, 1.0, 0.0, 1.0), care(1, 3.0, 4.0, 3.0, 4.0)];
        let fields = MainFieldGenerator::new(20.0).generate(&areas).unwrap();
        assert_eq!(find_main_field(&areas[1], &fields).map(|f| f.id), Some(0));

        let direct = FieldAssigner::new(AssignmentStrategy::Direct);
        assert_eq!(direct.assign(1, &areas[1], &fields).map(|f| f.id), Some(1));
    }

    #[test]
    fn search_returns_none_without_overlap() {
        let fields = [MainField {
            id: 0,
            rect: Rect::new(0.0, 10.0, 0.0, 10.0),
            care_area_id: 0,
        }];
        let touching = care(5, 10.0, 12.0, 0.0, 2.0);
        assert!(find_main_field(&touching, &fields).is_none());
        assert!(find_main_field(&touching, &[]).is_none());
    }

    #[test]
    fn direct_rejects_mismatched_field() {
        let area = care(8, 0.0, 1.0, 0.0, 1.0);
        let fields = [MainField {
            id: 0,
            rect: Rect::new(-1.0, 2.0, -1.0, 2.0),
            care_area_id: 99,
        }];
        let direct = FieldAssigner::default();
        assert!(direct.assign(0, &area, &fields).is_none());
        assert!(direct.assign(1, &area, &fields).is_none());

        let search = FieldAssigner::new(AssignmentStrategy::FirstOverlap);
        assert_eq!(search.assign(0, &area, &fields).map(|f| f.id), Some(0));
    }
}
