//! Main field generation: one square field per care area.
use std::f64::consts::SQRT_2;

use glam::DVec2;
use tracing::debug;

use crate::error::{Error, Result};
use crate::fields::{CareArea, FieldId, MainField};
use crate::geometry::Rect;

/// How the diagonal of a care area is measured when sizing its main field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagonalMode {
    /// `sqrt(2) * width`. Exact for square care areas; ignores the height otherwise.
    #[default]
    XExtent,
    /// `sqrt(width^2 + height^2)`, the true diagonal of any rectangle.
    Euclidean,
}

impl DiagonalMode {
    pub fn diagonal(self, rect: &Rect) -> f64 {
        match self {
            DiagonalMode::XExtent => SQRT_2 * rect.width(),
            DiagonalMode::Euclidean => rect.size().length(),
        }
    }
}

/// Sizes and centers a square main field on every care area.
#[derive(Clone, Debug)]
pub struct MainFieldGenerator {
    /// Lower bound for the side length of every main field.
    pub min_field_size: f64,
    pub diagonal: DiagonalMode,
}

impl MainFieldGenerator {
    pub fn new(min_field_size: f64) -> Self {
        Self {
            min_field_size,
            diagonal: DiagonalMode::default(),
        }
    }

    pub fn with_diagonal(mut self, diagonal: DiagonalMode) -> Self {
        self.diagonal = diagonal;
        self
    }

    /// Side length of the main field for `care_area`.
    pub fn field_size(&self, care_area: &CareArea) -> f64 {
        self.min_field_size.max(self.diagonal.diagonal(&care_area.rect))
    }

    /// Builds the main field for `care_area` at input position `index`.
    pub fn field_for(&self, index: usize, care_area: &CareArea) -> MainField {
        let size = self.field_size(care_area);
        MainField {
            id: index as FieldId,
            rect: Rect::from_center_size(care_area.rect.center(), DVec2::splat(size)),
            care_area_id: care_area.id,
        }
    }

    /// Generates one main field per care area, preserving input order.
    pub fn generate(&self, care_areas: &[CareArea]) -> Result<Vec<MainField>> {
        if !(self.min_field_size.is_finite() && self.min_field_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "main field size must be > 0, got {}",
                self.min_field_size
            )));
        }

        let fields: Vec<MainField> = care_areas
            .iter()
            .enumerate()
            .map(|(index, care_area)| {
                let field = self.field_for(index, care_area);
                debug!(
                    "Main field {} for care area {}: {}.",
                    field.id, care_area.id, field.rect
                );
                field
            })
            .collect();
        Ok(fields)
    }
}
