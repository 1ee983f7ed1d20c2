//! Subfield grid generation over an overlap rectangle.
//!
//! The grid is anchored at the minimum corner of the overlap rectangle and every tile has
//! the configured side length. In [`TileMode::Overshoot`] the last row and column are not
//! clipped, so tiles may reach up to one tile size past the overlap rectangle and past the
//! main field that produced it.
use tracing::trace;

use crate::error::{Error, Result};
use crate::fields::{FieldId, IdCounter, SubField};
use crate::geometry::Rect;

/// Treatment of the last row and column of tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileMode {
    /// Full-size tiles that may extend past the overlap rectangle.
    #[default]
    Overshoot,
    /// Last row and column are cut back to the overlap rectangle.
    Clip,
}

fn validate_size(sub_field_size: f64) -> Result<()> {
    if sub_field_size.is_finite() && sub_field_size > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "sub field size must be > 0, got {sub_field_size}"
        )))
    }
}

/// Number of tiles of side `sub_field_size` along each axis of `rect`.
///
/// `sub_field_size` must already be validated as finite and positive.
pub(crate) fn grid_dims(rect: &Rect, sub_field_size: f64) -> (usize, usize) {
    let nx = (rect.width() / sub_field_size).ceil().max(0.0) as usize;
    let ny = (rect.height() / sub_field_size).ceil().max(0.0) as usize;
    (nx, ny)
}

/// Tiles `overlap_rect` with full-size subfields, `i` (x) outer and `j` (y) inner.
///
/// A non-finite or non-positive `sub_field_size` is rejected with [`Error::InvalidConfig`]
/// and leaves `ids` untouched.
pub fn tile(
    overlap_rect: &Rect,
    sub_field_size: f64,
    main_field_id: FieldId,
    ids: &mut IdCounter,
) -> Result<Vec<SubField>> {
    validate_size(sub_field_size)?;
    Ok(tile_with_mode(
        overlap_rect,
        sub_field_size,
        main_field_id,
        ids,
        TileMode::Overshoot,
    ))
}

fn tile_with_mode(
    overlap_rect: &Rect,
    sub_field_size: f64,
    main_field_id: FieldId,
    ids: &mut IdCounter,
    mode: TileMode,
) -> Vec<SubField> {
    let (nx, ny) = grid_dims(overlap_rect, sub_field_size);
    let mut tiles = Vec::with_capacity(nx * ny);

    for i in 0..nx {
        let xmin = overlap_rect.xmin + i as f64 * sub_field_size;
        let mut xmax = xmin + sub_field_size;
        if mode == TileMode::Clip {
            xmax = xmax.min(overlap_rect.xmax);
        }
        for j in 0..ny {
            let ymin = overlap_rect.ymin + j as f64 * sub_field_size;
            let mut ymax = ymin + sub_field_size;
            if mode == TileMode::Clip {
                ymax = ymax.min(overlap_rect.ymax);
            }
            tiles.push(SubField {
                id: ids.next_id(),
                rect: Rect::new(xmin, xmax, ymin, ymax),
                main_field_id,
            });
        }
    }

    trace!(
        "Tiled {} with {}x{} subfields for main field {}.",
        overlap_rect,
        nx,
        ny,
        main_field_id
    );
    tiles
}

/// Configured subfield tiler.
#[derive(Clone, Debug)]
pub struct SubFieldGenerator {
    /// Side length of every subfield.
    pub sub_field_size: f64,
    pub mode: TileMode,
}

impl SubFieldGenerator {
    pub fn try_new(sub_field_size: f64) -> Result<Self> {
        validate_size(sub_field_size)?;
        Ok(Self {
            sub_field_size,
            mode: TileMode::default(),
        })
    }

    pub fn with_mode(mut self, mode: TileMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn tile(
        &self,
        overlap_rect: &Rect,
        main_field_id: FieldId,
        ids: &mut IdCounter,
    ) -> Vec<SubField> {
        tile_with_mode(
            overlap_rect,
            self.sub_field_size,
            main_field_id,
            ids,
            self.mode,
        )
    }
}
