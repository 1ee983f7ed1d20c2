//! Axis-aligned rectangles and their intersection.
//!
//! [`Rect`] is the bounding box shared by care areas, main fields and subfields.
//! [`overlap`] computes the strict intersection of two rectangles: rectangles that only
//! touch along an edge or a corner do not overlap.
use std::fmt;

use glam::DVec2;

use crate::error::{Error, Result};

/// Axis-aligned bounding box in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Rect {
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// Square-or-rectangle of the given extent centered on `center`.
    pub fn from_center_size(center: DVec2, size: DVec2) -> Self {
        let half = size * 0.5;
        Self::new(
            center.x - half.x,
            center.x + half.x,
            center.y - half.y,
            center.y + half.y,
        )
    }

    /// Lower-left corner.
    pub fn min(&self) -> DVec2 {
        DVec2::new(self.xmin, self.ymin)
    }

    /// Upper-right corner.
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.xmax, self.ymax)
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width(), self.height())
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> DVec2 {
        (self.min() + self.max()) * 0.5
    }

    /// True when all coordinates are finite and both extents are strictly positive.
    pub fn is_valid(&self) -> bool {
        self.min().is_finite()
            && self.max().is_finite()
            && self.xmin < self.xmax
            && self.ymin < self.ymax
    }

    /// Rejects degenerate or non-finite rectangles.
    ///
    /// `context` names the rectangle in the returned [`Error::InvalidRectangle`].
    pub fn validate(&self, context: impl FnOnce() -> String) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidRectangle {
                context: context(),
                rect: *self,
            })
        }
    }

    /// Closed containment: `other` lies inside `self`, edges included.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.xmin >= self.xmin
            && other.xmax <= self.xmax
            && other.ymin >= self.ymin
            && other.ymax <= self.ymax
    }

    /// Strict intersection with `other`, `None` when the rectangles are disjoint or touch.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let xmin = self.xmin.max(other.xmin);
        let xmax = self.xmax.min(other.xmax);
        let ymin = self.ymin.max(other.ymin);
        let ymax = self.ymax.min(other.ymax);
        if xmin < xmax && ymin < ymax {
            Some(Rect::new(xmin, xmax, ymin, ymax))
        } else {
            None
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}

/// Result of intersecting two rectangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlap {
    /// Intersection area, `0.0` when there is no intersection.
    pub area: f64,
    /// Intersection rectangle, present only when `area > 0`.
    pub rect: Option<Rect>,
}

impl Overlap {
    pub const NONE: Overlap = Overlap {
        area: 0.0,
        rect: None,
    };

    pub fn is_empty(&self) -> bool {
        self.rect.is_none()
    }
}

/// Computes the overlap area and rectangle of `a` and `b`.
///
/// Symmetric in its arguments. Zero-width or zero-height intersections yield [`Overlap::NONE`].
pub fn overlap(a: &Rect, b: &Rect) -> Overlap {
    // Extents small enough for `area` to underflow count as no overlap.
    match a.intersection(b) {
        Some(rect) if rect.area() > 0.0 => Overlap {
            area: rect.area(),
            rect: Some(rect),
        },
        _ => Overlap::NONE,
    }
}
