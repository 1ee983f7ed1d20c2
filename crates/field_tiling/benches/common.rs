use std::time::Duration;

use criterion::{Criterion, Throughput};
use field_tiling::prelude::{CareArea, Rect};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Square care areas of side `side` laid out on a `count`-wide row-major lattice with `pitch` spacing.
pub fn lattice_care_areas(count: usize, side: f64, pitch: f64) -> Vec<CareArea> {
    let cols = (count as f64).sqrt().ceil().max(1.0) as usize;
    (0..count)
        .map(|i| {
            let x = (i % cols) as f64 * pitch;
            let y = (i / cols) as f64 * pitch;
            CareArea::new(i as u64, Rect::new(x, x + side, y, y + side))
        })
        .collect()
}
