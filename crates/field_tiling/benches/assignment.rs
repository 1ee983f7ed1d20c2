mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use field_tiling::prelude::*;

const CARE_AREA_COUNTS: [usize; 3] = [100, 500, 2_000];

fn assignment_strategy_benches(c: &mut Criterion) {
    for strategy in [AssignmentStrategy::Direct, AssignmentStrategy::FirstOverlap] {
        let mut group = c.benchmark_group(format!("assignment/{strategy:?}"));

        for &count in &CARE_AREA_COUNTS {
            let areas = common::lattice_care_areas(count, 10.0, 40.0);
            let main_fields = MainFieldGenerator::new(20.0)
                .generate(&areas)
                .expect("valid size");
            let assigner = FieldAssigner::new(strategy);
            group.throughput(common::elements_throughput(count));

            group.bench_with_input(BenchmarkId::from_parameter(count), &areas, |b, areas| {
                b.iter(|| {
                    let assigned = areas
                        .iter()
                        .enumerate()
                        .filter(|(i, area)| assigner.assign(*i, area, &main_fields).is_some())
                        .count();
                    black_box(assigned);
                });
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = assignment_strategy_benches
}
criterion_main!(benches);
