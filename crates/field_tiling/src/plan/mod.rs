//! Tiling pipeline: main field generation, assignment and subfield tiling over a care area set.
pub mod config;
pub mod events;
pub mod runner;

pub use config::{PlanConfig, UnassignedPolicy};
pub use events::{EventSink, FnSink, MultiSink, PlanEvent, PlanEventKind, VecSink};
pub use runner::{
    run_plan, run_plan_with_events, tile_care_areas, Diagnostic, PlanResult, PlanRunner,
    PlanSummary,
};
