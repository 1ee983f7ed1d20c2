#![forbid(unsafe_code)]
//! field_tiling: two-level main field / subfield tiling of rectangular care areas.
//!
//! Modules:
//! - geometry: axis-aligned rectangles and strict overlap
//! - fields: care area, main field and subfield records plus their generators
//! - plan: configuration, runner, diagnostics and events for a full run
//! - io: headerless CSV input and output
pub mod error;
pub mod fields;
pub mod geometry;
pub mod io;
pub mod plan;

/// Convenient re-exports for common types. Import with `use field_tiling::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result, UnassignedReason};
    pub use crate::fields::{
        find_main_field, AssignmentStrategy, CareArea, DiagonalMode, FieldAssigner, FieldId,
        IdCounter, MainField, MainFieldGenerator, SubField, SubFieldGenerator, TileMode,
    };
    pub use crate::geometry::{overlap, Overlap, Rect};
    pub use crate::io::{
        read_care_areas, read_metadata, write_main_fields, write_sub_fields, Metadata,
    };
    pub use crate::plan::{
        run_plan, run_plan_with_events, tile_care_areas, Diagnostic, EventSink, FnSink,
        MultiSink, PlanConfig, PlanEvent, PlanEventKind, PlanResult, PlanRunner, PlanSummary,
        UnassignedPolicy, VecSink,
    };
}
