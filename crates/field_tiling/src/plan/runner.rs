//! High-level runner that turns care areas into main fields and subfields.
use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::{Error, Result, UnassignedReason};
use crate::fields::{
    CareArea, FieldAssigner, FieldId, IdCounter, MainField, MainFieldGenerator, SubField,
    SubFieldGenerator,
};
use crate::geometry::overlap;
use crate::plan::config::{PlanConfig, UnassignedPolicy};
use crate::plan::events::{EventSink, PlanEvent, PlanEventKind};

/// A care area that produced no subfields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// Position of the care area in the input.
    pub index: usize,
    pub care_area_id: FieldId,
    pub reason: UnassignedReason,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "care area {} (row {}): {}",
            self.care_area_id, self.index, self.reason
        )
    }
}

/// Counts over a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub care_areas: usize,
    pub main_fields: usize,
    pub sub_fields: usize,
    pub unassigned: usize,
}

/// Output of a tiling run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct PlanResult {
    /// Number of care areas processed.
    pub care_area_count: usize,
    /// One main field per care area, in input order.
    pub main_fields: Vec<MainField>,
    /// Subfields in care-area order, then grid order. Ids are strictly increasing from 0.
    pub sub_fields: Vec<SubField>,
    /// Care areas that produced no subfields.
    pub diagnostics: Vec<Diagnostic>,
}

impl PlanResult {
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            care_areas: self.care_area_count,
            main_fields: self.main_fields.len(),
            sub_fields: self.sub_fields.len(),
            unassigned: self.diagnostics.len(),
        }
    }

    /// Subfields belonging to the main field `main_field_id`.
    pub fn sub_fields_of(&self, main_field_id: FieldId) -> impl Iterator<Item = &SubField> {
        self.sub_fields
            .iter()
            .filter(move |s| s.main_field_id == main_field_id)
    }
}

/// Runs the pipeline with a validated configuration.
#[derive(Debug, Clone)]
pub struct PlanRunner {
    pub config: PlanConfig,
}

impl PlanRunner {
    pub fn try_new(config: PlanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Runs the configured pipeline over `care_areas`.
    pub fn run(&self, care_areas: &[CareArea]) -> Result<PlanResult> {
        run_plan(care_areas, &self.config, None)
    }

    pub fn run_with_events(
        &self,
        care_areas: &[CareArea],
        sink: &mut dyn EventSink,
    ) -> Result<PlanResult> {
        run_plan(care_areas, &self.config, Some(sink))
    }

    /// Tiles `care_areas` against main fields produced elsewhere, e.g. by an earlier run.
    pub fn tile_against(
        &self,
        care_areas: &[CareArea],
        main_fields: &[MainField],
        sink: &mut dyn EventSink,
    ) -> Result<PlanResult> {
        let (sub_fields, diagnostics) =
            tile_care_areas(care_areas, main_fields, &self.config, sink)?;
        Ok(PlanResult {
            care_area_count: care_areas.len(),
            main_fields: main_fields.to_vec(),
            sub_fields,
            diagnostics,
        })
    }
}

pub fn run_plan(
    care_areas: &[CareArea],
    config: &PlanConfig,
    sink: Option<&mut dyn EventSink>,
) -> Result<PlanResult> {
    if let Some(s) = sink {
        run_plan_with_events(care_areas, config, s)
    } else {
        run_plan_with_events(care_areas, config, &mut ())
    }
}

/// Rejects degenerate geometry and repeated ids before anything is generated.
fn validate_care_areas(care_areas: &[CareArea]) -> Result<()> {
    let mut seen = HashSet::with_capacity(care_areas.len());
    for care_area in care_areas {
        care_area
            .rect
            .validate(|| format!("care area {}", care_area.id))?;
        if !seen.insert(care_area.id) {
            return Err(Error::DuplicateCareArea { id: care_area.id });
        }
    }
    Ok(())
}

pub fn run_plan_with_events(
    care_areas: &[CareArea],
    config: &PlanConfig,
    sink: &mut dyn EventSink,
) -> Result<PlanResult> {
    config.validate()?;
    validate_care_areas(care_areas)?;

    if sink.wants(PlanEventKind::RunStarted) {
        sink.send(PlanEvent::RunStarted {
            config: config.clone(),
            care_area_count: care_areas.len(),
        });
    }
    if care_areas.is_empty() {
        warn!("No care areas supplied.");
    }

    let main_fields = MainFieldGenerator::new(config.main_field_size)
        .with_diagonal(config.diagonal)
        .generate(care_areas)?;
    if sink.wants(PlanEventKind::MainFieldsGenerated) {
        sink.send(PlanEvent::MainFieldsGenerated {
            count: main_fields.len(),
        });
    }

    let (sub_fields, diagnostics) = tile_validated(care_areas, &main_fields, config, sink)?;

    let result = PlanResult {
        care_area_count: care_areas.len(),
        main_fields,
        sub_fields,
        diagnostics,
    };
    let summary = result.summary();
    info!(
        "Tiled {} care areas: {} main fields, {} subfields, {} unassigned.",
        summary.care_areas, summary.main_fields, summary.sub_fields, summary.unassigned
    );
    if sink.wants(PlanEventKind::RunFinished) {
        sink.send(PlanEvent::RunFinished { summary });
    }

    Ok(result)
}

/// Assigns every care area to one of `main_fields` and tiles the overlap.
///
/// `main_fields` may come from [`MainFieldGenerator`] or from an earlier run. Care areas
/// without a usable main field are handled according to `config.on_unassigned`.
pub fn tile_care_areas(
    care_areas: &[CareArea],
    main_fields: &[MainField],
    config: &PlanConfig,
    sink: &mut dyn EventSink,
) -> Result<(Vec<SubField>, Vec<Diagnostic>)> {
    config.validate()?;
    validate_care_areas(care_areas)?;
    tile_validated(care_areas, main_fields, config, sink)
}

fn tile_validated(
    care_areas: &[CareArea],
    main_fields: &[MainField],
    config: &PlanConfig,
    sink: &mut dyn EventSink,
) -> Result<(Vec<SubField>, Vec<Diagnostic>)> {
    let assigner = FieldAssigner::new(config.assignment);
    let tiler = SubFieldGenerator::try_new(config.sub_field_size)?.with_mode(config.tiling);
    let mut ids = IdCounter::new();
    let mut sub_fields = Vec::new();
    let mut diagnostics = Vec::new();

    for (index, care_area) in care_areas.iter().enumerate() {
        let tiled = assigner
            .assign(index, care_area, main_fields)
            .ok_or(UnassignedReason::NoMainField)
            .and_then(|main_field| {
                if sink.wants(PlanEventKind::CareAreaAssigned) {
                    sink.send(PlanEvent::CareAreaAssigned {
                        index,
                        care_area_id: care_area.id,
                        main_field_id: main_field.id,
                    });
                }
                overlap(&care_area.rect, &main_field.rect)
                    .rect
                    .map(|rect| (main_field.id, rect))
                    .ok_or(UnassignedReason::ZeroOverlap {
                        main_field_id: main_field.id,
                    })
            });

        match tiled {
            Ok((main_field_id, rect)) => {
                let first_sub_field_id = ids.peek();
                let tiles = tiler.tile(&rect, main_field_id, &mut ids);
                debug!(
                    "Care area {} -> main field {}: {} subfields.",
                    care_area.id,
                    main_field_id,
                    tiles.len()
                );
                if sink.wants(PlanEventKind::CareAreaTiled) {
                    sink.send(PlanEvent::CareAreaTiled {
                        care_area_id: care_area.id,
                        main_field_id,
                        overlap: rect,
                        first_sub_field_id,
                        sub_field_count: tiles.len(),
                    });
                }
                sub_fields.extend(tiles);
            }
            Err(reason) => {
                if config.on_unassigned == UnassignedPolicy::Fail {
                    return Err(Error::UnassignedCareArea {
                        care_area_id: care_area.id,
                        reason,
                    });
                }
                let diagnostic = Diagnostic {
                    index,
                    care_area_id: care_area.id,
                    reason,
                };
                warn!("Skipping {}.", diagnostic);
                if sink.wants(PlanEventKind::Unassigned) {
                    sink.send(PlanEvent::Unassigned(diagnostic));
                }
                diagnostics.push(diagnostic);
            }
        }
    }

    Ok((sub_fields, diagnostics))
}
