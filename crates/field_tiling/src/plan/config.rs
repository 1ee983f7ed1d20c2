//! Run configuration for the tiling pipeline.
use crate::error::{Error, Result};
use crate::fields::{AssignmentStrategy, DiagonalMode, TileMode};

/// What the runner does with a care area that produces no subfields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnassignedPolicy {
    /// Record a [`Diagnostic`](crate::plan::Diagnostic) and continue with the next care area.
    #[default]
    Report,
    /// Abort the run with [`Error::UnassignedCareArea`].
    Fail,
}

/// Configuration for running the main field / subfield pipeline.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanConfig {
    /// Minimum side length of every main field.
    pub main_field_size: f64,
    /// Side length of every subfield.
    pub sub_field_size: f64,
    /// Diagonal formula used to size main fields.
    pub diagonal: DiagonalMode,
    /// How a care area is linked to its main field.
    pub assignment: AssignmentStrategy,
    /// Whether the last subfield row/column may overshoot.
    pub tiling: TileMode,
    pub on_unassigned: UnassignedPolicy,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            main_field_size: 0.0,
            sub_field_size: 0.0,
            diagonal: DiagonalMode::default(),
            assignment: AssignmentStrategy::default(),
            tiling: TileMode::default(),
            on_unassigned: UnassignedPolicy::default(),
        }
    }
}

impl PlanConfig {
    /// Creates a new [`PlanConfig`] with the two field sizes and default strategies.
    pub fn new(main_field_size: f64, sub_field_size: f64) -> Self {
        Self {
            main_field_size,
            sub_field_size,
            ..Default::default()
        }
    }

    /// Sets the diagonal formula.
    pub fn with_diagonal(mut self, diagonal: DiagonalMode) -> Self {
        self.diagonal = diagonal;
        self
    }

    /// Sets the assignment strategy.
    pub fn with_assignment(mut self, assignment: AssignmentStrategy) -> Self {
        self.assignment = assignment;
        self
    }

    /// Sets the tiling mode.
    pub fn with_tiling(mut self, tiling: TileMode) -> Self {
        self.tiling = tiling;
        self
    }

    /// Sets the policy for care areas without subfields.
    pub fn with_unassigned_policy(mut self, policy: UnassignedPolicy) -> Self {
        self.on_unassigned = policy;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(self.main_field_size.is_finite() && self.main_field_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "main_field_size must be > 0, got {}",
                self.main_field_size
            )));
        }
        if !(self.sub_field_size.is_finite() && self.sub_field_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "sub_field_size must be > 0, got {}",
                self.sub_field_size
            )));
        }
        Ok(())
    }
}
