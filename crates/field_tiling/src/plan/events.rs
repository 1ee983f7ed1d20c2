//! Event types and sinks for observing tiling runs.
//!
//! This module defines [`PlanEvent`] and a set of sinks and adapters to emit, collect, or
//! forward events while executing [`crate::plan::run_plan`] or
//! [`crate::plan::PlanRunner::run_with_events`].
use crate::fields::FieldId;
use crate::geometry::Rect;
use crate::plan::config::PlanConfig;
use crate::plan::runner::{Diagnostic, PlanSummary};

/// Describes events emitted by the tiling pipeline.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum PlanEvent {
    /// Emitted once the input has been validated.
    RunStarted {
        /// The configuration used.
        config: PlanConfig,
        /// Number of care areas in the input.
        care_area_count: usize,
    },

    /// Emitted after main fields were generated for all care areas.
    MainFieldsGenerated {
        /// Number of main fields.
        count: usize,
    },

    /// Emitted when a care area was linked to a main field.
    CareAreaAssigned {
        /// Position of the care area in the input.
        index: usize,
        care_area_id: FieldId,
        main_field_id: FieldId,
    },

    /// Emitted when the overlap of a care area and its main field was tiled.
    CareAreaTiled {
        care_area_id: FieldId,
        main_field_id: FieldId,
        /// The tiled overlap rectangle.
        overlap: Rect,
        /// Id of the first subfield produced for this care area.
        first_sub_field_id: FieldId,
        /// Number of subfields produced.
        sub_field_count: usize,
    },

    /// A care area produced no subfields.
    Unassigned(Diagnostic),

    /// Emitted when every care area was processed.
    RunFinished {
        /// Counts over the whole run.
        summary: PlanSummary,
    },
}

/// Discriminant of [`PlanEvent`], used by [`EventSink::wants`] to skip building events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanEventKind {
    RunStarted,
    MainFieldsGenerated,
    CareAreaAssigned,
    CareAreaTiled,
    Unassigned,
    RunFinished,
}

impl PlanEvent {
    pub fn kind(&self) -> PlanEventKind {
        match self {
            PlanEvent::RunStarted { .. } => PlanEventKind::RunStarted,
            PlanEvent::MainFieldsGenerated { .. } => PlanEventKind::MainFieldsGenerated,
            PlanEvent::CareAreaAssigned { .. } => PlanEventKind::CareAreaAssigned,
            PlanEvent::CareAreaTiled { .. } => PlanEventKind::CareAreaTiled,
            PlanEvent::Unassigned(_) => PlanEventKind::Unassigned,
            PlanEvent::RunFinished { .. } => PlanEventKind::RunFinished,
        }
    }
}

/// A generic event sink that accepts [`PlanEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: PlanEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: PlanEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = PlanEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: PlanEvent) {}

    #[inline]
    fn wants(&self, _kind: PlanEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(PlanEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(PlanEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(PlanEvent),
{
    #[inline]
    fn send(&mut self, event: PlanEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<PlanEvent>,
    only: Option<Vec<PlanEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects only events whose kind is in `kinds`.
    pub fn only(kinds: impl IntoIterator<Item = PlanEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<PlanEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[PlanEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: PlanEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: PlanEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: PlanEvent) {
        let kind = event.kind();
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: PlanEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
