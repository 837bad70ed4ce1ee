//! Per-run application state.
//!
//! A [`Session`] starts with an empty [`Dataset`] and lives until the
//! program exits.  Intake is the only mutation.

use crate::dataset::Dataset;
use crate::models::{MeasurementInput, PileRecord};
use crate::tolerance::ToleranceLimits;

/// Acknowledgment shown after a successful intake.
pub const ADDED_MESSAGE: &str = "Pile measurement added successfully!";

#[derive(Debug, Clone, Default)]
pub struct Session {
    dataset: Dataset,
    limits: ToleranceLimits,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn limits(&self) -> &ToleranceLimits {
        &self.limits
    }

    /// Derive deviations and status for `input`, append the record and return
    /// the stored copy.
    pub fn add_measurement(&mut self, input: MeasurementInput) -> &PileRecord {
        let record =
            PileRecord::with_limits(input.pile_id, input.planned, input.installed, &self.limits);

        tracing::info!(
            pile_id = record.pile_id(),
            dx = record.deviation().x,
            dy = record.deviation().y,
            dh = record.deviation().height,
            status = %record.status(),
            "Measurement added"
        );

        self.dataset.push(record)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
