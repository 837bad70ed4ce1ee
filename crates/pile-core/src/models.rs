use serde::{Deserialize, Serialize};

use crate::tolerance::{ToleranceLimits, ToleranceStatus};

/// Default planned pile head height in meters.
pub const DEFAULT_PLANNED_HEIGHT_M: f64 = 2.5;

/// A pile position in site coordinates, all values in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Easting.
    pub x: f64,
    /// Northing.
    pub y: f64,
    /// Pile head height.
    pub height: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, height: f64) -> Self {
        Self { x, y, height }
    }
}

/// Installed minus planned, per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    pub x: f64,
    pub y: f64,
    pub height: f64,
}

impl Deviation {
    /// Compute `installed - planned` on every axis.
    pub fn between(planned: &Position, installed: &Position) -> Self {
        Self {
            x: installed.x - planned.x,
            y: installed.y - planned.y,
            height: installed.height - planned.height,
        }
    }
}

/// One submission from the intake form, before any derived values exist.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementInput {
    /// Free-text pile label; uniqueness is not enforced.
    pub pile_id: String,
    pub planned: Position,
    pub installed: Position,
}

impl Default for MeasurementInput {
    fn default() -> Self {
        Self {
            pile_id: String::new(),
            planned: Position::new(0.0, 0.0, DEFAULT_PLANNED_HEIGHT_M),
            installed: Position::default(),
        }
    }
}

/// A measured pile with its deviations and tolerance status.
///
/// Derived values are computed once in [`PileRecord::new`] and cannot drift
/// from the positions they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PileRecord {
    pile_id: String,
    planned: Position,
    installed: Position,
    deviation: Deviation,
    status: ToleranceStatus,
}

impl PileRecord {
    /// Build a record, deriving deviations and status with the default
    /// tolerance limits.
    pub fn new(pile_id: impl Into<String>, planned: Position, installed: Position) -> Self {
        Self::with_limits(pile_id, planned, installed, &ToleranceLimits::default())
    }

    /// Build a record against explicit limits.
    pub fn with_limits(
        pile_id: impl Into<String>,
        planned: Position,
        installed: Position,
        limits: &ToleranceLimits,
    ) -> Self {
        let deviation = Deviation::between(&planned, &installed);
        let status = limits.classify(&deviation);
        Self {
            pile_id: pile_id.into(),
            planned,
            installed,
            deviation,
            status,
        }
    }

    pub fn pile_id(&self) -> &str {
        &self.pile_id
    }

    pub fn planned(&self) -> &Position {
        &self.planned
    }

    pub fn installed(&self) -> &Position {
        &self.installed
    }

    pub fn deviation(&self) -> &Deviation {
        &self.deviation
    }

    pub fn status(&self) -> ToleranceStatus {
        self.status
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
