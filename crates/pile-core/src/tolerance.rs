//! Tolerance rule for installed piles.
//!
//! A pile is out of tolerance when either horizontal deviation exceeds
//! [`HORIZONTAL_TOLERANCE_M`] or the height deviation exceeds
//! [`VERTICAL_TOLERANCE_M`].  Both comparisons are strict, so a deviation
//! sitting exactly on the limit still passes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Deviation;

/// Maximum allowed |x| or |y| deviation in meters.
pub const HORIZONTAL_TOLERANCE_M: f64 = 0.3;

/// Maximum allowed |height| deviation in meters.
pub const VERTICAL_TOLERANCE_M: f64 = 0.2;

/// Classification of a single pile against the tolerance limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToleranceStatus {
    #[serde(rename = "In Tolerance")]
    InTolerance,
    #[serde(rename = "Out of Tolerance")]
    OutOfTolerance,
}

impl ToleranceStatus {
    /// Label used in the table view and the CSV report.
    pub fn label(&self) -> &'static str {
        match self {
            ToleranceStatus::InTolerance => "In Tolerance",
            ToleranceStatus::OutOfTolerance => "Out of Tolerance",
        }
    }

    pub fn is_in_tolerance(&self) -> bool {
        matches!(self, ToleranceStatus::InTolerance)
    }
}

impl fmt::Display for ToleranceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Horizontal and vertical deviation limits in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceLimits {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Default for ToleranceLimits {
    fn default() -> Self {
        Self {
            horizontal: HORIZONTAL_TOLERANCE_M,
            vertical: VERTICAL_TOLERANCE_M,
        }
    }
}

impl ToleranceLimits {
    /// Classify a deviation triple.
    ///
    /// Returns [`ToleranceStatus::OutOfTolerance`] iff `|x| > horizontal`,
    /// `|y| > horizontal` or `|height| > vertical`.
    pub fn classify(&self, deviation: &Deviation) -> ToleranceStatus {
        if self.horizontal_within(deviation.x)
            && self.horizontal_within(deviation.y)
            && self.height_within(deviation.height)
        {
            ToleranceStatus::InTolerance
        } else {
            ToleranceStatus::OutOfTolerance
        }
    }

    /// `true` when `|deviation| <= horizontal`.
    pub fn horizontal_within(&self, deviation: f64) -> bool {
        deviation.abs() <= self.horizontal
    }

    /// `true` when `|deviation| <= vertical`.  Drives the bar colours of the
    /// height chart independently of the overall status.
    pub fn height_within(&self, deviation: f64) -> bool {
        deviation.abs() <= self.vertical
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
