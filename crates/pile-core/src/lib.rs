//! Domain layer for the solar pile tolerance monitor.
//!
//! Holds the pile record model, the tolerance rule, the append-only dataset
//! and session state, CSV report export, CLI settings and shared formatting
//! helpers.

pub mod dataset;
pub mod error;
pub mod export;
pub mod formatting;
pub mod models;
pub mod session;
pub mod settings;
pub mod tolerance;

pub use dataset::{Dataset, ToleranceSummary};
pub use error::{PileError, Result};
pub use models::{Deviation, MeasurementInput, PileRecord, Position};
pub use session::Session;
pub use tolerance::{ToleranceLimits, ToleranceStatus};
