//! CSV report generation.
//!
//! The report always starts with [`CSV_HEADERS`], followed by one line per
//! record in dataset order.  Floats are written in their shortest
//! round-trip form so that every field parses back to the stored value.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{PileError, Result};
use crate::models::PileRecord;

/// File name of the exported report.
pub const REPORT_FILE_NAME: &str = "solar_pile_tolerance_report.csv";

/// Column headers in report order.
pub const CSV_HEADERS: [&str; 11] = [
    "Pile ID",
    "Planned X (m)",
    "Planned Y (m)",
    "Planned Height (m)",
    "Installed X (m)",
    "Installed Y (m)",
    "Installed Height (m)",
    "X Deviation (m)",
    "Y Deviation (m)",
    "Height Deviation (m)",
    "Tolerance Status",
];

/// Flat CSV row; field order must match [`CSV_HEADERS`].
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    pile_id: &'a str,
    planned_x: f64,
    planned_y: f64,
    planned_height: f64,
    installed_x: f64,
    installed_y: f64,
    installed_height: f64,
    x_deviation: f64,
    y_deviation: f64,
    height_deviation: f64,
    status: &'static str,
}

impl<'a> From<&'a PileRecord> for ReportRow<'a> {
    fn from(r: &'a PileRecord) -> Self {
        Self {
            pile_id: r.pile_id(),
            planned_x: r.planned().x,
            planned_y: r.planned().y,
            planned_height: r.planned().height,
            installed_x: r.installed().x,
            installed_y: r.installed().y,
            installed_height: r.installed().height,
            x_deviation: r.deviation().x,
            y_deviation: r.deviation().y,
            height_deviation: r.deviation().height,
            status: r.status().label(),
        }
    }
}

/// Serialize the whole dataset into UTF-8 CSV text.
///
/// An empty dataset yields the header line only.
pub fn to_csv_string(dataset: &Dataset) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for record in dataset {
        writer.serialize(ReportRow::from(record))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PileError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Write the report into `dir` as [`REPORT_FILE_NAME`] and return its path.
///
/// The file is written to a temporary sibling first and renamed into place,
/// so an interrupted export never leaves a truncated report behind.
pub fn write_report(dataset: &Dataset, dir: &Path) -> Result<PathBuf> {
    let csv_text = to_csv_string(dataset)?;
    let path = dir.join(REPORT_FILE_NAME);
    let export_err = |source: std::io::Error| PileError::Export {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(export_err)?;
    let tmp = path.with_extension("csv.tmp");
    std::fs::write(&tmp, csv_text.as_bytes()).map_err(export_err)?;
    std::fs::rename(&tmp, &path).map_err(export_err)?;

    tracing::info!(
        path = %path.display(),
        records = dataset.len(),
        "Tolerance report exported"
    );
    Ok(path)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
