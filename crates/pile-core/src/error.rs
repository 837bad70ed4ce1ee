use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the pile tolerance crates.
#[derive(Error, Debug)]
pub enum PileError {
    /// The CSV report could not be written to disk.
    #[error("Failed to write report {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV encoder rejected a record.
    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The encoded report was not valid UTF-8.
    #[error("Report is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the pile crates.
pub type Result<T> = std::result::Result<T, PileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_export() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = PileError::Export {
            path: PathBuf::from("/readonly/solar_pile_tolerance_report.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to write report"));
        assert!(msg.contains("/readonly/solar_pile_tolerance_report.csv"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PileError = io_err.into();
        assert_eq!(err.to_string(), "gone");
    }

    #[test]
    fn test_error_from_utf8() {
        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: PileError = utf8_err.into();
        assert!(err.to_string().starts_with("Report is not valid UTF-8"));
    }
}
