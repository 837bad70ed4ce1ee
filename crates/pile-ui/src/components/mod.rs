//! Small reusable line-based widgets.

pub mod header;
pub mod status_line;

pub use header::Header;
pub use status_line::{key_hints_line, StatusMessage};
