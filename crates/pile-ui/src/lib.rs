//! Terminal UI layer for the solar pile tolerance monitor.
//!
//! Provides themes, the measurement form, the pile table, the deviation
//! charts, header and status components, and the application event loop
//! built on top of [`ratatui`].

pub mod app;
pub mod charts;
pub mod components;
pub mod form;
pub mod table_view;
pub mod themes;

pub use pile_core as core;
