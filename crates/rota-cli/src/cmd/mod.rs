//! One module per CLI subcommand.

pub mod analyze;
pub mod calendar;
pub mod completions;
pub mod list;
pub mod theme;
pub mod toggle;
