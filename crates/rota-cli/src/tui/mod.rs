//! Terminal user interface (TUI) for rota.
//!
//! Provides the interactive full-screen month grid for toggling duty days.
//!
//! ## Entry points
//!
//! - [`calendar::run`] — interactive calendar with undo/redo, save, and
//!   AI workload analysis.

pub mod calendar;
