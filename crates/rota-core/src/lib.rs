//! rota-core library.
//!
//! Domain model for the rota duty-shift calendar: validated date keys,
//! month-grid math, the linear undo history, the selection model with its
//! save-pending check, local persistence, configuration, and the analysis
//! boundary.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for fallible I/O; `thiserror` for
//!   domain parse errors. Loads of persisted state are total and degrade to
//!   defaults.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod analysis;
pub mod calendar;
pub mod config;
pub mod datekey;
pub mod history;
pub mod locale;
pub mod schedule;
pub mod store;
