//! `rota toggle` — flip duty days from the command line.
//!
//! A one-shot process has no editing session, so the result is written
//! through to the store immediately; pending-save semantics live in the TUI.

use crate::output::{self, OutputMode};
use anyhow::Result;
use clap::Args;
use rota_core::datekey::DateKey;
use rota_core::schedule::Schedule;
use rota_core::store::StateStore;
use serde_json::json;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Dates to toggle (YYYY-MM-DD).
    #[arg(required = true, value_name = "DATE")]
    pub dates: Vec<String>,
}

pub fn run_toggle(args: &ToggleArgs, output: OutputMode, store: &StateStore) -> Result<()> {
    let keys = args
        .dates
        .iter()
        .map(|raw| raw.parse::<DateKey>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut schedule = Schedule::from_saved(store.load_selection());

    let mut added = Vec::new();
    let mut removed = Vec::new();
    for key in keys {
        if schedule.is_selected(&key) {
            removed.push(key.clone());
        } else {
            added.push(key.clone());
        }
        schedule.toggle(key);
    }

    store.save_selection(schedule.current())?;
    schedule.mark_saved();

    if output.is_json() {
        let payload = json!({
            "added": added.iter().map(DateKey::as_str).collect::<Vec<_>>(),
            "removed": removed.iter().map(DateKey::as_str).collect::<Vec<_>>(),
            "total": schedule.current().len(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    for key in &added {
        writeln!(stdout, "+ {key}")?;
    }
    for key in &removed {
        writeln!(stdout, "- {key}")?;
    }
    output::kv(
        &mut stdout,
        "total",
        schedule.current().len().to_string(),
    )?;
    Ok(())
}
