//! `rota list` — print the saved duty days.

use crate::output::{self, OutputMode};
use anyhow::Result;
use clap::Args;
use rota_core::analysis::month_selection;
use rota_core::calendar::YearMonth;
use rota_core::datekey::DateKey;
use rota_core::store::StateStore;
use serde_json::json;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Restrict output to one month (YYYY-MM).
    #[arg(long, value_name = "YYYY-MM")]
    pub month: Option<String>,
}

pub fn run_list(args: &ListArgs, output: OutputMode, store: &StateStore) -> Result<()> {
    let snapshot = store.load_selection();

    let (scope, mut keys) = match &args.month {
        Some(raw) => {
            let ym: YearMonth = raw.parse()?;
            (Some(ym), month_selection(&snapshot, ym))
        }
        None => (None, snapshot.keys().to_vec()),
    };
    keys.sort_unstable();

    if output.is_json() {
        let payload = json!({
            "month": scope.map(|ym| ym.prefix()),
            "count": keys.len(),
            "dates": keys.iter().map(DateKey::as_str).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    let heading = scope.map_or_else(
        || format!("Duty days ({})", keys.len()),
        |ym| format!("Duty days in {} ({})", ym.prefix(), keys.len()),
    );
    output::section(&mut stdout, &heading)?;
    if keys.is_empty() {
        writeln!(stdout, "(none)")?;
    } else {
        for key in &keys {
            writeln!(stdout, "{key}")?;
        }
    }
    Ok(())
}
