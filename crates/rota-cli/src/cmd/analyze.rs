//! `rota analyze` — AI workload summary for one month.

use crate::analyst::GeminiAnalyst;
use crate::output::{self, OutputMode};
use anyhow::Result;
use clap::Args;
use rota_core::analysis::{month_selection, summarize_month};
use rota_core::calendar::YearMonth;
use rota_core::config::Config;
use rota_core::datekey::DateKey;
use rota_core::store::StateStore;
use serde_json::json;
use std::io::Write;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Month to analyze (YYYY-MM); defaults to the current month.
    #[arg(long, value_name = "YYYY-MM")]
    pub month: Option<String>,
}

pub fn run_analyze(
    args: &AnalyzeArgs,
    output: OutputMode,
    store: &StateStore,
    config: &Config,
) -> Result<()> {
    let ym = match &args.month {
        Some(raw) => raw.parse::<YearMonth>()?,
        None => YearMonth::current(),
    };

    let snapshot = store.load_selection();
    let analyst = GeminiAnalyst::new(config.analysis.clone(), config.locale);
    let text = summarize_month(&analyst, config.locale, ym, &snapshot);

    if output.is_json() {
        let dates = month_selection(&snapshot, ym);
        let payload = json!({
            "month": ym.prefix(),
            "label": config.locale.month_label(ym),
            "dates": dates.iter().map(DateKey::as_str).collect::<Vec<_>>(),
            "analysis": text,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    output::section(&mut stdout, &config.locale.month_label(ym))?;
    writeln!(stdout, "{text}")?;
    Ok(())
}
