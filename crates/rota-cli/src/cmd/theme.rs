//! `rota theme` — get or set the persisted theme token.

use crate::output::OutputMode;
use anyhow::{Result, anyhow};
use clap::Args;
use rota_core::store::{StateStore, Theme};
use serde_json::json;

#[derive(Args, Debug)]
pub struct ThemeArgs {
    /// New theme token; omit to print the current one.
    #[arg(value_name = "light|dark")]
    pub value: Option<String>,
}

pub fn run_theme(args: &ThemeArgs, output: OutputMode, store: &StateStore) -> Result<()> {
    let theme = match &args.value {
        Some(raw) => {
            let theme: Theme = raw
                .parse()
                .map_err(|()| anyhow!("unknown theme '{raw}': expected 'light' or 'dark'"))?;
            store.save_theme(theme)?;
            theme
        }
        None => store.load_theme(),
    };

    if output.is_json() {
        println!("{}", json!({ "theme": theme.token() }));
    } else {
        println!("{}", theme.token());
    }
    Ok(())
}
