//! `rota calendar` — launch the interactive month-grid TUI.

use crate::tui;
use anyhow::Result;
use rota_core::config::Config;
use rota_core::store::StateStore;

pub fn run_calendar(store: &StateStore, config: &Config) -> Result<()> {
    tui::calendar::run(store.clone(), config.clone())
}
