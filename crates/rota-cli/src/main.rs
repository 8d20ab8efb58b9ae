#![forbid(unsafe_code)]

mod analyst;
mod cmd;
mod output;
mod tui;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use rota_core::config::{self, Config};
use rota_core::store::StateStore;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "rota: personal duty-shift calendar",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Open the interactive calendar (default)",
        long_about = "Open the full-screen month grid for toggling duty days.",
        after_help = "EXAMPLES:\n    # Open the calendar TUI\n    rota\n\n    # Same thing, explicitly\n    rota calendar"
    )]
    Calendar,

    #[command(
        about = "List saved duty days",
        long_about = "List the saved duty days, optionally restricted to one month.",
        after_help = "EXAMPLES:\n    # All saved duty days\n    rota list\n\n    # One month only\n    rota list --month 2024-05\n\n    # Emit machine-readable output\n    rota list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        about = "Toggle duty days and save",
        long_about = "Flip membership of one or more dates and write the result to the store.",
        after_help = "EXAMPLES:\n    # Mark a duty day (or unmark it if already set)\n    rota toggle 2024-05-01\n\n    # Several at once\n    rota toggle 2024-05-01 2024-05-04 2024-05-07"
    )]
    Toggle(cmd::toggle::ToggleArgs),

    #[command(
        about = "AI workload summary for a month",
        long_about = "Produce a short natural-language summary of the duty workload for one month. Falls back to a fixed sentence when the analysis service is unavailable.",
        after_help = "EXAMPLES:\n    # Analyze the current month\n    rota analyze\n\n    # Analyze a specific month\n    rota analyze --month 2024-05"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Get or set the display theme",
        after_help = "EXAMPLES:\n    # Print the current theme\n    rota theme\n\n    # Switch to dark\n    rota theme dark"
    )]
    Theme(cmd::theme::ThemeArgs),

    #[command(
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    rota completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ROTA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "rota=debug,info"
        } else {
            "rota=info,warn"
        })
    });

    let format = env::var("ROTA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Load config from the state dir, degrading to defaults on a broken file.
fn load_config_or_default(store: &StateStore) -> Config {
    config::load_config(store.dir()).unwrap_or_else(|err| {
        tracing::warn!("config unusable, using defaults: {err:#}");
        Config::default()
    })
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let store = StateStore::resolve();
    let config = load_config_or_default(&store);

    match cli.command.unwrap_or(Commands::Calendar) {
        Commands::Calendar => cmd::calendar::run_calendar(&store, &config),
        Commands::List(ref args) => cmd::list::run_list(args, output, &store),
        Commands::Toggle(ref args) => cmd::toggle::run_toggle(args, output, &store),
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, output, &store, &config),
        Commands::Theme(ref args) => cmd::theme::run_theme(args, output, &store),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_calendar() {
        let cli = Cli::parse_from(["rota"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["rota", "--json", "list"]);
        assert!(cli.json);
        assert!(cli.output_mode().is_json());
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["rota", "list", "--json"]);
        assert!(cli.json);
        assert!(cli.output_mode().is_json());
    }

    #[test]
    fn verbose_flag_is_global() {
        let cli = Cli::parse_from(["rota", "list", "--verbose"]);
        assert!(cli.verbose);

        let cli = Cli::parse_from(["rota", "-v", "analyze"]);
        assert!(cli.verbose);
    }

    #[test]
    fn default_output_is_human() {
        let cli = Cli::parse_from(["rota", "list"]);
        assert!(!cli.json);
        assert!(!cli.output_mode().is_json());
    }

    #[test]
    fn list_subcommand_parses_with_month() {
        let cli = Cli::parse_from(["rota", "list", "--month", "2024-05"]);
        match cli.command {
            Some(Commands::List(args)) => assert_eq!(args.month.as_deref(), Some("2024-05")),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn toggle_requires_at_least_one_date() {
        assert!(Cli::try_parse_from(["rota", "toggle"]).is_err());
        let cli = Cli::parse_from(["rota", "toggle", "2024-05-01", "2024-05-02"]);
        match cli.command {
            Some(Commands::Toggle(args)) => assert_eq!(args.dates.len(), 2),
            other => panic!("expected toggle, got {other:?}"),
        }
    }

    #[test]
    fn analyze_subcommand_parses() {
        let cli = Cli::parse_from(["rota", "analyze", "--month", "2024-05"]);
        assert!(matches!(cli.command, Some(Commands::Analyze(_))));
    }

    #[test]
    fn theme_value_is_optional() {
        let cli = Cli::parse_from(["rota", "theme"]);
        match cli.command {
            Some(Commands::Theme(args)) => assert!(args.value.is_none()),
            other => panic!("expected theme, got {other:?}"),
        }
        let cli = Cli::parse_from(["rota", "theme", "dark"]);
        match cli.command {
            Some(Commands::Theme(args)) => assert_eq!(args.value.as_deref(), Some("dark")),
            other => panic!("expected theme, got {other:?}"),
        }
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["rota", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            }))
        ));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["rota", "calendar"],
            vec!["rota", "list"],
            vec!["rota", "toggle", "2024-05-01"],
            vec!["rota", "analyze"],
            vec!["rota", "theme"],
            vec!["rota", "completions", "zsh"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse: {:?} — error: {:?}",
                args,
                result.err()
            );
        }
    }
}
