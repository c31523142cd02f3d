//! CLI parsing and command handlers for lsp-metrics

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use lsp_metrics::display::{self, Colors};
use lsp_metrics::{Analyzer, HistoryStore, InterruptFlag, MetricsError, MetricsRecord, TimeSavings};
use lsp_metrics_core::{Config, Paths};

#[derive(Parser)]
#[command(name = "lsp-metrics")]
#[command(about = "Track what a language server buys you in a Python workspace")]
#[command(version)]
#[command(after_help = "\
WHAT IT MEASURES:
    Python files, lines, functions, classes and imports, plus imports that
    look invented (fake_, example_, placeholder_). Counts are line-prefix
    matches, not a parse.

HISTORY:
    Every run is appended to ~/.claude-lsp-metrics.log; the last 30 are kept.

EXAMPLES:
    lsp-metrics                        # Analyze the default workspace
    lsp-metrics ~/code/scraper         # Analyze a specific workspace
    lsp-metrics --json --no-save .     # JSON output, leave history alone
    lsp-metrics history --limit 5      # Last five runs
    lsp-metrics ./history              # Analyze a directory named history
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Workspace to analyze (default: from config)
    pub workspace: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Analyze without appending to the history log
    #[arg(long)]
    pub no_save: bool,

    /// History log location (overrides config)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show recorded runs
    History {
        /// Number of most recent runs to show
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let paths = Paths::new();
    let config = Config::load(&paths)?;

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| config.log_file(&paths));
    let store = HistoryStore::new(log_file, config.history_limit);

    match cli.command {
        Some(Commands::History { limit }) => cmd_history(&store, limit, cli.json),
        None => {
            let options = AnalyzeOptions {
                workspace: cli.workspace,
                json: cli.json,
                save: !cli.no_save,
            };
            cmd_analyze(&config, &paths, &store, options)
        }
    }
}

struct AnalyzeOptions {
    workspace: Option<PathBuf>,
    json: bool,
    save: bool,
}

/// Analyze a workspace, print the summary and record the run
fn cmd_analyze(
    config: &Config,
    paths: &Paths,
    store: &HistoryStore,
    options: AnalyzeOptions,
) -> Result<()> {
    let colors = Colors::auto();

    if !options.json {
        println!("{}", display::banner(&colors));
    }

    let workspace = match options.workspace {
        Some(workspace) => workspace,
        None => match resolve_default_workspace(config, paths, &colors)? {
            Some(workspace) => workspace,
            None => return Ok(()),
        },
    };

    let interrupt = InterruptFlag::new();
    interrupt
        .install_ctrlc()
        .context("Failed to install Ctrl-C handler")?;

    if !options.json {
        println!("Analyzing workspace: {}", workspace.display());
    }

    let analyzer = Analyzer::new(workspace, config.extensions.clone());
    let record = analyzer.run(&interrupt)?;
    let savings = TimeSavings::estimate();

    if options.json {
        let output = serde_json::json!({
            "metrics": record,
            "time_savings": savings,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Found {} Python files", record.file_count);
        print!("{}", display::format_summary(&record, &savings, &colors));
        print!("{}", display::format_footer(store.path()));
    }

    let outcome = persist(store, record, &interrupt, options.save)?;
    if outcome == SaveOutcome::Saved && !options.json {
        println!(
            "{}Metrics saved to {}{}",
            colors.green,
            store.path().display(),
            colors.reset
        );
    }

    if !options.json {
        println!("{}", display::format_tip(&colors));
    }

    Ok(())
}

/// What happened to a finished run's record
#[derive(Debug, PartialEq, Eq)]
enum SaveOutcome {
    Saved,
    NotRequested,
    Failed,
}

/// Append the run to history unless the user interrupted it
///
/// An interrupt is the only error returned. Output is already printed by the
/// time this runs, so a failed write is only reported.
fn persist(
    store: &HistoryStore,
    record: MetricsRecord,
    interrupt: &InterruptFlag,
    save: bool,
) -> Result<SaveOutcome, MetricsError> {
    interrupt.check()?;

    if !save {
        return Ok(SaveOutcome::NotRequested);
    }

    match store.append(record) {
        Ok(_) => Ok(SaveOutcome::Saved),
        Err(err) => {
            tracing::warn!("{}", err);
            Ok(SaveOutcome::Failed)
        }
    }
}

/// Default workspace, or a replacement typed by the user if it is missing
///
/// `None` means the user declined to give one.
fn resolve_default_workspace(
    config: &Config,
    paths: &Paths,
    colors: &Colors,
) -> Result<Option<PathBuf>> {
    let default = config.workspace(paths);
    if default.exists() {
        return Ok(Some(default));
    }

    eprintln!(
        "{}Default workspace not found: {}{}",
        colors.yellow,
        default.display(),
        colors.reset
    );
    eprint!("Enter workspace path (or press Enter to exit): ");
    std::io::stderr().flush()?;

    let stdin = std::io::stdin();
    let answer = read_answer(&mut stdin.lock())?;
    Ok(answer.map(PathBuf::from))
}

fn read_answer(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read workspace path")?;

    let answer = line.trim();
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer.to_string()))
    }
}

/// Show stored runs, oldest first
fn cmd_history(store: &HistoryStore, limit: Option<usize>, json: bool) -> Result<()> {
    let records = store.load();
    let start = limit
        .map(|n| records.len().saturating_sub(n))
        .unwrap_or(0);
    let shown = &records[start..];

    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
    } else {
        let colors = Colors::auto();
        print!("{}", display::format_history(shown, &colors));
    }

    Ok(())
}
