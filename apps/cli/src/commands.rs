//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use unitdex_core::pipeline::{ProgressReporter, ROOT_DOCUMENT, harvest};
use unitdex_crawler::HttpFetcher;
use unitdex_shared::{DocumentId, DocumentTable, Harvest};

/// Column order used when rendering records as text.
const DISPLAY_COLUMNS: [&str; 4] = ["Name", "Developer", "Description", "Platforms"];

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// unitdex — harvest unit tables from the documentation corpus.
#[derive(Parser)]
#[command(
    name = "unitdex",
    version,
    about = "Crawl the unit documentation corpus and extract its unit tables.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Output format for harvested records.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Crawl the corpus and print every harvested unit table.
    Harvest {
        /// Output format: table (default) or json.
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "unitdex=info",
        1 => "unitdex=debug",
        _ => "unitdex=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Harvest { format } => cmd_harvest(format).await,
    }
}

async fn cmd_harvest(format: OutputFormat) -> Result<()> {
    info!(root = ROOT_DOCUMENT, "harvesting corpus");

    let fetcher = HttpFetcher::for_corpus()?;
    let reporter = CliProgress::new();
    let result = harvest(&fetcher, &DocumentId::from(ROOT_DOCUMENT), &reporter).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Table => {
            render_text(&result);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// Print the harvest grouped by document, one block per table.
fn render_text(result: &Harvest) {
    if result.table_data.is_empty() {
        println!("No unit tables found.");
        return;
    }

    for table in &result.table_data {
        render_table(table);
    }

    let records: usize = result.table_data.iter().map(|t| t.records.len()).sum();
    println!(
        "{} tables, {} records across the corpus.",
        result.table_data.len(),
        records
    );
}

fn render_table(table: &DocumentTable) {
    println!();
    println!("{} — {}", table.title, table.document);

    for record in &table.records {
        let cells: Vec<&str> = DISPLAY_COLUMNS
            .iter()
            .map(|col| record.get(*col).map(String::as_str).unwrap_or_default())
            .collect();
        println!("  {}", cells.join(" | "));
    }
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn document(&self, id: &DocumentId, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Harvesting [{current}/{total}] {id}"));
    }

    fn done(&self, _harvest: &Harvest) {
        self.spinner.finish_and_clear();
    }
}
