use boardsplit::cli;
use boardsplit::cli::commands::GenerateArgs;
use boardsplit::error::SplitResult;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boardsplit")]
#[command(about = "Split a board sponsorship overview workbook into per-member statements.")]
#[command(long_about = "Boardsplit - per-member statement generator

Reads one overview workbook with three tables (sponsorship amounts, program
quotas, ticket quotas), discovers the shared board-member rows and event
columns by locating an anchor marker cell per table, and writes one statement
workbook per member.

COMMANDS:
  generate - Run the full pipeline and write per-member reports
  inspect  - Discovery dry run: show anchors, members and merged events

EXAMPLES:
  boardsplit generate overview.xlsx -o reports
  boardsplit generate overview.xlsx --live-refs --year 2026/2027
  boardsplit inspect overview.xlsx --config layout.yaml

Set RUST_LOG=boardsplit=debug for discovery and coercion details.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Run the full pipeline and write per-member reports.

Discovery is strict: a missing sheet or a missing anchor marker in any of the
three tables aborts the run before any output file is written. Per-member
failures are logged and counted, and the run continues with the remaining
members.

LIVE REFERENCES:
  With --live-refs, source-backed cells in each report contain external
  reference formulas that re-read the overview workbook, so reports update
  when the source changes. Without it, values are frozen at generation time.

OUTPUT FILES:
  {output}/{year without '/'}{suffix}_{member}.xlsx, one per member, written
  atomically (temp file + rename).")]
    /// Generate one statement workbook per board member
    Generate {
        /// Path to the overview workbook (.xlsx)
        source: PathBuf,

        /// Output directory for the per-member reports
        #[arg(short, long, default_value = "reports")]
        output: PathBuf,

        /// Optional YAML config overlay (table names, markers, policies)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Reporting year shown in titles, e.g. 2025/2026
        #[arg(long)]
        year: Option<String>,

        /// Emit live external-reference formulas instead of frozen values
        #[arg(long)]
        live_refs: bool,

        /// Two-decimal number display instead of integer grouping
        #[arg(long)]
        decimals: bool,

        /// Show verbose progress
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Discovery dry run.

Locates the anchor in each of the three tables, enumerates the member roster
and the per-table event columns, and prints the merged event universe. No
report files are written.")]
    /// Show discovered anchors, members and events without writing
    Inspect {
        /// Path to the overview workbook (.xlsx)
        source: PathBuf,

        /// Optional YAML config overlay (table names, markers, policies)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> SplitResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boardsplit=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            source,
            output,
            config,
            year,
            live_refs,
            decimals,
            verbose,
        } => cli::generate(GenerateArgs {
            source,
            output_dir: output,
            config_file: config,
            year,
            live_refs,
            decimals,
            verbose,
        }),

        Commands::Inspect { source, config } => cli::inspect(source, config),
    }
}
