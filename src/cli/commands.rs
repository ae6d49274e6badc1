use crate::config::{NumberStyle, RunConfig};
use crate::error::SplitResult;
use crate::pipeline;
use crate::workbook::SourceWorkbook;
use colored::Colorize;
use std::path::PathBuf;

/// Command-line overrides layered on top of the config file/defaults.
pub struct GenerateArgs {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub config_file: Option<PathBuf>,
    pub year: Option<String>,
    pub live_refs: bool,
    pub decimals: bool,
    pub verbose: bool,
}

fn load_config(config_file: Option<&PathBuf>) -> SplitResult<RunConfig> {
    match config_file {
        Some(path) => RunConfig::from_yaml_file(path),
        None => Ok(RunConfig::default()),
    }
}

/// Execute the generate command: full pipeline, one report per member.
pub fn generate(args: GenerateArgs) -> SplitResult<()> {
    println!("{}", "📊 Boardsplit - Generating statements".bold().green());
    println!("   Source: {}", args.source.display());
    println!("   Output: {}\n", args.output_dir.display());

    let mut config = load_config(args.config_file.as_ref())?;
    if let Some(year) = args.year {
        config.year = year;
    }
    if args.live_refs {
        config.live_references = true;
    }
    if args.decimals {
        config.number_style = NumberStyle::TwoDecimal;
    }

    if args.verbose {
        println!("{}", "📖 Reading source workbook...".cyan());
        println!("   Year: {}", config.year);
        println!(
            "   Mode: {}\n",
            if config.live_references {
                "live references"
            } else {
                "static values"
            }
        );
    }

    let summary = pipeline::run(&args.source, &args.output_dir, &config)?;

    println!(
        "   Discovered {} members, {} events",
        summary.members.to_string().bright_blue().bold(),
        summary.events.to_string().bright_blue().bold()
    );

    if args.verbose {
        for path in &summary.outputs {
            println!("   💾 {}", path.display());
        }
    }

    if summary.failed > 0 {
        println!(
            "{}",
            format!("   ⚠️  {} member report(s) failed, see log", summary.failed).yellow()
        );
    }

    println!(
        "\n{}",
        format!(
            "✅ {}/{} reports generated",
            summary.generated, summary.members
        )
        .bold()
        .green()
    );

    Ok(())
}

/// Execute the inspect command: discovery dry run, nothing is written.
pub fn inspect(source: PathBuf, config_file: Option<PathBuf>) -> SplitResult<()> {
    println!("{}", "🔍 Boardsplit - Inspect discovery".bold().green());
    println!("   Source: {}\n", source.display());

    let config = load_config(config_file.as_ref())?;
    let workbook = SourceWorkbook::open(&source, &config.tables)?;
    let discovery = pipeline::discover(&workbook, &config)?;

    for (label, table) in [
        ("Sponsorship", &discovery.sponsorship),
        ("Program Quota", &discovery.program_quota),
        ("Ticket Quota", &discovery.ticket_quota),
    ] {
        println!("   📄 {}", label.bright_blue().bold());
        println!(
            "      anchor at row {}, col {}",
            table.anchor.row, table.anchor.col
        );
        println!("      {} event column(s)", table.events.len());
    }

    println!("\n   👥 Members ({}):", discovery.roster.len());
    for (name, row) in &discovery.roster {
        println!("      {} (row {})", name.cyan(), row);
    }

    println!("\n   🗓  Merged events ({}):", discovery.events.len());
    for event in &discovery.events {
        println!("      {}", event.cyan());
    }

    Ok(())
}
