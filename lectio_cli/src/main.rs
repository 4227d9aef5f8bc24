use clap::{ArgAction, Args, Parser, Subcommand};
use lectio_core::render::{group_thousands, render};
use lectio_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lectio")]
#[command(about = "Balanced daily Bible reading plan generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    plan: PlanArgs,

    /// Config file (default: $XDG_CONFIG_HOME/lectio/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the word-count table path
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct PlanArgs {
    /// Number of days in the plan (default: plan.days from config, 90)
    #[arg(value_parser = day_count, allow_negative_numbers = true)]
    days: Option<u32>,

    /// Output format (table, csv, json)
    #[arg(long, default_value = "table", value_parser = output_format)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the plan and export it to a board, one card per day
    Export {
        /// Number of days in the plan
        #[arg(value_parser = day_count, allow_negative_numbers = true)]
        days: Option<u32>,

        /// Board file to append to (default: export.board_path from config)
        #[arg(long)]
        board_path: Option<PathBuf>,

        /// Board name (default: export.board_name from config)
        #[arg(long)]
        board_name: Option<String>,
    },

    /// Count words per chapter from verse text and write the counts table
    Count {
        /// Verse text JSON (book -> chapter -> verse -> text)
        #[arg(long)]
        input: PathBuf,

        /// Where to write the counts (default: corpus.counts_path from config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn day_count(raw: &str) -> std::result::Result<u32, String> {
    parse_day_count(raw).map_err(|e| e.to_string())
}

fn output_format(raw: &str) -> std::result::Result<OutputFormat, String> {
    raw.parse().map_err(|e: Error| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    lectio_core::logging::init_with_level(lectio_core::logging::level_for_verbosity(
        cli.verbose,
    ));

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let counts_path = cli
        .corpus
        .clone()
        .unwrap_or_else(|| config.corpus.counts_path.clone());
    tracing::debug!("Using word counts at {:?}", counts_path);

    match cli.command {
        Some(Commands::Export {
            days,
            board_path,
            board_name,
        }) => cmd_export(&config, &counts_path, days, board_path, board_name),
        Some(Commands::Count { input, output }) => {
            cmd_count(&input, &output.unwrap_or(counts_path))
        }
        None => cmd_plan(&config, &counts_path, cli.plan.days, cli.plan.format),
    }
}

fn load_corpus(config: &Config, counts_path: &Path) -> Result<Corpus> {
    if !counts_path.exists() {
        return Err(Error::Corpus(format!(
            "word counts not found at {}; generate them with `lectio count --input <verses.json>`",
            counts_path.display()
        )));
    }
    Corpus::load(counts_path, &config.corpus.book_order)
}

fn cmd_plan(
    config: &Config,
    counts_path: &Path,
    days: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let days = days.unwrap_or(config.plan.days);
    let corpus = load_corpus(config, counts_path)?;
    let plan = build_plan(&corpus, days)?;

    print!("{}", render(&plan, &corpus, format)?);
    Ok(())
}

fn cmd_export(
    config: &Config,
    counts_path: &Path,
    days: Option<u32>,
    board_path: Option<PathBuf>,
    board_name: Option<String>,
) -> Result<()> {
    let days = days.unwrap_or(config.plan.days);
    let board_path = board_path.unwrap_or_else(|| config.export.board_path.clone());
    let board_name = board_name.unwrap_or_else(|| config.export.board_name.clone());

    let corpus = load_corpus(config, counts_path)?;
    let plan = build_plan(&corpus, days)?;

    let mut client = JsonlBoardClient::new(&board_path);
    let summary = export_plan(&plan, &corpus, &mut client, &board_name)?;

    println!(
        "✓ Exported {} days to board \"{}\" ({} weeks, {} readings)",
        summary.cards, board_name, summary.lists, summary.checklist_items
    );
    println!("  Board: {}", board_path.display());
    Ok(())
}

fn cmd_count(input: &Path, output: &Path) -> Result<()> {
    let total = lectio_core::ingest::ingest(input, output)?;

    println!("✓ Counted {} words", group_thousands(total));
    println!("  Counts: {}", output.display());
    Ok(())
}
