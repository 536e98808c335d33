//! Deck advisor - main binary
//!
//! Follows the game's Zone.log and prints turn advice as it is queued.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use deck_advisor::{
    config::AdvisorConfig,
    events::LogTailer,
    game::{AdvisorLogger, VerbosityLevel, ZoneTracker},
    loader::{CardCatalog, DeckLoader, DirectoryCatalog, JsonCatalog},
    strategy::{StrategyEngine, TradePolicy, BEAST_HUNTER},
};
use std::path::PathBuf;

type Tracker = ZoneTracker<Box<dyn CardCatalog>, StrategyEngine>;

#[derive(Parser)]
#[command(name = "advisor")]
#[command(about = "Turn-by-turn advice for the Beast Hunter deck, read from the game's zone log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow a live log and print advice as it happens
    Watch {
        /// Zone log written by the game client
        #[arg(value_name = "ZONE_LOG")]
        zone_log: PathBuf,

        #[command(flatten)]
        options: AdvisorArgs,
    },

    /// Process a finished log once and print every piece of advice
    Replay {
        #[arg(value_name = "ZONE_LOG")]
        zone_log: PathBuf,

        #[command(flatten)]
        options: AdvisorArgs,
    },
}

#[derive(Args)]
struct AdvisorArgs {
    /// JSON config file; flags below override it
    #[arg(long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Card catalog: one JSON array file, or a directory of <CARD_ID>.json files
    #[arg(long, default_value = "cards/beast_hunter.json")]
    catalog: PathBuf,

    /// Deck list (.dck) the advice is tuned for
    #[arg(long, default_value = "test_decks/beast_hunter.dck")]
    deck: PathBuf,

    /// Diagnostic output (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, short = 'v', default_value = "minimal")]
    verbosity: VerbosityLevel,

    /// Value-trade policy (strict or lenient)
    #[arg(long)]
    trade_policy: Option<TradePolicy>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Watch { zone_log, options } => run_watch(zone_log, options).await,
        Commands::Replay { zone_log, options } => run_replay(zone_log, options).await,
    }
}

fn load_config(options: &AdvisorArgs) -> anyhow::Result<AdvisorConfig> {
    let mut config = match &options.config {
        Some(path) => AdvisorConfig::load_file(path).with_context(|| format!("loading config {}", path.display()))?,
        None => AdvisorConfig::default(),
    };
    if let Some(policy) = options.trade_policy {
        config.trade_policy = policy;
    }
    Ok(config)
}

fn build_tracker(options: &AdvisorArgs, config: AdvisorConfig) -> anyhow::Result<Tracker> {
    let catalog: Box<dyn CardCatalog> = if options.catalog.is_dir() {
        Box::new(DirectoryCatalog::new(&options.catalog))
    } else {
        let catalog = JsonCatalog::load_file(&options.catalog)
            .with_context(|| format!("loading card catalog {}", options.catalog.display()))?;
        Box::new(catalog)
    };

    let deck = DeckLoader::load_from_file(&options.deck)
        .with_context(|| format!("loading deck {}", options.deck.display()))?;
    deck.validate()
        .with_context(|| format!("checking deck {}", options.deck.display()))?;

    let engine = StrategyEngine::for_deck(&BEAST_HUNTER, &deck)
        .context("deck list does not match the Beast Hunter ranking table")?
        .with_config(&config);

    let logger = AdvisorLogger::with_verbosity(options.verbosity);
    let mut tracker = ZoneTracker::new(catalog, engine, config).with_logger(logger);
    let cached = tracker
        .preload(deck.card_ids())
        .context("card catalog is missing cards from the deck")?;
    tracker
        .logger()
        .verbose(&format!("Catalog ready, {cached} deck cards cached"));
    Ok(tracker)
}

/// Feed one line and print whatever advice it produced
fn process_line(tracker: &mut Tracker, line: &str) {
    if let Err(e) = tracker.apply_line(line) {
        tracker.logger().verbose(&format!("Event skipped: {e}"));
    }
    while let Some(message) = tracker.next_message() {
        println!("{message}");
    }
}

async fn run_watch(zone_log: PathBuf, options: AdvisorArgs) -> anyhow::Result<()> {
    let config = load_config(&options)?;
    let mut tailer = LogTailer::new(&zone_log, config.poll_interval());
    let mut tracker = build_tracker(&options, config)?;

    tracker
        .logger()
        .minimal(&format!("Watching {} (Ctrl-C to stop)", zone_log.display()));
    loop {
        let line = tailer
            .next_line()
            .await
            .with_context(|| format!("reading {}", zone_log.display()))?;
        process_line(&mut tracker, &line);
    }
}

async fn run_replay(zone_log: PathBuf, options: AdvisorArgs) -> anyhow::Result<()> {
    if !zone_log.is_file() {
        bail!("zone log not found: {}", zone_log.display());
    }
    let config = load_config(&options)?;
    let mut tailer = LogTailer::new(&zone_log, config.poll_interval());
    let mut tracker = build_tracker(&options, config)?;

    let lines = tailer
        .drain()
        .await
        .with_context(|| format!("reading {}", zone_log.display()))?;
    for line in &lines {
        process_line(&mut tracker, line);
    }

    let outcome = match tracker.last_outcome() {
        Some(outcome) => format!("{outcome:?}"),
        None => "unfinished".to_string(),
    };
    tracker
        .logger()
        .minimal(&format!("Replayed {} lines, last game: {outcome}", lines.len()));
    if tracker.invariant_violations() > 0 {
        bail!(
            "{} ranking invariant violation(s) during replay",
            tracker.invariant_violations()
        );
    }
    Ok(())
}
