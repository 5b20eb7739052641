//! # Lettervale Terminal Driver
//!
//! Generates a map, then reads commands from stdin and prints the town after
//! each one. The driver is the only clock: the town advances when the player
//! types `tick`.

use clap::Parser;
use lettervale::{
    parse_command, render_catalog, render_help, render_map, render_status, Catalog, GameState,
    GenerationConfig, InputHandler, InputOutcome, PlayerInput, RulesConfig, ValeResult, WordList,
};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Command line arguments for Lettervale.
#[derive(Parser, Debug)]
#[command(name = "lettervale")]
#[command(about = "A cozy city builder where words pay for the town")]
#[command(version)]
struct Args {
    /// Map seed; the same seed always draws the same valley
    #[arg(short, long)]
    seed: Option<String>,

    /// Map edge length in tiles
    #[arg(long)]
    size: Option<usize>,

    /// Generation config JSON (seed and size flags override it)
    #[arg(long)]
    map_config: Option<PathBuf>,

    /// Newline-separated word list; falls back to a built-in list
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Rules JSON
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Building catalog JSON
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ValeResult<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .init();

    info!("Starting Lettervale v{}", lettervale::VERSION);

    let mut state = build_state(&args)?;
    let mut handler = InputHandler::new();

    println!("{}", render_map(state.grid()));
    println!("{}", render_status(&state));
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let input = match parse_command(&line) {
            Ok(input) => input,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match handler.handle(input, &mut state) {
            Ok(InputOutcome::Quit) => break,
            Ok(outcome) => print_outcome(&outcome, &state),
            Err(e) => error!("{}", e),
        }
        io::stdout().flush()?;
    }

    info!(
        "Session ended after {} ticks, {} words",
        state.tick_count(),
        state.statistics().words_accepted
    );
    Ok(())
}

fn build_state(args: &Args) -> ValeResult<GameState> {
    let mut generation = match &args.map_config {
        Some(path) => GenerationConfig::load_from_path(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(seed) = &args.seed {
        generation.seed = seed.clone();
    }
    if let Some(size) = args.size {
        generation.size = size;
    }

    let rules = match &args.rules {
        Some(path) => RulesConfig::load_from_path(path)?,
        None => RulesConfig::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => Catalog::load_from_path(path)?,
        None => Catalog::standard()?,
    };
    let dictionary = match &args.dictionary {
        Some(path) => WordList::load_or_fallback(path),
        None => WordList::fallback(),
    };

    GameState::new(generation, rules, catalog, Box::new(dictionary))
}

fn print_outcome(outcome: &InputOutcome, state: &GameState) {
    match outcome {
        InputOutcome::Action(Ok(event)) => println!("{}", event.message()),
        InputOutcome::Action(Err(rejection)) => {
            println!("{} [{}]", rejection, rejection.code())
        }
        InputOutcome::OffMap(position) => println!("{} is off the map", position),
        InputOutcome::ToolChanged(tools) => println!(
            "Tool: {:?}, bridge mode {}, remove mode {}",
            tools.selection,
            on_off(tools.bridge_mode),
            on_off(tools.remove_mode)
        ),
        InputOutcome::Ticked(reports) => {
            if let Some(last) = reports.last() {
                println!(
                    "Tick {}: population {}/{}, happiness {}, tier {}",
                    last.tick,
                    last.population,
                    state.progress().housing,
                    last.happiness,
                    last.tier
                );
            }
            for tier in reports.iter().filter_map(|report| report.tier_advanced) {
                println!("The town reached tier {}!", tier);
            }
        }
        InputOutcome::MapRegenerated(event) => {
            println!("{}", event.message());
            println!("{}", render_map(state.grid()));
        }
        InputOutcome::Show(PlayerInput::ShowMap) => println!("{}", render_map(state.grid())),
        InputOutcome::Show(PlayerInput::ShowCatalog) => {
            println!("{}", render_catalog(state.catalog(), state.progress().tier))
        }
        InputOutcome::Show(PlayerInput::Help) => println!("{}", render_help()),
        InputOutcome::Show(_) => println!("{}", render_status(state)),
        InputOutcome::Quit => {}
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
