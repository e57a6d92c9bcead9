//! Headless horde runner.
//!
//! Usage: `horde [--level NAME] [--seed N] [--max-seconds S] [--realtime] [--list]`

use std::path::PathBuf;
use std::process;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing::{error, info};

use horde_app::game_loop::spawn_game_loop;
use horde_app::logging::init_logging;
use horde_app::state::{GameLoopCommand, LoopOptions, LoopOutcome};
use horde_catalog::Catalog;
use horde_core::commands::WaveCommand;
use horde_sim::{Session, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "horde")]
#[command(about = "Run a horde level headless and report the outcome")]
struct Args {
    /// Enemy archetype catalog
    #[arg(long, default_value = "data/enemies.json")]
    enemies: PathBuf,

    /// Level catalog
    #[arg(long, default_value = "data/levels.json")]
    levels: PathBuf,

    /// Level to play
    #[arg(long, default_value = "Easy")]
    level: String,

    /// RNG seed; the same seed replays the same run
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Stop after this many simulated seconds
    #[arg(long)]
    max_seconds: Option<f64>,

    /// Pace ticks to wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Disable the automatic defender (the player only takes hits)
    #[arg(long)]
    no_defend: bool,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// List available levels and exit
    #[arg(long)]
    list: bool,

    /// Debug logging for every horde crate
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let catalog = Arc::new(Catalog::load(&args.enemies, &args.levels));
    info!(
        "loaded {} enemies and {} levels",
        catalog.enemies().len(),
        catalog.levels().len()
    );

    if args.list {
        if catalog.levels().is_empty() {
            info!("No levels found in {}", args.levels.display());
        }
        for level in catalog.levels().iter() {
            let waves = if level.is_endless() {
                "endless".to_string()
            } else {
                level.wave_count.to_string()
            };
            println!(
                "{:<12} {:>8} waves  {} spawn rules",
                level.name,
                waves,
                level.spawn_rules.len()
            );
        }
        return;
    }

    if catalog.get_level(&args.level).is_none() {
        error!("level `{}` not found (try --list)", args.level);
        process::exit(1);
    }

    let session = Session::new(
        Arc::clone(&catalog),
        SessionConfig {
            seed: args.seed,
            auto_defend: !args.no_defend,
            ..Default::default()
        },
    );
    let options = LoopOptions {
        realtime: args.realtime,
        max_seconds: args.max_seconds,
        auto_advance: true,
    };

    let latest = Arc::new(Mutex::new(None));
    let (tx, handle) = match spawn_game_loop(session, options, latest) {
        Ok(spawned) => spawned,
        Err(e) => {
            error!("failed to start game loop: {e}");
            process::exit(1);
        }
    };
    // The loop owns the only receiver; a send only fails once it has exited.
    let _ = tx.send(GameLoopCommand::Wave(WaveCommand::StartLevel {
        level_name: args.level.clone(),
    }));

    let report = match handle.join() {
        Ok(report) => report,
        Err(_) => {
            error!("game loop panicked");
            process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("failed to serialize report: {e}"),
        }
    } else {
        for wave in &report.waves {
            println!(
                "wave {:>3}: {:>4} spawned {:>4} defeated {:>6} dealt {:>5} taken {:>7.1}s",
                wave.wave_number,
                wave.enemies_spawned,
                wave.enemies_defeated,
                wave.damage_dealt,
                wave.damage_received,
                wave.elapsed_secs
            );
        }
        println!(
            "{:?} on `{}` after {:.1}s simulated",
            report.outcome, args.level, report.simulated_secs
        );
    }

    if report.outcome == LoopOutcome::GameOver {
        process::exit(2);
    }
}
