//! encounter-replay: run an encounter file headlessly and dump the result.
//!
//! Usage:
//!   encounter-replay run encounters/warlock_arena.json
//!   encounter-replay run encounters/warlock_arena.json --ticks 300
//!
//! Set RUST_LOG=debug to see every decision the agents make.

use std::path::PathBuf;
use std::process;

use glam::DVec2;
use tracing::info;

use skirmish_ai::profiles;
use skirmish_core::commands::HostCommand;
use skirmish_core::config::EncounterConfig;
use skirmish_core::state::EncounterSnapshot;
use skirmish_sim::{SimConfig, SimulationEngine};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "encounter-replay: SKIRMISH encounter runner\n\
         \n\
         Commands:\n\
         \n\
         run <encounter.json>  Load, validate and run an encounter, then print\n\
                               the final snapshot as JSON\n\
         \n\
           --ticks <N>        Number of ticks to run (default: from the file)\n\
         \n\
         Examples:\n\
         \n\
           encounter-replay run encounters/warlock_arena.json\n\
           RUST_LOG=debug encounter-replay run encounters/warlock_arena.json --ticks 120\n"
    );
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_ticks(args: &[String]) -> Option<u64> {
    for i in 0..args.len() {
        if args[i] == "--ticks" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn parse_path(args: &[String]) -> Option<PathBuf> {
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
            continue;
        }
        if arg == "--ticks" {
            skip = true;
            continue;
        }
        return Some(PathBuf::from(arg));
    }
    None
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let path = match parse_path(args) {
        Some(p) => p,
        None => {
            eprintln!("Error: <encounter.json> is required");
            process::exit(1);
        }
    };

    let config = match EncounterConfig::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: failed to load {}: {e}", path.display());
            process::exit(1);
        }
    };
    let ticks = parse_ticks(args).unwrap_or(config.ticks);

    init_logging();
    info!(
        path = %path.display(),
        seed = config.seed,
        tick_ms = config.tick_ms,
        ticks,
        "encounter loaded"
    );

    let snapshot = match run_encounter(&config, ticks) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: failed to serialize snapshot: {e}");
            process::exit(1);
        }
    }
}

fn run_encounter(
    config: &EncounterConfig,
    ticks: u64,
) -> Result<EncounterSnapshot, skirmish_core::error::ConfigError> {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: config.seed,
        tick_ms: config.tick_ms,
    });

    let mut agents = Vec::with_capacity(config.agents.len());
    for spawn in &config.agents {
        let archetype = profiles::resolve(&spawn.archetype, config)?;
        agents.push(engine.spawn_agent(&archetype, DVec2::new(spawn.x, spawn.y))?);
    }
    for target in &config.targets {
        engine.spawn_target(DVec2::new(target.x, target.y), target.health);
    }

    let mut last = EncounterSnapshot::default();
    for tick in 0..ticks {
        for hit in config.hits.iter().filter(|h| h.at_tick == tick) {
            engine.queue_command(HostCommand::DamageAgent {
                agent: agents[hit.agent],
                amount: hit.amount,
            });
        }

        last = engine.tick();
        for event in &last.events {
            info!(tick = last.time.tick, agent = event.agent().0, ?event, "combat event");
        }
    }

    info!(
        agents = last.agents.len(),
        targets_alive = last.targets.iter().filter(|t| t.health > 0.0).count(),
        "encounter finished"
    );
    Ok(last)
}
