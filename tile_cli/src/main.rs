use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tile_config::{ConfigError, LoadOptions};
use tile_core::gameplay::hud::format_clock;
use tile_core::gameplay::spawner::effective_rates;
use tile_schema::{Difficulty, SessionConfig, SongLibrary, TileTable};

mod simulate;

use simulate::SimulationOptions;

#[derive(Debug, Parser)]
#[command(name = "tilebeat")]
#[command(about = "Tilebeat song library, tile table and headless simulation tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the songs in a library
    Songs {
        #[arg(long)]
        library: Option<PathBuf>,
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
    /// Print the special tile table with effective spawn rates
    Tiles {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Load and validate a config file
    Validate {
        #[arg(value_enum)]
        kind: ConfigKind,
        file: PathBuf,
    },
    /// Play a level headless with an autoplayer
    Simulate(SimulateArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConfigKind {
    Tiles,
    Songs,
    Session,
}

#[derive(Debug, Args)]
struct SimulateArgs {
    #[arg(long)]
    song: Option<String>,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    #[arg(long, default_value_t = 60_000)]
    duration_ms: u64,
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,
    /// Probability that the autoplayer taps a tile
    #[arg(long, default_value_t = 0.9)]
    skill: f64,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    tiles: Option<PathBuf>,
    #[arg(long)]
    session: Option<PathBuf>,
    #[arg(long)]
    library: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Songs {
            library,
            difficulty,
        } => {
            let lanes = SessionConfig::default().lanes.len();
            let library = load_library(library.as_deref(), lanes)?;
            let mut shown = 0;
            for song in library.by_difficulty(difficulty) {
                println!(
                    "{:<16} {:<8} {:>3} bpm  {:>5}  {} - {}",
                    song.id,
                    song.difficulty.as_str(),
                    song.bpm,
                    format_clock(song.duration_ms),
                    song.artist,
                    song.title
                );
                shown += 1;
            }
            if shown == 0 {
                println!("No songs.");
            }
        }
        Command::Tiles { config } => {
            let table = load_tiles(config.as_deref())?;
            print_tile_table(&table);
        }
        Command::Validate { kind, file } => {
            validate(kind, &file)?;
            println!("ok");
        }
        Command::Simulate(args) => {
            anyhow::ensure!(
                (0.0..=1.0).contains(&args.skill),
                "--skill must be within [0, 1], got {}",
                args.skill
            );
            anyhow::ensure!(args.frame_ms > 0.0, "--frame-ms must be positive");

            let table = load_tiles(args.tiles.as_deref())?;
            let config = load_session(args.session.as_deref())?;
            let library = load_library(args.library.as_deref(), config.lanes.len())?;
            let song = match &args.song {
                Some(id) => Some(
                    library
                        .find(id)
                        .cloned()
                        .with_context(|| format!("unknown song: {id}"))?,
                ),
                None => None,
            };

            let options = SimulationOptions {
                seed: args.seed,
                duration_ms: args.duration_ms as f64,
                frame_ms: args.frame_ms,
                skill: args.skill,
            };
            let report = simulate::run_simulation(config, table, song, &options);
            if args.json {
                let json = serde_json::to_string_pretty(&report.json())
                    .context("failed to serialize summary")?;
                println!("{json}");
            } else {
                report.print();
            }
        }
    }

    Ok(())
}

fn validate(kind: ConfigKind, file: &Path) -> anyhow::Result<()> {
    let result = match kind {
        ConfigKind::Tiles => tile_config::load_tile_table_file(file).map(|_| ()),
        ConfigKind::Songs => tile_config::load_song_library_file(file).map(|_| ()),
        ConfigKind::Session => tile_config::load_session_config_file(file).map(|_| ()),
    };
    result
        .map_err(describe)
        .with_context(|| format!("validation failed: {}", file.display()))
}

fn load_tiles(path: Option<&Path>) -> anyhow::Result<TileTable> {
    match path {
        Some(path) => tile_config::load_tile_table_file(path)
            .map_err(describe)
            .with_context(|| format!("failed to load tile table: {}", path.display())),
        None => Ok(TileTable::default()),
    }
}

fn load_session(path: Option<&Path>) -> anyhow::Result<SessionConfig> {
    match path {
        Some(path) => tile_config::load_session_config_file(path)
            .map_err(describe)
            .with_context(|| format!("failed to load session config: {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

fn load_library(path: Option<&Path>, lane_count: usize) -> anyhow::Result<SongLibrary> {
    match path {
        Some(path) => {
            let options = LoadOptions { lane_count };
            tile_config::load_song_library_file_with_options(path, &options)
                .map_err(describe)
                .with_context(|| format!("failed to load song library: {}", path.display()))
        }
        None => Ok(SongLibrary::default()),
    }
}

/// One line with the code, message and whatever location the loader knew.
fn describe(e: ConfigError) -> anyhow::Error {
    let mut line = e.to_string();
    let location: Vec<String> = [
        e.field.as_ref().map(|f| format!("field={f}")),
        e.context.clone(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !location.is_empty() {
        line.push_str(&format!(" ({})", location.join(", ")));
    }
    anyhow::anyhow!(line)
}

fn print_tile_table(table: &TileTable) {
    let rates = effective_rates(table);
    println!("type      weight  effective  x-score  duration  effect");
    let mut cumulative = 0.0;
    for tile in table.iter() {
        cumulative += tile.spawn_rate;
        let effective = rates
            .iter()
            .find(|(kind, _)| *kind == tile.kind)
            .map(|(_, p)| *p)
            .unwrap_or(0.0);
        let duration = tile
            .duration_ms
            .map(|ms| format!("{ms}ms"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<9} {:>6.2}  {:>9.3}  {:>7.1}  {:>8}  {}",
            tile.kind.as_str(),
            tile.spawn_rate,
            effective,
            tile.score_multiplier,
            duration,
            tile.effect
        );
    }
    println!("cumulative weight: {cumulative:.2}");
    if let Some(drift) = tile_config::spawn_weight_drift(table) {
        println!(
            "warning: spawn weights sum to {:.2} ({:+.2}); types late in the table are under-drawn or never drawn",
            table.spawn_weight_total(),
            drift
        );
    }
}
