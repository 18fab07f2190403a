use std::collections::HashSet;

use serde::Serialize;
use tile_core::gameplay::events::{GameEvent, GameSummary};
use tile_core::gameplay::session::GameSession;
use tile_core::gameplay::tile::TileId;
use tile_schema::{SessionConfig, Song, TileTable};

/// Tiles are tapped once their centre reaches this fraction of the view.
const HIT_LINE_FRACTION: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub seed: u64,
    pub duration_ms: f64,
    pub frame_ms: f64,
    /// Chance that the autoplayer taps a given tile.
    pub skill: f64,
}

#[derive(Debug, Clone)]
pub struct TimelineEntry {
    pub time_ms: f64,
    pub info: String,
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub song_id: Option<String>,
    pub seed: u64,
    pub duration_ms: f64,
    pub timeline: Vec<TimelineEntry>,
    pub summary: GameSummary,
    pub game_over: bool,
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub seed: u64,
    pub game_over: bool,
    pub events: usize,
    #[serde(flatten)]
    pub summary: &'a GameSummary,
}

/// Plays one level with fixed frame steps until game over or the time
/// limit. Every tile is judged once, as it reaches the hit line: it is tapped
/// with probability `skill` and left alone otherwise. Letters are collected
/// as soon as they enter the view.
pub fn run_simulation(
    config: SessionConfig,
    table: TileTable,
    song: Option<Song>,
    options: &SimulationOptions,
) -> SimulationReport {
    let hit_line = config.view_height * HIT_LINE_FRACTION;
    let song_id = song.as_ref().map(|s| s.id.clone());
    let mut session = GameSession::seeded(config, table, song, options.seed);
    let mut player = fastrand::Rng::with_seed(options.seed.wrapping_add(1));
    let mut judged: HashSet<TileId> = HashSet::new();
    let mut timeline = Vec::new();

    record(&mut timeline, 0.0, session.start());

    while !session.is_over() && session.elapsed_ms() < options.duration_ms {
        let step = options
            .frame_ms
            .min(options.duration_ms - session.elapsed_ms());
        let events = session.tick(step);
        record(&mut timeline, session.elapsed_ms(), events);

        let due: Vec<TileId> = session
            .tiles()
            .iter()
            .filter(|t| t.is_active() && t.position.y >= hit_line && !judged.contains(&t.id))
            .map(|t| t.id)
            .collect();
        for id in due {
            judged.insert(id);
            if player.f64() < options.skill {
                let events = session.hit_tile(id);
                record(&mut timeline, session.elapsed_ms(), events);
            }
        }

        let visible: Vec<_> = session
            .letters()
            .iter()
            .filter(|l| l.is_floating() && l.position.y >= 0.0)
            .map(|l| l.id)
            .collect();
        for id in visible {
            let events = session.collect_letter(id);
            record(&mut timeline, session.elapsed_ms(), events);
        }
    }

    let summary = session
        .summary()
        .cloned()
        .unwrap_or_else(|| session.summarize());
    log::info!(
        "simulation finished at {:.0} ms with score {}",
        summary.elapsed_ms,
        summary.final_score
    );

    SimulationReport {
        song_id,
        seed: options.seed,
        duration_ms: options.duration_ms,
        timeline,
        summary,
        game_over: session.is_over(),
    }
}

fn record(timeline: &mut Vec<TimelineEntry>, time_ms: f64, events: Vec<GameEvent>) {
    timeline.extend(
        events
            .iter()
            .filter_map(describe)
            .map(|info| TimelineEntry { time_ms, info }),
    );
}

fn describe(event: &GameEvent) -> Option<String> {
    let info = match event {
        GameEvent::SongRequested { song_id } => {
            format!("start song {}", song_id.as_deref().unwrap_or("(none)"))
        }
        GameEvent::TileSpawned { id, kind, lane } => {
            format!("spawn  #{} {} lane {}", id.0, kind, lane)
        }
        GameEvent::TileHit { id, kind } => format!("hit    #{} {}", id.0, kind),
        GameEvent::TileExpired { id } => format!("burnt  #{}", id.0),
        GameEvent::TileMissed { id } => format!("missed #{}", id.0),
        GameEvent::LetterSpawned { id, character } => format!("letter #{} '{}'", id.0, character),
        GameEvent::LetterCollected { character, .. } => format!("got    '{character}'"),
        GameEvent::WordCompleted { word } => format!("word   {word}"),
        GameEvent::ScoreUpdated(s) => format!("score  {} (combo {})", s.score, s.combo),
        GameEvent::EffectStarted {
            effect, restarted, ..
        } => {
            let verb = if *restarted { "restart" } else { "start" };
            format!("effect {} {verb}", effect.as_str())
        }
        GameEvent::EffectEnded { effect } => format!("effect {} end", effect.as_str()),
        GameEvent::EffectTriggered { kind } => format!("effect {kind} (no-op)"),
        GameEvent::SpeedIncreased { speed } => format!("speed  {speed:.1}"),
        GameEvent::GameEnded(_) => "GAME OVER".to_string(),
        GameEvent::LettersUpdated(_) | GameEvent::SoundRequested(_) => return None,
    };
    Some(info)
}

impl SimulationReport {
    pub fn json(&self) -> JsonReport<'_> {
        JsonReport {
            seed: self.seed,
            game_over: self.game_over,
            events: self.timeline.len(),
            summary: &self.summary,
        }
    }

    pub fn print(&self) {
        println!(
            "Simulation Start (song: {}, seed: {}, {} ms)",
            self.song_id.as_deref().unwrap_or("none"),
            self.seed,
            self.duration_ms
        );
        println!("Time(ms) | Event");
        println!("---------|------------------");
        for entry in &self.timeline {
            println!("{:>8} | {}", entry.time_ms.round() as u64, entry.info);
        }

        let s = &self.summary;
        println!();
        if self.game_over {
            println!("Result: game over at {:.0} ms", s.elapsed_ms);
        } else {
            println!("Result: survived {:.0} ms", s.elapsed_ms);
        }
        println!("Score: {}", s.final_score);
        println!("Max combo: {}", s.max_combo);
        println!("Accuracy: {}% ({}/{})", s.accuracy, s.hits, s.attempts);
        println!("Words: {}", s.words_completed);
    }
}
