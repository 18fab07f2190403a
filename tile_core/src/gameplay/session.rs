use glam::Vec2;
use tile_schema::{SessionConfig, Song, TileTable, TileType};

use super::effects::{hit_effect, EffectKind, EffectState, HitEffect};
use super::events::{GameEvent, GameSummary, SoundCue};
use super::score::ScoreManager;
use super::spawner::{pick_lane, pick_tile_type};
use super::tile::{Tile, TileId, TileState};
use super::words::{Letter, LetterId, WordCollection};
use crate::input::InputQueue;
use crate::rng::RandomSource;
use crate::time::timers::TimerQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the host to confirm audio is running.
    Ready,
    Playing,
    /// Terminal. Every call is inert from here on.
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SessionTimer {
    SpawnTile,
    SpeedRamp,
    FireExpiry(TileId),
    EffectEnd(EffectKind),
}

/// All state of one level: tiles, letters, score, word progress, effects and
/// pending timers.
///
/// The host drives it with [`GameSession::tick`] and the input methods, and
/// reacts to the returned events. Nothing here renders or plays audio.
pub struct GameSession<R = fastrand::Rng> {
    config: SessionConfig,
    tile_table: TileTable,
    song: Option<Song>,
    rng: R,
    phase: Phase,
    timers: TimerQueue<SessionTimer>,
    tiles: Vec<Tile>,
    words: WordCollection,
    score: ScoreManager,
    effects: EffectState,
    speed: f32,
    next_entity: u64,
    summary: Option<GameSummary>,
}

impl GameSession<fastrand::Rng> {
    pub fn seeded(config: SessionConfig, tile_table: TileTable, song: Option<Song>, seed: u64) -> Self {
        Self::new(config, tile_table, song, fastrand::Rng::with_seed(seed))
    }
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(config: SessionConfig, tile_table: TileTable, song: Option<Song>, rng: R) -> Self {
        let words = WordCollection::new(&config.target_word);
        let speed = config.initial_speed;
        Self {
            config,
            tile_table,
            song,
            rng,
            phase: Phase::Ready,
            timers: TimerQueue::new(),
            tiles: Vec::new(),
            words,
            score: ScoreManager::new(),
            effects: EffectState::new(),
            speed,
            next_entity: 0,
            summary: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn tile_table(&self) -> &TileTable {
        &self.tile_table
    }

    pub fn song(&self) -> Option<&Song> {
        self.song.as_ref()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn letters(&self) -> &[Letter] {
        self.words.letters()
    }

    pub fn words(&self) -> &WordCollection {
        &self.words
    }

    pub fn score(&self) -> &ScoreManager {
        &self.score
    }

    pub fn effects(&self) -> &EffectState {
        &self.effects
    }

    /// Tile speed in pixels per reference frame.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    /// Begins spawning. Call once the audio output is running; a second call
    /// does nothing.
    pub fn start(&mut self) -> Vec<GameEvent> {
        if self.phase != Phase::Ready {
            return Vec::new();
        }
        self.phase = Phase::Playing;
        self.timers
            .schedule_repeating(self.config.spawn_interval_ms as f64, SessionTimer::SpawnTile);
        self.timers.schedule_repeating(
            self.config.speed_ramp_interval_ms as f64,
            SessionTimer::SpeedRamp,
        );

        let song_id = self.song.as_ref().map(|s| s.id.clone());
        log::info!(
            "session started (song: {})",
            song_id.as_deref().unwrap_or("none")
        );
        vec![GameEvent::SongRequested { song_id }]
    }

    /// Advances the level by `dt_ms`: fires due timers, moves tiles and
    /// letters unless frozen, then checks for a missed default tile.
    pub fn tick(&mut self, dt_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Playing || !(dt_ms > 0.0) {
            return events;
        }

        let until = self.timers.now() + dt_ms;
        while let Some(timer) = self.timers.pop_due(until) {
            self.on_timer(timer, &mut events);
        }
        self.timers.advance_to(until);

        self.cull_animations();
        if !self.effects.is_frozen() {
            let frames = (dt_ms / self.config.frame_ms) as f32;
            self.advance_entities(frames);
        }
        self.check_game_over(&mut events);
        events
    }

    /// Routes a press to the most recently spawned live tile or letter under
    /// `point`.
    pub fn tap(&mut self, point: Vec2) -> Vec<GameEvent> {
        if self.phase != Phase::Playing {
            return Vec::new();
        }

        let tile_size = Vec2::new(self.config.tile_width, self.config.tile_height);
        let tile = self
            .tiles
            .iter()
            .filter(|t| t.is_active() && t.contains(point, tile_size))
            .map(|t| t.id.0)
            .max();
        let letter = self
            .words
            .letters()
            .iter()
            .filter(|l| l.is_floating() && l.contains(point, self.config.letter_size))
            .map(|l| l.id.0)
            .max();

        match (tile, letter) {
            (Some(t), Some(l)) if l > t => self.collect_letter(LetterId(l)),
            (Some(t), _) => self.hit_tile(TileId(t)),
            (None, Some(l)) => self.collect_letter(LetterId(l)),
            (None, None) => Vec::new(),
        }
    }

    /// Feeds every queued press into [`GameSession::tap`].
    pub fn drain_input(&mut self, queue: &InputQueue) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for event in queue.drain() {
            if event.pressed {
                events.extend(self.tap(event.position));
            }
        }
        events
    }

    pub fn hit_tile(&mut self, id: TileId) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Playing {
            return events;
        }

        let now = self.timers.now();
        let Some(tile) = self.tiles.iter_mut().find(|t| t.id == id) else {
            return events;
        };
        if !tile.try_hit(now) {
            return events;
        }
        let kind = tile.kind;
        if let Some(expiry) = tile.expiry.take() {
            self.timers.cancel(expiry);
        }

        events.push(GameEvent::TileHit { id, kind });
        self.apply_hit_effect(kind, &mut events);

        let points = (self.config.base_tile_points as f64 * self.tile_table.score_multiplier(kind))
            .round() as i64;
        events.push(GameEvent::ScoreUpdated(self.score.add_score(points)));
        events.push(GameEvent::SoundRequested(SoundCue::TileHit));
        events
    }

    pub fn collect_letter(&mut self, id: LetterId) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Playing {
            return events;
        }

        let now = self.timers.now();
        let Some(letter) = self.words.letter_mut(id) else {
            return events;
        };
        if !letter.try_collect(now) {
            return events;
        }
        let character = letter.character;
        events.push(GameEvent::LetterCollected { id, character });

        let outcome = self.words.collect(character);
        if !outcome.kept {
            log::debug!("letter '{character}' already held as often as the word needs it");
        }
        if outcome.completed {
            let word = self.words.target().to_string();
            log::info!("word '{word}' completed");
            events.push(GameEvent::WordCompleted { word });
            events.push(GameEvent::ScoreUpdated(
                self.score.add_score(self.config.word_bonus),
            ));
            events.push(GameEvent::SoundRequested(SoundCue::WordComplete));
        }
        events.push(GameEvent::LettersUpdated(outcome.snapshot));
        events
    }

    fn on_timer(&mut self, timer: SessionTimer, events: &mut Vec<GameEvent>) {
        match timer {
            SessionTimer::SpawnTile => {
                if !self.effects.is_frozen() {
                    self.spawn_tile(events);
                }
            }
            SessionTimer::SpeedRamp => {
                self.speed += self.config.speed_ramp_step;
                log::debug!("speed ramped to {:.1}", self.speed);
                events.push(GameEvent::SpeedIncreased { speed: self.speed });
            }
            SessionTimer::FireExpiry(id) => self.expire_tile(id, events),
            SessionTimer::EffectEnd(effect) => {
                if self.effects.finish(effect) {
                    events.push(GameEvent::EffectEnded { effect });
                }
            }
        }
    }

    fn spawn_tile(&mut self, events: &mut Vec<GameEvent>) {
        let kind = pick_tile_type(&self.tile_table, &mut self.rng);
        let lane = pick_lane(self.config.lanes.len(), &mut self.rng);
        let Some(&x) = self.config.lanes.get(lane) else {
            log::warn!("no lanes configured; spawn skipped");
            return;
        };
        let id = TileId(self.next_entity_id());
        let position = Vec2::new(x, self.config.tile_spawn_y);

        let mut tile = Tile::new(id, kind, lane, position);
        if kind == TileType::Fire {
            if let Some(duration) = self.tile_table.duration_ms(TileType::Fire) {
                tile.expiry = Some(
                    self.timers
                        .schedule_once(duration as f64, SessionTimer::FireExpiry(id)),
                );
            }
        }
        self.tiles.push(tile);
        events.push(GameEvent::TileSpawned { id, kind, lane });

        if let Some((character, x)) = self.words.roll_spawn(
            &mut self.rng,
            self.config.letter_spawn_chance,
            self.config.view_width,
            self.config.letter_inset,
        ) {
            let id = LetterId(self.next_entity_id());
            let position = Vec2::new(x, self.config.letter_spawn_y);
            self.words.push_letter(Letter::new(id, character, position));
            events.push(GameEvent::LetterSpawned { id, character });
        }
    }

    fn expire_tile(&mut self, id: TileId, events: &mut Vec<GameEvent>) {
        let Some(idx) = self.tiles.iter().position(|t| t.id == id) else {
            return;
        };
        if !self.tiles[idx].try_expire() {
            return;
        }
        self.tiles.remove(idx);
        events.push(GameEvent::TileExpired { id });
        events.push(GameEvent::ScoreUpdated(
            self.score.add_score(self.config.fire_penalty),
        ));
        events.push(GameEvent::SoundRequested(SoundCue::FireEffect));
    }

    fn apply_hit_effect(&mut self, kind: TileType, events: &mut Vec<GameEvent>) {
        match hit_effect(kind) {
            HitEffect::None => {}
            HitEffect::Stub => {
                log::debug!("{kind} effect triggered");
                events.push(GameEvent::EffectTriggered { kind });
            }
            HitEffect::Timed(effect) => {
                let Some(duration_ms) = self.tile_table.duration_ms(kind) else {
                    log::warn!("{kind} tile has no duration configured; effect skipped");
                    return;
                };
                let end = self
                    .timers
                    .schedule_once(duration_ms as f64, SessionTimer::EffectEnd(effect));
                let restarted = match self.effects.start(effect, end) {
                    Some(previous) => {
                        self.timers.cancel(previous);
                        true
                    }
                    None => false,
                };
                events.push(GameEvent::EffectStarted {
                    effect,
                    duration_ms,
                    restarted,
                });
                if effect == EffectKind::IceOverlay {
                    events.push(GameEvent::SoundRequested(SoundCue::IceEffect));
                }
            }
        }
    }

    fn cull_animations(&mut self) {
        let now = self.timers.now();
        let hit_ms = self.config.hit_animation_ms as f64;
        self.tiles.retain(|t| match t.state() {
            TileState::Hit { at_ms } => now - at_ms < hit_ms,
            TileState::Expired => false,
            TileState::Active | TileState::Missed => true,
        });
        self.words
            .cull_collected(now, self.config.collect_animation_ms as f64);
    }

    fn advance_entities(&mut self, frames: f32) {
        let dy = self.speed * frames;
        let tile_limit = self.config.view_height + self.config.tile_offscreen_margin;
        let timers = &mut self.timers;

        for tile in &mut self.tiles {
            tile.move_down(dy);
        }
        // Live default tiles stay until the game-over scan sees them, however
        // far one step carried them. Everything else leaves quietly.
        self.tiles.retain(|t| {
            if t.position.y <= tile_limit || (t.kind.is_default() && t.is_active()) {
                return true;
            }
            if let Some(expiry) = t.expiry {
                timers.cancel(expiry);
            }
            log::trace!("{} tile {:?} left the view", t.kind, t.id);
            false
        });

        self.words.advance(
            self.config.letter_speed * frames,
            self.config.view_height + self.config.letter_offscreen_margin,
        );
    }

    fn check_game_over(&mut self, events: &mut Vec<GameEvent>) {
        let line = self.config.game_over_line();
        let mut missed = Vec::new();
        for tile in &mut self.tiles {
            if tile.kind.is_default() && tile.position.y > line && tile.mark_missed() {
                missed.push(tile.id);
            }
        }
        if missed.is_empty() {
            return;
        }
        events.extend(missed.into_iter().map(|id| GameEvent::TileMissed { id }));
        self.game_over(events);
    }

    fn game_over(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase == Phase::Over {
            return;
        }
        self.phase = Phase::Over;
        self.timers.clear();
        self.effects.clear();

        let summary = self.summarize();
        log::info!(
            "game over: score {} (max combo {}, accuracy {}%)",
            summary.final_score,
            summary.max_combo,
            summary.accuracy
        );
        events.push(GameEvent::SoundRequested(SoundCue::GameOver));
        events.push(GameEvent::GameEnded(summary.clone()));
        self.summary = Some(summary);
    }

    /// Results so far. After game over this equals [`GameSession::summary`].
    pub fn summarize(&self) -> GameSummary {
        let snapshot = self.score.snapshot();
        GameSummary {
            song_id: self.song.as_ref().map(|s| s.id.clone()),
            final_score: snapshot.score,
            max_combo: snapshot.max_combo,
            accuracy: snapshot.accuracy,
            hits: self.score.hits(),
            attempts: self.score.attempts(),
            words_completed: self.words.completions(),
            elapsed_ms: self.timers.now(),
        }
    }

    fn next_entity_id(&mut self) -> u64 {
        let id = self.next_entity;
        self.next_entity += 1;
        id
    }
}
