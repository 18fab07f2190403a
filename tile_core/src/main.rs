use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use clap::Parser;

use tile_core::audio::manager::{AudioManager, DEFAULT_SAMPLE_RATE};
use tile_core::gameplay::events::GameEvent;
use tile_core::gameplay::hud::{accuracy_tier, combo_tier, format_clock, AccuracyTier, ComboTier};
use tile_core::gameplay::session::{GameSession, Phase};
use tile_core::gameplay::tile::TileState;
use tile_core::gameplay::words::LetterState;
use tile_core::input::events::PointerEvent;
use tile_core::input::InputQueue;
use tile_core::time::conductor::Conductor;
use tile_schema::{SessionConfig, Song, SongLibrary, TileTable};

#[derive(Parser, Debug)]
#[command(name = "tilebeat-play", version, about = "Play Tilebeat")]
struct Args {
    /// Song id from the library
    #[arg(long, default_value = "shape-of-you")]
    song: String,

    /// Spawn seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding audio/songs and sounds
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Tile table JSON overriding the built-in one
    #[arg(long)]
    tiles: Option<PathBuf>,

    /// Session tuning JSON
    #[arg(long)]
    session: Option<PathBuf>,

    /// Song library JSON
    #[arg(long)]
    library: Option<PathBuf>,
}

// Resources
#[derive(Resource)]
struct Level {
    session: GameSession,
    config: SessionConfig,
    table: TileTable,
    song: Option<Song>,
    song_path: Option<PathBuf>,
    seed: u64,
}

impl Level {
    fn fresh_session(&self) -> GameSession {
        GameSession::seeded(
            self.config.clone(),
            self.table.clone(),
            self.song.clone(),
            self.seed,
        )
    }

    fn restart(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        self.session = self.fresh_session();
        log::info!("level restarted (seed {})", self.seed);
    }
}

#[derive(Resource, Default)]
struct Pointer(InputQueue);

#[derive(Resource)]
struct GameConductor(Conductor);

// Components
/// Redrawn from session state every frame.
#[derive(Component)]
struct Drawn;

#[derive(Component, Clone, Copy)]
enum HudField {
    Score,
    Combo,
    Accuracy,
    Letters,
    Clock,
    Banner,
}

const MAX_STEP_MS: f64 = 250.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let table = match &args.tiles {
        Some(path) => tile_config::load_tile_table_file(path)
            .with_context(|| format!("Failed to load tile table {}", path.display()))?,
        None => TileTable::default(),
    };
    let config = match &args.session {
        Some(path) => tile_config::load_session_config_file(path)
            .with_context(|| format!("Failed to load session config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    let library = match &args.library {
        Some(path) => {
            let options = tile_config::LoadOptions {
                lane_count: config.lanes.len(),
            };
            tile_config::load_song_library_file_with_options(path, &options)
                .with_context(|| format!("Failed to load song library {}", path.display()))?
        }
        None => SongLibrary::default(),
    };
    let song = library
        .find(&args.song)
        .cloned()
        .ok_or_else(|| anyhow!("Unknown song '{}'", args.song))?;
    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    log::info!("playing '{}' by {} (seed {seed})", song.title, song.artist);

    let mut audio = AudioManager::new(DEFAULT_SAMPLE_RATE);
    let loaded = audio.load_effects(args.assets.join("sounds"));
    log::info!("{loaded} sound effects loaded");
    let conductor = Conductor::new(audio.clock());

    let (width, height) = (config.view_width, config.view_height);
    let song_path = Some(args.assets.join(&song.audio_path));
    let session = GameSession::seeded(config.clone(), table.clone(), Some(song.clone()), seed);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tilebeat".into(),
                resolution: (width, height).into(),
                resizable: false,
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb_u8(0x1a, 0x1a, 0x2e)))
        .insert_resource(Level {
            session,
            config,
            table,
            song: Some(song),
            song_path,
            seed,
        })
        .insert_resource(Pointer::default())
        .insert_resource(GameConductor(conductor))
        .insert_non_send_resource(audio)
        .add_systems(Startup, (setup_camera, setup_lanes, setup_hud))
        .add_systems(PreUpdate, update_conductor_system)
        .add_systems(
            Update,
            (collect_clicks, advance_level, redraw_scene, update_hud).chain(),
        )
        .run();

    Ok(())
}

/// Session coordinates have the origin at the top-left with y pointing down.
fn to_world(config: &SessionConfig, position: Vec2, z: f32) -> Vec3 {
    Vec3::new(
        position.x - config.view_width / 2.0,
        config.view_height / 2.0 - position.y,
        z,
    )
}

fn rgb(color: u32) -> Color {
    Color::srgb_u8((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

fn setup_lanes(mut commands: Commands, level: Res<Level>) {
    let config = &level.config;
    for &x in &config.lanes {
        commands.spawn(SpriteBundle {
            sprite: Sprite {
                color: Color::srgba(1.0, 1.0, 1.0, 0.05),
                custom_size: Some(Vec2::new(config.tile_width, config.view_height)),
                ..default()
            },
            transform: Transform::from_translation(to_world(
                config,
                Vec2::new(x, config.view_height / 2.0),
                0.0,
            )),
            ..default()
        });
    }

    commands.spawn(SpriteBundle {
        sprite: Sprite {
            color: Color::srgba(1.0, 0.2, 0.2, 0.4),
            custom_size: Some(Vec2::new(config.view_width, 2.0)),
            ..default()
        },
        transform: Transform::from_translation(to_world(
            config,
            Vec2::new(config.view_width / 2.0, config.game_over_line()),
            0.5,
        )),
        ..default()
    });
}

fn setup_hud(mut commands: Commands) {
    let fields = [
        (HudField::Score, 10.0, 10.0),
        (HudField::Combo, 40.0, 10.0),
        (HudField::Accuracy, 70.0, 10.0),
        (HudField::Letters, 10.0, 220.0),
        (HudField::Clock, 40.0, 220.0),
        (HudField::Banner, 300.0, 40.0),
    ];
    for (field, top, left) in fields {
        let font_size = match field {
            HudField::Banner => 26.0,
            _ => 20.0,
        };
        commands.spawn((
            TextBundle::from_section(
                "",
                TextStyle {
                    font_size,
                    color: Color::WHITE,
                    ..default()
                },
            )
            .with_style(Style {
                position_type: PositionType::Absolute,
                top: Val::Px(top),
                left: Val::Px(left),
                ..default()
            }),
            field,
        ));
    }
}

fn update_conductor_system(time: Res<Time<Real>>, mut conductor: ResMut<GameConductor>) {
    conductor.0.update(time.elapsed_seconds_f64());
}

fn collect_clicks(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    pointer: Res<Pointer>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    if let Some(position) = window.cursor_position() {
        pointer.0.push(PointerEvent::down(position.x, position.y));
    }
}

fn advance_level(
    time: Res<Time<Real>>,
    mut level: ResMut<Level>,
    pointer: Res<Pointer>,
    mut audio: NonSendMut<AudioManager>,
    mut conductor: ResMut<GameConductor>,
) {
    let now = time.elapsed_seconds_f64();
    let events = match level.session.phase() {
        Phase::Ready => {
            let clicked = pointer.0.drain().iter().any(|e| e.pressed);
            if !clicked {
                return;
            }
            // Sound may only start from a user gesture.
            audio.resume();
            if !audio.is_ready() {
                return;
            }
            if let Some(path) = level.song_path.clone() {
                if let Err(err) = audio.load_song(&path) {
                    log::warn!("song audio not loaded: {err:#}");
                }
            }
            level.session.start()
        }
        Phase::Playing => {
            let mut events = level.session.drain_input(&pointer.0);
            let dt_ms = (time.delta_seconds_f64() * 1000.0).min(MAX_STEP_MS);
            events.extend(level.session.tick(dt_ms));
            events
        }
        Phase::Over => {
            if pointer.0.drain().iter().any(|e| e.pressed) {
                audio.stop_all();
                conductor.0.stop_song();
                level.restart();
                level.session.start()
            } else {
                Vec::new()
            }
        }
    };

    for event in events {
        match event {
            GameEvent::SongRequested { .. } => {
                if audio.play_song().is_some() {
                    conductor.0.start_song(now);
                }
            }
            GameEvent::SoundRequested(cue) => audio.play(cue),
            GameEvent::GameEnded(summary) => {
                conductor.0.stop_song();
                log::info!(
                    "final score {} ({} hits of {}, {} words)",
                    summary.final_score,
                    summary.hits,
                    summary.attempts,
                    summary.words_completed
                );
            }
            other => log::trace!("{other:?}"),
        }
    }
}

fn redraw_scene(mut commands: Commands, drawn: Query<Entity, With<Drawn>>, level: Res<Level>) {
    for entity in &drawn {
        commands.entity(entity).despawn();
    }

    let config = &level.config;
    let session = &level.session;
    let now = session.elapsed_ms();
    let tile_size = Vec2::new(config.tile_width, config.tile_height);

    for tile in session.tiles() {
        let mut color = level
            .table
            .get(tile.kind)
            .map(|c| rgb(c.color))
            .unwrap_or(Color::BLACK);
        let mut scale = 1.0;
        match tile.state() {
            TileState::Hit { .. } => {
                let t = tile
                    .hit_progress(now, config.hit_animation_ms as f64)
                    .unwrap_or(1.0);
                scale = 1.0 + 0.2 * t;
                color = color.with_alpha(1.0 - t);
            }
            TileState::Missed => color = Color::srgb(0.8, 0.1, 0.1),
            TileState::Active | TileState::Expired => {}
        }

        let translation = to_world(config, tile.position, 1.0);
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color,
                    custom_size: Some(tile_size),
                    ..default()
                },
                transform: Transform::from_translation(translation)
                    .with_scale(Vec3::splat(scale)),
                ..default()
            },
            Drawn,
        ));
        if !tile.kind.is_default() {
            let label = tile.kind.as_str()[..1].to_uppercase();
            commands.spawn((
                Text2dBundle {
                    text: Text::from_section(
                        label,
                        TextStyle {
                            font_size: 32.0,
                            color: Color::WHITE,
                            ..default()
                        },
                    ),
                    transform: Transform::from_translation(translation + Vec3::Z),
                    ..default()
                },
                Drawn,
            ));
        }
    }

    for letter in session.letters() {
        let (alpha, scale) = match letter.state() {
            LetterState::Floating => (1.0, 1.0),
            LetterState::Collected { at_ms } => {
                let t = ((now - at_ms) / config.collect_animation_ms.max(1) as f64)
                    .clamp(0.0, 1.0) as f32;
                (1.0 - t, 1.0 + t)
            }
        };
        commands.spawn((
            Text2dBundle {
                text: Text::from_section(
                    letter.character.to_string(),
                    TextStyle {
                        font_size: config.letter_size,
                        color: Color::srgba(1.0, 0.84, 0.0, alpha),
                        ..default()
                    },
                ),
                transform: Transform::from_translation(to_world(config, letter.position, 3.0))
                    .with_scale(Vec3::splat(scale)),
                ..default()
            },
            Drawn,
        ));
    }

    let overlay = if session.effects().is_frozen() {
        Some(Color::srgba(0.6, 0.6, 1.0, 0.25))
    } else if session.effects().ice_active() {
        Some(Color::srgba(0.0, 0.75, 1.0, 0.3))
    } else {
        None
    };
    if let Some(color) = overlay {
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color,
                    custom_size: Some(Vec2::new(config.view_width, config.view_height)),
                    ..default()
                },
                transform: Transform::from_xyz(0.0, 0.0, 5.0),
                ..default()
            },
            Drawn,
        ));
    }
}

fn update_hud(
    time: Res<Time<Real>>,
    level: Res<Level>,
    conductor: Res<GameConductor>,
    mut texts: Query<(&mut Text, &HudField)>,
) {
    let session = &level.session;
    let snapshot = session.score().snapshot();

    for (mut text, field) in &mut texts {
        let section = &mut text.sections[0];
        match field {
            HudField::Score => section.value = format!("Score: {}", snapshot.score),
            HudField::Combo => {
                section.value = format!("Combo: {}", snapshot.combo);
                section.style.color = match combo_tier(snapshot.combo) {
                    ComboTier::Yellow => Color::srgb(1.0, 0.84, 0.0),
                    ComboTier::Blue => Color::srgb(0.3, 0.6, 1.0),
                    ComboTier::Plain => Color::WHITE,
                };
            }
            HudField::Accuracy => {
                section.value = format!("Accuracy: {}%", snapshot.accuracy);
                section.style.color = match accuracy_tier(snapshot.accuracy) {
                    AccuracyTier::Good => Color::srgb(0.2, 0.9, 0.3),
                    AccuracyTier::Fair => Color::srgb(1.0, 0.84, 0.0),
                    AccuracyTier::Poor => Color::srgb(1.0, 0.25, 0.25),
                };
            }
            HudField::Letters => {
                let letters = session.words().snapshot();
                section.value = letters
                    .target
                    .chars()
                    .enumerate()
                    .map(|(i, c)| if letters.slot_filled(i) { c } else { '_' })
                    .collect::<String>();
            }
            HudField::Clock => {
                let duration = level.song.as_ref().map(|s| s.duration_ms).unwrap_or(0);
                let position = conductor
                    .0
                    .song_position(time.elapsed_seconds_f64())
                    .map(|secs| (secs * 1000.0) as u64)
                    .unwrap_or(0)
                    .min(duration);
                section.value = format!("{} / {}", format_clock(position), format_clock(duration));
            }
            HudField::Banner => {
                section.value = match (session.phase(), session.summary()) {
                    (Phase::Ready, _) => "Click to start".to_string(),
                    (Phase::Over, Some(summary)) => format!(
                        "Game over\nScore: {}\nMax combo: {}\nClick to play again",
                        summary.final_score, summary.max_combo
                    ),
                    _ => String::new(),
                };
            }
        }
    }
}
