use tile_core::audio::assets::AudioClip;
use tile_core::audio::manager::{AudioManager, AudioState, EFFECT_VOLUME, SONG_VOLUME};
use tile_core::gameplay::events::SoundCue;

const RATE: u32 = 44100;

fn ones(frames: usize) -> AudioClip {
    AudioClip::new(vec![1.0; frames * 2], RATE).unwrap()
}

fn render(audio: &AudioManager) -> Vec<f32> {
    let mut buffer = vec![0.0; 256];
    audio.mixer().lock().process_buffer(&mut buffer, 0.0);
    buffer
}

#[test]
fn test_new_manager_waits_for_gesture() {
    let audio = AudioManager::new(RATE);
    assert_eq!(audio.state(), AudioState::Suspended);
    assert!(!audio.is_ready());
    assert!(!audio.is_streaming());
}

#[test]
fn test_cue_plays_at_effect_volume() {
    let mut audio = AudioManager::detached(RATE);
    audio.insert_effect(SoundCue::TileHit, ones(64)).unwrap();
    assert!(audio.has_effect(SoundCue::TileHit));

    audio.play(SoundCue::TileHit);
    let buffer = render(&audio);
    assert!(buffer[..128].iter().all(|&s| s == EFFECT_VOLUME));
    assert!(buffer[128..].iter().all(|&s| s == 0.0));
}

#[test]
fn test_missing_cue_is_silent() {
    let audio = AudioManager::detached(RATE);
    audio.play(SoundCue::GameOver);
    assert!(render(&audio).iter().all(|&s| s == 0.0));
}

#[test]
fn test_suspended_manager_drops_cues() {
    let mut audio = AudioManager::new(RATE);
    audio.insert_effect(SoundCue::TileHit, ones(64)).unwrap();
    audio.play(SoundCue::TileHit);
    assert!(render(&audio).iter().all(|&s| s == 0.0));
    assert_eq!(audio.play_song(), None);
}

#[test]
fn test_song_replaces_everything_playing() {
    let mut audio = AudioManager::detached(RATE);
    audio.insert_effect(SoundCue::WordComplete, ones(1_000)).unwrap();
    audio.set_song(ones(1_000)).unwrap();
    assert!(audio.has_song());

    audio.play(SoundCue::WordComplete);
    assert_eq!(audio.play_song(), Some(0.0));

    let buffer = render(&audio);
    assert!(buffer.iter().all(|&s| s == SONG_VOLUME));
    assert_eq!(audio.mixer().lock().active_voice_count(), 1);
}

#[test]
fn test_effects_are_resampled_to_output_rate() {
    let mut audio = AudioManager::detached(RATE);
    let clip = AudioClip::new(vec![1.0; 2 * 22050], 22050).unwrap();
    audio.insert_effect(SoundCue::IceEffect, clip).unwrap();
    audio.play(SoundCue::IceEffect);
    assert!(render(&audio).iter().all(|&s| s == EFFECT_VOLUME));
}

#[test]
fn test_loading_from_empty_directory_keeps_running() {
    let dir = std::env::temp_dir().join(format!("tilebeat_sounds_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let mut audio = AudioManager::detached(RATE);
    assert_eq!(audio.load_effects(&dir), 0);
    assert!(audio.load_song(dir.join("missing.mp3")).is_err());
    assert!(!audio.has_song());
    audio.play(SoundCue::TileHit);

    let _ = std::fs::remove_dir_all(&dir);
}
