use tile_core::audio::assets::AudioClip;

#[test]
fn test_audio_clip_properties() {
    let sample_rate = 44100;
    // 1 second of stereo audio
    let data = vec![0.0f32; 88200];

    let clip = AudioClip::new(data, sample_rate).expect("Failed to create AudioClip");

    assert_eq!(clip.sample_rate(), sample_rate);
    assert_eq!(clip.frame_count(), 44100);
    assert!((clip.duration() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_audio_clip_clone_shares_data() {
    let clip1 = AudioClip::new(vec![0.0f32; 100], 44100).expect("Failed to create AudioClip");
    let clip2 = clip1.clone();
    assert!(std::sync::Arc::ptr_eq(clip1.data(), clip2.data()));
}

#[test]
fn test_audio_clip_odd_samples_error() {
    let result = AudioClip::new(vec![0.0f32; 3], 44100);
    assert!(result.is_err(), "Should fail with odd number of samples");
}

#[test]
fn test_mono_is_duplicated_to_stereo() {
    let clip = AudioClip::from_interleaved(&[0.1, 0.2, 0.3], 1, 22050).unwrap();
    assert_eq!(clip.frame_count(), 3);
    assert_eq!(clip.data().as_slice(), &[0.1, 0.1, 0.2, 0.2, 0.3, 0.3]);
}

#[test]
fn test_extra_channels_are_dropped() {
    let clip = AudioClip::from_interleaved(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 44100).unwrap();
    assert_eq!(clip.data().as_slice(), &[1.0, 2.0, 4.0, 5.0]);
    assert!(AudioClip::from_interleaved(&[1.0], 0, 44100).is_err());
}

#[test]
fn test_resample_keeps_duration() {
    let clip = AudioClip::new(vec![0.5f32; 2 * 22050], 22050).unwrap();
    let up = clip.resampled(44100).unwrap();
    assert_eq!(up.sample_rate(), 44100);
    assert_eq!(up.frame_count(), 44100);
    assert!((up.duration() - clip.duration()).abs() < 1e-9);
    assert!(up.data().iter().all(|&s| (s - 0.5).abs() < 1e-6));

    let same = clip.resampled(22050).unwrap();
    assert!(std::sync::Arc::ptr_eq(same.data(), clip.data()));
}

#[test]
fn test_missing_file_is_an_error() {
    let err = AudioClip::from_file("does/not/exist.wav").unwrap_err();
    assert!(format!("{err:#}").contains("does/not/exist.wav"));
}
