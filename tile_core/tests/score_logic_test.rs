use tile_core::gameplay::score::ScoreManager;

#[test]
fn test_combo_scales_each_hit() {
    let mut score = ScoreManager::new();

    let gains: Vec<i64> = (0..4)
        .map(|_| {
            let before = score.score();
            score.add_score(100).score - before
        })
        .collect();

    assert_eq!(gains, vec![110, 120, 130, 140]);
    assert_eq!(score.combo(), 4);
    assert_eq!(score.max_combo(), 4);
    assert_eq!(score.score(), 500);
}

#[test]
fn test_multiplier_caps_at_three() {
    let mut score = ScoreManager::new();
    for _ in 0..19 {
        score.add_score(100);
    }
    // combo 20 -> 3.0x, and it stays there
    for _ in 0..3 {
        let before = score.score();
        score.add_score(100);
        assert_eq!(score.score() - before, 300);
    }
    assert_eq!(ScoreManager::combo_multiplier(25), 3.0);
    assert!((ScoreManager::combo_multiplier(5) - 1.5).abs() < 1e-9);
}

#[test]
fn test_penalty_breaks_combo_but_keeps_max() {
    let mut score = ScoreManager::new();
    score.add_score(100);
    score.add_score(100);
    score.add_score(100);

    let snapshot = score.add_score(-50);
    assert_eq!(snapshot.combo, 0);
    assert_eq!(snapshot.max_combo, 3);
    // 110 + 120 + 130 - 50
    assert_eq!(snapshot.score, 310);

    let snapshot = score.add_score(100);
    assert_eq!(snapshot.combo, 1);
    assert_eq!(snapshot.score, 420);
}

#[test]
fn test_zero_points_count_as_a_miss() {
    let mut score = ScoreManager::new();
    score.add_score(100);
    let snapshot = score.add_score(0);
    assert_eq!(snapshot.combo, 0);
    assert_eq!(score.attempts(), 2);
    assert_eq!(score.hits(), 1);
    assert_eq!(snapshot.accuracy, 50);
}

#[test]
fn test_accuracy_is_hundred_before_any_attempt() {
    let score = ScoreManager::new();
    assert_eq!(score.accuracy(), 100.0);
    assert_eq!(score.snapshot().accuracy, 100);
}

#[test]
fn test_accuracy_stays_in_range() {
    let mut score = ScoreManager::new();
    for i in 0..37 {
        let points = if i % 3 == 0 { -50 } else { 100 };
        let snapshot = score.add_score(points);
        assert!(snapshot.accuracy <= 100);
        assert!(snapshot.max_combo >= snapshot.combo);
    }
    // 24 hits out of 37
    assert_eq!(score.snapshot().accuracy, 65);
}

#[test]
fn test_score_can_go_negative() {
    let mut score = ScoreManager::new();
    score.add_score(-50);
    score.add_score(-50);
    assert_eq!(score.score(), -100);
    assert_eq!(score.snapshot().accuracy, 0);
}
