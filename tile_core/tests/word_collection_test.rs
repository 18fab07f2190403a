use glam::Vec2;
use tile_core::gameplay::words::{Letter, LetterId, LetterState, WordCollection};
use tile_core::rng::SequenceRandom;

#[test]
fn test_word_completes_in_any_order() {
    let mut words = WordCollection::new("EXCEL");
    for c in ['L', 'E', 'C', 'X'] {
        let outcome = words.collect(c);
        assert!(outcome.kept);
        assert!(!outcome.completed);
    }

    let outcome = words.collect('E');
    assert!(outcome.completed);
    assert!(outcome.snapshot.collected.is_empty());
    assert_eq!(outcome.snapshot.target, "EXCEL");
    assert_eq!(words.completions(), 1);
    assert!(words.collected().is_empty());
}

#[test]
fn test_surplus_letters_are_dropped() {
    let mut words = WordCollection::new("EXCEL");
    assert!(words.collect('X').kept);
    let outcome = words.collect('X');
    assert!(!outcome.kept);
    assert_eq!(words.collected(), &['X']);

    assert!(words.collect('E').kept);
    assert!(words.collect('E').kept);
    assert!(!words.collect('E').kept);
    assert_eq!(words.collected().iter().filter(|&&c| c == 'E').count(), 2);
}

#[test]
fn test_letters_outside_target_are_ignored() {
    let mut words = WordCollection::new("EXCEL");
    let outcome = words.collect('Z');
    assert!(!outcome.kept);
    assert!(!outcome.completed);
    assert!(words.collected().is_empty());
}

#[test]
fn test_second_round_needs_all_letters_again() {
    let mut words = WordCollection::new("EXCEL");
    for c in "EXCEL".chars() {
        words.collect(c);
    }
    assert_eq!(words.completions(), 1);

    for c in "EXCE".chars() {
        assert!(!words.collect(c).completed);
    }
    assert!(words.collect('L').completed);
    assert_eq!(words.completions(), 2);
}

#[test]
fn test_snapshot_marks_filled_slots() {
    let mut words = WordCollection::new("EXCEL");
    words.collect('E');
    words.collect('L');

    let snapshot = words.snapshot();
    let filled: Vec<bool> = (0..5).map(|i| snapshot.slot_filled(i)).collect();
    // One E fills the first E slot only.
    assert_eq!(filled, vec![true, false, false, false, true]);
}

#[test]
fn test_roll_spawn_respects_chance_and_inset() {
    let words = WordCollection::new("EXCEL");

    let mut miss = SequenceRandom::new(vec![0.05]);
    assert_eq!(words.roll_spawn(&mut miss, 0.05, 375.0, 40.0), None);
    assert_eq!(miss.drawn(), 1);

    let mut low = SequenceRandom::new(vec![0.0, 0.5, 0.0]);
    let (c, x) = words.roll_spawn(&mut low, 0.05, 375.0, 40.0).unwrap();
    assert_eq!(c, 'C');
    assert_eq!(x, 40.0);

    let mut high = SequenceRandom::new(vec![0.01, 0.99, 0.9999]);
    let (c, x) = words.roll_spawn(&mut high, 0.05, 375.0, 40.0).unwrap();
    assert_eq!(c, 'L');
    assert!(x <= 335.0);
}

#[test]
fn test_letters_fall_and_leave_past_limit() {
    let mut words = WordCollection::new("EXCEL");
    words.push_letter(Letter::new(LetterId(1), 'E', Vec2::new(100.0, -50.0)));
    words.push_letter(Letter::new(LetterId(2), 'X', Vec2::new(200.0, 700.0)));

    words.advance(10.0, 705.0);
    assert_eq!(words.letters().len(), 1);
    assert_eq!(words.letters()[0].position.y, -40.0);
}

#[test]
fn test_collected_letter_lingers_for_animation() {
    let mut words = WordCollection::new("EXCEL");
    words.push_letter(Letter::new(LetterId(1), 'E', Vec2::new(100.0, 100.0)));

    let letter = words.letter_mut(LetterId(1)).unwrap();
    assert!(letter.try_collect(1_000.0));
    assert!(!letter.try_collect(1_010.0));
    assert_eq!(letter.state(), LetterState::Collected { at_ms: 1_000.0 });

    words.cull_collected(1_299.0, 300.0);
    assert_eq!(words.letters().len(), 1);
    words.cull_collected(1_300.0, 300.0);
    assert!(words.letters().is_empty());
}

#[test]
fn test_letter_hit_box() {
    let letter = Letter::new(LetterId(1), 'E', Vec2::new(100.0, 100.0));
    assert!(letter.contains(Vec2::new(119.0, 81.0), 40.0));
    assert!(!letter.contains(Vec2::new(121.0, 100.0), 40.0));
}
