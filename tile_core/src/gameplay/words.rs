use std::collections::HashMap;

use glam::Vec2;

use super::events::LetterSnapshot;
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LetterId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LetterState {
    Floating,
    /// Picked up; lingers for the collect animation.
    Collected { at_ms: f64 },
}

#[derive(Debug, Clone)]
pub struct Letter {
    pub id: LetterId,
    pub character: char,
    pub position: Vec2,
    state: LetterState,
}

impl Letter {
    pub fn new(id: LetterId, character: char, position: Vec2) -> Self {
        Self {
            id,
            character,
            position,
            state: LetterState::Floating,
        }
    }

    pub fn state(&self) -> LetterState {
        self.state
    }

    pub fn is_floating(&self) -> bool {
        self.state == LetterState::Floating
    }

    pub fn try_collect(&mut self, now_ms: f64) -> bool {
        if self.state != LetterState::Floating {
            return false;
        }
        self.state = LetterState::Collected { at_ms: now_ms };
        true
    }

    pub fn contains(&self, point: Vec2, size: f32) -> bool {
        let d = (point - self.position).abs();
        d.x <= size * 0.5 && d.y <= size * 0.5
    }
}

/// Result of feeding one letter into the word.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    /// `false` when the word already held every copy of this character.
    pub kept: bool,
    pub completed: bool,
    pub snapshot: LetterSnapshot,
}

/// Tracks the letters gathered towards a fixed target word and the letter
/// entities currently drifting down the view.
#[derive(Debug, Clone)]
pub struct WordCollection {
    target: String,
    needed: HashMap<char, usize>,
    collected: Vec<char>,
    letters: Vec<Letter>,
    completions: u32,
}

impl WordCollection {
    pub fn new(target: &str) -> Self {
        let mut needed = HashMap::new();
        for c in target.chars() {
            *needed.entry(c).or_insert(0) += 1;
        }
        Self {
            target: target.to_string(),
            needed,
            collected: Vec::new(),
            letters: Vec::new(),
            completions: 0,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn collected(&self) -> &[char] {
        &self.collected
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn completions(&self) -> u32 {
        self.completions
    }

    pub fn snapshot(&self) -> LetterSnapshot {
        LetterSnapshot {
            collected: self.collected.clone(),
            target: self.target.clone(),
        }
    }

    /// With probability `chance`, picks a character of the target word and a
    /// horizontal position at least `inset` away from both view edges.
    pub fn roll_spawn(
        &self,
        rng: &mut impl RandomSource,
        chance: f64,
        view_width: f32,
        inset: f32,
    ) -> Option<(char, f32)> {
        if rng.unit() >= chance {
            return None;
        }
        let chars: Vec<char> = self.target.chars().collect();
        if chars.is_empty() {
            return None;
        }
        let character = chars[rng.below(chars.len())];
        let span = (view_width - 2.0 * inset).max(0.0);
        let x = rng.unit() as f32 * span + inset;
        Some((character, x))
    }

    pub fn push_letter(&mut self, letter: Letter) {
        self.letters.push(letter);
    }

    pub fn letter_mut(&mut self, id: LetterId) -> Option<&mut Letter> {
        self.letters.iter_mut().find(|l| l.id == id)
    }

    /// Adds `character` to the word and resets it once every character of the
    /// target is covered with at least the target's count.
    pub fn collect(&mut self, character: char) -> Collection {
        let need = self.needed.get(&character).copied().unwrap_or(0);
        let have = self.collected.iter().filter(|&&c| c == character).count();
        let kept = have < need;
        if kept {
            self.collected.push(character);
        }

        let completed = self.is_complete();
        if completed {
            self.collected.clear();
            self.completions += 1;
        }

        Collection {
            kept,
            completed,
            snapshot: self.snapshot(),
        }
    }

    fn is_complete(&self) -> bool {
        let mut have: HashMap<char, usize> = HashMap::new();
        for &c in &self.collected {
            *have.entry(c).or_insert(0) += 1;
        }
        !self.needed.is_empty()
            && self
                .needed
                .iter()
                .all(|(c, n)| have.get(c).copied().unwrap_or(0) >= *n)
    }

    /// Moves floating and animating letters down and drops the ones below
    /// `limit_y`.
    pub fn advance(&mut self, dy: f32, limit_y: f32) {
        for letter in &mut self.letters {
            letter.position.y += dy;
        }
        self.letters.retain(|l| l.position.y <= limit_y);
    }

    /// Removes collected letters whose animation finished.
    pub fn cull_collected(&mut self, now_ms: f64, animation_ms: f64) {
        self.letters.retain(|l| match l.state {
            LetterState::Collected { at_ms } => now_ms - at_ms < animation_ms,
            LetterState::Floating => true,
        });
    }
}
