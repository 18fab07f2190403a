use super::events::ScoreSnapshot;

/// Combo multiplier ceiling, in tenths (3.0x).
const MAX_MULTIPLIER_TENTHS: i64 = 30;

/// Running score, combo streak and accuracy for one level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreManager {
    score: i64,
    combo: u32,
    max_combo: u32,
    attempts: u32,
    hits: u32,
}

impl ScoreManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one resolved tile (or bonus).
    ///
    /// Positive points count as a hit: the combo grows by one and the points
    /// are scaled by `min(1 + combo * 0.1, 3)`, rounded down. Anything else
    /// breaks the combo and is added unscaled.
    pub fn add_score(&mut self, points: i64) -> ScoreSnapshot {
        self.attempts += 1;
        let points = if points > 0 {
            self.combo += 1;
            self.hits += 1;
            let tenths = (10 + i64::from(self.combo)).min(MAX_MULTIPLIER_TENTHS);
            points * tenths / 10
        } else {
            self.combo = 0;
            points
        };

        self.score += points;
        self.max_combo = self.max_combo.max(self.combo);
        self.snapshot()
    }

    /// Multiplier applied to a hit that brings the streak to `combo`.
    pub fn combo_multiplier(combo: u32) -> f64 {
        (1.0 + f64::from(combo) * 0.1).min(3.0)
    }

    /// `100 * hits / attempts`, or 100 before anything was resolved.
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            return 100.0;
        }
        (f64::from(self.hits) / f64::from(self.attempts) * 100.0).clamp(0.0, 100.0)
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            score: self.score,
            combo: self.combo,
            max_combo: self.max_combo,
            accuracy: self.accuracy().round() as u32,
        }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}
