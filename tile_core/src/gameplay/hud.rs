/// Colour band for the combo counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboTier {
    Plain,
    Blue,
    Yellow,
}

pub fn combo_tier(combo: u32) -> ComboTier {
    if combo > 10 {
        ComboTier::Yellow
    } else if combo > 5 {
        ComboTier::Blue
    } else {
        ComboTier::Plain
    }
}

/// Colour band for the accuracy readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyTier {
    Good,
    Fair,
    Poor,
}

pub fn accuracy_tier(accuracy: u32) -> AccuracyTier {
    match accuracy {
        95.. => AccuracyTier::Good,
        80..=94 => AccuracyTier::Fair,
        _ => AccuracyTier::Poor,
    }
}

/// `m:ss` for a millisecond count.
pub fn format_clock(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}
