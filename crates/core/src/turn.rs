use crate::{EngineError, RngState, Roll, ScoreType};

pub const MAX_ROLL_COUNT: u8 = 3;

/// Per-player-per-round state: the in-progress roll and the reroll counter.
/// A fresh turn starts with a brand-new randomized roll.
#[derive(Debug, Clone)]
pub struct Turn {
    player: String,
    roll: Roll,
    roll_count: u8,
    selected: Option<ScoreType>,
}

impl Turn {
    pub fn new(player: impl Into<String>, rng: &mut RngState) -> Self {
        Self {
            player: player.into(),
            roll: Roll::random(rng),
            roll_count: 0,
            selected: None,
        }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn roll(&self) -> &Roll {
        &self.roll
    }

    pub fn roll_count(&self) -> u8 {
        self.roll_count
    }

    pub fn selected_score_type(&self) -> Option<ScoreType> {
        self.selected
    }

    pub fn is_complete(&self) -> bool {
        self.selected.is_some()
    }

    /// Reroll the named dice. Rejected without touching the roll when the
    /// counter is exhausted or the selection is malformed.
    pub fn reroll(&mut self, die_ids: &[u8], rng: &mut RngState) -> Result<(), EngineError> {
        if self.roll_count == MAX_ROLL_COUNT {
            return Err(EngineError::TooManyRolls);
        }
        self.roll = self.roll.reroll_selected(die_ids, rng)?;
        self.roll_count += 1;
        Ok(())
    }

    /// Ends the turn. The first selection sticks.
    pub fn select(&mut self, score_type: ScoreType) {
        if self.selected.is_none() {
            self.selected = Some(score_type);
        }
    }
}
