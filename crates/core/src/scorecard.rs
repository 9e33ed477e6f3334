use crate::{Roll, ScoreSlot, ScoreType, Section};
use serde::{Deserialize, Serialize};

pub const SLOT_COUNT: usize = 13;
pub const UPPER_BONUS_POINTS: u32 = 35;
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
pub const JOKER_BONUS_POINTS: u32 = 100;

/// One player's card: thirteen write-once slots plus the accumulated joker
/// bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    player: String,
    slots: Vec<ScoreSlot>,
    joker_bonus: u32,
}

impl Scorecard {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            slots: ScoreType::ALL.iter().map(|&kind| ScoreSlot::new(kind)).collect(),
            joker_bonus: 0,
        }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn slots(&self) -> &[ScoreSlot] {
        &self.slots
    }

    pub fn joker_bonus(&self) -> u32 {
        self.joker_bonus
    }

    pub fn completed_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_bound()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.completed_slots() == SLOT_COUNT
    }

    pub fn points_for(&self, score_type: ScoreType) -> Option<u32> {
        self.slot(score_type).bound_points()
    }

    /// A second five-of-a-kind rolled after Yahtzee has already been scored.
    pub fn is_joker_event(&self, roll: &Roll) -> bool {
        self.slot(ScoreType::Yahtzee).is_bound() && ScoreType::Yahtzee.is_valid_for(roll)
    }

    /// Bind `roll` into the slot for `score_type`.
    ///
    /// On a joker event the bonus counter goes up by 100 and FullHouse or the
    /// straights bind a canonical pattern instead of the real dice, so the
    /// slot scores at full value regardless of the actual faces. House rule:
    /// there is no upper-section precondition. Binding is always write-once.
    pub fn select_score(&mut self, score_type: ScoreType, roll: &Roll) {
        if self.is_joker_event(roll) {
            self.joker_bonus += JOKER_BONUS_POINTS;
            let bound = match score_type {
                ScoreType::FullHouse => Roll::full_house_pattern(),
                ScoreType::SmallStraight | ScoreType::LargeStraight => Roll::straight_pattern(),
                _ => roll.clone(),
            };
            self.slot_mut(score_type).bind(bound);
        } else {
            self.slot_mut(score_type).bind(roll.clone());
        }
    }

    pub fn upper_sum(&self) -> u32 {
        self.section_sum(Section::Upper)
    }

    pub fn upper_bonus(&self) -> u32 {
        if self.upper_sum() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS_POINTS
        } else {
            0
        }
    }

    pub fn upper_total(&self) -> u32 {
        self.upper_sum() + self.upper_bonus()
    }

    pub fn lower_total(&self) -> u32 {
        self.section_sum(Section::Lower) + self.joker_bonus
    }

    pub fn grand_total(&self) -> u32 {
        self.upper_total() + self.lower_total()
    }

    pub fn valid_score_types(&self, roll: &Roll) -> Vec<ScoreType> {
        ScoreType::ALL
            .iter()
            .copied()
            .filter(|kind| kind.is_valid_for(roll))
            .collect()
    }

    /// Per-roll preview over all thirteen categories, in scorecard order.
    /// When a joker event would apply, previews skip the validity predicates
    /// so the relaxed joker scores show through.
    pub fn preview_scores(&self, roll: &Roll) -> Vec<(ScoreType, u32)> {
        let joker = self.is_joker_event(roll);
        ScoreType::ALL
            .iter()
            .map(|&kind| {
                let points = if joker {
                    kind.joker_points(roll)
                } else {
                    kind.preview_points(roll)
                };
                (kind, points)
            })
            .collect()
    }

    fn slot(&self, score_type: ScoreType) -> &ScoreSlot {
        // ALL order is the slot order.
        &self.slots[slot_index(score_type)]
    }

    fn slot_mut(&mut self, score_type: ScoreType) -> &mut ScoreSlot {
        &mut self.slots[slot_index(score_type)]
    }

    fn section_sum(&self, section: Section) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.score_type().section() == section)
            .filter_map(|slot| slot.bound_points())
            .sum()
    }
}

fn slot_index(score_type: ScoreType) -> usize {
    // Declaration order is the slot order; ALL lists the variants in the
    // same order, which slot_index_matches_declaration_order pins down.
    score_type as usize
}
