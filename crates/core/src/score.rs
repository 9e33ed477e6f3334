use crate::Roll;
use serde::{Deserialize, Serialize};

pub const FULL_HOUSE_POINTS: u32 = 25;
pub const SMALL_STRAIGHT_POINTS: u32 = 30;
pub const LARGE_STRAIGHT_POINTS: u32 = 40;
pub const YAHTZEE_POINTS: u32 = 50;

const SMALL_STRAIGHT_WINDOWS: [[u8; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];
const LARGE_STRAIGHT_WINDOWS: [[u8; 5]; 2] = [[1, 2, 3, 4, 5], [2, 3, 4, 5, 6]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Section {
    Upper,
    Lower,
}

/// The thirteen scoring categories, in scorecard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreType {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

impl ScoreType {
    pub const ALL: [ScoreType; 13] = [
        ScoreType::Ones,
        ScoreType::Twos,
        ScoreType::Threes,
        ScoreType::Fours,
        ScoreType::Fives,
        ScoreType::Sixes,
        ScoreType::ThreeOfAKind,
        ScoreType::FourOfAKind,
        ScoreType::FullHouse,
        ScoreType::SmallStraight,
        ScoreType::LargeStraight,
        ScoreType::Yahtzee,
        ScoreType::Chance,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ScoreType::Ones => "ONES",
            ScoreType::Twos => "TWOS",
            ScoreType::Threes => "THREES",
            ScoreType::Fours => "FOURS",
            ScoreType::Fives => "FIVES",
            ScoreType::Sixes => "SIXES",
            ScoreType::ThreeOfAKind => "THREE_OF_A_KIND",
            ScoreType::FourOfAKind => "FOUR_OF_A_KIND",
            ScoreType::FullHouse => "FULL_HOUSE",
            ScoreType::SmallStraight => "SMALL_STRAIGHT",
            ScoreType::LargeStraight => "LARGE_STRAIGHT",
            ScoreType::Yahtzee => "YAHTZEE",
            ScoreType::Chance => "CHANCE",
        }
    }

    /// Case-insensitive match against the wire names.
    pub fn parse(name: &str) -> Option<ScoreType> {
        let name = name.trim().to_ascii_uppercase();
        ScoreType::ALL.iter().copied().find(|kind| kind.id() == name)
    }

    pub fn section(self) -> Section {
        match self {
            ScoreType::Ones
            | ScoreType::Twos
            | ScoreType::Threes
            | ScoreType::Fours
            | ScoreType::Fives
            | ScoreType::Sixes => Section::Upper,
            _ => Section::Lower,
        }
    }

    /// Validity predicate from the rulebook. Grouping works on the face-value
    /// histogram, so ThreeOfAKind and FullHouse are independently satisfiable.
    pub fn is_valid_for(self, roll: &Roll) -> bool {
        let counts = roll.face_counts();
        match self {
            ScoreType::Ones
            | ScoreType::Twos
            | ScoreType::Threes
            | ScoreType::Fours
            | ScoreType::Fives
            | ScoreType::Sixes
            | ScoreType::Chance => true,
            ScoreType::ThreeOfAKind => counts.iter().filter(|&&count| count >= 3).count() == 1,
            ScoreType::FourOfAKind => counts.iter().filter(|&&count| count >= 4).count() == 1,
            ScoreType::FullHouse => {
                counts.iter().filter(|&&count| count == 3).count() == 1
                    && counts.iter().filter(|&&count| count == 2).count() == 1
            }
            ScoreType::SmallStraight => SMALL_STRAIGHT_WINDOWS
                .iter()
                .any(|window| contains_window(&counts, window)),
            ScoreType::LargeStraight => LARGE_STRAIGHT_WINDOWS
                .iter()
                .any(|window| contains_window(&counts, window)),
            ScoreType::Yahtzee => counts.iter().any(|&count| count == 5),
        }
    }

    /// Points if the roll were scored here; 0 when the roll is invalid for
    /// this category. Non-destructive, used for per-roll previews.
    pub fn preview_points(self, roll: &Roll) -> u32 {
        if self.is_valid_for(roll) {
            self.raw_points(roll)
        } else {
            0
        }
    }

    /// Point formula with the validity predicate skipped; joker scoring only.
    pub fn joker_points(self, roll: &Roll) -> u32 {
        self.raw_points(roll)
    }

    fn raw_points(self, roll: &Roll) -> u32 {
        match self {
            ScoreType::Ones => face_sum(roll, 1),
            ScoreType::Twos => face_sum(roll, 2),
            ScoreType::Threes => face_sum(roll, 3),
            ScoreType::Fours => face_sum(roll, 4),
            ScoreType::Fives => face_sum(roll, 5),
            ScoreType::Sixes => face_sum(roll, 6),
            ScoreType::ThreeOfAKind | ScoreType::FourOfAKind | ScoreType::Chance => roll.sum(),
            ScoreType::FullHouse => FULL_HOUSE_POINTS,
            ScoreType::SmallStraight => SMALL_STRAIGHT_POINTS,
            ScoreType::LargeStraight => LARGE_STRAIGHT_POINTS,
            ScoreType::Yahtzee => YAHTZEE_POINTS,
        }
    }
}

fn face_sum(roll: &Roll, target: u8) -> u32 {
    roll.faces()
        .iter()
        .filter(|&&face| face == target)
        .map(|&face| face as u32)
        .sum()
}

fn contains_window(counts: &[u8; 7], window: &[u8]) -> bool {
    window.iter().all(|&face| counts[face as usize] > 0)
}

/// One category slot on a scorecard. Holds at most one roll ever; the first
/// binding permanently fixes the slot's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSlot {
    score_type: ScoreType,
    selected_roll: Option<Roll>,
}

impl ScoreSlot {
    pub fn new(score_type: ScoreType) -> Self {
        Self {
            score_type,
            selected_roll: None,
        }
    }

    pub fn score_type(&self) -> ScoreType {
        self.score_type
    }

    pub fn is_bound(&self) -> bool {
        self.selected_roll.is_some()
    }

    /// Write-once: a later bind against a bound slot is a no-op.
    pub fn bind(&mut self, roll: Roll) {
        if self.selected_roll.is_none() {
            self.selected_roll = Some(roll);
        }
    }

    /// None until a roll is bound; 0 if the bound roll is invalid here.
    pub fn bound_points(&self) -> Option<u32> {
        self.selected_roll
            .as_ref()
            .map(|roll| self.score_type.preview_points(roll))
    }
}
