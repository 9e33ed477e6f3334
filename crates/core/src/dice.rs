use crate::RngState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DIE_COUNT: usize = 5;
pub const MIN_FACE_VALUE: u8 = 1;
pub const MAX_FACE_VALUE: u8 = 6;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiceError {
    #[error("die id out of range: {0}")]
    InvalidDieId(u8),
    #[error("face value out of range: {0}")]
    InvalidFaceValue(u8),
    #[error("duplicate die id in selection: {0}")]
    DuplicateDieId(u8),
}

/// A single identified die. Identity is the id; the face value changes on
/// every roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    id: u8,
    face_value: u8,
}

impl Die {
    pub fn new(id: u8, face_value: u8) -> Result<Self, DiceError> {
        if !(1..=DIE_COUNT as u8).contains(&id) {
            return Err(DiceError::InvalidDieId(id));
        }
        if !(MIN_FACE_VALUE..=MAX_FACE_VALUE).contains(&face_value) {
            return Err(DiceError::InvalidFaceValue(face_value));
        }
        Ok(Self { id, face_value })
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn face_value(&self) -> u8 {
        self.face_value
    }

    /// Fresh die with the same id and a new random face.
    pub fn rolled(&self, rng: &mut RngState) -> Self {
        Self {
            id: self.id,
            face_value: rng.face_value(),
        }
    }
}

/// Exactly five dice, one per id 1..=5, kept in id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    dice: [Die; DIE_COUNT],
}

impl Roll {
    pub fn random(rng: &mut RngState) -> Self {
        let mut id = 0;
        let dice = [(); DIE_COUNT].map(|_| {
            id += 1;
            Die {
                id,
                face_value: rng.face_value(),
            }
        });
        Self { dice }
    }

    pub fn from_faces(faces: [u8; DIE_COUNT]) -> Result<Self, DiceError> {
        let mut dice = [Die {
            id: 1,
            face_value: MIN_FACE_VALUE,
        }; DIE_COUNT];
        for (slot, face_value) in faces.into_iter().enumerate() {
            dice[slot] = Die::new(slot as u8 + 1, face_value)?;
        }
        Ok(Self { dice })
    }

    pub fn dice(&self) -> &[Die; DIE_COUNT] {
        &self.dice
    }

    pub fn faces(&self) -> [u8; DIE_COUNT] {
        self.dice.map(|die| die.face_value)
    }

    pub fn die(&self, id: u8) -> Option<&Die> {
        self.dice.iter().find(|die| die.id == id)
    }

    /// New roll where dice named in `die_ids` get fresh random faces and the
    /// rest pass through unchanged. Validates the selection before touching
    /// any die.
    pub fn reroll_selected(&self, die_ids: &[u8], rng: &mut RngState) -> Result<Self, DiceError> {
        let mut selected = [false; DIE_COUNT];
        for &id in die_ids {
            if !(1..=DIE_COUNT as u8).contains(&id) {
                return Err(DiceError::InvalidDieId(id));
            }
            let slot = (id - 1) as usize;
            if selected[slot] {
                return Err(DiceError::DuplicateDieId(id));
            }
            selected[slot] = true;
        }
        let dice = self.dice.map(|die| {
            if selected[(die.id - 1) as usize] {
                die.rolled(rng)
            } else {
                die
            }
        });
        Ok(Self { dice })
    }

    pub fn sum(&self) -> u32 {
        self.dice.iter().map(|die| die.face_value as u32).sum()
    }

    /// Histogram of face values; index 0 is unused.
    pub fn face_counts(&self) -> [u8; 7] {
        let mut counts = [0u8; 7];
        for die in &self.dice {
            counts[die.face_value as usize] += 1;
        }
        counts
    }

    /// Canonical full house bound in place of the real dice on a joker event.
    pub fn full_house_pattern() -> Self {
        Self::with_fixed_faces([1, 1, 1, 2, 2])
    }

    /// Canonical straight bound in place of the real dice on a joker event.
    pub fn straight_pattern() -> Self {
        Self::with_fixed_faces([1, 2, 3, 4, 5])
    }

    fn with_fixed_faces(faces: [u8; DIE_COUNT]) -> Self {
        let mut id = 0;
        let dice = faces.map(|face_value| {
            id += 1;
            Die { id, face_value }
        });
        Self { dice }
    }
}
