use crate::{ScoreType, DIE_COUNT};
use serde::{Deserialize, Serialize};

/// Facts the engine emits on every successful mutation, in order. The
/// transport drains these to build transcripts and notify players.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    GameStarted {
        players: Vec<String>,
    },
    TurnStarted {
        player: String,
    },
    DiceRolled {
        player: String,
        faces: [u8; DIE_COUNT],
        roll_count: u8,
    },
    ScoreSelected {
        player: String,
        score_type: ScoreType,
        points: u32,
    },
    GameCompleted {
        winner: String,
        grand_total: u32,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
