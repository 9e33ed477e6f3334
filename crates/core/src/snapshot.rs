use crate::{GameEngine, Scorecard, Turn, Winner};
use serde::Serialize;

/// Pure-data view of the whole game, built on demand for broadcast. No
/// behavior lives here; everything is recomputed from the engine.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub game_started: bool,
    pub scorecards: Vec<ScorecardView>,
    pub current_turn: Option<TurnView>,
    pub winner: Option<WinnerView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScorecardView {
    pub player: String,
    pub scores: Vec<ScoreView>,
    pub upper_bonus: u32,
    pub upper_total: u32,
    pub lower_total: u32,
    pub grand_total: u32,
    pub joker_bonus: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    pub score_type: &'static str,
    pub points: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DieView {
    pub die_id: u8,
    pub face_value: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnView {
    pub player: String,
    pub dice: Vec<DieView>,
    pub roll_count: u8,
    pub selected_score_type: Option<&'static str>,
    /// Preview points per category; absent once the turn has been scored.
    pub valid_scores: Option<Vec<ScorePreview>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScorePreview {
    pub score_type: &'static str,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WinnerView {
    pub player: String,
    pub grand_total: u32,
}

impl GameSnapshot {
    pub fn capture(engine: &GameEngine) -> Self {
        let current_turn = engine
            .current_turn()
            .map(|turn| turn_view(turn, engine.current_scorecard()));
        Self {
            game_started: engine.has_started(),
            scorecards: engine.scorecards().iter().map(scorecard_view).collect(),
            current_turn,
            winner: engine.winner().map(winner_view),
        }
    }
}

fn scorecard_view(card: &Scorecard) -> ScorecardView {
    ScorecardView {
        player: card.player().to_string(),
        scores: card
            .slots()
            .iter()
            .map(|slot| ScoreView {
                score_type: slot.score_type().id(),
                points: slot.bound_points(),
            })
            .collect(),
        upper_bonus: card.upper_bonus(),
        upper_total: card.upper_total(),
        lower_total: card.lower_total(),
        grand_total: card.grand_total(),
        joker_bonus: card.joker_bonus(),
    }
}

fn turn_view(turn: &Turn, card: Option<&Scorecard>) -> TurnView {
    let valid_scores = if turn.is_complete() {
        None
    } else {
        card.map(|card| {
            card.preview_scores(turn.roll())
                .into_iter()
                .map(|(kind, points)| ScorePreview {
                    score_type: kind.id(),
                    points,
                })
                .collect()
        })
    };
    TurnView {
        player: turn.player().to_string(),
        dice: turn
            .roll()
            .dice()
            .iter()
            .map(|die| DieView {
                die_id: die.id(),
                face_value: die.face_value(),
            })
            .collect(),
        roll_count: turn.roll_count(),
        selected_score_type: turn.selected_score_type().map(|kind| kind.id()),
        valid_scores,
    }
}

fn winner_view(winner: &Winner) -> WinnerView {
    WinnerView {
        player: winner.player.clone(),
        grand_total: winner.grand_total,
    }
}
