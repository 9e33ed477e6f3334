use crate::{
    DiceError, Event, EventBus, Player, RngState, ScoreType, Scorecard, Turn,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("the game has not started")]
    ActionBeforeGameStart,
    #[error("the game is already complete")]
    ActionAfterGameComplete,
    #[error("a game is already in progress")]
    GameAlreadyStarted,
    #[error("cannot start a game with no players")]
    NoPlayers,
    #[error("dice have already been rolled the maximum number of times this turn")]
    TooManyRolls,
    #[error("unknown score type: {0}")]
    UnknownScoreType(String),
    #[error("invalid die selection: {0}")]
    InvalidDieSelection(#[from] DiceError),
    #[error("it is not {0}'s turn")]
    NotYourTurn(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Winner {
    pub player: String,
    pub grand_total: u32,
}

/// Round-robin orchestrator over one scorecard per player. Processes exactly
/// one action at a time; callers serialize concurrent submissions before they
/// get here. Every rejection leaves the engine untouched.
#[derive(Debug)]
pub struct GameEngine {
    scorecards: Vec<Scorecard>,
    cursor: usize,
    current_turn: Option<Turn>,
    winner: Option<Winner>,
    rng: RngState,
}

impl GameEngine {
    pub fn new(rng: RngState) -> Self {
        Self {
            scorecards: Vec::new(),
            cursor: 0,
            current_turn: None,
            winner: None,
            rng,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.winner.is_some() {
            GamePhase::Complete
        } else if self.current_turn.is_some() {
            GamePhase::InProgress
        } else {
            GamePhase::NotStarted
        }
    }

    pub fn has_started(&self) -> bool {
        self.phase() != GamePhase::NotStarted
    }

    pub fn scorecards(&self) -> &[Scorecard] {
        &self.scorecards
    }

    pub fn current_turn(&self) -> Option<&Turn> {
        self.current_turn.as_ref()
    }

    pub fn current_scorecard(&self) -> Option<&Scorecard> {
        self.scorecards.get(self.cursor)
    }

    pub fn winner(&self) -> Option<&Winner> {
        self.winner.as_ref()
    }

    /// One scorecard per player in join order, then the first player's turn.
    pub fn start_game(
        &mut self,
        players: &[Player],
        events: &mut EventBus,
    ) -> Result<(), EngineError> {
        match self.phase() {
            GamePhase::InProgress => return Err(EngineError::GameAlreadyStarted),
            GamePhase::Complete => return Err(EngineError::ActionAfterGameComplete),
            GamePhase::NotStarted => {}
        }
        if players.is_empty() {
            return Err(EngineError::NoPlayers);
        }
        self.scorecards = players
            .iter()
            .map(|player| Scorecard::new(&player.name))
            .collect();
        self.cursor = 0;
        let first = players[0].name.clone();
        self.current_turn = Some(Turn::new(&first, &mut self.rng));
        events.push(Event::GameStarted {
            players: players.iter().map(|player| player.name.clone()).collect(),
        });
        events.push(Event::TurnStarted { player: first });
        Ok(())
    }

    /// Reroll the named dice for the active player's turn.
    pub fn roll_dice(
        &mut self,
        player: &str,
        die_ids: &[u8],
        events: &mut EventBus,
    ) -> Result<(), EngineError> {
        self.ensure_in_progress()?;
        let Some(turn) = self.current_turn.as_mut() else {
            return Err(EngineError::ActionBeforeGameStart);
        };
        if turn.player() != player {
            return Err(EngineError::NotYourTurn(player.to_string()));
        }
        turn.reroll(die_ids, &mut self.rng)?;
        events.push(Event::DiceRolled {
            player: player.to_string(),
            faces: turn.roll().faces(),
            roll_count: turn.roll_count(),
        });
        Ok(())
    }

    /// Score the active turn into the named category, then advance the
    /// round-robin or finish the game.
    pub fn select_score(
        &mut self,
        player: &str,
        score_type_name: &str,
        events: &mut EventBus,
    ) -> Result<(), EngineError> {
        self.ensure_in_progress()?;
        let score_type = ScoreType::parse(score_type_name)
            .ok_or_else(|| EngineError::UnknownScoreType(score_type_name.to_string()))?;
        let Some(turn) = self.current_turn.as_mut() else {
            return Err(EngineError::ActionBeforeGameStart);
        };
        if turn.player() != player {
            return Err(EngineError::NotYourTurn(player.to_string()));
        }
        let roll = turn.roll().clone();
        turn.select(score_type);
        let scorecard = &mut self.scorecards[self.cursor];
        // Re-selecting a bound category wastes the turn: the slot keeps its
        // first roll and the event reports zero points for this selection.
        let already_bound = scorecard.points_for(score_type).is_some();
        scorecard.select_score(score_type, &roll);
        let points = if already_bound {
            0
        } else {
            scorecard.points_for(score_type).unwrap_or(0)
        };
        events.push(Event::ScoreSelected {
            player: player.to_string(),
            score_type,
            points,
        });
        self.advance(events);
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<(), EngineError> {
        match self.phase() {
            GamePhase::NotStarted => Err(EngineError::ActionBeforeGameStart),
            GamePhase::Complete => Err(EngineError::ActionAfterGameComplete),
            GamePhase::InProgress => Ok(()),
        }
    }

    fn advance(&mut self, events: &mut EventBus) {
        if self.scorecards.iter().all(Scorecard::is_complete) {
            if let Some((idx, grand_total)) = winning_card(&self.scorecards) {
                let player = self.scorecards[idx].player().to_string();
                events.push(Event::GameCompleted {
                    winner: player.clone(),
                    grand_total,
                });
                self.winner = Some(Winner {
                    player,
                    grand_total,
                });
            }
            return;
        }
        self.cursor = (self.cursor + 1) % self.scorecards.len();
        let player = self.scorecards[self.cursor].player().to_string();
        self.current_turn = Some(Turn::new(&player, &mut self.rng));
        events.push(Event::TurnStarted { player });
    }
}

/// Index and grand total of the winning card. Strict max scan, so on equal
/// grand totals the earliest joiner keeps the crown.
fn winning_card(scorecards: &[Scorecard]) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (idx, card) in scorecards.iter().enumerate() {
        let total = card.grand_total();
        if best.map(|(_, top)| total > top).unwrap_or(true) {
            best = Some((idx, total));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Roll;

    fn engine_with(players: &[&str], seed: u64) -> (GameEngine, EventBus) {
        let mut engine = GameEngine::new(RngState::from_seed(seed));
        let mut events = EventBus::default();
        let players: Vec<Player> = players
            .iter()
            .enumerate()
            .map(|(idx, name)| Player::new(*name, idx as u64))
            .collect();
        engine.start_game(&players, &mut events).unwrap();
        (engine, events)
    }

    #[test]
    fn actions_before_start_are_rejected() {
        let mut engine = GameEngine::new(RngState::from_seed(1));
        let mut events = EventBus::default();
        assert_eq!(
            engine.roll_dice("alice", &[1], &mut events),
            Err(EngineError::ActionBeforeGameStart)
        );
        assert_eq!(
            engine.select_score("alice", "CHANCE", &mut events),
            Err(EngineError::ActionBeforeGameStart)
        );
    }

    #[test]
    fn start_game_rejects_empty_roster_and_restarts() {
        let mut engine = GameEngine::new(RngState::from_seed(1));
        let mut events = EventBus::default();
        assert_eq!(
            engine.start_game(&[], &mut events),
            Err(EngineError::NoPlayers)
        );
        let players = vec![Player::new("alice", 0)];
        engine.start_game(&players, &mut events).unwrap();
        assert_eq!(
            engine.start_game(&players, &mut events),
            Err(EngineError::GameAlreadyStarted)
        );
    }

    #[test]
    fn first_turn_belongs_to_the_first_joiner() {
        let (engine, _) = engine_with(&["alice", "bob"], 5);
        assert_eq!(engine.current_turn().map(Turn::player), Some("alice"));
        assert_eq!(engine.scorecards().len(), 2);
    }

    #[test]
    fn off_turn_actions_are_rejected() {
        let (mut engine, mut events) = engine_with(&["alice", "bob"], 5);
        assert_eq!(
            engine.roll_dice("bob", &[1], &mut events),
            Err(EngineError::NotYourTurn("bob".to_string()))
        );
        assert_eq!(
            engine.select_score("bob", "CHANCE", &mut events),
            Err(EngineError::NotYourTurn("bob".to_string()))
        );
        // Alice is untouched by bob's rejected actions.
        assert_eq!(engine.current_turn().map(Turn::roll_count), Some(0));
    }

    #[test]
    fn unknown_score_type_is_rejected() {
        let (mut engine, mut events) = engine_with(&["alice"], 5);
        assert_eq!(
            engine.select_score("alice", "GRAND_SLAM", &mut events),
            Err(EngineError::UnknownScoreType("GRAND_SLAM".to_string()))
        );
        assert_eq!(engine.current_turn().map(Turn::is_complete), Some(false));
    }

    #[test]
    fn score_type_names_match_case_insensitively() {
        let (mut engine, mut events) = engine_with(&["alice", "bob"], 5);
        engine.select_score("alice", "chance", &mut events).unwrap();
        assert_eq!(engine.current_turn().map(Turn::player), Some("bob"));
    }

    #[test]
    fn selecting_a_score_rotates_the_turn() {
        let (mut engine, mut events) = engine_with(&["alice", "bob"], 5);
        engine.select_score("alice", "CHANCE", &mut events).unwrap();
        assert_eq!(engine.current_turn().map(Turn::player), Some("bob"));
        engine.select_score("bob", "CHANCE", &mut events).unwrap();
        assert_eq!(engine.current_turn().map(Turn::player), Some("alice"));
    }

    #[test]
    fn fourth_roll_is_rejected_through_the_engine() {
        let (mut engine, mut events) = engine_with(&["alice"], 5);
        for _ in 0..3 {
            engine.roll_dice("alice", &[1, 2], &mut events).unwrap();
        }
        assert_eq!(
            engine.roll_dice("alice", &[1], &mut events),
            Err(EngineError::TooManyRolls)
        );
    }

    fn filled_card(name: &str, faces: [u8; 5]) -> Scorecard {
        let mut card = Scorecard::new(name);
        let roll = Roll::from_faces(faces).unwrap();
        for kind in ScoreType::ALL {
            card.select_score(kind, &roll);
        }
        card
    }

    #[test]
    fn tied_grand_totals_go_to_the_earliest_joiner() {
        let cards = vec![
            filled_card("alice", [1, 2, 3, 4, 5]),
            filled_card("bob", [1, 2, 3, 4, 5]),
        ];
        assert!(cards.iter().all(Scorecard::is_complete));
        assert_eq!(cards[0].grand_total(), cards[1].grand_total());
        assert_eq!(winning_card(&cards), Some((0, cards[0].grand_total())));
    }

    #[test]
    fn higher_grand_total_beats_join_order() {
        let cards = vec![
            filled_card("alice", [1, 2, 3, 4, 5]),
            filled_card("bob", [6, 6, 6, 6, 6]),
        ];
        assert!(cards[1].grand_total() > cards[0].grand_total());
        assert_eq!(winning_card(&cards).map(|(idx, _)| idx), Some(1));
    }

    #[test]
    fn rebinding_a_taken_category_reports_zero_points() {
        let (mut engine, mut events) = engine_with(&["alice"], 9);
        drop(events.drain());
        engine.select_score("alice", "CHANCE", &mut events).unwrap();
        let first = engine.scorecards()[0].points_for(ScoreType::Chance);
        assert!(first.map(|points| points > 0).unwrap_or(false));

        // Solo game, so alice is active again; the slot keeps its first roll.
        engine.select_score("alice", "CHANCE", &mut events).unwrap();
        assert_eq!(engine.scorecards()[0].points_for(ScoreType::Chance), first);

        let reported: Vec<u32> = events
            .drain()
            .filter_map(|event| match event {
                Event::ScoreSelected { points, .. } => Some(points),
                _ => None,
            })
            .collect();
        assert_eq!(reported.len(), 2);
        assert_eq!(Some(reported[0]), first);
        assert_eq!(reported[1], 0);
    }

    #[test]
    fn events_record_the_action_stream() {
        let (mut engine, mut events) = engine_with(&["alice", "bob"], 5);
        let start: Vec<Event> = events.drain().collect();
        assert_eq!(
            start[0],
            Event::GameStarted {
                players: vec!["alice".to_string(), "bob".to_string()]
            }
        );
        engine.roll_dice("alice", &[1], &mut events).unwrap();
        engine.select_score("alice", "CHANCE", &mut events).unwrap();
        let stream: Vec<Event> = events.drain().collect();
        assert!(matches!(stream[0], Event::DiceRolled { roll_count: 1, .. }));
        assert!(matches!(
            stream[1],
            Event::ScoreSelected {
                score_type: ScoreType::Chance,
                ..
            }
        ));
        assert_eq!(
            stream[2],
            Event::TurnStarted {
                player: "bob".to_string()
            }
        );
    }
}
