use crate::transcript::{self, Transcript};
use dicehall_core::{EventBus, GameEngine, GameSnapshot, Player, RngState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// One player action, already deserialized. The HTTP loop feeds these to the
/// lobby one at a time, so the engine never sees concurrent actions.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    Join {
        player_name: String,
    },
    Leave {
        player_name: String,
    },
    Chat {
        player_name: String,
        content: String,
        #[serde(default)]
        destination: Option<String>,
    },
    StartGame {
        player_name: String,
    },
    RollDice {
        player_name: String,
        #[serde(default)]
        die_ids: Vec<u8>,
    },
    SelectScore {
        player_name: String,
        score_type: String,
    },
}

/// Full state document sent to every client after each action; the front end
/// re-renders from scratch, so there is no partial-update protocol.
#[derive(Debug, Serialize)]
pub struct StateDocument {
    pub ok: bool,
    pub error: Option<String>,
    pub players: Vec<String>,
    pub chat_transcript: String,
    pub game_transcript: String,
    pub private_transcripts: BTreeMap<String, String>,
    pub game: GameSnapshot,
}

/// Connection roster, engine, and transcripts for one game session.
#[derive(Debug)]
pub struct LobbyState {
    players: Vec<Player>,
    engine: GameEngine,
    events: EventBus,
    chat_transcript: Transcript,
    game_transcript: Transcript,
    private_transcripts: BTreeMap<String, Transcript>,
}

impl LobbyState {
    pub fn new(rng: RngState) -> Self {
        Self {
            players: Vec::new(),
            engine: GameEngine::new(rng),
            events: EventBus::default(),
            chat_transcript: Transcript::new(),
            game_transcript: Transcript::new(),
            private_transcripts: BTreeMap::new(),
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Applies one action end-to-end. Returns the rejection message, if any;
    /// rejections never leave partial state behind.
    pub fn apply(&mut self, action: ActionRequest) -> Option<String> {
        let error = match action {
            ActionRequest::Join { player_name } => self.join(player_name),
            ActionRequest::Leave { player_name } => self.leave(&player_name),
            ActionRequest::Chat {
                player_name,
                content,
                destination,
            } => self.chat(&player_name, &content, destination.as_deref()),
            ActionRequest::StartGame { player_name } => self.start_game(&player_name),
            ActionRequest::RollDice {
                player_name,
                die_ids,
            } => self
                .engine
                .roll_dice(&player_name, &die_ids, &mut self.events)
                .err()
                .map(|err| err.to_string()),
            ActionRequest::SelectScore {
                player_name,
                score_type,
            } => self
                .engine
                .select_score(&player_name, &score_type, &mut self.events)
                .err()
                .map(|err| err.to_string()),
        };
        if let Some(err) = &error {
            warn!("action rejected: {err}");
        }
        self.drain_engine_events();
        error
    }

    pub fn state_document(&self, error: Option<String>) -> StateDocument {
        StateDocument {
            ok: error.is_none(),
            error,
            players: self
                .players
                .iter()
                .map(|player| player.name.clone())
                .collect(),
            chat_transcript: self.chat_transcript.render(),
            game_transcript: self.game_transcript.render(),
            private_transcripts: self
                .private_transcripts
                .iter()
                .map(|(key, transcript)| (key.clone(), transcript.render()))
                .collect(),
            game: GameSnapshot::capture(&self.engine),
        }
    }

    fn join(&mut self, player_name: String) -> Option<String> {
        if player_name.trim().is_empty() {
            return Some("player name cannot be empty".to_string());
        }
        if self.players.iter().any(|player| player.name == player_name) {
            return Some(format!("player name already taken: {player_name}"));
        }
        info!("{player_name} joined");
        self.game_transcript
            .add_line(format!("{player_name} joined the game."));
        self.players.push(Player::new(player_name, now_ms()));
        None
    }

    fn leave(&mut self, player_name: &str) -> Option<String> {
        let Some(idx) = self
            .players
            .iter()
            .position(|player| player.name == player_name)
        else {
            return Some(format!("unknown player: {player_name}"));
        };
        info!("{player_name} left");
        self.players.remove(idx);
        self.game_transcript
            .add_line(format!("{player_name} left the game."));
        None
    }

    fn chat(&mut self, from: &str, content: &str, destination: Option<&str>) -> Option<String> {
        if !self.players.iter().any(|player| player.name == from) {
            return Some(format!("unknown player: {from}"));
        }
        let line = format!("{from}: {}", content.trim());
        match destination {
            None | Some("all") => self.chat_transcript.add_line(line),
            Some(to) => {
                if !self.players.iter().any(|player| player.name == to) {
                    return Some(format!("unknown chat destination: {to}"));
                }
                self.private_transcripts
                    .entry(transcript::pair_key(from, to))
                    .or_default()
                    .add_line(line);
            }
        }
        None
    }

    fn start_game(&mut self, player_name: &str) -> Option<String> {
        if !self.players.iter().any(|player| player.name == player_name) {
            return Some(format!("unknown player: {player_name}"));
        }
        if let Err(err) = self.engine.start_game(&self.players, &mut self.events) {
            return Some(err.to_string());
        }
        // One private channel per player pair, ready before the first whisper.
        for (idx, a) in self.players.iter().enumerate() {
            for b in &self.players[idx + 1..] {
                self.private_transcripts
                    .entry(transcript::pair_key(&a.name, &b.name))
                    .or_default();
            }
        }
        None
    }

    fn drain_engine_events(&mut self) {
        for event in self.events.drain() {
            self.game_transcript.add_line(transcript::describe(&event));
        }
    }
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
