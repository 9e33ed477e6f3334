use dicehall_core::Event;

/// Append-only log of human-readable lines, rendered newline-joined for the
/// front end. Used for the shared chat, the game log, and private chats.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Key for the private transcript shared by a pair of players; both
/// directions map to the same entry.
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}/{b}")
    } else {
        format!("{b}/{a}")
    }
}

/// Game-log line for an engine event.
pub fn describe(event: &Event) -> String {
    match event {
        Event::GameStarted { players } => {
            format!("Game started with {}.", players.join(", "))
        }
        Event::TurnStarted { player } => format!("It is {player}'s turn."),
        Event::DiceRolled {
            player,
            faces,
            roll_count,
        } => {
            let faces: Vec<String> = faces.iter().map(|face| face.to_string()).collect();
            format!(
                "{player} rolled {} (roll {roll_count} of 3).",
                faces.join(" ")
            )
        }
        Event::ScoreSelected {
            player,
            score_type,
            points,
        } => {
            let name = score_type.id().to_lowercase().replace('_', " ");
            format!("{player} scored {points} on {name}.")
        }
        Event::GameCompleted {
            winner,
            grand_total,
        } => format!("{winner} wins with {grand_total} points!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicehall_core::ScoreType;

    #[test]
    fn render_joins_lines_in_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());
        transcript.add_line("alice joined the game.");
        transcript.add_line("alice: hello");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.render(), "alice joined the game.\nalice: hello");
    }

    #[test]
    fn pair_key_is_order_insensitive() {
        assert_eq!(pair_key("alice", "bob"), pair_key("bob", "alice"));
        assert_eq!(pair_key("alice", "bob"), "alice/bob");
    }

    #[test]
    fn describe_score_selected_uses_readable_names() {
        let line = describe(&Event::ScoreSelected {
            player: "bob".to_string(),
            score_type: ScoreType::ThreeOfAKind,
            points: 23,
        });
        assert_eq!(line, "bob scored 23 on three of a kind.");
    }

    #[test]
    fn describe_dice_rolled_lists_faces() {
        let line = describe(&Event::DiceRolled {
            player: "bob".to_string(),
            faces: [1, 2, 3, 4, 5],
            roll_count: 2,
        });
        assert_eq!(line, "bob rolled 1 2 3 4 5 (roll 2 of 3).");
    }
}
