use dicehall_core::{
    EventBus, GameEngine, GamePhase, GameSnapshot, Player, RngState, ScoreType, Scorecard, Turn,
};
use std::io::{self, BufRead, Write};

fn main() {
    let seed = std::env::args().nth(1).and_then(|arg| arg.parse::<u64>().ok());
    let rng = match seed {
        Some(seed) => RngState::from_seed(seed),
        None => RngState::from_entropy(),
    };
    println!("dicehall hot-seat (seed {})", rng.seed());
    println!("Enter player names, comma separated:");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let Some(Ok(names)) = lines.next() else {
        return;
    };
    let players: Vec<Player> = names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .enumerate()
        .map(|(idx, name)| Player::new(name, idx as u64))
        .collect();

    let mut engine = GameEngine::new(rng);
    let mut events = EventBus::default();
    if let Err(err) = engine.start_game(&players, &mut events) {
        println!("cannot start: {err}");
        return;
    }
    drop(events.drain());

    print_turn(&engine);
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(Ok(line)) = lines.next() else {
            break;
        };
        let mut events = EventBus::default();
        match run_command(&mut engine, &mut events, line.trim()) {
            CommandOutcome::Quit => break,
            CommandOutcome::Error(message) => println!("{message}"),
            CommandOutcome::Info => {}
            CommandOutcome::Applied => {
                if engine.phase() == GamePhase::Complete {
                    print_scorecards(&engine);
                    if let Some(winner) = engine.winner() {
                        println!(
                            "{} wins with {} points!",
                            winner.player, winner.grand_total
                        );
                    }
                    return;
                }
                print_turn(&engine);
            }
        }
    }
}

enum CommandOutcome {
    /// The engine accepted the action; the turn display is stale.
    Applied,
    /// Printed something, nothing changed.
    Info,
    Error(String),
    Quit,
}

fn run_command(
    engine: &mut GameEngine,
    events: &mut EventBus,
    line: &str,
) -> CommandOutcome {
    let mut parts = line.split_whitespace();
    let Some(active) = engine.current_turn().map(|turn| turn.player().to_string()) else {
        return CommandOutcome::Error("no active turn".to_string());
    };
    match parts.next() {
        Some("roll") => {
            let mut die_ids = Vec::new();
            for part in parts {
                match part.parse::<u8>() {
                    Ok(id) => die_ids.push(id),
                    Err(_) => {
                        return CommandOutcome::Error(format!("not a die id: {part}"));
                    }
                }
            }
            if die_ids.is_empty() {
                die_ids = vec![1, 2, 3, 4, 5];
            }
            match engine.roll_dice(&active, &die_ids, events) {
                Ok(()) => CommandOutcome::Applied,
                Err(err) => CommandOutcome::Error(err.to_string()),
            }
        }
        Some("score") => {
            let Some(name) = parts.next() else {
                return CommandOutcome::Error("usage: score <type>".to_string());
            };
            match engine.select_score(&active, name, events) {
                Ok(()) => CommandOutcome::Applied,
                Err(err) => CommandOutcome::Error(err.to_string()),
            }
        }
        Some("board") => {
            print_scorecards(engine);
            CommandOutcome::Info
        }
        Some("json") => {
            match serde_json::to_string_pretty(&GameSnapshot::capture(engine)) {
                Ok(json) => println!("{json}"),
                Err(err) => println!("snapshot error: {err}"),
            }
            CommandOutcome::Info
        }
        Some("help") => {
            println!("commands:");
            println!("  roll [ids..]   reroll the named dice (default: all five)");
            println!("  score <type>   score the turn, e.g. score full_house");
            println!("  board          show all scorecards");
            println!("  json           dump the raw snapshot");
            println!("  quit           leave the game");
            CommandOutcome::Info
        }
        Some("quit") | Some("exit") => CommandOutcome::Quit,
        Some(other) => CommandOutcome::Error(format!("unknown command: {other} (try help)")),
        None => CommandOutcome::Info,
    }
}

fn print_turn(engine: &GameEngine) {
    let Some(turn) = engine.current_turn() else {
        return;
    };
    println!();
    println!(
        "{}'s turn (roll {} of 3)",
        turn.player(),
        turn.roll_count()
    );
    print_dice(turn);
    if let Some(card) = engine.current_scorecard() {
        print_previews(card, turn);
    }
}

fn print_dice(turn: &Turn) {
    let faces: Vec<String> = turn
        .roll()
        .dice()
        .iter()
        .map(|die| format!("[{}]{}", die.id(), die.face_value()))
        .collect();
    println!("  dice: {}", faces.join("  "));
}

fn print_previews(card: &Scorecard, turn: &Turn) {
    let open: Vec<String> = card
        .preview_scores(turn.roll())
        .into_iter()
        .filter(|&(kind, _)| card.points_for(kind).is_none())
        .map(|(kind, points)| format!("{}={points}", kind.id().to_lowercase()))
        .collect();
    println!("  open: {}", open.join(" "));
}

fn print_scorecards(engine: &GameEngine) {
    for card in engine.scorecards() {
        println!();
        println!("{}", card.player());
        for kind in ScoreType::ALL {
            let points = match card.points_for(kind) {
                Some(points) => points.to_string(),
                None => "-".to_string(),
            };
            println!("  {:16} {points}", kind.id().to_lowercase());
        }
        println!("  upper bonus      {}", card.upper_bonus());
        println!("  joker bonus      {}", card.joker_bonus());
        println!("  grand total      {}", card.grand_total());
    }
}
