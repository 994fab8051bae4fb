//! Terminal presenter for all four games.
//!
//! Run with: `cargo run --example play` (set `RUST_LOG=nawat_games=debug`
//! to watch the engine's round generation and timers).
//!
//! This is the smallest possible presenter:
//!
//! - it builds one shared `WordBank` from a built-in word list,
//! - renders each session through `to_view_json`,
//! - forwards typed input with `submit`,
//! - and plays the role of the browser's timers with a `Timeline`.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use nawat_games::{
    new_session, to_view_json, GameConfig, GameSession, GameType, LessonEntry, SessionInput,
    SessionStatus, Timeline, VocabularyEntry, WordBank,
};
use tracing_subscriber::EnvFilter;

const DICTIONARY: [(&str, &str); 10] = [
    ("tunal", "sol"),
    ("metzti", "luna"),
    ("kal", "casa"),
    ("at", "agua"),
    ("tepet", "cerro"),
    ("siwat", "mujer"),
    ("takat", "hombre"),
    ("pelu", "perro"),
    ("mistun", "gato"),
    ("kwawit", "árbol"),
];

const PHRASES: [(&str, &str); 3] = [
    ("tay ka mutukay?", "¿cómo te llamas?"),
    ("ni nemi kwali", "estoy bien"),
    ("shiwi nikan", "ven aquí"),
];

fn build_bank() -> WordBank {
    let lesson = LessonEntry {
        level: "Básico".into(),
        title: "Saludos".into(),
        content: "Frases de uso diario".into(),
        vocabulary: PHRASES.iter().map(|(t, s)| VocabularyEntry::new(*t, *s)).collect(),
    };
    WordBank::new(
        DICTIONARY.iter().map(|(t, s)| VocabularyEntry::new(*t, *s)).collect(),
        &[lesson],
    )
}

/// Turn a line typed by the player into the input this game expects.
fn parse_input(game: GameType, line: &str) -> Option<SessionInput> {
    match game {
        GameType::Matching => line.parse().ok().map(SessionInput::Pick),
        GameType::Quiz     => line.parse().ok().map(SessionInput::Choose),
        _                  => Some(SessionInput::Text(line.to_string())),
    }
}

fn play(session: &mut dyn GameSession, timeline: &mut Timeline) -> io::Result<()> {
    let stdin = io::stdin();
    session.start();

    loop {
        let view = to_view_json(&session.snapshot());
        println!("{}", serde_json::to_string_pretty(&view).unwrap_or_default());

        if matches!(session.status(), SessionStatus::Complete | SessionStatus::InsufficientData) {
            return Ok(());
        }

        print!("> (q to quit, r to reset) ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        match line {
            "q" => return Ok(()),
            "r" => {
                session.reset();
                continue;
            }
            _ => {}
        }

        let Some(input) = parse_input(session.game_type(), line) else {
            println!("  ? not understood");
            continue;
        };
        match session.submit(input) {
            Ok(outcome) => println!("  → {outcome:?}"),
            Err(e) => println!("  ! {e}"),
        }

        // A terminal has no reason to wait: jump the clock straight to the task.
        if let Some(task) = session.pending_task() {
            timeline.schedule(task);
            for token in timeline.advance(task.delay) {
                session.fire(token);
            }
        }
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bank = Arc::new(build_bank());
    let mut timeline = Timeline::new();

    for game in [GameType::Matching, GameType::Quiz, GameType::Scramble, GameType::FillBlank] {
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("  {game}");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        let mut session = new_session(game, bank.clone(), GameConfig::default());
        play(session.as_mut(), &mut timeline)?;
        println!("  Final score: {}", session.score());
        println!();
    }
    Ok(())
}
