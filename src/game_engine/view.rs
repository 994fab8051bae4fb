//! JSON payloads for the browser presenter.
//!
//! The page script only renders; it never sees more than the player may see.
//! Face-down memorama tiles are sent blank, and the quiz answer is only
//! revealed once an option has been chosen.

use serde_json::{json, Value};

use crate::game_engine::{
    models::{SessionStatus, TileSide},
    session::{FillBlankView, MatchingView, QuizView, RoundView, ScrambleView, Snapshot},
};

/// Feedback line shown under typed-answer games.
fn feedback(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Correct          => "¡Correcto!",
        SessionStatus::Incorrect        => "Inténtalo de nuevo.",
        SessionStatus::InsufficientData => "No hay datos suficientes para este juego.",
        _                               => "",
    }
}

fn side_str(side: TileSide) -> &'static str {
    match side {
        TileSide::Term        => "nahuat",
        TileSide::Translation => "spanish",
    }
}

fn matching_json(v: &MatchingView) -> Value {
    let tiles: Vec<Value> = v
        .tiles
        .iter()
        .map(|t| {
            let visible = t.face_up || t.matched;
            let (value, side) = if visible {
                (t.display_value.as_str(), side_str(t.side))
            } else {
                ("", "")
            };
            json!({
                "id": t.id,
                "value": value,
                "side": side,
                "flipped": visible,
                "matched": t.matched,
                "clickable": !visible,
            })
        })
        .collect();
    json!({
        "round_id": v.round_id,
        "tiles": tiles,
        "pairs_found": v.pairs_found,
        "pairs_total": v.pairs_total,
    })
}

fn quiz_json(v: &QuizView) -> Value {
    let options: Vec<Value> = v
        .options
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let state = match (v.chosen, v.correct_index) {
                (Some(c), Some(ok)) if i == c && c == ok => "correct",
                (Some(c), _) if i == c                   => "incorrect",
                _                                        => "",
            };
            json!({ "index": i, "text": text, "state": state })
        })
        .collect();
    json!({
        "round_id": v.round_id,
        "question": format!("¿Cuál es la traducción de \"{}\"?", v.prompt),
        "options": options,
        "answered": v.chosen.is_some(),
    })
}

fn scramble_json(v: &ScrambleView, status: SessionStatus) -> Value {
    json!({
        "round_id": v.round_id,
        "scrambled": v.scrambled,
        "hint": format!("Pista (Español): {}", v.hint),
        "attempts": v.attempts,
        "feedback": feedback(status),
    })
}

fn fill_blank_json(v: &FillBlankView, status: SessionStatus) -> Value {
    json!({
        "round_id": v.round_id,
        "sentence": v.masked,
        "hint": format!("Traducción: {}", v.hint),
        "attempts": v.attempts,
        "feedback": feedback(status),
    })
}

/// Map a session [`Snapshot`] to the object the page script renders.
pub fn to_view_json(snapshot: &Snapshot) -> Value {
    let round = match &snapshot.round {
        Some(RoundView::Matching(v))  => matching_json(v),
        Some(RoundView::Quiz(v))      => quiz_json(v),
        Some(RoundView::Scramble(v))  => scramble_json(v, snapshot.status),
        Some(RoundView::FillBlank(v)) => fill_blank_json(v, snapshot.status),
        None                          => Value::Null,
    };
    let pending = snapshot.pending.map(|task| {
        json!({
            "kind": format!("{:?}", task.token.kind),
            "generation": task.token.generation,
            "delay_ms": u64::try_from(task.delay.as_millis()).unwrap_or(u64::MAX),
        })
    });

    let message = if snapshot.round.is_none() { feedback(snapshot.status) } else { "" };

    json!({
        "game": snapshot.game.prefix(),
        "title": snapshot.game.to_string(),
        "status": snapshot.status.to_string(),
        "score": snapshot.score,
        "message": message,
        "round": round,
        "pending": pending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_engine::{
        config::GameConfig,
        games::{FillBlankSession, MatchingSession, QuizSession},
        models::{LessonEntry, VocabularyEntry},
        session::GameSession,
        word_bank::WordBank,
    };
    use std::sync::Arc;

    fn bank() -> Arc<WordBank> {
        let words = [("ne", "the"), ("se", "one"), ("ume", "two"), ("yey", "three")];
        Arc::new(WordBank::new(
            words.iter().map(|(t, s)| VocabularyEntry::new(*t, *s)).collect(),
            &[],
        ))
    }

    #[test]
    fn face_down_tiles_are_blank() {
        let mut s = MatchingSession::new(bank(), GameConfig::seeded(4));
        s.start();
        s.pick(0).unwrap();

        let v = to_view_json(&s.snapshot());
        let tiles = v["round"]["tiles"].as_array().unwrap();
        assert_eq!(tiles.len(), 8);
        assert_ne!(tiles[0]["value"], "");
        assert_eq!(tiles[0]["flipped"], true);
        for t in &tiles[1..] {
            assert_eq!(t["value"], "", "face-down tile leaked its value");
            assert_eq!(t["clickable"], true);
        }
        assert_eq!(v["game"], "MT");
        assert_eq!(v["status"], "awaiting-input");
    }

    #[test]
    fn quiz_marks_chosen_option() {
        let mut s = QuizSession::new(bank(), GameConfig::seeded(9));
        s.start();
        let correct = s.round().unwrap().correct_index().unwrap();
        s.answer(correct).unwrap();

        let v = to_view_json(&s.snapshot());
        assert_eq!(v["round"]["options"][correct]["state"], "correct");
        assert_eq!(v["round"]["answered"], true);
        assert_eq!(v["pending"]["delay_ms"], 1000);
        assert_eq!(v["score"], 1);
    }

    #[test]
    fn oversized_delay_saturates() {
        use crate::game_engine::{
            models::GameType,
            scheduler::{ScheduledTask, TimerKind, TimerToken},
        };
        use std::time::Duration;

        let snapshot = Snapshot {
            game: GameType::Quiz,
            status: SessionStatus::Correct,
            score: 1,
            round: None,
            pending: Some(ScheduledTask {
                token: TimerToken { game: GameType::Quiz, generation: 1, kind: TimerKind::Advance },
                delay: Duration::from_secs(u64::MAX),
            }),
        };
        let v = to_view_json(&snapshot);
        assert_eq!(v["pending"]["delay_ms"], u64::MAX);
    }

    #[test]
    fn missing_data_shows_message() {
        let mut s = FillBlankSession::new(Arc::new(WordBank::new(vec![], &[] as &[LessonEntry])), GameConfig::seeded(1));
        s.start();
        let v = to_view_json(&s.snapshot());
        assert!(v["round"].is_null());
        assert_eq!(v["status"], "insufficient-data");
        assert_eq!(v["message"], "No hay datos suficientes para este juego.");
    }
}
