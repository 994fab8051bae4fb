//! Memorama: flip two tiles, keep them if they are a term and its
//! translation.

use std::sync::Arc;

use rand::Rng;

use crate::game_engine::{
    config::GameConfig,
    error::{EngineError, Result},
    helpers::{make_round_id, SessionCore},
    models::{GameType, MatchingRound, Outcome, SessionStatus, Tile, TileSide},
    scheduler::{ScheduledTask, TimerKind, TimerToken},
    session::{GameSession, MatchingView, RoundView, SessionInput, Snapshot, TileView},
    shuffle::shuffle,
    word_bank::WordBank,
};

/// Sample up to `config.matching_pairs` entries and lay out two tiles per
/// entry in a uniformly shuffled order.
pub fn generate_matching_round<R: Rng>(
    bank: &WordBank,
    config: &GameConfig,
    rng: &mut R,
) -> Result<MatchingRound> {
    config.validate()?;
    if bank.is_empty() {
        return Err(EngineError::insufficient(GameType::Matching, "the word bank is empty"));
    }

    let round_id = make_round_id(GameType::Matching, rng);
    let picked = bank.sample_distinct(rng, config.matching_pairs);

    let mut tiles = Vec::with_capacity(picked.len() * 2);
    for entry in picked {
        tiles.push(Tile {
            display_value: entry.term.clone(),
            expected_pair_value: entry.translation.clone(),
            side: TileSide::Term,
        });
        tiles.push(Tile {
            display_value: entry.translation.clone(),
            expected_pair_value: entry.term.clone(),
            side: TileSide::Translation,
        });
    }
    shuffle(rng, &mut tiles);

    Ok(MatchingRound { round_id, tiles })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingFirstPick,
    AwaitingSecondPick(usize),
    /// Two tiles are up and did not match; waiting for the settle timer.
    Locked(usize, usize),
}

#[derive(Debug)]
pub struct MatchingSession {
    bank: Arc<WordBank>,
    config: GameConfig,
    core: SessionCore,
    round: Option<MatchingRound>,
    face_up: Vec<bool>,
    matched: Vec<bool>,
    phase: Phase,
}

impl MatchingSession {
    pub fn new(bank: Arc<WordBank>, config: GameConfig) -> Self {
        let core = SessionCore::new(GameType::Matching, &config);
        MatchingSession {
            bank,
            config,
            core,
            round: None,
            face_up: Vec::new(),
            matched: Vec::new(),
            phase: Phase::AwaitingFirstPick,
        }
    }

    pub fn round(&self) -> Option<&MatchingRound> {
        self.round.as_ref()
    }

    pub fn pairs_found(&self) -> usize {
        self.matched.iter().filter(|&&m| m).count() / 2
    }

    /// Is the tile still in play (not matched, not currently face-up)?
    pub fn is_clickable(&self, tile_id: usize) -> bool {
        tile_id < self.matched.len() && !self.matched[tile_id] && !self.face_up[tile_id]
    }

    /// Flip one tile.
    pub fn pick(&mut self, tile_id: usize) -> Result<Outcome> {
        match self.core.status {
            SessionStatus::InsufficientData => {
                return Err(EngineError::insufficient(GameType::Matching, "no active round"));
            }
            SessionStatus::Idle | SessionStatus::Complete | SessionStatus::Locked => {
                return Ok(Outcome::Ignored);
            }
            _ => {}
        }
        let Some(round) = self.round.as_ref() else {
            return Ok(Outcome::Ignored);
        };
        if tile_id >= round.tiles.len() {
            return Err(EngineError::InvalidInput(format!(
                "tile {} out of range (board has {})",
                tile_id,
                round.tiles.len()
            )));
        }
        if !self.is_clickable(tile_id) {
            return Ok(Outcome::Ignored);
        }

        // A locked board was turned away by the status check above.
        let Phase::AwaitingSecondPick(first) = self.phase else {
            self.face_up[tile_id] = true;
            self.phase = Phase::AwaitingSecondPick(tile_id);
            self.core.status = SessionStatus::AwaitingInput;
            return Ok(Outcome::Pending);
        };

        self.face_up[tile_id] = true;
        self.core.status = SessionStatus::Locked;

        if round.tiles[first].pairs_with(&round.tiles[tile_id]) {
            self.core.score += 1;
            self.matched[first] = true;
            self.matched[tile_id] = true;
            self.phase = Phase::AwaitingFirstPick;
            self.core.status = if self.matched.iter().all(|&m| m) {
                SessionStatus::Complete
            } else {
                SessionStatus::Correct
            };
            tracing::debug!(
                "{} matched tiles {} and {} (score {})",
                round.round_id, first, tile_id, self.core.score
            );
            Ok(Outcome::Correct)
        } else {
            self.phase = Phase::Locked(first, tile_id);
            self.core.schedule(TimerKind::Settle, self.config.settle_delay());
            tracing::debug!("{} mismatch on tiles {} and {}", round.round_id, first, tile_id);
            Ok(Outcome::Incorrect)
        }
    }

    fn view(&self) -> Option<MatchingView> {
        let round = self.round.as_ref()?;
        let tiles = round
            .tiles
            .iter()
            .enumerate()
            .map(|(id, tile)| TileView {
                id,
                display_value: tile.display_value.clone(),
                side: tile.side,
                face_up: self.face_up[id],
                matched: self.matched[id],
            })
            .collect();
        Some(MatchingView {
            round_id: round.round_id.clone(),
            tiles,
            pairs_found: self.pairs_found(),
            pairs_total: round.pair_count(),
        })
    }
}

impl GameSession for MatchingSession {
    fn game_type(&self) -> GameType {
        GameType::Matching
    }

    fn start(&mut self) -> SessionStatus {
        self.core.next_generation();
        self.core.score = 0;
        self.phase = Phase::AwaitingFirstPick;

        match generate_matching_round(&self.bank, &self.config, &mut self.core.rng) {
            Ok(round) => {
                self.face_up = vec![false; round.tiles.len()];
                self.matched = vec![false; round.tiles.len()];
                tracing::debug!("{} dealt {} tiles", round.round_id, round.tiles.len());
                self.round = Some(round);
                self.core.status = SessionStatus::AwaitingInput;
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.round = None;
                self.face_up.clear();
                self.matched.clear();
                self.core.status = SessionStatus::InsufficientData;
            }
        }
        self.core.status
    }

    fn submit(&mut self, input: SessionInput) -> Result<Outcome> {
        match input {
            SessionInput::Pick(tile_id) => self.pick(tile_id),
            other => Err(EngineError::InvalidInput(format!("memorama expects a tile pick, got {other:?}"))),
        }
    }

    fn fire(&mut self, token: TimerToken) -> bool {
        if token.kind != TimerKind::Settle || !self.core.take_pending(token) {
            return false;
        }
        if let Phase::Locked(a, b) = self.phase {
            self.face_up[a] = false;
            self.face_up[b] = false;
        }
        self.phase = Phase::AwaitingFirstPick;
        self.core.status = SessionStatus::Incorrect;
        true
    }

    fn pending_task(&self) -> Option<ScheduledTask> {
        self.core.pending()
    }

    fn score(&self) -> u32 {
        self.core.score
    }

    fn status(&self) -> SessionStatus {
        self.core.status
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            game: GameType::Matching,
            status: self.core.status,
            score: self.core.score,
            round: self.view().map(RoundView::Matching),
            pending: self.core.pending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_engine::models::VocabularyEntry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn bank(pairs: &[(&str, &str)]) -> Arc<WordBank> {
        Arc::new(WordBank::new(
            pairs.iter().map(|(t, s)| VocabularyEntry::new(*t, *s)).collect(),
            &[],
        ))
    }

    fn numbered_bank(n: usize) -> WordBank {
        WordBank::new(
            (0..n).map(|i| VocabularyEntry::new(format!("term{i}"), format!("trans{i}"))).collect(),
            &[],
        )
    }

    fn started(pairs: &[(&str, &str)], seed: u64) -> MatchingSession {
        let mut s = MatchingSession::new(bank(pairs), GameConfig::seeded(seed));
        s.start();
        s
    }

    fn tile_id(s: &MatchingSession, value: &str) -> usize {
        s.round()
            .unwrap()
            .tiles
            .iter()
            .position(|t| t.display_value == value)
            .unwrap_or_else(|| panic!("no tile showing {value}"))
    }

    #[test]
    fn round_has_two_tiles_per_entry() {
        for n in [8usize, 9, 20, 50] {
            let b = numbered_bank(n);
            let mut rng = StdRng::seed_from_u64(n as u64);
            let round = generate_matching_round(&b, &GameConfig::default(), &mut rng).unwrap();
            assert_eq!(round.tiles.len(), 16, "bank of {n}");

            let mut per_term: HashMap<&str, usize> = HashMap::new();
            for tile in &round.tiles {
                if tile.side == TileSide::Term {
                    *per_term.entry(tile.display_value.as_str()).or_default() += 1;
                    let partner = round
                        .tiles
                        .iter()
                        .find(|o| o.side == TileSide::Translation && tile.pairs_with(o));
                    assert!(partner.is_some(), "{} has no partner tile", tile.display_value);
                }
            }
            assert_eq!(per_term.len(), 8);
            assert!(per_term.values().all(|&c| c == 1), "entry repeated: {per_term:?}");
        }
    }

    #[test]
    fn small_bank_uses_every_entry() {
        let b = numbered_bank(3);
        let mut rng = StdRng::seed_from_u64(5);
        let round = generate_matching_round(&b, &GameConfig::default(), &mut rng).unwrap();
        assert_eq!(round.tiles.len(), 6);
    }

    #[test]
    fn empty_bank_is_insufficient() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_matching_round(&WordBank::empty(), &GameConfig::default(), &mut rng).unwrap_err();
        assert!(err.is_insufficient_data());

        let mut s = MatchingSession::new(Arc::new(WordBank::empty()), GameConfig::seeded(1));
        assert_eq!(s.start(), SessionStatus::InsufficientData);
        assert!(s.pick(0).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn zero_pairs_config_never_deals_an_empty_board() {
        let config = GameConfig { matching_pairs: 0, ..GameConfig::seeded(1) };
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_matching_round(&numbered_bank(10), &config, &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));

        let mut s = MatchingSession::new(Arc::new(numbered_bank(10)), config);
        assert_eq!(s.start(), SessionStatus::InsufficientData);
        assert!(s.snapshot().round.is_none());
        assert!(s.pick(0).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn matching_pair_scores_and_disables_tiles() {
        let mut s = started(&[("ne", "the"), ("se", "one")], 11);
        assert_eq!(s.round().unwrap().tiles.len(), 4);

        let a = tile_id(&s, "ne");
        let b = tile_id(&s, "the");
        assert_eq!(s.pick(a).unwrap(), Outcome::Pending);
        assert_eq!(s.pick(b).unwrap(), Outcome::Correct);
        assert_eq!(s.status(), SessionStatus::Correct);
        assert_eq!(s.score(), 1);
        assert!(!s.is_clickable(a));
        assert!(!s.is_clickable(b));
        assert_eq!(s.pick(a).unwrap(), Outcome::Ignored);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn mismatch_locks_until_settle() {
        let mut s = started(&[("ne", "the"), ("se", "one")], 12);
        let a = tile_id(&s, "ne");
        let b = tile_id(&s, "one");
        let c = tile_id(&s, "se");

        s.pick(a).unwrap();
        assert_eq!(s.pick(b).unwrap(), Outcome::Incorrect);
        assert_eq!(s.status(), SessionStatus::Locked);
        assert_eq!(s.pick(c).unwrap(), Outcome::Ignored);

        let task = s.pending_task().expect("settle timer");
        assert_eq!(task.token.kind, TimerKind::Settle);
        assert_eq!(task.delay, std::time::Duration::from_millis(1000));
        assert!(s.fire(task.token));
        assert_eq!(s.status(), SessionStatus::Incorrect);

        // Mismatched tiles are playable again.
        assert!(s.is_clickable(a));
        assert!(s.is_clickable(b));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn clearing_the_board_completes() {
        let mut s = started(&[("ne", "the"), ("se", "one")], 13);
        for (t, tr) in [("ne", "the"), ("se", "one")] {
            let a = tile_id(&s, t);
            let b = tile_id(&s, tr);
            s.pick(a).unwrap();
            assert_eq!(s.pick(b).unwrap(), Outcome::Correct);
        }
        assert_eq!(s.status(), SessionStatus::Complete);
        assert_eq!(s.score(), 2);
        assert!(s.pending_task().is_none(), "completion must not restart on its own");
    }

    #[test]
    fn out_of_range_pick_is_invalid_input() {
        let mut s = started(&[("ne", "the")], 1);
        let before = s.snapshot();
        assert!(matches!(s.pick(99), Err(EngineError::InvalidInput(_))));
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn same_tile_twice_is_ignored() {
        let mut s = started(&[("ne", "the"), ("se", "one")], 2);
        s.pick(0).unwrap();
        assert_eq!(s.pick(0).unwrap(), Outcome::Ignored);
        assert_eq!(s.status(), SessionStatus::AwaitingInput);
    }

    #[test]
    fn reset_discards_settle_timer() {
        let mut s = started(&[("ne", "the"), ("se", "one")], 3);
        let a = tile_id(&s, "ne");
        let b = tile_id(&s, "one");
        s.pick(a).unwrap();
        s.pick(b).unwrap();
        let stale = s.pending_task().unwrap().token;

        s.reset();
        assert!(!s.fire(stale));
        assert_eq!(s.status(), SessionStatus::AwaitingInput);
        assert!(s.snapshot().round.is_some());
    }
}
