use rand::Rng;

use crate::game_engine::{
    config::GameConfig,
    error::Result,
    games::{
        fill_blank::generate_fill_blank_round, matching::generate_matching_round,
        quiz::generate_quiz_round, scramble::generate_scramble_round,
    },
    helpers::make_rng,
    models::{GameType, Round},
    word_bank::WordBank,
};

/// Core dispatch: routes to the round generator for `game`.
pub fn generate_round<R: Rng>(
    game: GameType,
    bank: &WordBank,
    config: &GameConfig,
    rng: &mut R,
) -> Result<Round> {
    match game {
        GameType::Matching =>
            generate_matching_round(bank, config, rng).map(Round::Matching),

        GameType::Quiz =>
            generate_quiz_round(bank, config, rng).map(Round::Quiz),

        GameType::Scramble =>
            generate_scramble_round(bank, config, rng).map(Round::Scramble),

        GameType::FillBlank =>
            generate_fill_blank_round(bank, config, rng).map(Round::FillBlank),
    }
}

/// One-shot generation with an RNG built from `config.rng_seed`.
pub fn generate_seeded_round(game: GameType, bank: &WordBank, config: &GameConfig) -> Result<Round> {
    let mut rng = make_rng(config);
    generate_round(game, bank, config, &mut rng)
}
