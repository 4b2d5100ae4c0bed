// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tilewise::{
    alphabet::ENGLISH_ALPHABET,
    board, board_layout, engine, error, game_config, move_picker, move_validator, trie,
};

fn make_engine(words: &[&str], config: game_config::EngineConfig) -> engine::Engine<'static> {
    engine::Engine::new(&ENGLISH_ALPHABET, Arc::new(trie::Trie::build(words)), config)
}

fn config(difficulty: move_picker::Difficulty) -> game_config::EngineConfig {
    game_config::EngineConfig {
        difficulty,
        use_heuristics: false,
        num_threads: Some(1),
        ..game_config::make_standard_engine_config()
    }
}

fn rack(letters: &str) -> Vec<board::Tile> {
    board::rack_from_str(&ENGLISH_ALPHABET, letters, 0, 0).unwrap()
}

fn empty_board() -> board::Board {
    board::Board::new(&board_layout::make_standard_board_layout())
}

fn board_with(row: usize, text: &str) -> board::Board {
    let mut rows = vec!["...............".to_string(); 15];
    rows[row] = text.to_string();
    board::Board::from_strings(&board_layout::make_standard_board_layout(), &ENGLISH_ALPHABET, &rows)
        .unwrap()
}

const FIRST: move_validator::TurnRules = move_validator::TurnRules {
    first_move: true,
    player_move_count: 0,
    independent_start: false,
};

const LATER: move_validator::TurnRules = move_validator::TurnRules {
    first_move: false,
    player_move_count: 1,
    independent_start: false,
};

// Rejects every move that forms a word in the list.
struct Blacklist(Vec<String>);

impl engine::WordJudge for Blacklist {
    fn approve(
        &self,
        words: &[String],
    ) -> impl Future<Output = Result<Vec<String>, error::MyError>> + Send {
        let invalid = words
            .iter()
            .filter(|word| self.0.contains(word))
            .cloned()
            .collect::<Vec<_>>();
        async move { Ok(invalid) }
    }
}

// Errors out on any move that forms the given word.
struct Broken(String);

impl engine::WordJudge for Broken {
    fn approve(
        &self,
        words: &[String],
    ) -> impl Future<Output = Result<Vec<String>, error::MyError>> + Send {
        let fails = words.contains(&self.0);
        async move {
            if fails {
                Err(error::new("judge unavailable".into()))
            } else {
                Ok(Vec::new())
            }
        }
    }
}

// Never answers in time for moves that form the given word.
struct Slow(String);

impl engine::WordJudge for Slow {
    fn approve(
        &self,
        words: &[String],
    ) -> impl Future<Output = Result<Vec<String>, error::MyError>> + Send {
        let stalls = words.contains(&self.0);
        async move {
            if stalls {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok(Vec::new())
        }
    }
}

fn trie_judge(engine: &engine::Engine) -> Arc<engine::TrieJudge> {
    Arc::new(engine::TrieJudge::new(Arc::clone(engine.lexicon())))
}

#[tokio::test]
async fn opening_move_through_the_start() {
    let engine = make_engine(&["CAT"], config(move_picker::Difficulty::Hard));
    let judge = trie_judge(&engine);
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let scored = engine
        .find_move(&empty_board(), &rack("CAT"), &FIRST, &judge, &mut rng)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(scored.formed_words, vec!["CAT".to_string()]);
    assert_eq!(scored.score, 10);
    assert!(scored.placement.iter().any(|p| (p.row, p.col) == (7, 7)));
}

#[tokio::test]
async fn hooking_an_s() {
    let engine = make_engine(&["CAT", "CATS"], config(move_picker::Difficulty::Hard));
    let judge = trie_judge(&engine);
    let board = board_with(7, ".......CAT.....");
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let (scored, stats) = engine
        .find_move_with_stats(&board, &rack("S"), &LATER, &judge, &mut rng)
        .await
        .unwrap();
    let scored = scored.unwrap();
    assert_eq!(scored.formed_words, vec!["CATS".to_string()]);
    assert_eq!(scored.score, 6);
    assert_eq!((scored.placement[0].row, scored.placement[0].col), (7, 10));
    assert_eq!(stats.candidates, 1);
}

#[test]
fn first_move_shape() {
    let board = empty_board();
    let at = |row: i8, col: i8, id: u32, letter: u8| board::PlacedTile {
        row,
        col,
        tile: board::Tile::new(id, letter, ENGLISH_ALPHABET.score(letter), 0),
    };
    assert_eq!(
        move_validator::validate_move(&board, &[at(7, 7, 0, b'A')], &FIRST).unwrap_err(),
        move_validator::Rejection::NeedsTwoTiles
    );
    assert_eq!(
        move_validator::validate_move(&board, &[at(0, 0, 0, b'A'), at(0, 1, 1, b'T')], &FIRST)
            .unwrap_err(),
        move_validator::Rejection::MustCoverStart
    );
}

#[tokio::test]
async fn hard_takes_the_top_selection_score() {
    let words = ["CAT", "ACT", "AT", "TA", "CATS", "SCAT", "ACTS", "TACS"];
    let engine = make_engine(
        &words,
        game_config::EngineConfig {
            use_heuristics: true,
            ..config(move_picker::Difficulty::Hard)
        },
    );
    let judge = trie_judge(&engine);
    let board = board_with(7, ".......CAT.....");
    let rack = rack("SATC");
    let best = engine
        .search_moves(&board, &rack, &LATER)
        .unwrap()
        .candidates
        .iter()
        .map(|m| m.selection_score)
        .fold(f32::NEG_INFINITY, f32::max);
    for seed in 0..5 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let scored = engine
            .find_move(&board, &rack, &LATER, &judge, &mut rng)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(scored.selection_score, best);
    }
}

#[tokio::test]
async fn easy_spreads_its_choices() {
    let engine = make_engine(&["CAT", "ACT", "AT", "TA"], config(move_picker::Difficulty::Easy));
    let judge = trie_judge(&engine);
    let board = empty_board();
    let rack = rack("CAT");
    let num_candidates = engine.search_moves(&board, &rack, &FIRST).unwrap().candidates.len();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let mut seen = HashSet::new();
    let mut scores = HashSet::new();
    for _ in 0..200 {
        let scored = engine
            .find_move(&board, &rack, &FIRST, &judge, &mut rng)
            .await
            .unwrap()
            .unwrap();
        scores.insert(scored.score);
        seen.insert(placement_cells(&scored));
    }
    // both the 10-point and the 4-point words come up.
    assert!(scores.len() > 1, "{:?}", scores);
    assert!(seen.len() > num_candidates / 2, "{} of {}", seen.len(), num_candidates);
}

fn placement_cells(scored: &engine::ScoredMove) -> Vec<(i8, i8, u8)> {
    let mut key = scored
        .placement
        .iter()
        .map(|p| (p.row, p.col, p.tile.letter))
        .collect::<Vec<_>>();
    key.sort_unstable();
    key
}

#[tokio::test]
async fn nothing_to_play() {
    let engine = make_engine(&["CAT"], config(move_picker::Difficulty::Hard));
    let judge = trie_judge(&engine);
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let found = engine
        .find_move(&empty_board(), &rack("QQX"), &FIRST, &judge, &mut rng)
        .await
        .unwrap();
    assert!(found.is_none());
    let found = engine
        .find_move(&board_with(7, ".......CAT....."), &rack("ZZ"), &LATER, &judge, &mut rng)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn disapproval_only_discards_that_move() {
    let words = ["CAT", "AT"];
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    for difficulty in [move_picker::Difficulty::Hard, move_picker::Difficulty::Easy] {
        let engine = make_engine(&words, config(difficulty));

        let judge = Arc::new(Blacklist(vec!["CAT".to_string()]));
        let (scored, stats) = engine
            .find_move_with_stats(&empty_board(), &rack("CAT"), &FIRST, &judge, &mut rng)
            .await
            .unwrap();
        assert_eq!(scored.unwrap().formed_words, vec!["AT".to_string()]);
        // CAT fits three ways along each axis.
        assert_eq!(stats.judge_rejects, 6);

        let judge = Arc::new(Broken("CAT".to_string()));
        let (scored, stats) = engine
            .find_move_with_stats(&empty_board(), &rack("CAT"), &FIRST, &judge, &mut rng)
            .await
            .unwrap();
        assert_eq!(scored.unwrap().score, 4);
        assert_eq!(stats.judge_failures, 6);
    }
}

#[tokio::test]
async fn medium_picks_from_the_approved_top_half() {
    let engine = make_engine(&["CAT", "AT"], config(move_picker::Difficulty::Medium));
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    // six CAT placements for 10 and four AT placements for 4: the top half
    // is all CAT.
    let judge = trie_judge(&engine);
    for _ in 0..50 {
        let scored = engine
            .find_move(&empty_board(), &rack("CAT"), &FIRST, &judge, &mut rng)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(scored.formed_words, vec!["CAT".to_string()]);
    }

    // with CAT turned down, the half is taken from what remains.
    let judge = Arc::new(Blacklist(vec!["CAT".to_string()]));
    for _ in 0..10 {
        let (scored, stats) = engine
            .find_move_with_stats(&empty_board(), &rack("CAT"), &FIRST, &judge, &mut rng)
            .await
            .unwrap();
        assert_eq!(scored.unwrap().formed_words, vec!["AT".to_string()]);
        assert_eq!(stats.judge_rejects, 6);
    }
}

#[tokio::test]
async fn pruned_words_return_when_the_judge_objects() {
    let engine = make_engine(&["ZA", "AA"], config(move_picker::Difficulty::Hard));
    let mut rng = ChaCha20Rng::seed_from_u64(10);

    // ZA scores 22 on the start, so AA (at most 18) is never tried.
    let outcome = engine.search_moves(&empty_board(), &rack("ZAA"), &FIRST).unwrap();
    assert_eq!(outcome.stats.pruned_words, 1);
    assert_eq!(outcome.candidates.len(), 4);

    let judge = Arc::new(Blacklist(vec!["ZA".to_string()]));
    let (scored, stats) = engine
        .find_move_with_stats(&empty_board(), &rack("ZAA"), &FIRST, &judge, &mut rng)
        .await
        .unwrap();
    let scored = scored.unwrap();
    assert_eq!(scored.formed_words, vec!["AA".to_string()]);
    assert_eq!(scored.score, 4);
    assert!(stats.searched_again);
    assert_eq!(stats.pruned_words, 0);
    // each ZA placement is asked about once.
    assert_eq!(stats.judge_rejects, 4);

    let judge = trie_judge(&engine);
    let (scored, stats) = engine
        .find_move_with_stats(&empty_board(), &rack("ZAA"), &FIRST, &judge, &mut rng)
        .await
        .unwrap();
    assert_eq!(scored.unwrap().score, 22);
    assert!(!stats.searched_again);
}

#[tokio::test]
async fn hazard_penalty_before_the_word_bonus() {
    let layout = board_layout::BoardLayout::from_rows(&["     ", "     ", "  *! ", "     ", "     "])
        .unwrap();
    let engine = make_engine(&["AT"], config(move_picker::Difficulty::Hard));
    let outcome = engine
        .search_moves(&board::Board::new(&layout), &rack("AT"), &FIRST)
        .unwrap();
    let mut scores = outcome.candidates.iter().map(|m| m.score).collect::<Vec<_>>();
    scores.sort_unstable();
    // A on the start and T on the hazard: (1 + 1 - 5) * 2.
    assert_eq!(scores, vec![-6, 4, 4, 4]);

    let judge = trie_judge(&engine);
    let mut rng = ChaCha20Rng::seed_from_u64(11);
    let scored = engine
        .find_move(&board::Board::new(&layout), &rack("AT"), &FIRST, &judge, &mut rng)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(scored.score, 4);
}

#[tokio::test]
async fn slow_judge_times_out() {
    let engine = make_engine(
        &["CAT", "AT"],
        game_config::EngineConfig {
            approval_timeout_ms: 20,
            ..config(move_picker::Difficulty::Hard)
        },
    );
    let judge = Arc::new(Slow("CAT".to_string()));
    let mut rng = ChaCha20Rng::seed_from_u64(6);
    let (scored, stats) = engine
        .find_move_with_stats(&empty_board(), &rack("CAT"), &FIRST, &judge, &mut rng)
        .await
        .unwrap();
    assert_eq!(scored.unwrap().formed_words, vec!["AT".to_string()]);
    assert_eq!(stats.judge_timeouts, 6);
}

#[tokio::test]
async fn search_budget() {
    let engine = make_engine(
        &["CAT", "ACT", "AT"],
        game_config::EngineConfig {
            max_attempts: Some(1),
            ..config(move_picker::Difficulty::Hard)
        },
    );
    let judge = trie_judge(&engine);
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let (scored, stats) = engine
        .find_move_with_stats(&empty_board(), &rack("CAT"), &FIRST, &judge, &mut rng)
        .await
        .unwrap();
    assert!(stats.budget_exhausted);
    assert!(scored.is_none());

    let engine = make_engine(
        &["CAT", "ACT", "AT"],
        game_config::EngineConfig {
            time_budget_ms: Some(0),
            ..config(move_picker::Difficulty::Hard)
        },
    );
    let outcome = engine.search_moves(&empty_board(), &rack("CAT"), &FIRST).unwrap();
    assert!(outcome.stats.budget_exhausted);
    assert!(outcome.candidates.is_empty());
}

#[tokio::test]
async fn independent_start_keeps_apart() {
    let engine = make_engine(&["CAT", "DOG"], config(move_picker::Difficulty::Hard));
    let judge = trie_judge(&engine);
    let board = board_with(0, "CAT............");
    let rules = move_validator::TurnRules {
        first_move: false,
        player_move_count: 0,
        independent_start: true,
    };
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    let scored = engine
        .find_move(&board, &rack("DOG"), &rules, &judge, &mut rng)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(scored.formed_words, vec!["DOG".to_string()]);
    assert!(scored.placement.iter().any(|p| (p.row, p.col) == (7, 7)));

    // the same rack has nothing to hang on once the player has moved.
    assert!(engine
        .find_move(&board, &rack("DOG"), &LATER, &judge, &mut rng)
        .await
        .unwrap()
        .is_none());
}
