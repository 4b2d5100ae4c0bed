// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet, anchor, board, candidates, cross_set, error, game_config, heuristic, matrix,
    move_picker, move_validator, placement, play_scorer, trie,
};
use rand::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScoredMove {
    pub axis: matrix::Axis,
    pub formed_words: Vec<String>, // main word first
    #[serde(skip)]
    pub placement: Vec<board::PlacedTile>,
    pub score: i32,
    pub selection_score: f32,
}

// The authority on whether formed words are acceptable. Ok holds the words
// it rejects, so an empty list approves the move.
pub trait WordJudge: Send + Sync + 'static {
    fn approve(
        &self,
        words: &[String],
    ) -> impl Future<Output = Result<Vec<String>, error::MyError>> + Send;
}

pub struct TrieJudge {
    lexicon: Arc<trie::Trie>,
}

impl TrieJudge {
    pub fn new(lexicon: Arc<trie::Trie>) -> Self {
        Self { lexicon }
    }
}

impl WordJudge for TrieJudge {
    fn approve(
        &self,
        words: &[String],
    ) -> impl Future<Output = Result<Vec<String>, error::MyError>> + Send {
        let invalid = words
            .iter()
            .filter(|word| !self.lexicon.contains(word))
            .cloned()
            .collect::<Vec<_>>();
        async move { Ok(invalid) }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub num_words: u64,
    pub num_anchors: u64,
    pub placements_tried: u64,
    pub placement_rejects: u64,
    pub validation_rejects: u64,
    pub dictionary_rejects: u64,
    pub duplicates: u64,
    pub pruned_words: u64,
    pub candidates: u64,
    pub judge_rejects: u64,
    pub judge_failures: u64,
    pub judge_timeouts: u64,
    pub budget_exhausted: bool,
    pub searched_again: bool,
}

impl SearchStats {
    fn merge(&mut self, other: &SearchStats) {
        self.placements_tried += other.placements_tried;
        self.placement_rejects += other.placement_rejects;
        self.validation_rejects += other.validation_rejects;
        self.dictionary_rejects += other.dictionary_rejects;
        self.duplicates += other.duplicates;
        self.pruned_words += other.pruned_words;
    }

    fn carry_judge_counts(&mut self, from: &SearchStats) {
        self.judge_rejects += from.judge_rejects;
        self.judge_failures += from.judge_failures;
        self.judge_timeouts += from.judge_timeouts;
    }

    fn count(&mut self, approval: &Approval) {
        match approval {
            Approval::Approved => {}
            Approval::Rejected(_) => self.judge_rejects += 1,
            Approval::Failed(_) => self.judge_failures += 1,
            Approval::TimedOut => self.judge_timeouts += 1,
        }
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "words {} anchors {} tried {} (rejected: placement {} validation {} dictionary {}; duplicates {}) pruned {} candidates {} judge (rejected {} failed {} timed out {}){}{}",
            self.num_words,
            self.num_anchors,
            self.placements_tried,
            self.placement_rejects,
            self.validation_rejects,
            self.dictionary_rejects,
            self.duplicates,
            self.pruned_words,
            self.candidates,
            self.judge_rejects,
            self.judge_failures,
            self.judge_timeouts,
            if self.budget_exhausted { " budget exhausted" } else { "" },
            if self.searched_again { " searched again" } else { "" },
        )
    }
}

pub struct SearchOutcome {
    pub candidates: Vec<ScoredMove>,
    pub stats: SearchStats,
}

enum Approval {
    Approved,
    Rejected(Vec<String>),
    Failed(error::MyError),
    TimedOut,
}

async fn approve<J: WordJudge>(judge: &J, words: &[String], timeout: Duration) -> Approval {
    match tokio::time::timeout(timeout, judge.approve(words)).await {
        Ok(Ok(invalid)) if invalid.is_empty() => Approval::Approved,
        Ok(Ok(invalid)) => Approval::Rejected(invalid),
        Ok(Err(err)) => Approval::Failed(err),
        Err(_) => Approval::TimedOut,
    }
}

#[derive(Default)]
struct Found {
    moves: BTreeMap<placement::PlacementKey, ScoredMove>,
    stats: SearchStats,
}

// Per-invocation state, shared read-only by the workers apart from the
// atomics.
struct Search<'a> {
    lexicon: &'a trie::Trie,
    config: &'a game_config::EngineConfig,
    board: &'a board::Board,
    rack: &'a [board::Tile],
    rules: move_validator::TurnRules,
    prune: bool,
    cross_sets: cross_set::CrossSets,
    anchors: Vec<(i8, i8)>,
    scorer: play_scorer::PlayScorer,
    heuristic: heuristic::Heuristic<'a>,
    deadline: Option<Instant>,
    cursor: AtomicUsize,
    best_score: AtomicI32,
    attempts: AtomicU64,
    stop: AtomicBool,
}

impl Search<'_> {
    fn out_of_budget(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        let over = self
            .config
            .max_attempts
            .is_some_and(|max| self.attempts.fetch_add(1, Ordering::Relaxed) >= max)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        if over {
            self.stop.store(true, Ordering::Relaxed);
        }
        over
    }

    fn evaluate(&self, placed: Vec<board::PlacedTile>, found: &mut Found) {
        let key = placement::placement_key(&placed);
        if found.moves.contains_key(&key) {
            found.stats.duplicates += 1;
            return;
        }
        let validated = match move_validator::validate_move(self.board, &placed, &self.rules) {
            Ok(validated) => validated,
            Err(_) => {
                found.stats.validation_rejects += 1;
                return;
            }
        };
        if !validated
            .formed_words
            .iter()
            .all(|word| self.lexicon.contains(word))
        {
            found.stats.dictionary_rejects += 1;
            return;
        }
        let score = self.scorer.compute_score(self.board, &validated.placement);
        let selection_score = if self.config.use_heuristics {
            let leave = heuristic::leave_after(self.rack, &validated.placement);
            self.heuristic.selection_score(
                score,
                self.heuristic.rack_leave_penalty(&leave),
                self.heuristic
                    .board_control_score(self.board, &validated.placement),
            )
        } else {
            score as f32
        };
        self.best_score.fetch_max(score, Ordering::Relaxed);
        found.moves.insert(
            key,
            ScoredMove {
                axis: validated.axis,
                formed_words: validated.formed_words,
                placement: validated.placement,
                score,
                selection_score,
            },
        );
    }

    fn try_hooks(&self, found: &mut Found) {
        for &anchor in &self.anchors {
            for hook in placement::single_tile_hooks(self.board, self.rack, anchor, &self.cross_sets) {
                if self.out_of_budget() {
                    return;
                }
                found.stats.placements_tried += 1;
                self.evaluate(hook.placement, found);
            }
        }
    }

    // words are (bound, word), best bound first.
    fn run_worker(&self, words: &[(i32, String)]) -> Found {
        let mut found = Found::default();
        'words: loop {
            let i = self.cursor.fetch_add(1, Ordering::Relaxed);
            let Some((bound, word)) = words.get(i) else {
                break;
            };
            if self.prune && *bound <= self.best_score.load(Ordering::Relaxed) {
                found.stats.pruned_words += 1;
                continue;
            }
            for axis in matrix::Axis::BOTH {
                for &anchor in &self.anchors {
                    for offset in 0..word.len() as i8 {
                        if self.out_of_budget() {
                            break 'words;
                        }
                        found.stats.placements_tried += 1;
                        match placement::try_place(
                            self.board,
                            word,
                            self.rack,
                            anchor,
                            axis,
                            offset,
                            &self.cross_sets,
                        ) {
                            Ok(placed) => self.evaluate(placed, &mut found),
                            Err(_) => found.stats.placement_rejects += 1,
                        }
                    }
                }
            }
        }
        found
    }
}

pub struct Engine<'a> {
    alphabet: &'a alphabet::Alphabet<'a>,
    lexicon: Arc<trie::Trie>,
    config: game_config::EngineConfig,
}

impl<'a> Engine<'a> {
    pub fn new(
        alphabet: &'a alphabet::Alphabet<'a>,
        lexicon: Arc<trie::Trie>,
        config: game_config::EngineConfig,
    ) -> Self {
        Self {
            alphabet,
            lexicon,
            config,
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &game_config::EngineConfig {
        &self.config
    }

    #[inline(always)]
    pub fn lexicon(&self) -> &Arc<trie::Trie> {
        &self.lexicon
    }

    fn check_rack(rack: &[board::Tile]) -> error::Returns<()> {
        if rack.is_empty() {
            return_error!("rack is empty".into());
        }
        if rack.len() >= candidates::MAX_SLOTS {
            return_error!(format!(
                "rack has {} tiles, at most {} are supported",
                rack.len(),
                candidates::MAX_SLOTS - 1
            ));
        }
        for tile in rack {
            if !tile.is_wildcard() && !tile.letter.is_ascii_uppercase() {
                return_error!(format!("rack has invalid tile {:?}", tile.letter as char));
            }
        }
        Ok(())
    }

    // Every legal, dictionary-checked placement for the rack, scored. The
    // external judge is not consulted. The hard tier may skip words that
    // cannot beat the best score found so far.
    pub fn search_moves(
        &self,
        board: &board::Board,
        rack: &[board::Tile],
        rules: &move_validator::TurnRules,
    ) -> error::Returns<SearchOutcome> {
        self.search(board, rack, rules, self.config.difficulty.prunes())
    }

    fn search(
        &self,
        board: &board::Board,
        rack: &[board::Tile],
        rules: &move_validator::TurnRules,
        prune: bool,
    ) -> error::Returns<SearchOutcome> {
        Self::check_rack(rack)?;
        let rules = move_validator::TurnRules {
            independent_start: rules.independent_start || self.config.independent_start,
            ..*rules
        };
        let dim = board.dim();
        let max_len = self
            .config
            .max_word_len
            .min(std::cmp::max(dim.rows, dim.cols) as usize);
        let lexicon = self.lexicon.as_ref();

        let mut word_set = candidates::generate_words(lexicon, rack, max_len);
        if !board.is_empty_board() && !rules.independent_start_active() {
            for letter in board.distinct_letters() {
                word_set.extend(candidates::generate_words_with_board_letter(
                    lexicon, rack, letter, max_len,
                ));
            }
        }
        let mut words = word_set
            .into_iter()
            .map(|word| {
                let bound = move_picker::loose_upper_bound(
                    self.alphabet,
                    &word,
                    self.config.rack_size,
                    self.config.full_rack_bonus,
                );
                (bound, word)
            })
            .collect::<Vec<_>>();
        words.sort_by(|a, b| b.0.cmp(&a.0));

        let cross_sets = cross_set::CrossSets::compute(board, lexicon);
        let search = Search {
            lexicon,
            config: &self.config,
            board,
            rack,
            rules,
            prune,
            anchors: anchor::find_anchors(board, &cross_sets, rules.independent_start_active()),
            cross_sets,
            scorer: play_scorer::PlayScorer::new(&self.config),
            heuristic: heuristic::Heuristic::new(self.alphabet, &self.config),
            deadline: self
                .config
                .time_budget_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            cursor: AtomicUsize::new(0),
            best_score: AtomicI32::new(i32::MIN),
            attempts: AtomicU64::new(0),
            stop: AtomicBool::new(false),
        };

        let mut found = Found::default();
        found.stats.num_words = words.len() as u64;
        found.stats.num_anchors = search.anchors.len() as u64;
        if search.anchors.is_empty() {
            return Ok(SearchOutcome {
                candidates: Vec::new(),
                stats: found.stats,
            });
        }
        search.try_hooks(&mut found);

        let num_workers = self.config.worker_count().min(words.len());
        let results = std::thread::scope(|s| {
            let handles = (0..num_workers)
                .map(|_| s.spawn(|| search.run_worker(&words)))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        });
        for result in results {
            let Ok(worker_found) = result else {
                return_error!("search worker panicked".into());
            };
            found.stats.merge(&worker_found.stats);
            for (key, scored) in worker_found.moves {
                if found.moves.contains_key(&key) {
                    found.stats.duplicates += 1;
                } else {
                    found.moves.insert(key, scored);
                }
            }
        }
        found.stats.budget_exhausted = search.stop.load(Ordering::Relaxed);
        found.stats.candidates = found.moves.len() as u64;
        Ok(SearchOutcome {
            candidates: found.moves.into_values().collect(),
            stats: found.stats,
        })
    }

    pub async fn find_move<J: WordJudge, R: Rng + ?Sized>(
        &self,
        board: &board::Board,
        rack: &[board::Tile],
        rules: &move_validator::TurnRules,
        judge: &Arc<J>,
        rng: &mut R,
    ) -> error::Returns<Option<ScoredMove>> {
        Ok(self
            .find_move_with_stats(board, rack, rules, judge, rng)
            .await?
            .0)
    }

    // None means there is nothing to play: pass.
    pub async fn find_move_with_stats<J: WordJudge, R: Rng + ?Sized>(
        &self,
        board: &board::Board,
        rack: &[board::Tile],
        rules: &move_validator::TurnRules,
        judge: &Arc<J>,
        rng: &mut R,
    ) -> error::Returns<(Option<ScoredMove>, SearchStats)> {
        let SearchOutcome {
            mut candidates,
            mut stats,
        } = self.search_moves(board, rack, rules)?;
        let mut verdicts = BTreeMap::new();
        move_picker::rank_moves(&mut candidates, self.config.use_heuristics, rng);
        let mut approved = self
            .approve_ranked(candidates, judge, &mut verdicts, &mut stats)
            .await;

        // Words were pruned against scores the judge had not seen. Once it
        // turns any of those down, the pruned words may hold the best
        // approved move.
        if stats.pruned_words > 0 && verdicts.values().any(|&ok| !ok) {
            let SearchOutcome {
                mut candidates,
                stats: full_stats,
            } = self.search(board, rack, rules, false)?;
            let judged = std::mem::replace(&mut stats, full_stats);
            stats.carry_judge_counts(&judged);
            stats.searched_again = true;
            move_picker::rank_moves(&mut candidates, self.config.use_heuristics, rng);
            approved = self
                .approve_ranked(candidates, judge, &mut verdicts, &mut stats)
                .await;
        }

        let chosen = move_picker::pick_ranked(approved, self.config.difficulty, rng);
        if self.config.verbose {
            eprintln!("{}", stats);
        }
        Ok((chosen, stats))
    }

    // The approved subset of ranked, in the same order. Hard only needs the
    // first one, so it asks one candidate at a time. The other tiers ask
    // about everything at once. verdicts remembers answers by placement so
    // no candidate is judged twice.
    async fn approve_ranked<J: WordJudge>(
        &self,
        ranked: Vec<ScoredMove>,
        judge: &Arc<J>,
        verdicts: &mut BTreeMap<placement::PlacementKey, bool>,
        stats: &mut SearchStats,
    ) -> Vec<ScoredMove> {
        let timeout = Duration::from_millis(self.config.approval_timeout_ms);

        if self.config.difficulty == move_picker::Difficulty::Hard {
            for candidate in ranked {
                let key = placement::placement_key(&candidate.placement);
                let ok = match verdicts.get(&key) {
                    Some(&ok) => ok,
                    None => {
                        let approval =
                            approve(judge.as_ref(), &candidate.formed_words, timeout).await;
                        let ok = matches!(approval, Approval::Approved);
                        if !ok {
                            self.report_disapproval(&candidate, &approval);
                            stats.count(&approval);
                        }
                        verdicts.insert(key, ok);
                        ok
                    }
                };
                if ok {
                    return vec![candidate];
                }
            }
            return Vec::new();
        }

        let keys = ranked
            .iter()
            .map(|candidate| placement::placement_key(&candidate.placement))
            .collect::<Vec<_>>();
        let mut tasks = tokio::task::JoinSet::new();
        for (idx, (candidate, key)) in ranked.iter().zip(keys.iter()).enumerate() {
            if verdicts.contains_key(key) {
                continue;
            }
            let judge = Arc::clone(judge);
            let words = candidate.formed_words.clone();
            tasks.spawn(async move { (idx, approve(judge.as_ref(), &words, timeout).await) });
        }
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, approval)) => {
                    let ok = matches!(approval, Approval::Approved);
                    if !ok {
                        self.report_disapproval(&ranked[idx], &approval);
                        stats.count(&approval);
                    }
                    verdicts.insert(keys[idx].clone(), ok);
                }
                Err(_) => stats.judge_failures += 1,
            }
        }
        ranked
            .into_iter()
            .zip(keys)
            .filter_map(|(candidate, key)| {
                verdicts
                    .get(&key)
                    .is_some_and(|&ok| ok)
                    .then_some(candidate)
            })
            .collect()
    }

    fn report_disapproval(&self, candidate: &ScoredMove, approval: &Approval) {
        if !self.config.verbose {
            return;
        }
        match approval {
            Approval::Approved => {}
            Approval::Rejected(words) => {
                eprintln!("judge rejected {:?} in {:?}", words, candidate.formed_words)
            }
            Approval::Failed(err) => {
                eprintln!("judge failed on {:?}: {}", candidate.formed_words, err)
            }
            Approval::TimedOut => eprintln!("judge timed out on {:?}", candidate.formed_words),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alphabet::ENGLISH_ALPHABET, board::rack_from_str, board_layout::make_standard_board_layout};

    fn engine(words: &[&str]) -> Engine<'static> {
        let config = game_config::EngineConfig {
            num_threads: Some(2),
            ..game_config::make_standard_engine_config()
        };
        Engine::new(&ENGLISH_ALPHABET, Arc::new(trie::Trie::build(words)), config)
    }

    #[test]
    fn empty_rack_is_an_input_error() {
        let board = board::Board::new(&make_standard_board_layout());
        let rules = move_validator::TurnRules::default();
        assert!(engine(&["CAT"]).search_moves(&board, &[], &rules).is_err());
        let rack = rack_from_str(&ENGLISH_ALPHABET, &"E".repeat(32), 0, 0).unwrap();
        assert!(engine(&["CAT"]).search_moves(&board, &rack, &rules).is_err());
    }

    #[test]
    fn opening_search() {
        let board = board::Board::new(&make_standard_board_layout());
        let rack = rack_from_str(&ENGLISH_ALPHABET, "TAC", 0, 0).unwrap();
        let rules = move_validator::TurnRules {
            first_move: true,
            ..Default::default()
        };
        let outcome = engine(&["CAT", "ACT", "AT"]).search_moves(&board, &rack, &rules).unwrap();
        // every placement covers the start cell.
        assert!(outcome
            .candidates
            .iter()
            .all(|m| m.placement.iter().any(|p| (p.row, p.col) == (7, 7))));
        // CAT and ACT along both axes at three offsets, AT at two.
        assert_eq!(outcome.candidates.len(), 2 * (3 + 3 + 2));
        assert_eq!(outcome.candidates.iter().map(|m| m.score).max(), Some(10));
        assert_eq!(outcome.stats.candidates, 16);
    }

    #[test]
    fn stats_line() {
        let stats = SearchStats {
            budget_exhausted: true,
            ..Default::default()
        };
        assert!(stats.to_string().ends_with("budget exhausted"));
    }
}
