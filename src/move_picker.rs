// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, engine, error};
use rand::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl std::str::FromStr for Difficulty {
    type Err = error::MyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(error::new(format!("unknown difficulty {:?}", s))),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

impl Difficulty {
    // Only the top tier needs the best move, so only it prunes.
    #[inline(always)]
    pub fn prunes(self) -> bool {
        self == Difficulty::Hard
    }

    // how many of the best-ranked moves are in the running.
    #[inline(always)]
    pub fn pool_size(self, num_candidates: usize) -> usize {
        match self {
            Difficulty::Hard => num_candidates.min(1),
            Difficulty::Medium => num_candidates.div_ceil(2),
            Difficulty::Easy => num_candidates,
        }
    }
}

#[inline(always)]
fn ranking_key(candidate: &engine::ScoredMove, use_heuristics: bool) -> f32 {
    if use_heuristics {
        candidate.selection_score
    } else {
        candidate.score as f32
    }
}

// Sorts candidates best first in place, ties in random order.
pub fn rank_moves<R: Rng + ?Sized>(candidates: &mut [engine::ScoredMove], use_heuristics: bool, rng: &mut R) {
    candidates.shuffle(rng);
    candidates.sort_by(|a, b| ranking_key(b, use_heuristics).total_cmp(&ranking_key(a, use_heuristics)));
}

pub fn pick_move<R: Rng + ?Sized>(
    mut candidates: Vec<engine::ScoredMove>,
    difficulty: Difficulty,
    use_heuristics: bool,
    rng: &mut R,
) -> Option<engine::ScoredMove> {
    rank_moves(&mut candidates, use_heuristics, rng);
    pick_ranked(candidates, difficulty, rng)
}

// ranked must already be best first, see rank_moves.
pub fn pick_ranked<R: Rng + ?Sized>(
    mut ranked: Vec<engine::ScoredMove>,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<engine::ScoredMove> {
    let pool_size = difficulty.pool_size(ranked.len());
    if pool_size == 0 {
        return None;
    }
    let idx = rng.random_range(0..pool_size);
    Some(ranked.swap_remove(idx))
}

// Nothing placed from word can outscore this: every letter on a triple
// letter inside a triple word, plus the bonus for emptying the rack.
pub fn loose_upper_bound(
    alphabet: &alphabet::Alphabet,
    word: &str,
    rack_size: usize,
    full_rack_bonus: i32,
) -> i32 {
    let face_values = word.bytes().map(|b| alphabet.score(b) as i32).sum::<i32>();
    let mut bound = 9 * face_values;
    if word.len() >= rack_size {
        bound += full_rack_bonus;
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alphabet::ENGLISH_ALPHABET, matrix};
    use rand_chacha::ChaCha20Rng;

    fn scored(score: i32, selection_score: f32) -> engine::ScoredMove {
        engine::ScoredMove {
            axis: matrix::Axis::Across,
            formed_words: vec![format!("W{}", score)],
            placement: Vec::new(),
            score,
            selection_score,
        }
    }

    fn pool() -> Vec<engine::ScoredMove> {
        (1..=10).map(|i| scored(i, i as f32)).collect()
    }

    #[test]
    fn nothing_to_pick() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert!(pick_move(Vec::new(), Difficulty::Hard, true, &mut rng).is_none());
        assert!(pick_move(Vec::new(), Difficulty::Easy, true, &mut rng).is_none());
    }

    #[test]
    fn hard_takes_the_best() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..20 {
            let picked = pick_move(pool(), Difficulty::Hard, true, &mut rng).unwrap();
            assert_eq!(picked.score, 10);
        }
        // heuristics off ranks by the awarded score.
        let candidates = vec![scored(30, 1.0), scored(20, 50.0)];
        assert_eq!(pick_move(candidates.clone(), Difficulty::Hard, false, &mut rng).unwrap().score, 30);
        assert_eq!(pick_move(candidates, Difficulty::Hard, true, &mut rng).unwrap().score, 20);
    }

    #[test]
    fn medium_stays_in_the_top_half() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut seen = [false; 11];
        for _ in 0..500 {
            let picked = pick_move(pool(), Difficulty::Medium, true, &mut rng).unwrap();
            assert!(picked.score > 5);
            seen[picked.score as usize] = true;
        }
        assert!(seen[6..].iter().all(|&x| x));
        assert_eq!(Difficulty::Medium.pool_size(5), 3);
    }

    #[test]
    fn easy_spreads_out() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut counts = [0u32; 11];
        for _ in 0..5000 {
            counts[pick_move(pool(), Difficulty::Easy, true, &mut rng).unwrap().score as usize] += 1;
        }
        // about 500 each.
        assert!(counts[1..].iter().all(|&n| (350..650).contains(&n)), "{:?}", counts);
    }

    #[test]
    fn ranked_order_is_kept() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let ranked = pool().into_iter().rev().collect::<Vec<_>>();
        assert!(pick_ranked(Vec::new(), Difficulty::Medium, &mut rng).is_none());
        assert_eq!(pick_ranked(ranked.clone(), Difficulty::Hard, &mut rng).unwrap().score, 10);
        // no reranking: the first entry wins even when it is not the best.
        let unsorted = vec![scored(1, 1.0), scored(9, 9.0)];
        assert_eq!(pick_ranked(unsorted, Difficulty::Hard, &mut rng).unwrap().score, 1);
        for _ in 0..50 {
            assert!(pick_ranked(ranked.clone(), Difficulty::Medium, &mut rng).unwrap().score > 5);
        }
    }

    #[test]
    fn parse_difficulty() {
        assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("brutal".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn bound() {
        assert_eq!(loose_upper_bound(&ENGLISH_ALPHABET, "CAT", 7, 50), 45);
        assert_eq!(loose_upper_bound(&ENGLISH_ALPHABET, "RETAINS", 7, 50), 63 + 50);
    }
}
