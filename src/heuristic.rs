// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, board_layout, game_config};

const Q_WITHOUT_U: f32 = -8.0;
const UNBALANCED: f32 = -5.0;
const PER_EXTRA_COPY: f32 = -3.0;
const SKEWED_RATIO: f32 = -2.0;
const MAX_COPIES: u8 = 2;
const WORD_BONUS_TAKEN: f32 = 2.0;

// how much an opened premium square is worth to the opponent.
fn exposure_penalty(bonus: board_layout::Bonus) -> f32 {
    match bonus {
        board_layout::Bonus::TripleWord => 6.0,
        board_layout::Bonus::DoubleWord | board_layout::Bonus::Start => 4.0,
        board_layout::Bonus::TripleLetter => 3.0,
        board_layout::Bonus::DoubleLetter => 1.0,
        board_layout::Bonus::None | board_layout::Bonus::Hazard => 0.0,
    }
}

// Ranks moves for selection only. The awarded score never changes.
pub struct Heuristic<'a> {
    alphabet: &'a alphabet::Alphabet<'a>,
    leave_weight: f32,
    control_weight: f32,
}

impl<'a> Heuristic<'a> {
    pub fn new(alphabet: &'a alphabet::Alphabet<'a>, engine_config: &game_config::EngineConfig) -> Self {
        Self {
            alphabet,
            leave_weight: engine_config.leave_weight,
            control_weight: engine_config.control_weight,
        }
    }

    // Never positive. Wildcards are neither vowels nor consonants.
    pub fn rack_leave_penalty(&self, leave: &[board::Tile]) -> f32 {
        let mut penalty = 0.0;
        let mut counts = [0u8; alphabet::NUM_LETTERS];
        let mut num_vowels = 0;
        let mut num_consonants = 0;
        for tile in leave {
            let Some(idx) = alphabet::Alphabet::index_of(tile.letter) else {
                continue;
            };
            counts[idx] += 1;
            if self.alphabet.is_vowel(tile.letter) {
                num_vowels += 1;
            } else {
                num_consonants += 1;
            }
        }
        let count_of = |letter: u8| alphabet::Alphabet::index_of(letter).map_or(0, |idx| counts[idx]);
        if count_of(b'Q') > 0 && count_of(b'U') == 0 {
            penalty += Q_WITHOUT_U;
        }
        let num_letters = num_vowels + num_consonants;
        if num_letters >= 2 && (num_vowels == 0 || num_consonants == 0) {
            penalty += UNBALANCED;
        }
        for &count in &counts {
            if count > MAX_COPIES {
                penalty += PER_EXTRA_COPY * (count - MAX_COPIES) as f32;
            }
        }
        if num_letters >= 3 {
            let ratio = num_vowels as f32 / num_letters as f32;
            if !(0.25..=0.75).contains(&ratio) {
                penalty += SKEWED_RATIO;
            }
        }
        penalty
    }

    // Negative for every premium square the move leaves open next to its
    // tiles, positive for every word premium it uses up.
    pub fn board_control_score(&self, board: &board::Board, placed: &[board::PlacedTile]) -> f32 {
        let dim = board.dim();
        let is_placed = |row: i8, col: i8| placed.iter().any(|p| p.row == row && p.col == col);
        let mut exposed = Vec::new();
        let mut score = 0.0;
        for p in placed {
            if board.bonus_at(p.row, p.col).is_word_bonus() {
                score += WORD_BONUS_TAKEN;
            }
            for (r, c) in dim.neighbors(p.row, p.col) {
                if board.is_occupied(r, c) || is_placed(r, c) || exposed.contains(&(r, c)) {
                    continue;
                }
                let penalty = exposure_penalty(board.bonus_at(r, c));
                if penalty > 0.0 {
                    exposed.push((r, c));
                    score -= penalty;
                }
            }
        }
        score
    }

    pub fn selection_score(&self, score: i32, leave_penalty: f32, control: f32) -> f32 {
        score as f32 + leave_penalty * self.leave_weight + control * self.control_weight
    }
}

// What stays on the rack after the placement.
pub fn leave_after(rack: &[board::Tile], placed: &[board::PlacedTile]) -> Vec<board::Tile> {
    rack.iter()
        .filter(|tile| !placed.iter().any(|p| p.tile.id == tile.id))
        .copied()
        .collect()
}
