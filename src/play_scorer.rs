// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, board_layout, game_config, move_validator};

pub struct PlayScorer {
    rack_size: usize,
    full_rack_bonus: i32,
    hazard_penalty: i32,
}

impl PlayScorer {
    pub fn new(engine_config: &game_config::EngineConfig) -> Self {
        Self {
            rack_size: engine_config.rack_size,
            full_rack_bonus: engine_config.full_rack_bonus,
            hazard_penalty: engine_config.hazard_penalty,
        }
    }

    // Letter and word premiums only count on newly placed cells. Tiles already
    // on the board score their face value.
    fn score_run(&self, overlay: &move_validator::Overlay, run: &[(i8, i8)]) -> i32 {
        if run.len() < 2 {
            return 0;
        }
        let board = overlay.board();
        let mut word_multiplier = 1;
        let mut word_score = 0;
        let mut num_hazards = 0;
        for &(row, col) in run {
            if let Some(p) = overlay.placed_at(row, col) {
                let bonus = board.bonus_at(row, col);
                let premium = bonus.premium();
                word_multiplier *= premium.word_multiplier as i32;
                word_score += p.tile.value as i32 * premium.letter_multiplier as i32;
                if bonus == board_layout::Bonus::Hazard {
                    num_hazards += 1;
                }
            } else if let Some(tile) = board.tile_at(row, col) {
                word_score += tile.value as i32;
            }
        }
        (word_score - num_hazards * self.hazard_penalty) * word_multiplier
    }

    // Assumes the placement passed move_validator::validate_move.
    pub fn compute_score(&self, board: &board::Board, placed: &[board::PlacedTile]) -> i32 {
        let Some(axis) = move_validator::placement_axis(board, placed) else {
            return 0;
        };
        let overlay = move_validator::Overlay::new(board, placed);
        let first = &placed[0];
        let mut score = self.score_run(&overlay, &overlay.run(first.row, first.col, axis));
        for p in placed {
            score += self.score_run(&overlay, &overlay.run(p.row, p.col, axis.perpendicular()));
        }
        if placed.len() == self.rack_size {
            score += self.full_rack_bonus;
        }
        score
    }
}
