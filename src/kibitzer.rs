// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet, board, board_layout, display, engine, error, matrix, move_picker, move_validator,
};

// board: one string per row. '.' for empty, 'A' for A, 'a' for blank-as-A.
// layout: optional, one string per row of bonus symbols (see
// board_layout::Bonus::from_symbol). the standard 15x15 board if absent.
// rack: letters, '?' for an unplayed blank.
// move_count: how many moves the player to move has made so far.
#[derive(serde::Deserialize, Debug, Default)]
#[serde(default)]
pub struct Question {
    pub board: Vec<String>,
    pub layout: Option<Vec<String>>,
    pub rack: String,
    pub difficulty: Option<move_picker::Difficulty>,
    pub move_count: u32,
    pub independent_start: bool,
    pub lexicon: Option<String>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct JsonTile {
    pub row: i8,
    pub col: i8,
    pub letter: char, // lowercase for a blank
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "action")]
pub enum JsonAnswer {
    #[serde(rename = "play")]
    Play {
        axis: matrix::Axis,
        words: Vec<String>,
        score: i32,
        tiles: Vec<JsonTile>,
    },
    #[serde(rename = "pass")]
    Pass,
}

impl From<&board::PlacedTile> for JsonTile {
    #[inline(always)]
    fn from(p: &board::PlacedTile) -> Self {
        Self {
            row: p.row,
            col: p.col,
            letter: display::tile_label(&p.tile),
        }
    }
}

impl From<Option<&engine::ScoredMove>> for JsonAnswer {
    fn from(scored: Option<&engine::ScoredMove>) -> Self {
        match scored {
            None => Self::Pass,
            Some(scored) => Self::Play {
                axis: scored.axis,
                words: scored.formed_words.clone(),
                score: scored.score,
                tiles: scored.placement.iter().map(JsonTile::from).collect(),
            },
        }
    }
}

// Turns a Question into what the engine reads, checking that the tiles on the
// board and rack fit in one bag.
pub struct Kibitzer {
    pub available_tally: Vec<u8>, // A-Z, then wildcards
    pub board: Option<board::Board>,
    pub rack: Vec<board::Tile>,
}

impl Kibitzer {
    pub fn new() -> Self {
        Self {
            available_tally: Vec::new(),
            board: None,
            rack: Vec::new(),
        }
    }

    fn take(&mut self, alphabet: &alphabet::Alphabet, tile: &board::Tile) -> error::Returns<()> {
        let (idx, letter) = if tile.is_blank {
            (alphabet::NUM_LETTERS, alphabet::WILDCARD)
        } else {
            match alphabet::Alphabet::index_of(tile.letter) {
                Some(idx) => (idx, tile.letter),
                None => {
                    return_error!(format!("invalid tile {:?}", tile.letter as char));
                }
            }
        };
        if self.available_tally[idx] > 0 {
            self.available_tally[idx] -= 1;
        } else {
            return_error!(format!(
                "too many tile {} (bag contains only {})",
                letter as char,
                alphabet.freq(letter),
            ));
        }
        Ok(())
    }

    pub fn prepare(&mut self, alphabet: &alphabet::Alphabet, question: &Question) -> error::Returns<()> {
        self.available_tally.clear();
        self.available_tally.extend(alphabet.labels().map(|letter| alphabet.freq(letter)));
        self.available_tally.push(alphabet.freq(alphabet::WILDCARD));

        let layout = match &question.layout {
            Some(rows) => board_layout::BoardLayout::from_rows(&rows[..])?,
            None => board_layout::make_standard_board_layout(),
        };
        let board = board::Board::from_strings(&layout, alphabet, &question.board[..])?;
        let rack = board::rack_from_str(alphabet, &question.rack, 0, board.num_tiles() as u32)?;
        for cell in board.cells() {
            if let Some(tile) = &cell.tile {
                self.take(alphabet, tile)?;
            }
        }
        for tile in &rack {
            self.take(alphabet, tile)?;
        }
        self.board = Some(board);
        self.rack = rack;
        Ok(())
    }

    pub fn turn_rules(&self, question: &Question) -> move_validator::TurnRules {
        move_validator::TurnRules {
            first_move: self.board.as_ref().is_none_or(|board| board.is_empty_board()),
            player_move_count: question.move_count,
            independent_start: question.independent_start,
        }
    }
}

impl Default for Kibitzer {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
